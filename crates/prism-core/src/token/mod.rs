//! `token` 模块把编译期可得的泛型签名捕获为可比较的运行时令牌。
//!
//! # 模块设计（Why）
//! - 定位序列化器需要在运行时比较“完整参数化的泛型形状”，而这类结构通常只存在于编译期；
//!   本模块以三层结构补齐缺口：基类标识（[`TypeBasis`]）、语法签名（[`TypeExpr`]）
//!   与不可变令牌（[`TypeToken`]）。
//! - 捕获机制只要求“读取静态声明处的参数化签名”，不依赖任何运行时值；
//!   反射前端或构建期生成器负责产出 [`TypeExpr`]，本模块只消费其结构描述。
//!
//! # 使用指引（How）
//! - 启动期以 [`TypeBasis::new`]/[`TypeBasis::extending`] 声明基类与其父类型边；
//! - 捕获点构造 [`TypeExpr`] 并调用 [`TypeToken::capture`]，签名中残留自由类型变量会立即失败；
//! - 已完全解析的形状可经 [`TypeToken::of`]/[`TypeToken::parameterized`] 直接构造。
//!
//! # 契约说明（What）
//! - 令牌一经构造永不可变，进程生命周期内共享，无需同步即可跨线程读取。
//! - 相等性是结构性的且参数顺序敏感；原始类型（零参数）的放宽只发生在兼容性判定，
//!   绝不渗入相等性与哈希。

mod basis;
mod expr;
mod type_token;

pub use basis::TypeBasis;
pub use expr::TypeExpr;
pub use type_token::TypeToken;
