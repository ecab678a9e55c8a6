//! `locator` 模块实现编解码注册中心：按类型令牌定位序列化器/反序列化器并记忆化结果。
//!
//! # 模块设计（Why）
//! - 调用点的契约只有一条：“给定请求令牌，返回编解码能力或失败”；
//!   注册中心把该契约拆为注册期（构建器收集生产者）与查询期（变型匹配加裁决）两个阶段。
//! - 注册在发布前全部完成（happens-before 所有读取），已发布的注册表只读，
//!   唯一的可变共享状态是查询结果的记忆化缓存。
//!
//! # 使用指引（How）
//! - 组合根使用 [`SerdeRegistryBuilder`] 注册实例或工厂，`build()` 产出不可变的 [`SerdeRegistry`]；
//! - 需要进程级共享时经 [`SharedRegistry`] 发布，读路径在 `std` 下锁自由；
//! - 查询按变型语义选择入口：生产者走协变（[`SerdeRegistry::find_covariant_serializer`]），
//!   消费者走不变（[`SerdeRegistry::find_invariant_deserializer`]）。
//!
//! # 契约说明（What）
//! - 零候选与裁决失败分别以 `serde.no_*` 与 `serde.ambiguous_candidates` 上浮，绝不任意选取；
//! - 裁决顺序固定：精确结构匹配优先于放宽匹配，其次唯一的 primary 注册，最后报歧义。
//!
//! # 风险提示（Trade-offs）
//! - 记忆化缓存无上界不逐出，键空间受应用实际请求的令牌集合约束；
//!   工厂注册在每次解析时重新实例化，需要单例语义请注册实例。

mod registry;
mod shared;

pub use registry::{
    DeserializerRegistration, Registration, SerdeRegistry, SerdeRegistryBuilder,
    SerializerRegistration,
};
pub use shared::SharedRegistry;
