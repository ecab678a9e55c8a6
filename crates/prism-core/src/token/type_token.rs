use super::{TypeBasis, TypeExpr};
use crate::error::{CoreError, codes};
use alloc::{boxed::Box, format, vec::Vec};
use core::fmt;

/// `TypeToken` 是完整参数化泛型类型的不可变结构化表示。
///
/// # 设计背景（Why）
/// - 定位与缓存都要求令牌可比较、可哈希、可排序：相等令牌必须哈希相等，
///   参数顺序必须参与比较（`Map<String, Integer>` ≠ `Map<Integer, String>`）。
/// - 内部类型的行为可能依赖外围类型的泛型参数而非自身参数，因此令牌的标识
///   包含外围令牌；比较时先比外围、再比局部参数，部分匹配不可靠。
///
/// # 逻辑解析（How）
/// - [`TypeToken::capture`] 消费语法签名 [`TypeExpr`]，拒绝任何残留自由变量后递归构造令牌；
/// - 相等、排序与哈希全部派生自结构（基类、有序参数、外围令牌），无任何放宽；
/// - 原始类型（零参数）对参数化令牌的放宽只存在于
///   [`compat::is_compatible`](crate::compat::is_compatible)，不进入本类型。
///
/// # 契约说明（What）
/// - **前置条件**：令牌应在启动期由静态泛型声明捕获，构造后永不修改。
/// - **后置条件**：令牌可跨线程共享（`Send + Sync`），克隆为深拷贝但成本受限于签名深度。
///
/// # 风险提示（Trade-offs）
/// - 未对令牌做全局驻留；高频比较场景应缓存定位结果（注册中心已内置记忆化）而非反复构造令牌。
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeToken {
    basis: TypeBasis,
    args: Vec<TypeToken>,
    enclosing: Option<Box<TypeToken>>,
}

impl TypeToken {
    /// 构造原始类型令牌（零类型参数）。
    pub fn of(basis: TypeBasis) -> Self {
        Self {
            basis,
            args: Vec::new(),
            enclosing: None,
        }
    }

    /// 构造参数化令牌；`args` 的顺序即声明顺序。
    pub fn parameterized(basis: TypeBasis, args: impl IntoIterator<Item = TypeToken>) -> Self {
        Self {
            basis,
            args: args.into_iter().collect(),
            enclosing: None,
        }
    }

    /// 绑定外围类型令牌，表达“嵌套在泛型外围类型中的内部类型”。
    pub fn with_enclosing(mut self, enclosing: TypeToken) -> Self {
        self.enclosing = Some(Box::new(enclosing));
        self
    }

    /// 从语法签名捕获令牌。
    ///
    /// 签名中任何位置（参数、外围类型）残留自由类型变量都会以
    /// [`codes::TYPE_UNRESOLVED_VARIABLE`] 失败；令牌在启动期急切构造，
    /// 该错误应在启动阶段暴露而非运行中途。
    pub fn capture(expr: &TypeExpr) -> Result<Self, CoreError> {
        match expr {
            TypeExpr::Variable(name) => Err(CoreError::new(
                codes::TYPE_UNRESOLVED_VARIABLE,
                format!("签名中存在未绑定的类型变量 `{name}`，无法在捕获点解析为具体类型"),
            )),
            TypeExpr::Concrete {
                basis,
                args,
                enclosing,
            } => {
                let mut captured_args = Vec::with_capacity(args.len());
                for arg in args {
                    captured_args.push(Self::capture(arg)?);
                }
                let captured_enclosing = match enclosing {
                    Some(outer) => Some(Box::new(Self::capture(outer)?)),
                    None => None,
                };
                Ok(Self {
                    basis: basis.clone(),
                    args: captured_args,
                    enclosing: captured_enclosing,
                })
            }
        }
    }

    /// 返回基类标识。
    pub fn basis(&self) -> &TypeBasis {
        &self.basis
    }

    /// 返回有序类型参数。
    pub fn args(&self) -> &[TypeToken] {
        &self.args
    }

    /// 返回外围类型令牌。
    pub fn enclosing(&self) -> Option<&TypeToken> {
        self.enclosing.as_deref()
    }

    /// 是否为原始类型（未提供任何类型参数）。
    pub fn is_raw(&self) -> bool {
        self.args.is_empty()
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(outer) = &self.enclosing {
            write!(f, "{outer}.")?;
        }
        write!(f, "{}", self.basis)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}
