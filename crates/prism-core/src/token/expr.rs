use super::TypeBasis;
use alloc::{borrow::Cow, boxed::Box, vec::Vec};
use core::fmt;

/// `TypeExpr` 是捕获点提交的语法泛型签名，尚未验证其是否完全解析。
///
/// # 设计背景（Why）
/// - 捕获机制的输入是“编译期可得的参数化声明”，由反射前端或构建期步骤以语法树形式提供；
///   树中可能残留未绑定的类型变量（例如方法级泛型参数），这类签名不允许变成令牌。
/// - 把“语法形状”与“已验证令牌”拆为两个类型，可让捕获失败在类型系统层面不可忽略。
///
/// # 契约说明（What）
/// - `Concrete` 节点描述基类、有序参数与可选外围类型；`Variable` 节点表示自由类型变量。
/// - 表达式本身只承载结构，验证由 [`TypeToken::capture`](super::TypeToken::capture) 执行。
#[derive(Clone, Debug)]
pub enum TypeExpr {
    /// 具体类型节点：基类加有序类型参数，可选外围类型签名。
    Concrete {
        /// 基类标识。
        basis: TypeBasis,
        /// 有序类型参数。
        args: Vec<TypeExpr>,
        /// 外围类型的签名（内部类型嵌套在泛型外围类型中时出现）。
        enclosing: Option<Box<TypeExpr>>,
    },
    /// 未绑定的自由类型变量，捕获时必须拒绝。
    Variable(Cow<'static, str>),
}

impl TypeExpr {
    /// 构造零参数的具体类型节点。
    pub fn concrete(basis: TypeBasis) -> Self {
        TypeExpr::Concrete {
            basis,
            args: Vec::new(),
            enclosing: None,
        }
    }

    /// 构造自由类型变量节点。
    pub fn variable(name: impl Into<Cow<'static, str>>) -> Self {
        TypeExpr::Variable(name.into())
    }

    /// 追加一个类型参数；参数顺序即声明顺序，参与结构比较。对变量节点无效果。
    pub fn with_arg(self, arg: TypeExpr) -> Self {
        match self {
            TypeExpr::Concrete {
                basis,
                mut args,
                enclosing,
            } => {
                args.push(arg);
                TypeExpr::Concrete {
                    basis,
                    args,
                    enclosing,
                }
            }
            variable @ TypeExpr::Variable(_) => variable,
        }
    }

    /// 设置外围类型签名；对变量节点无效果。
    pub fn with_enclosing(self, enclosing: TypeExpr) -> Self {
        match self {
            TypeExpr::Concrete { basis, args, .. } => TypeExpr::Concrete {
                basis,
                args,
                enclosing: Some(Box::new(enclosing)),
            },
            variable @ TypeExpr::Variable(_) => variable,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Variable(name) => write!(f, "{name}"),
            TypeExpr::Concrete {
                basis,
                args,
                enclosing,
            } => {
                if let Some(outer) = enclosing {
                    write!(f, "{outer}.")?;
                }
                write!(f, "{basis}")?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (index, arg) in args.iter().enumerate() {
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
    }
}
