use alloc::{borrow::Cow, sync::Arc, vec::Vec};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// `TypeBasis` 是基类的不可变运行时标识，并携带其声明的父类型边。
///
/// # 设计背景（Why）
/// - 协变定位需要回答“候选者的基类是否可从请求者的基类赋值”，这要求在运行时保留
///   一份扁平的继承关系；标识本身则以全限定名建立值相等，类似类对象按名称唯一。
/// - 以 `Arc` 共享内部结构：基类在启动期声明一次，此后被大量令牌引用，克隆仅增加引用计数。
///
/// # 契约说明（What）
/// - 相等、排序与哈希只看名称；父类型边不参与标识，只服务于可赋值性判定。
/// - **前置条件**：同名基类必须代表同一类型，由声明方保证全限定名唯一。
/// - **后置条件**：[`TypeBasis::is_assignable_from`] 是自反且传递的关系。
///
/// # 风险提示（Trade-offs）
/// - 父类型边在构造时固定，不支持事后补边；继承关系应在组合根一次性声明完毕。
#[derive(Clone)]
pub struct TypeBasis {
    inner: Arc<BasisInner>,
}

struct BasisInner {
    name: Cow<'static, str>,
    supertypes: Vec<TypeBasis>,
}

impl TypeBasis {
    /// 声明一个没有父类型边的基类。
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self::extending(name, [])
    }

    /// 声明一个基类及其直接父类型（类与接口不作区分，统一为可赋值目标）。
    pub fn extending(
        name: impl Into<Cow<'static, str>>,
        supertypes: impl IntoIterator<Item = TypeBasis>,
    ) -> Self {
        Self {
            inner: Arc::new(BasisInner {
                name: name.into(),
                supertypes: supertypes.into_iter().collect(),
            }),
        }
    }

    /// 返回全限定名。
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// 返回声明的直接父类型边。
    pub fn supertypes(&self) -> &[TypeBasis] {
        &self.inner.supertypes
    }

    /// 判断 `other` 是否可赋值给 `self`：即 `self` 为 `other` 本身或其传递闭包中的父类型。
    pub fn is_assignable_from(&self, other: &TypeBasis) -> bool {
        if self == other {
            return true;
        }
        other
            .inner
            .supertypes
            .iter()
            .any(|parent| self.is_assignable_from(parent))
    }
}

impl PartialEq for TypeBasis {
    fn eq(&self, other: &Self) -> bool {
        self.inner.name == other.inner.name
    }
}

impl Eq for TypeBasis {}

impl PartialOrd for TypeBasis {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeBasis {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.name.cmp(&other.inner.name)
    }
}

impl Hash for TypeBasis {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.name.hash(state);
    }
}

impl fmt::Debug for TypeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeBasis").field(&self.inner.name).finish()
    }
}

impl fmt::Display for TypeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 可赋值性沿父类型边传递，且对自身自反。
    #[test]
    fn assignability_is_reflexive_and_transitive() {
        let object = TypeBasis::new("lang.Object");
        let collection = TypeBasis::extending("util.Collection", [object.clone()]);
        let list = TypeBasis::extending("util.List", [collection.clone()]);

        assert!(list.is_assignable_from(&list));
        assert!(collection.is_assignable_from(&list));
        assert!(object.is_assignable_from(&list));
        assert!(!list.is_assignable_from(&collection));
    }

    /// 标识只看名称：父类型边不同的同名声明视为同一基类。
    #[test]
    fn identity_ignores_supertype_edges() {
        let plain = TypeBasis::new("demo.Status");
        let derived = TypeBasis::extending("demo.Status", [TypeBasis::new("lang.Object")]);
        assert_eq!(plain, derived);
    }
}
