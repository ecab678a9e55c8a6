//! `view` 模块按视图键缓存从基础编解码器派生的受限变体。
//!
//! # 模块设计（Why）
//! - 同一基础编解码器在不同上下文下可能只允许部分字段可见（“视图”），
//!   派生是两个输入的纯函数且结果可复用，应当按键至多物化一次、全体调用方共享。
//! - 视图键取 [`TypeBasis`]：视图在来源系统中即一个类标识，值相等、可排序，
//!   直接复用基类标识类型避免再造一套判等规则。
//!
//! # 契约说明（What）
//! - 命中返回既有派生实例；未命中则派生、以 insert-if-absent 写入并返回收敛后的胜者。
//!   并发首次访问允许重复派生（至少一次语义），但存储收敛到唯一实例。
//! - 派生失败原样上浮底层错误，不缓存：失败不得污染后续尝试。
//! - 本模块不引入新错误码。
//!
//! # 风险提示（Trade-offs）
//! - 缓存无上界不逐出：视图键空间受应用实际声明的视图类集合约束，属刻意选择。

use crate::cache::MemoMap;
use crate::error::CoreError;
use crate::token::TypeBasis;
use alloc::sync::Arc;
use core::fmt;

/// 可按视图键派生受限变体的编解码器。
///
/// # 契约说明（What）
/// - `derive_view` 必须是纯函数：除返回派生对象外不得有可观察副作用，
///   这使得并发竞争下丢弃败者的计算结果是无害的。
pub trait ViewDerivable: Send + Sync + 'static {
    /// 以视图键派生一个受限变体；基础实例自身保持不变。
    fn derive_view(&self, view: &TypeBasis) -> Result<Self, CoreError>
    where
        Self: Sized;
}

/// `ViewCodecCache` 包装单个基础编解码器，按视图键缓存派生结果。
///
/// # 逻辑解析（How）
/// - 读路径命中即返回缓存的 `Arc` 克隆；
/// - 未命中时在锁外调用 [`ViewDerivable::derive_view`]，随后以 insert-if-absent
///   写入：竞争的败者丢弃自己的派生结果并采纳先写者，所有调用方收敛到同一实例。
///
/// # 契约说明（What）
/// - **前置条件**：基础编解码器构造完毕且自身线程安全；
/// - **后置条件**：对固定视图键，顺序访问下派生逻辑至多执行一次。
pub struct ViewCodecCache<C> {
    base: Arc<C>,
    derived: MemoMap<TypeBasis, Arc<C>>,
}

impl<C> ViewCodecCache<C>
where
    C: ViewDerivable,
{
    /// 包装基础编解码器。
    pub fn new(base: Arc<C>) -> Self {
        Self {
            base,
            derived: MemoMap::new(),
        }
    }

    /// 返回基础编解码器。
    pub fn base(&self) -> &Arc<C> {
        &self.base
    }

    /// 解析视图键对应的派生编解码器。
    pub fn resolve_view(&self, view: &TypeBasis) -> Result<Arc<C>, CoreError> {
        self.derived
            .get_or_try_insert(view, || self.base.derive_view(view).map(Arc::new))
    }
}

impl<C> fmt::Debug for ViewCodecCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCodecCache").finish_non_exhaustive()
    }
}
