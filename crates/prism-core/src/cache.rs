//! 进程生命周期的记忆化映射，定位结果缓存与视图缓存共用。
//!
//! # 模块设计（Why）
//! - 注册中心的命中结果与视图派生结果均满足“首次计算、此后只读”的访问模式，
//!   统一封装 insert-if-absent 纪律可避免两处各写一份易错的并发代码。
//! - 计算在写锁之外执行：竞争的败者丢弃自己的计算结果并采纳胜者，
//!   重复计算被容忍，重复的对外可见状态写入则不被容忍。
//!
//! # 契约说明（What）
//! - 读路径短暂持共享锁并克隆值；写路径以 `entry().or_insert()` 收敛到唯一胜者。
//! - 计算闭包返回 `Err` 时不写入任何状态，后续调用可重新尝试（失败不污染缓存）。
//!
//! # 风险提示（Trade-offs）
//! - 缓存无上界也不逐出：键空间受应用实际使用的令牌/视图集合约束，属刻意选择。

use crate::CoreError;
use alloc::collections::BTreeMap;
use spin::RwLock;

/// 按键收敛到单一胜者的记忆化映射。
pub(crate) struct MemoMap<K, V> {
    entries: RwLock<BTreeMap<K, V>>,
}

impl<K, V> MemoMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    /// 构造空映射。
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// 返回已缓存的值副本。
    pub(crate) fn get(&self, key: &K) -> Option<V> {
        self.entries.read().get(key).cloned()
    }

    /// 命中则返回缓存值；未命中则在锁外计算，再以 insert-if-absent 纪律写入。
    ///
    /// 并发首次访问下所有调用方都会观察到同一份收敛后的值；
    /// 计算失败时错误原样上浮且不产生缓存条目。
    pub(crate) fn get_or_try_insert(
        &self,
        key: &K,
        compute: impl FnOnce() -> Result<V, CoreError>,
    ) -> Result<V, CoreError> {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let fresh = compute()?;
        let mut guard = self.entries.write();
        Ok(guard.entry(key.clone()).or_insert(fresh).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;
    use core::cell::Cell;

    /// 顺序访问下同一键的计算至多执行一次，第二次调用直接命中。
    #[test]
    fn second_lookup_hits_without_recomputation() {
        let memo: MemoMap<u32, u32> = MemoMap::new();
        let runs = Cell::new(0u32);

        let compute = || {
            runs.set(runs.get() + 1);
            Ok(42)
        };
        assert_eq!(memo.get_or_try_insert(&7, compute).unwrap(), 42);
        assert_eq!(
            memo.get_or_try_insert(&7, || panic!("缓存命中后不应再计算"))
                .unwrap(),
            42
        );
        assert_eq!(runs.get(), 1);
    }

    /// 计算失败不得写入缓存，后续尝试仍可成功。
    #[test]
    fn failed_computation_does_not_poison_the_entry() {
        let memo: MemoMap<u32, u32> = MemoMap::new();

        let err = memo
            .get_or_try_insert(&1, || Err(CoreError::new(codes::SERDE_AMBIGUOUS, "boom")))
            .unwrap_err();
        assert_eq!(err.code(), codes::SERDE_AMBIGUOUS);
        assert!(memo.get(&1).is_none());

        assert_eq!(memo.get_or_try_insert(&1, || Ok(9)).unwrap(), 9);
    }

    /// 已有条目获胜：后写者的值被丢弃，调用方采纳先写者。
    #[test]
    fn existing_entry_wins_over_late_writer() {
        let memo: MemoMap<u32, u32> = MemoMap::new();
        assert_eq!(memo.get_or_try_insert(&3, || Ok(1)).unwrap(), 1);
        // 绕过读快路径直接走写路径也不会覆盖先写者。
        let mut guard = memo.entries.write();
        let value = *guard.entry(3).or_insert(2);
        drop(guard);
        assert_eq!(value, 1);
    }
}
