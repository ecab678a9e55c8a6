//! 条件性 `ArcSwap` 适配层。
//!
//! # 设计初衷（Why）
//! - `std` 构建下复用社区成熟的 [`arc-swap`](https://crates.io/crates/arc-swap) 实现，注册中心句柄
//!   的读路径保持锁自由。
//! - 纯 `alloc` 构建下该三方库需要 nightly 特性，不符合本仓库稳定版基线，故提供同接口的
//!   自旋锁回退实现，待上游稳定支持后可无缝切换。
//!
//! # 契约说明（What）
//! - 对外仅暴露本 Crate 实际使用的三个方法：`from_pointee`、`load_full`、`store`。
//! - 回退实现保证线程安全与 `Arc` 快照语义，但不具备锁自由特性。

#[cfg(feature = "std")]
pub(crate) use ::arc_swap::ArcSwap;

#[cfg(not(feature = "std"))]
mod fallback {
    use alloc::sync::Arc;
    use spin::RwLock;

    /// `no_std` 环境下的精简 `ArcSwap` 仿制实现。
    ///
    /// - **逻辑（How）**：内部以 `spin::RwLock<Arc<T>>` 保存快照；读取共享锁并克隆 `Arc`，
    ///   写入独占锁并整体替换。
    /// - **注意事项（Trade-offs）**：写操作会短暂阻塞读者；受限环境以正确性优先。
    pub(crate) struct ArcSwap<T> {
        inner: RwLock<Arc<T>>,
    }

    impl<T> ArcSwap<T> {
        /// 以值语义构造容器，内部自动封装为 `Arc`。
        pub(crate) fn from_pointee(value: T) -> Self {
            Self {
                inner: RwLock::new(Arc::new(value)),
            }
        }

        /// 读取当前快照；克隆仅增加引用计数。
        pub(crate) fn load_full(&self) -> Arc<T> {
            self.inner.read().clone()
        }

        /// 用新的快照替换当前值；旧快照在所有持有者释放后回收。
        pub(crate) fn store(&self, value: Arc<T>) {
            *self.inner.write() = value;
        }
    }
}

#[cfg(not(feature = "std"))]
pub(crate) use fallback::ArcSwap;
