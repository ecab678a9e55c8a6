use super::SerdeRegistry;
use crate::arc_swap::ArcSwap;
use alloc::sync::Arc;
use core::fmt;

/// `SharedRegistry` 是进程级的注册表句柄：初始化一次、此后按引用共享。
///
/// # 设计背景（Why）
/// - 组合根（显式装配、服务定位或构造注入，本核心不绑定机制）在启动期完成注册并发布，
///   其余组件只持有句柄读取；读路径在 `std` 构建下经 `arc-swap` 保持锁自由。
/// - 保留整表替换能力：重建注册表后整体换入新快照，旧快照随持有者释放回收，
///   正在进行的查询不受影响。
///
/// # 契约说明（What）
/// - **前置条件**：`new` 之前所有注册已随 `build()` 固化，发布即 happens-before 所有读取。
/// - **后置条件**：`current()` 返回的快照自身不可变；替换只能经 [`SharedRegistry::install`] 整表进行。
///
/// # 风险提示（Trade-offs）
/// - 句柄不提供“未初始化”状态：构造即要求一份可用注册表，消除读取侧的空值分支。
pub struct SharedRegistry {
    slot: ArcSwap<SerdeRegistry>,
}

impl SharedRegistry {
    /// 以首个注册表快照构造句柄。
    pub fn new(registry: SerdeRegistry) -> Self {
        Self {
            slot: ArcSwap::from_pointee(registry),
        }
    }

    /// 读取当前注册表快照。
    pub fn current(&self) -> Arc<SerdeRegistry> {
        self.slot.load_full()
    }

    /// 整表替换为新的注册表快照。
    pub fn install(&self, registry: Arc<SerdeRegistry>) {
        self.slot.store(registry);
    }
}

impl fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRegistry")
            .field("current", &self.current())
            .finish()
    }
}
