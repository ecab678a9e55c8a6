//! 稳定错误域：类型捕获与编解码定位失败的统一出口。
//!
//! # 模块设计（Why）
//! - 定位失败（找不到、歧义、签名残留自由变量）必须以稳定错误码上浮给调用方，
//!   供日志、指标与告警系统执行自动化治理；本模块复用 `<领域>.<语义>` 命名约定。
//! - 解析过程确定性地依赖注册表的固定内容，因此所有错误均不重试：注册表不变时重试必然再次失败。
//!
//! # 契约说明（What）
//! - 所有可失败操作返回 [`CoreError`]；错误码取自 [`codes`] 模块，消息面向排障人员。
//! - 视图缓存不引入新错误码：派生失败原样上浮底层错误，且不会写入缓存。

use crate::Error;
use alloc::{borrow::Cow, boxed::Box};
use core::fmt;

/// 可跨线程传递的底层错误原因。
pub type ErrorCause = Box<dyn Error + Send + Sync + 'static>;

/// `CoreError` 提供稳定的错误码与根因链路，是本 Crate 错误分层的最底层。
///
/// # 设计背景（Why）
/// - 令牌捕获、定位与视图派生在不同层次产生的故障需要合流为统一的错误码，
///   以便调用方按码值实施兜底策略（报告启动失败、换用其他注册等）。
/// - 需兼容 `no_std + alloc` 场景，故不依赖 `std::error::Error`，而复用 crate 内部的轻量抽象。
///
/// # 契约说明（What）
/// - `code`：`'static` 稳定字符串，建议取自 [`codes`]。
/// - `message`：人类可读描述，避免包含敏感信息。
/// - `cause`：可选底层原因，经 `source()` 暴露完整链路。
///
/// # 风险提示（Trade-offs）
/// - 结构体仅承载信息，不执行格式化或上报逻辑；消息使用 `Cow` 以便常量场景零分配。
#[derive(Debug)]
pub struct CoreError {
    code: &'static str,
    message: Cow<'static, str>,
    cause: Option<ErrorCause>,
}

impl CoreError {
    /// 构造核心错误。
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// 附带底层原因并返回新的核心错误。
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// 获取稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 获取描述。
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取底层原因。
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|boxed| boxed.as_ref() as &(dyn Error + 'static))
    }
}

/// 内置错误码常量集合，确保可观测性系统具有稳定识别符。
///
/// # 契约说明（What）
/// - **使用前提**：错误码应封装进 [`CoreError`] 并携带完整上下文消息。
/// - **返回承诺**：三类定位失败（缺失、歧义、签名畸形）互不重叠，调用方可按码值精确分流；
///   任何一类都不允许以任意选取或静默降级的方式掩盖。
pub mod codes {
    /// 泛型签名中残留未绑定的类型变量，令牌捕获失败（启动期即应暴露）。
    pub const TYPE_UNRESOLVED_VARIABLE: &str = "type.unresolved_variable";
    /// 没有任何已注册序列化器满足请求令牌的协变/不变匹配。
    pub const SERDE_NO_SERIALIZER: &str = "serde.no_serializer";
    /// 没有任何已注册反序列化器满足请求令牌的不变匹配。
    pub const SERDE_NO_DESERIALIZER: &str = "serde.no_deserializer";
    /// 多个同级候选者匹配且无法依既定规则裁决，拒绝任意选取。
    pub const SERDE_AMBIGUOUS: &str = "serde.ambiguous_candidates";
    /// 对象安全适配层下转型失败，传入值与声明的业务类型不一致。
    pub const PROTOCOL_TYPE_MISMATCH: &str = "protocol.type_mismatch";
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    /// 验证错误链可经 `source()` 逐层回溯，且 Display 输出携带错误码。
    #[test]
    fn cause_chain_is_reachable_through_source() {
        let inner = CoreError::new("inner.code", "inner message");
        let outer = CoreError::new(codes::SERDE_NO_SERIALIZER, "未找到序列化器").with_cause(inner);

        assert_eq!(outer.code(), codes::SERDE_NO_SERIALIZER);
        assert_eq!(format!("{outer}"), "[serde.no_serializer] 未找到序列化器");

        let source = (&outer as &dyn Error)
            .source()
            .expect("outer error should expose inner cause");
        assert_eq!(format!("{source}"), "[inner.code] inner message");
        assert!(source.source().is_none());
    }
}
