use crate::token::TypeToken;
use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

/// `CodecDescriptor` 把编解码实例绑定到它宣告服务的类型令牌。
///
/// # 设计背景（Why）
/// - 注册中心按令牌匹配候选者，实例自身也需要携带同一份令牌以便握手校验与排障输出；
///   `label` 提供面向日志的短名，避免在输出中展开完整令牌。
///
/// # 契约说明（What）
/// - 描述符不可变，构造后跨线程共享；`token` 应与注册时使用的令牌一致，由注册方保证。
#[derive(Clone, Debug)]
pub struct CodecDescriptor {
    token: TypeToken,
    label: Cow<'static, str>,
}

impl CodecDescriptor {
    /// 以令牌与短名构造描述符。
    pub fn new(token: TypeToken, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            token,
            label: label.into(),
        }
    }

    /// 返回宣告服务的类型令牌。
    pub fn token(&self) -> &TypeToken {
        &self.token
    }

    /// 返回面向日志的短名。
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for CodecDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.token)
    }
}

/// `EncodedPayload` 表示编码完成的字节负载。
///
/// # 契约说明（What）
/// - 字节级格式由编解码实现自行约定，本核心不做任何解释；
///   结构体仅承载所有权并提供只读视图。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPayload {
    bytes: Vec<u8>,
}

impl EncodedPayload {
    /// 以既有字节构造负载。
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// 返回只读字节视图。
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// 取回底层字节。
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// 负载长度。
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 是否为空负载。
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for EncodedPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}
