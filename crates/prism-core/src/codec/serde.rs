use super::descriptor::{CodecDescriptor, EncodedPayload};
use crate::error::{CoreError, codes};
use alloc::{boxed::Box, format};
use core::any::Any;

/// `Serializer` 为注册中心提供对象安全的序列化接口。
///
/// # 设计背景（Why）
/// - 同一注册表需要存放服务不同业务类型的实现，trait 对象化不可避免；
///   经由 `Any` 做运行时类型检查，失败路径收敛到稳定错误码。
///
/// # 契约说明（What）
/// - **前置条件**：调用方必须保证传入值与实现宣告的业务类型一致（定位层已按令牌筛选）。
/// - **后置条件**：返回的负载完整代表输入值的序列化结果；类型不一致时返回
///   `protocol.type_mismatch`，绝不产出部分结果。
pub trait Serializer: Send + Sync + 'static {
    /// 返回绑定的描述符。
    fn descriptor(&self) -> &CodecDescriptor;

    /// 对象安全的序列化入口。
    fn serialize(&self, value: &(dyn Any + Send + Sync)) -> Result<EncodedPayload, CoreError>;
}

impl core::fmt::Debug for dyn Serializer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Serializer")
            .field("descriptor", self.descriptor())
            .finish()
    }
}

/// `Deserializer` 为注册中心提供对象安全的反序列化接口。
///
/// # 契约说明（What）
/// - 成功时返回装箱的业务值，调用方按定位时的令牌下转型还原；
///   负载不合法时以携带稳定错误码的 [`CoreError`] 上浮，不做静默默认值。
pub trait Deserializer: Send + Sync + 'static {
    /// 返回绑定的描述符。
    fn descriptor(&self) -> &CodecDescriptor;

    /// 对象安全的反序列化入口。
    fn deserialize(&self, payload: &EncodedPayload)
    -> Result<Box<dyn Any + Send + Sync>, CoreError>;
}

impl core::fmt::Debug for dyn Deserializer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Deserializer")
            .field("descriptor", self.descriptor())
            .finish()
    }
}

/// `TypedSerializer` 是带静态类型保证的序列化契约。
///
/// # 契约说明（What）
/// - 关联类型 `Value` 表达输入对象；实现保持无状态或自行保证并发安全。
pub trait TypedSerializer: Send + Sync + 'static {
    /// 序列化输入的业务类型。
    type Value: Send + Sync + 'static;

    /// 返回绑定的描述符。
    fn descriptor(&self) -> &CodecDescriptor;

    /// 将业务值序列化为字节负载。
    fn serialize(&self, value: &Self::Value) -> Result<EncodedPayload, CoreError>;
}

/// `TypedDeserializer` 是带静态类型保证的反序列化契约。
pub trait TypedDeserializer: Send + Sync + 'static {
    /// 反序列化产出的业务类型。
    type Value: Send + Sync + 'static;

    /// 返回绑定的描述符。
    fn descriptor(&self) -> &CodecDescriptor;

    /// 将字节负载还原为业务值。
    fn deserialize(&self, payload: &EncodedPayload) -> Result<Self::Value, CoreError>;
}

/// `TypedCodec` 同时封装双向能力，适合单实现同时注册两侧的场景。
///
/// # 设计背景（Why）
/// - 以单一 trait 表达双向能力可减少泛型参数数量；默认的桥接实现
///   （见下方 blanket impl）让双向实现免费获得两个单向契约。
///
/// # 风险提示（Trade-offs）
/// - blanket impl 意味着实现了 `TypedCodec` 的类型不能再单独实现两个单向 trait。
pub trait TypedCodec: Send + Sync + 'static {
    /// 编解码的业务类型。
    type Value: Send + Sync + 'static;

    /// 返回绑定的描述符。
    fn descriptor(&self) -> &CodecDescriptor;

    /// 序列化方向。
    fn serialize(&self, value: &Self::Value) -> Result<EncodedPayload, CoreError>;

    /// 反序列化方向。
    fn deserialize(&self, payload: &EncodedPayload) -> Result<Self::Value, CoreError>;
}

impl<C> TypedSerializer for C
where
    C: TypedCodec,
{
    type Value = C::Value;

    fn descriptor(&self) -> &CodecDescriptor {
        TypedCodec::descriptor(self)
    }

    fn serialize(&self, value: &Self::Value) -> Result<EncodedPayload, CoreError> {
        TypedCodec::serialize(self, value)
    }
}

impl<C> TypedDeserializer for C
where
    C: TypedCodec,
{
    type Value = C::Value;

    fn descriptor(&self) -> &CodecDescriptor {
        TypedCodec::descriptor(self)
    }

    fn deserialize(&self, payload: &EncodedPayload) -> Result<Self::Value, CoreError> {
        TypedCodec::deserialize(self, payload)
    }
}

/// `TypedSerializerAdapter` 把静态泛型实现包装为可注册的 [`Serializer`] 对象。
///
/// # 逻辑解析（How）
/// - `serialize` 使用 `Any::downcast_ref` 还原业务类型；失败即返回
///   `protocol.type_mismatch`，并在消息中携带期待的类型名。
pub struct TypedSerializerAdapter<S>
where
    S: TypedSerializer,
{
    inner: S,
}

impl<S> TypedSerializerAdapter<S>
where
    S: TypedSerializer,
{
    /// 构建新的适配器。
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// 取出内部实现。
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> Serializer for TypedSerializerAdapter<S>
where
    S: TypedSerializer,
{
    fn descriptor(&self) -> &CodecDescriptor {
        self.inner.descriptor()
    }

    fn serialize(&self, value: &(dyn Any + Send + Sync)) -> Result<EncodedPayload, CoreError> {
        match value.downcast_ref::<S::Value>() {
            Some(typed) => self.inner.serialize(typed),
            None => Err(CoreError::new(
                codes::PROTOCOL_TYPE_MISMATCH,
                format!(
                    "期待类型 `{}`，实际收到不兼容类型",
                    core::any::type_name::<S::Value>(),
                ),
            )),
        }
    }
}

/// `TypedDeserializerAdapter` 把静态泛型实现包装为可注册的 [`Deserializer`] 对象。
pub struct TypedDeserializerAdapter<D>
where
    D: TypedDeserializer,
{
    inner: D,
}

impl<D> TypedDeserializerAdapter<D>
where
    D: TypedDeserializer,
{
    /// 构建新的适配器。
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    /// 取出内部实现。
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D> Deserializer for TypedDeserializerAdapter<D>
where
    D: TypedDeserializer,
{
    fn descriptor(&self) -> &CodecDescriptor {
        self.inner.descriptor()
    }

    fn deserialize(
        &self,
        payload: &EncodedPayload,
    ) -> Result<Box<dyn Any + Send + Sync>, CoreError> {
        let value = self.inner.deserialize(payload)?;
        Ok(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{TypeBasis, TypeToken};
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    struct UpperCodec {
        descriptor: CodecDescriptor,
    }

    impl UpperCodec {
        fn new() -> Self {
            Self {
                descriptor: CodecDescriptor::new(
                    TypeToken::of(TypeBasis::new("lang.String")),
                    "upper",
                ),
            }
        }
    }

    impl TypedCodec for UpperCodec {
        type Value = String;

        fn descriptor(&self) -> &CodecDescriptor {
            &self.descriptor
        }

        fn serialize(&self, value: &String) -> Result<EncodedPayload, CoreError> {
            Ok(EncodedPayload::from_bytes(
                value.to_uppercase().into_bytes(),
            ))
        }

        fn deserialize(&self, payload: &EncodedPayload) -> Result<String, CoreError> {
            Ok(String::from_utf8_lossy(payload.as_slice()).to_string())
        }
    }

    /// 双向实现经适配器桥接后两个方向都可用。
    #[test]
    fn typed_codec_bridges_to_both_directions() {
        let serializer = TypedSerializerAdapter::new(UpperCodec::new());
        let value: String = "abc".to_string();
        let payload = serializer
            .serialize(&value as &(dyn Any + Send + Sync))
            .expect("matching type must serialize");
        assert_eq!(payload.as_slice(), b"ABC");

        let deserializer = TypedDeserializerAdapter::new(UpperCodec::new());
        let restored = deserializer
            .deserialize(&EncodedPayload::from_bytes(Vec::from(&b"xyz"[..])))
            .expect("payload must deserialize");
        assert_eq!(restored.downcast_ref::<String>().map(String::as_str), Some("xyz"));
    }

    /// 下转型失败返回稳定错误码，不产出部分结果。
    #[test]
    fn mismatched_value_fails_with_stable_code() {
        let serializer = TypedSerializerAdapter::new(UpperCodec::new());
        let wrong: u32 = 7;
        let err = serializer
            .serialize(&wrong as &(dyn Any + Send + Sync))
            .unwrap_err();
        assert_eq!(err.code(), codes::PROTOCOL_TYPE_MISMATCH);
    }
}
