//! `codec` 模块定义序列化能力的最小契约面：描述符、负载与对象安全的编解码接口。
//!
//! # 模块设计（Why）
//! - 注册中心只关心“如何定位、比较与缓存”编解码器，不关心逐字段编码细节；
//!   本模块因此只固定能力契约：实例宣告自己服务的类型令牌（[`CodecDescriptor`]），
//!   并以对象安全形式接受/产出业务值。
//! - 生产者可能由手写实现或构建期生成步骤提供；注册中心对其来源不可知，
//!   只要求其符合 [`Serializer`]/[`Deserializer`] 契约。
//!
//! # 使用指引（How）
//! - 静态泛型实现者优先实现 [`TypedSerializer`]/[`TypedDeserializer`]（或双向的 [`TypedCodec`]），
//!   再经 [`TypedSerializerAdapter`]/[`TypedDeserializerAdapter`] 桥接为可注册的 trait 对象。
//! - 适配器在下转型失败时返回稳定错误码 `protocol.type_mismatch`，调用侧需捕获并记录。
//!
//! # 风险提示（Trade-offs）
//! - 类型擦除带来运行时下转型成本；性能敏感路径应持有定位结果并复用，而非逐次解析。

mod descriptor;
mod serde;

pub use descriptor::{CodecDescriptor, EncodedPayload};
pub use serde::{
    Deserializer, Serializer, TypedCodec, TypedDeserializer, TypedDeserializerAdapter,
    TypedSerializer, TypedSerializerAdapter,
};
