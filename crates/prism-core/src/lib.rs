#![cfg_attr(not(feature = "std"), no_std)]
#![doc = "prism-core: 泛型类型感知的序列化器定位、兼容性判定与视图缓存核心。"]
#![doc = ""]
#![doc = "本 Crate 把编译期可得的泛型签名捕获为可比较的运行时令牌（`TypeToken`），"]
#![doc = "在其上实现带变型语义（协变/不变）的兼容性判定，并以注册中心（`SerdeRegistry`）"]
#![doc = "定位、记忆化序列化器与反序列化器实例；`ViewCodecCache` 进一步按视图键派生受限编解码器。"]
#![doc = "传输、注入与代码生成均为外部协作者，契约仅为：给定类型令牌，返回编解码能力或稳定错误码。"]

extern crate alloc;

mod arc_swap;
mod cache;

pub mod codec;
pub mod compat;
pub mod error;
pub mod locator;
pub mod token;
pub mod view;

pub use codec::{
    CodecDescriptor, Deserializer, EncodedPayload, Serializer, TypedCodec, TypedDeserializer,
    TypedDeserializerAdapter, TypedSerializer, TypedSerializerAdapter,
};
pub use compat::{Variance, is_compatible};
pub use error::{CoreError, ErrorCause, codes};
pub use locator::{
    DeserializerRegistration, Registration, SerdeRegistry, SerdeRegistryBuilder,
    SerializerRegistration, SharedRegistry,
};
pub use token::{TypeBasis, TypeExpr, TypeToken};
pub use view::{ViewCodecCache, ViewDerivable};

use alloc::boxed::Box;
use core::fmt;

/// 本 Crate 中所有错误必须实现的 `no_std` 基础 Trait。
///
/// # 设计背景（Why）
/// - `std::error::Error` 在 `no_std` 环境不可用，而令牌捕获与定位失败需要携带可回溯的原因链。
/// - 该 Trait 是错误类型的最小公共接口，保证在 `alloc` 场景下完成跨模块错误传递。
///
/// # 逻辑解析（How）
/// - 约束实现者提供 `Debug` 与 `Display`，便于日志与排障输出。
/// - `source` 递归返回上游错误，语义与 `std::error::Error::source` 一致。
///
/// # 契约说明（What）
/// - **前置条件**：实现类型需为 `'static` 生命周期；跨线程共享时应满足 `Send + Sync`（见 [`ErrorCause`]）。
/// - **后置条件**：`source` 返回引用的生命周期受限于 `self`，防止悬垂。
///
/// # 风险提示（Trade-offs）
/// - 未强制 `Send + Sync`，避免对受限环境强加负担；若底层错误不提供 `source`，错误链在此终止。
pub trait Error: fmt::Debug + fmt::Display {
    /// 返回当前错误的上游来源。
    fn source(&self) -> Option<&(dyn Error + 'static)>;
}

impl<E> Error for Box<E>
where
    E: Error + ?Sized,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        (**self).source()
    }
}
