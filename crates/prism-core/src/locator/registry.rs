use crate::cache::MemoMap;
use crate::codec::{Deserializer, Serializer};
use crate::compat::{Variance, is_compatible};
use crate::error::{CoreError, codes};
use crate::token::TypeToken;
use alloc::{boxed::Box, format, string::String, sync::Arc, vec::Vec};
use core::fmt;

/// 注册条目持有的生产者形态：既有实例或按需实例化的工厂。
enum Producer<T: ?Sized> {
    Instance(Arc<T>),
    Factory(Box<dyn Fn() -> Arc<T> + Send + Sync>),
}

impl<T: ?Sized> Producer<T> {
    fn produce(&self) -> Arc<T> {
        match self {
            Producer::Instance(instance) => instance.clone(),
            Producer::Factory(factory) => factory(),
        }
    }
}

/// `Registration` 把一个生产者与它宣告服务的类型令牌配对。
///
/// # 设计背景（Why）
/// - 同一基类允许多条注册，靠完整参数化区分；当放宽匹配产生多个同级候选者时，
///   显式的 `primary` 标记是唯一允许的人为裁决手段，绝不隐式任选。
/// - 生产者可以是既有实例（共享单例）或工厂闭包（每次解析新建），
///   注册中心对其来源（手写或构建期生成）不可知。
///
/// # 契约说明（What）
/// - 注册发生在构建器阶段，发布后只读；令牌与实例宣告的描述符应一致，由注册方保证。
pub struct Registration<T: ?Sized> {
    token: TypeToken,
    primary: bool,
    producer: Producer<T>,
}

/// 序列化器注册条目。
pub type SerializerRegistration = Registration<dyn Serializer>;
/// 反序列化器注册条目。
pub type DeserializerRegistration = Registration<dyn Deserializer>;

impl<T: ?Sized> Registration<T> {
    /// 以既有实例注册。
    pub fn instance(token: TypeToken, instance: Arc<T>) -> Self {
        Self {
            token,
            primary: false,
            producer: Producer::Instance(instance),
        }
    }

    /// 以工厂闭包注册；每次解析都会调用工厂产出新实例。
    pub fn factory(
        token: TypeToken,
        factory: impl Fn() -> Arc<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            token,
            primary: false,
            producer: Producer::Factory(Box::new(factory)),
        }
    }

    /// 标记为该基类的首选注册，用于放宽匹配下的歧义裁决。
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// 返回注册时宣告的令牌。
    pub fn token(&self) -> &TypeToken {
        &self.token
    }
}

impl<T: ?Sized> fmt::Debug for Registration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("token", &self.token)
            .field("primary", &self.primary)
            .finish()
    }
}

/// `SerdeRegistryBuilder` 在发布前收集全部注册。
///
/// # 契约说明（What）
/// - 构建器阶段单线程持有，无需同步；`build()` 之后注册表不可再变更，
///   这保证了注册对所有后续查询 happens-before。
#[derive(Default)]
pub struct SerdeRegistryBuilder {
    serializers: Vec<SerializerRegistration>,
    deserializers: Vec<DeserializerRegistration>,
}

impl SerdeRegistryBuilder {
    /// 构造空的构建器。
    pub fn new() -> Self {
        Self {
            serializers: Vec::new(),
            deserializers: Vec::new(),
        }
    }

    /// 追加一条序列化器注册。
    pub fn register_serializer(mut self, registration: SerializerRegistration) -> Self {
        self.serializers.push(registration);
        self
    }

    /// 追加一条反序列化器注册。
    pub fn register_deserializer(mut self, registration: DeserializerRegistration) -> Self {
        self.deserializers.push(registration);
        self
    }

    /// 发布不可变注册表。
    pub fn build(self) -> SerdeRegistry {
        SerdeRegistry {
            serializers: self.serializers,
            deserializers: self.deserializers,
            serializer_memo: MemoMap::new(),
            deserializer_memo: MemoMap::new(),
        }
    }
}

/// `SerdeRegistry` 把请求令牌映射到编解码实例，内置按令牌的结果记忆化。
///
/// # 设计背景（Why）
/// - 查找需要对候选列表逐一执行结构化兼容判定，代价与注册规模成正比；
///   给定注册表内容不变，同一令牌的胜者是确定的，记忆化后重复查找摊还为 O(log n)。
/// - 缓存记录的是胜出注册条目的下标而非实例：工厂注册的“每次解析新建”语义得以保留。
///
/// # 逻辑解析（How）
/// - 每次查找归约为一次 [`select`]：先按变型模式过滤候选，再执行固定裁决
///   （精确匹配 → 唯一 primary → 歧义错误）；
/// - 记忆化键为 `(变型, 令牌)`，写入遵循 insert-if-absent，竞争败者采纳胜者；
/// - 查找失败不写缓存（注册表不变时失败同样确定，但语义上保持“错误不缓存”的统一纪律）。
///
/// # 契约说明（What）
/// - **前置条件**：注册表经 [`SerdeRegistryBuilder::build`] 发布后才可被并发访问。
/// - **后置条件**：三类失败均以稳定错误码上浮（见 [`codes`]），不重试、不静默降级。
pub struct SerdeRegistry {
    serializers: Vec<SerializerRegistration>,
    deserializers: Vec<DeserializerRegistration>,
    serializer_memo: MemoMap<(Variance, TypeToken), usize>,
    deserializer_memo: MemoMap<(Variance, TypeToken), usize>,
}

impl SerdeRegistry {
    /// 返回注册构建器。
    pub fn builder() -> SerdeRegistryBuilder {
        SerdeRegistryBuilder::new()
    }

    /// 协变定位序列化器：接受请求类型本身或其父类型的生产者。
    pub fn find_covariant_serializer(
        &self,
        requested: &TypeToken,
    ) -> Result<Arc<dyn Serializer>, CoreError> {
        self.find_serializer(requested, Variance::Covariant)
    }

    /// 不变定位序列化器：要求精确形状（仅原始注册放宽）。
    pub fn find_invariant_serializer(
        &self,
        requested: &TypeToken,
    ) -> Result<Arc<dyn Serializer>, CoreError> {
        self.find_serializer(requested, Variance::Invariant)
    }

    /// 不变定位反序列化器：消费者必须产出精确的请求形状。
    pub fn find_invariant_deserializer(
        &self,
        requested: &TypeToken,
    ) -> Result<Arc<dyn Deserializer>, CoreError> {
        let index = self
            .deserializer_memo
            .get_or_try_insert(&(Variance::Invariant, requested.clone()), || {
                select(
                    requested,
                    &self.deserializers,
                    Variance::Invariant,
                    codes::SERDE_NO_DESERIALIZER,
                    "反序列化器",
                )
            })?;
        Ok(self.deserializers[index].producer.produce())
    }

    fn find_serializer(
        &self,
        requested: &TypeToken,
        variance: Variance,
    ) -> Result<Arc<dyn Serializer>, CoreError> {
        let index = self
            .serializer_memo
            .get_or_try_insert(&(variance, requested.clone()), || {
                select(
                    requested,
                    &self.serializers,
                    variance,
                    codes::SERDE_NO_SERIALIZER,
                    "序列化器",
                )
            })?;
        Ok(self.serializers[index].producer.produce())
    }
}

impl fmt::Debug for SerdeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeRegistry")
            .field("serializers", &self.serializers.len())
            .field("deserializers", &self.deserializers.len())
            .finish()
    }
}

/// 在候选列表上执行变型匹配与固定裁决，返回胜出条目的下标。
///
/// 裁决顺序：
/// 1. 精确结构匹配优先于放宽（原始/协变）匹配；
/// 2. 剩余多个候选时，恰好一条 primary 注册胜出；
/// 3. 仍无法裁决则报 `serde.ambiguous_candidates`，绝不任意选取。
fn select<T: ?Sized>(
    requested: &TypeToken,
    registrations: &[Registration<T>],
    variance: Variance,
    missing_code: &'static str,
    kind: &str,
) -> Result<usize, CoreError> {
    let matching: Vec<usize> = registrations
        .iter()
        .enumerate()
        .filter(|(_, registration)| is_compatible(requested, &registration.token, variance))
        .map(|(index, _)| index)
        .collect();

    if matching.is_empty() {
        return Err(CoreError::new(
            missing_code,
            format!("没有任何已注册{kind}满足请求令牌 `{requested}`（{variance:?} 匹配）"),
        ));
    }
    if let [single] = matching.as_slice() {
        return Ok(*single);
    }

    // 精确结构匹配压过放宽匹配。
    let exact: Vec<usize> = matching
        .iter()
        .copied()
        .filter(|&index| &registrations[index].token == requested)
        .collect();
    let pool = if exact.is_empty() { &matching } else { &exact };
    if let [single] = pool.as_slice() {
        return Ok(*single);
    }

    let primaries: Vec<usize> = pool
        .iter()
        .copied()
        .filter(|&index| registrations[index].primary)
        .collect();
    if let [single] = primaries.as_slice() {
        return Ok(*single);
    }

    let rendered: String = pool
        .iter()
        .map(|&index| format!("`{}`", registrations[index].token))
        .collect::<Vec<_>>()
        .join("、");
    Err(CoreError::new(
        codes::SERDE_AMBIGUOUS,
        format!("请求令牌 `{requested}` 匹配到多个同级{kind}候选（{rendered}），且无唯一 primary 注册"),
    ))
}
