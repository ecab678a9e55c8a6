//! 定位热路径基准：首次解析（全量匹配）与记忆化命中的开销对比。

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use prism_core::{
    CodecDescriptor, CoreError, EncodedPayload, Registration, SerdeRegistry, Serializer,
    TypeBasis, TypeToken,
};

struct NoopSerializer {
    descriptor: CodecDescriptor,
}

impl Serializer for NoopSerializer {
    fn descriptor(&self) -> &CodecDescriptor {
        &self.descriptor
    }

    fn serialize(
        &self,
        _value: &(dyn core::any::Any + Send + Sync),
    ) -> Result<EncodedPayload, CoreError> {
        Ok(EncodedPayload::from_bytes(Vec::new()))
    }
}

fn registry_with(count: usize) -> (SerdeRegistry, TypeToken) {
    let mut builder = SerdeRegistry::builder();
    let mut requested = None;
    for index in 0..count {
        let basis = TypeBasis::new(format!("bench.Type{index}"));
        let token = TypeToken::parameterized(
            basis,
            [TypeToken::of(TypeBasis::new("lang.String"))],
        );
        if index == count / 2 {
            requested = Some(token.clone());
        }
        builder = builder.register_serializer(Registration::instance(
            token.clone(),
            Arc::new(NoopSerializer {
                descriptor: CodecDescriptor::new(token, "noop"),
            }),
        ));
    }
    (builder.build(), requested.expect("count must be non-zero"))
}

fn bench_lookup(c: &mut Criterion) {
    c.bench_function("cold_lookup_64_registrations", |b| {
        b.iter_with_setup(
            || registry_with(64),
            |(registry, token)| {
                black_box(registry.find_covariant_serializer(&token)).ok();
            },
        )
    });

    let (registry, token) = registry_with(64);
    registry
        .find_covariant_serializer(&token)
        .expect("warmup lookup");
    c.bench_function("memoized_lookup_64_registrations", |b| {
        b.iter(|| black_box(registry.find_covariant_serializer(&token)).ok())
    });
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
