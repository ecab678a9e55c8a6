//! 令牌结构性质验证。
//!
//! 使用 Proptest 随机生成有界深度的令牌树，验证三组性质：
//! 1. 相等性是结构性的：令牌与其克隆相等，且与自身在两种变型模式下兼容；
//! 2. 语法签名往返：由令牌重建 `TypeExpr` 后捕获，结果与原令牌相等；
//! 3. 自由变量不可逃逸：在签名任意参数位注入变量后捕获必须失败。
//! 另以定向用例覆盖参数顺序敏感性（随机生成难以稳定命中交换场景）。

use proptest::prelude::*;

use prism_core::{TypeBasis, TypeExpr, TypeToken, Variance, codes, is_compatible};

fn basis_strategy() -> impl Strategy<Value = TypeBasis> {
    prop_oneof![
        Just("demo.Alpha"),
        Just("demo.Beta"),
        Just("demo.Gamma"),
        Just("demo.Delta"),
    ]
    .prop_map(TypeBasis::new)
}

fn token_strategy() -> impl Strategy<Value = TypeToken> {
    let leaf = basis_strategy().prop_map(TypeToken::of);
    leaf.prop_recursive(3, 16, 3, |inner| {
        (
            basis_strategy(),
            prop::collection::vec(inner.clone(), 0..3),
            prop::option::of(inner),
        )
            .prop_map(|(basis, args, enclosing)| {
                let token = TypeToken::parameterized(basis, args);
                match enclosing {
                    Some(outer) => token.with_enclosing(outer),
                    None => token,
                }
            })
    })
}

/// 由已解析令牌重建等价的语法签名。
fn expr_of(token: &TypeToken) -> TypeExpr {
    let mut expr = TypeExpr::concrete(token.basis().clone());
    for arg in token.args() {
        expr = expr.with_arg(expr_of(arg));
    }
    if let Some(outer) = token.enclosing() {
        expr = expr.with_enclosing(expr_of(outer));
    }
    expr
}

proptest! {
    /// 克隆保持结构相等，自反兼容在两种模式下成立。
    #[test]
    fn clone_preserves_identity_and_self_compatibility(token in token_strategy()) {
        let clone = token.clone();
        prop_assert_eq!(&token, &clone);
        prop_assert!(is_compatible(&token, &clone, Variance::Invariant));
        prop_assert!(is_compatible(&token, &clone, Variance::Covariant));
    }

    /// 签名往返：令牌 → 语法签名 → 捕获，结构不变。
    #[test]
    fn capture_roundtrips_fully_bound_signatures(token in token_strategy()) {
        let expr = expr_of(&token);
        let captured = TypeToken::capture(&expr).expect("fully bound signature must capture");
        prop_assert_eq!(token, captured);
    }

    /// 任意位置注入自由变量后，捕获以稳定错误码失败。
    #[test]
    fn free_variables_fail_capture(token in token_strategy()) {
        let poisoned = expr_of(&token).with_arg(TypeExpr::variable("T"));
        let err = TypeToken::capture(&poisoned).expect_err("free variable must be rejected");
        prop_assert_eq!(err.code(), codes::TYPE_UNRESOLVED_VARIABLE);
    }

    /// 原始候选者放宽对任意参数化请求成立，但相等性从不放宽。
    #[test]
    fn raw_relaxation_never_leaks_into_equality(token in token_strategy()) {
        prop_assume!(!token.is_raw());
        prop_assume!(token.enclosing().is_none());
        let raw = TypeToken::of(token.basis().clone());
        prop_assert!(is_compatible(&token, &raw, Variance::Invariant));
        prop_assert!(is_compatible(&token, &raw, Variance::Covariant));
        prop_assert_ne!(token, raw);
    }
}

/// 同一基类、交换参数顺序的两个实例化互不相等，且互不不变兼容。
#[test]
fn swapped_arguments_are_distinct() {
    let map = TypeBasis::new("util.Map");
    let string = TypeToken::of(TypeBasis::new("lang.String"));
    let integer = TypeToken::of(TypeBasis::new("lang.Integer"));

    let string_to_integer =
        TypeToken::parameterized(map.clone(), [string.clone(), integer.clone()]);
    let integer_to_string = TypeToken::parameterized(map, [integer, string]);

    assert_ne!(string_to_integer, integer_to_string);
    assert!(!is_compatible(
        &string_to_integer,
        &integer_to_string,
        Variance::Invariant
    ));
}
