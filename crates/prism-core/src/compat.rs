//! `compat` 模块实现请求令牌与候选令牌之间的定向兼容性判定。
//!
//! # 模块设计（Why）
//! - 定位序列化器（生产者）与反序列化器（消费者）遵循不同的变型纪律：
//!   生产者接受请求类型或其父类型（协变），消费者必须产出精确形状（不变）。
//! - 判定是两个令牌加模式的纯函数，无状态、无副作用，天然可并发调用。
//!
//! # 契约说明（What）
//! - 外围令牌先于局部参数判定，且使用同一变型模式递归；外围不匹配直接拒绝候选者，
//!   因为内部类型的行为可能依赖外围类型参数，部分匹配不可靠。
//! - **原始类型放宽**：零参数候选者对同基类的任意参数化请求在两种模式下都接受；
//!   协变模式下零参数请求对基类可赋值的参数化候选者同样接受。这是对遗留未检查
//!   注册的刻意兼容性放宽（最坏情况退化为未检查访问），不是实现缺口；
//!   收紧或进一步放松都属破坏性变更。
//!
//! # 风险提示（Trade-offs）
//! - 协变只作用于顶层生产者/消费者对偶与参数的逐位递归，不建模嵌套位置的逆变；
//!   这与来源系统的简化保持一致。

use crate::token::TypeToken;

/// 变型模式：决定候选令牌以何种纪律匹配请求令牌。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variance {
    /// 生产者侧：候选者的基类可从请求者赋值，参数逐位协变递归。
    Covariant,
    /// 消费者侧：要求结构完全相等（仅原始候选者放宽）。
    Invariant,
}

/// 判断候选令牌是否在给定变型模式下满足请求令牌。
///
/// 该函数是定位匹配的唯一事实来源：注册中心的每次查找都归约为对它的调用。
pub fn is_compatible(requested: &TypeToken, candidate: &TypeToken, variance: Variance) -> bool {
    // 外围令牌先行：存在性必须一致，且以同一模式递归匹配。
    match (requested.enclosing(), candidate.enclosing()) {
        (Some(requested_outer), Some(candidate_outer)) => {
            if !is_compatible(requested_outer, candidate_outer, variance) {
                return false;
            }
        }
        (None, None) => {}
        _ => return false,
    }

    match variance {
        Variance::Invariant => {
            if requested.basis() != candidate.basis() {
                return false;
            }
            // 原始候选者放宽：遗留未检查注册胜过无匹配。
            if candidate.is_raw() {
                return true;
            }
            requested.args() == candidate.args()
        }
        Variance::Covariant => {
            if !candidate.basis().is_assignable_from(requested.basis()) {
                return false;
            }
            // 任一侧为原始类型即放宽为未检查匹配。
            if candidate.is_raw() || requested.is_raw() {
                return true;
            }
            requested.args().len() == candidate.args().len()
                && requested
                    .args()
                    .iter()
                    .zip(candidate.args())
                    .all(|(req, cand)| is_compatible(req, cand, Variance::Covariant))
        }
    }
}
