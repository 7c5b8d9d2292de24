//! Integer evaluation of expression subtrees.

use generational_arena::Index;
use serde::{Deserialize, Serialize};

use crate::domain::arena::{ExprNode, ExprTree};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::token::Operator;

/// How `^` treats a negative right-hand operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExponentPolicy {
    /// Fail with `DomainError::NegativeExponent`.
    #[default]
    Reject,
    /// Yield 1, as if no multiplication took place.
    One,
}

impl Operator {
    /// Combines two operand values with checked `i64` arithmetic.
    ///
    /// Division truncates toward zero and the remainder takes the sign of the
    /// dividend.
    pub fn apply(self, left: i64, right: i64, policy: ExponentPolicy) -> DomainResult<i64> {
        let overflow = DomainError::Overflow { operator: self };
        match self {
            Operator::Add => left.checked_add(right).ok_or(overflow),
            Operator::Sub => left.checked_sub(right).ok_or(overflow),
            Operator::Mul => left.checked_mul(right).ok_or(overflow),
            Operator::Div | Operator::Mod if right == 0 => {
                Err(DomainError::DivisionByZero { operator: self })
            }
            Operator::Div => left.checked_div(right).ok_or(overflow),
            Operator::Mod => left.checked_rem(right).ok_or(overflow),
            Operator::Pow => match (right < 0, policy) {
                (true, ExponentPolicy::Reject) => {
                    Err(DomainError::NegativeExponent { exponent: right })
                }
                (true, ExponentPolicy::One) => Ok(1),
                (false, _) => match u32::try_from(right) {
                    Ok(exponent) => left.checked_pow(exponent).ok_or(overflow),
                    // exponents past u32 only stay finite for these bases
                    Err(_) => match left {
                        0 => Ok(0),
                        1 => Ok(1),
                        -1 => Ok(if right % 2 == 0 { 1 } else { -1 }),
                        _ => Err(overflow),
                    },
                },
            },
        }
    }
}

/// Read-only evaluator over an expression tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    policy: ExponentPolicy,
}

impl Evaluator {
    pub fn new(policy: ExponentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ExponentPolicy {
        self.policy
    }

    /// Value of the whole tree; an empty tree has no value.
    pub fn evaluate(&self, tree: &ExprTree) -> DomainResult<Option<i64>> {
        tree.root()
            .map(|root| self.evaluate_subtree(tree, root))
            .transpose()
    }

    /// Value of the subtree rooted at `idx`. A stale index evaluates to 0.
    pub fn evaluate_subtree(&self, tree: &ExprTree, idx: Index) -> DomainResult<i64> {
        match tree.get_node(idx) {
            Some(ExprNode::Leaf(d)) => Ok(i64::from(*d)),
            Some(ExprNode::Binary { op, left, right }) => {
                let l = self.evaluate_subtree(tree, *left)?;
                let r = self.evaluate_subtree(tree, *right)?;
                op.apply(l, r, self.policy)
            }
            None => Ok(0),
        }
    }
}
