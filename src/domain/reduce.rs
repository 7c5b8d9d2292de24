//! In-place reduction of expression trees.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{ExprNode, ExprTree};
use crate::domain::error::DomainResult;
use crate::domain::eval::Evaluator;

/// Values a subtree may collapse to: exactly the values a digit leaf can hold.
pub const REDUCIBLE: RangeInclusive<i64> = 0..=9;

/// Collapses every maximal subtree whose value is a single digit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reducer {
    evaluator: Evaluator,
}

impl Reducer {
    pub fn new(evaluator: Evaluator) -> Self {
        Self { evaluator }
    }

    /// Reduces `tree` in place and returns how many subtrees were collapsed.
    ///
    /// Nodes are visited children-first. Each operator is evaluated over its
    /// already-collapsed children, so a value computed once is reused by the
    /// parent. On error the tree is left partially reduced.
    #[instrument(level = "debug", skip(self, tree), fields(nodes = tree.len()))]
    pub fn reduce(&self, tree: &mut ExprTree) -> DomainResult<usize> {
        let order: Vec<(Index, ExprNode)> =
            tree.iter_postorder().map(|(idx, node)| (idx, *node)).collect();
        let mut values: HashMap<Index, i64> = HashMap::with_capacity(order.len());
        let mut collapsed = 0;

        for (idx, node) in order {
            let value = match node {
                ExprNode::Leaf(d) => i64::from(d),
                ExprNode::Binary { op, left, right } => {
                    let l = self.value_of(tree, &values, left)?;
                    let r = self.value_of(tree, &values, right)?;
                    let value = op.apply(l, r, self.evaluator.policy())?;
                    if let Some(digit) = as_digit(value) {
                        trace!("collapse {} -> {}", op, digit);
                        tree.collapse(idx, digit);
                        collapsed += 1;
                    }
                    value
                }
            };
            values.insert(idx, value);
        }

        debug!("collapsed {} subtrees, {} nodes left", collapsed, tree.len());
        Ok(collapsed)
    }

    fn value_of(
        &self,
        tree: &ExprTree,
        values: &HashMap<Index, i64>,
        idx: Index,
    ) -> DomainResult<i64> {
        match values.get(&idx) {
            Some(v) => Ok(*v),
            None => self.evaluator.evaluate_subtree(tree, idx),
        }
    }
}

fn as_digit(value: i64) -> Option<u8> {
    if REDUCIBLE.contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}
