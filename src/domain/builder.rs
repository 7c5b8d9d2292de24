//! Tree builder for turning a prefix token sequence into an expression tree.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{ExprNode, ExprTree};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::token::Token;

/// Constructs expression trees from prefix-ordered tokens.
///
/// Tokens are scanned right-to-left with an explicit stack of finished
/// subtrees; an operator pops its first operand, then its second.
#[derive(Debug, Default)]
pub struct ExprBuilder {
    stack: Vec<Index>,
}

impl ExprBuilder {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    #[instrument(level = "debug", skip(self, tokens), fields(tokens = tokens.len()))]
    pub fn build(&mut self, tokens: &[Token]) -> DomainResult<ExprTree> {
        if tokens.is_empty() {
            return Err(DomainError::EmptyExpression);
        }

        // Reset state for a fresh build
        self.stack.clear();
        let mut tree = ExprTree::new();

        for (position, token) in tokens.iter().enumerate().rev() {
            let node = match *token {
                Token::Digit(d) => ExprNode::Leaf(d),
                Token::Op(op) => {
                    let missing = DomainError::MalformedExpression {
                        operator: op,
                        position,
                    };
                    let left = self.stack.pop().ok_or_else(|| missing.clone())?;
                    let right = self.stack.pop().ok_or(missing)?;
                    ExprNode::Binary { op, left, right }
                }
            };
            let idx = tree.insert_node(node);
            self.stack.push(idx);
        }

        match self.stack.as_slice() {
            [root] => {
                tree.set_root(*root);
                debug!("built tree: {} nodes, depth {}", tree.len(), tree.depth());
                Ok(tree)
            }
            rest => Err(DomainError::DanglingOperands { count: rest.len() }),
        }
    }
}

/// Builds a tree from tokens with a fresh builder.
pub fn build_tree(tokens: &[Token]) -> DomainResult<ExprTree> {
    ExprBuilder::new().build(tokens)
}
