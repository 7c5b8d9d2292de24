//! Domain layer: expression trees, graph reachability and their algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod eval;
pub mod graph;
pub mod printer;
pub mod reduce;
pub mod token;

pub use arena::{ExprNode, ExprTree};
pub use builder::{build_tree, ExprBuilder};
pub use error::{DomainError, DomainResult};
pub use eval::{Evaluator, ExponentPolicy};
pub use graph::Graph;
pub use printer::ToTermTree;
pub use reduce::{Reducer, REDUCIBLE};
pub use token::{tokenize, Operator, Token};
