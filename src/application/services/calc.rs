//! Expression tree service
//!
//! Reads a prefix expression, builds its tree and reduces a copy of it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{tokenize, Evaluator, ExponentPolicy, ExprBuilder, ExprTree, Reducer};
use crate::infrastructure::traits::FileSystem;

/// Result of running the pipeline on one expression.
#[derive(Debug, Clone)]
pub struct CalcOutput {
    /// Tree as built from the input
    pub original: ExprTree,
    /// Tree after collapsing every single-digit subtree
    pub reduced: ExprTree,
    /// Number of subtrees collapsed
    pub collapsed: usize,
}

/// Service for building and reducing expression trees.
pub struct CalcService {
    fs: Arc<dyn FileSystem>,
    reducer: Reducer,
}

impl CalcService {
    /// Create a new calc service.
    pub fn new(fs: Arc<dyn FileSystem>, policy: ExponentPolicy) -> Self {
        Self {
            fs,
            reducer: Reducer::new(Evaluator::new(policy)),
        }
    }

    /// Read and build the expression tree stored in `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<ExprTree> {
        let text = self
            .fs
            .read_to_string(path)
            .with_path_context("read expression", path)?;
        self.parse(&text)
    }

    /// Build the expression tree for `text`.
    pub fn parse(&self, text: &str) -> ApplicationResult<ExprTree> {
        let tokens = tokenize(text);
        debug!("parse: {} tokens", tokens.len());
        Ok(ExprBuilder::new().build(&tokens)?)
    }

    /// Reduce a copy of `tree`, leaving the original untouched.
    pub fn reduce(&self, tree: &ExprTree) -> ApplicationResult<CalcOutput> {
        let mut reduced = tree.clone();
        let collapsed = self.reducer.reduce(&mut reduced)?;
        Ok(CalcOutput {
            original: tree.clone(),
            reduced,
            collapsed,
        })
    }

    /// Full pipeline: read, build, reduce.
    pub fn run(&self, path: &Path) -> ApplicationResult<CalcOutput> {
        let tree = self.load(path)?;
        self.reduce(&tree)
    }
}
