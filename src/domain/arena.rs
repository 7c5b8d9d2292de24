use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::token::{Operator, Token};

/// Node of a binary expression tree.
///
/// A leaf always holds a digit and an operator always owns exactly two children,
/// so the leaf/internal invariant cannot be violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprNode {
    Leaf(u8),
    Binary {
        op: Operator,
        left: Index,
        right: Index,
    },
}

impl ExprNode {
    pub fn token(&self) -> Token {
        match *self {
            ExprNode::Leaf(d) => Token::Digit(d),
            ExprNode::Binary { op, .. } => Token::Op(op),
        }
    }

    pub fn children(&self) -> Option<(Index, Index)> {
        match *self {
            ExprNode::Leaf(_) => None,
            ExprNode::Binary { left, right, .. } => Some((left, right)),
        }
    }
}

/// Arena-based expression tree.
///
/// Uses generational arena for memory-safe node references; the tree is the
/// single owner of every node and children are referenced by index.
#[derive(Debug, Clone)]
pub struct ExprTree {
    /// Arena storage for all tree nodes
    arena: Arena<ExprNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for ExprTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, node: ExprNode) -> Index {
        self.arena.insert(node)
    }

    pub fn set_root(&mut self, idx: Index) {
        self.root = Some(idx);
    }

    pub fn get_node(&self, idx: Index) -> Option<&ExprNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Tokens in prefix (pre-order) sequence.
    pub fn tokens(&self) -> Vec<Token> {
        self.iter().map(|(_, node)| node.token()).collect()
    }

    /// Number of levels on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((idx, level)) = stack.pop() {
            if let Some(node) = self.get_node(idx) {
                deepest = deepest.max(level);
                if let Some((left, right)) = node.children() {
                    stack.push((right, level + 1));
                    stack.push((left, level + 1));
                }
            }
        }
        deepest
    }

    /// Replaces the node at `idx` with a digit leaf and releases its children.
    ///
    /// Returns false if `idx` is not a live node.
    #[instrument(level = "trace", skip(self))]
    pub fn collapse(&mut self, idx: Index, digit: u8) -> bool {
        let children = match self.arena.get(idx) {
            Some(node) => node.children(),
            None => return false,
        };
        if let Some((left, right)) = children {
            self.remove_subtree(left);
            self.remove_subtree(right);
        }
        if let Some(node) = self.arena.get_mut(idx) {
            *node = ExprNode::Leaf(digit);
        }
        true
    }

    fn remove_subtree(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                if let Some((left, right)) = node.children() {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
    }
}

/// Structural equality: two trees are equal when their prefix sequences match,
/// which for fixed-arity operators determines the shape uniquely.
impl PartialEq for ExprTree {
    fn eq(&self, other: &Self) -> bool {
        self.iter()
            .map(|(_, n)| n.token())
            .eq(other.iter().map(|(_, n)| n.token()))
    }
}

impl Eq for ExprTree {}

pub struct PreOrderIterator<'a> {
    tree: &'a ExprTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a ExprTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a ExprNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Right first so that left is visited first
                if let Some((left, right)) = node.children() {
                    self.stack.push(right);
                    self.stack.push(left);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a ExprTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a ExprTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a ExprNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                if let Some((left, right)) = node.children() {
                    self.stack.push((right, false));
                    self.stack.push((left, false));
                }
            }
        }
        None
    }
}
