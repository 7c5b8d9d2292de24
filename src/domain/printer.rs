//! Prefix-notation and tree-view rendering.

use std::fmt;

use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::arena::ExprTree;

impl fmt::Display for ExprTree {
    /// Pre-order tokens separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().map(|(_, node)| node.token()).join(" "))
    }
}

pub trait ToTermTree {
    fn to_term_tree(&self) -> Tree<String>;
}

impl ToTermTree for ExprTree {
    fn to_term_tree(&self) -> Tree<String> {
        fn build(tree: &ExprTree, idx: Index) -> Tree<String> {
            match tree.get_node(idx) {
                Some(node) => {
                    let label = node.token().to_string();
                    match node.children() {
                        Some((left, right)) => {
                            Tree::new(label).with_leaves([build(tree, left), build(tree, right)])
                        }
                        None => Tree::new(label),
                    }
                }
                None => Tree::new("?".to_string()),
            }
        }

        match self.root() {
            Some(root) => build(self, root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::build_tree;
    use crate::domain::token::tokenize;

    #[test]
    fn given_tree_when_display_then_prefix_without_trailing_space() {
        let tree = build_tree(&tokenize("+ * 2 3 1")).unwrap();
        assert_eq!(tree.to_string(), "+ * 2 3 1");
    }

    #[test]
    fn given_compact_input_when_display_then_tokens_are_spaced() {
        let tree = build_tree(&tokenize("^2-93")).unwrap();
        assert_eq!(tree.to_string(), "^ 2 - 9 3");
    }

    #[test]
    fn given_empty_tree_when_display_then_empty_string() {
        assert_eq!(ExprTree::new().to_string(), "");
    }

    #[test]
    fn given_tree_when_to_term_tree_then_renders_operands_as_leaves() {
        let tree = build_tree(&tokenize("+ * 2 3 1")).unwrap();
        let rendered = tree.to_term_tree().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "+");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].ends_with('*'));
        assert!(lines[4].ends_with('1'));
    }
}
