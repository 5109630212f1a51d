use crate::{AstNode, AstResult};

impl AstResult {
    /// A successful result carrying no nodes.
    pub fn matched() -> Self {
        Self {
            matched: true,
            items: Vec::with_capacity(0),
        }
    }

    /// The soft failure value driving backtracking.
    pub fn unmatched() -> Self {
        Self {
            matched: false,
            items: Vec::with_capacity(0),
        }
    }

    /// A successful result carrying a single tree.
    pub fn tree(node: AstNode) -> Self {
        Self {
            matched: true,
            items: vec![node],
        }
    }

    /// A successful result carrying the given nodes.
    pub fn with_items(items: Vec<AstNode>) -> Self {
        Self {
            matched: true,
            items,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Append the other result's nodes onto this result's nodes.
    pub fn combine(&mut self, other: AstResult) {
        self.items.extend(other.items);
    }

    pub fn items(&self) -> &[AstNode] {
        &self.items
    }

    pub fn into_items(self) -> Vec<AstNode> {
        self.items
    }
}
