use crate::{AstNode, Position};
use ptree::TreeItem;
use std::fmt::{Debug, Display, Formatter};

impl AstNode {
    /// Create a new AST node.
    pub fn new(name: String, text: String, position: Position, children: Vec<AstNode>) -> Self {
        Self {
            name,
            text,
            position,
            children,
        }
    }

    /// Create an AST leaf node.
    pub fn leaf(name: &str, text: &str, position: Position) -> Self {
        AstNode::new(
            name.to_string(),
            text.to_string(),
            position,
            Vec::with_capacity(0),
        )
    }

    /// Find a direct child produced by the given declaration.
    pub fn get_child(&self, name: &str) -> Option<&AstNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Search this node and all nested children, returning the first match.
    pub fn find_tree<TF: Fn(&AstNode) -> bool>(&self, p: &TF) -> Option<&AstNode> {
        if p(self) {
            Some(self)
        } else {
            self.children.iter().find_map(|child| child.find_tree(p))
        }
    }

    /// Whether this node or any nested child was produced by the given declaration.
    pub fn contains(&self, name: &str) -> bool {
        self.name == name || self.children.iter().any(|child| child.contains(name))
    }

    /// Print the tree to stdout.
    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}

impl Display for AstNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {:?}", self.name, self.position, self.text)
    }
}

impl Debug for AstNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug_struct = f.debug_struct("AstNode");
        debug_struct
            .field("name", &self.name)
            .field("text", &self.text)
            .field("position", &(self.position.line, self.position.column));
        if !self.children.is_empty() {
            debug_struct.field("children", &self.children);
        }
        debug_struct.finish()
    }
}

impl TreeItem for AstNode {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        write!(f, "{} # {}", self.name, self.position)
    }

    fn children(&self) -> std::borrow::Cow<[Self::Child]> {
        std::borrow::Cow::from(&self.children)
    }
}
