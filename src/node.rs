use std::fmt;

/// What a node in the command tree represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Root of a simple command.
    Command,
    /// A word: command name, argument, or variable name.
    Var,
}

/// The value carried by a node. Exactly one variant is live, and the node
/// owns it; replacing the value releases the old one.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    SInt(i64),
    UInt(u64),
    SLLong(i64),
    ULLong(u64),
    Float(f64),
    LDouble(f64),
    Char(char),
    Str(String),
}

/// One node of the generic command AST.
///
/// A parent owns its whole child subtree; a node never appears in two
/// trees. Children keep insertion order and are reachable from
/// `first_child` through the sibling iterator. Dropping a node releases
/// every descendant along with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_type: NodeType,
    val: Option<NodeValue>,
    children: Vec<Node>,
}

impl Node {
    /// A fresh node of the given type, value unset, no children.
    pub fn new(node_type: NodeType) -> Self {
        Node {
            node_type,
            val: None,
            children: Vec::new(),
        }
    }

    /// Append `child` to the sibling list, transferring ownership.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn set_val(&mut self, val: NodeValue) {
        self.val = Some(val);
    }

    /// Store an owned copy of `val` as this node's string value.
    pub fn set_val_str(&mut self, val: &str) {
        self.val = Some(NodeValue::Str(val.to_string()));
    }

    pub fn val(&self) -> Option<&NodeValue> {
        self.val.as_ref()
    }

    /// The string value, if that is what the node holds.
    pub fn val_str(&self) -> Option<&str> {
        match &self.val {
            Some(NodeValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Number of direct children.
    pub fn children(&self) -> usize {
        self.children.len()
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Direct children in insertion order.
    pub fn iter_children(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::SInt(v) => write!(f, "{}", v),
            NodeValue::UInt(v) => write!(f, "{}", v),
            NodeValue::SLLong(v) => write!(f, "{}", v),
            NodeValue::ULLong(v) => write!(f, "{}", v),
            NodeValue::Float(v) => write!(f, "{}", v),
            NodeValue::LDouble(v) => write!(f, "{}", v),
            NodeValue::Char(v) => write!(f, "{}", v),
            NodeValue::Str(v) => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for Node {
    /// Indented tree dump, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(node: &Node, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for _ in 0..depth {
                write!(f, "  ")?;
            }
            let name = match node.node_type {
                NodeType::Command => "command",
                NodeType::Var => "var",
            };
            match node.val() {
                Some(v) => writeln!(f, "{}: {}", name, v)?,
                None => writeln!(f, "{}", name)?,
            }
            for child in node.iter_children() {
                write_node(child, depth + 1, f)?;
            }
            Ok(())
        }
        write_node(self, 0, f)
    }
}
