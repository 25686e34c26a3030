use std::ops::BitOr;

use crate::node::Node;
use crate::symtab::SymtabError;

/// Property bits of a symbol table entry. This bitmask is the only channel
/// through which export/readonly/case-folding policy reaches the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryFlags(u32);

impl EntryFlags {
    pub const NONE: EntryFlags = EntryFlags(0);
    /// Export the entry to forked commands.
    pub const EXPORT: EntryFlags = EntryFlags(1 << 0);
    pub const READONLY: EntryFlags = EntryFlags(1 << 1);
    /// Set temporarily between a command's fork and exec.
    pub const CMD_EXPORT: EntryFlags = EntryFlags(1 << 2);
    /// Local to a script or function.
    pub const LOCAL: EntryFlags = EntryFlags(1 << 3);
    /// Uppercase the value on assignment.
    pub const ALLCAPS: EntryFlags = EntryFlags(1 << 4);
    /// Lowercase the value on assignment.
    pub const ALLSMALL: EntryFlags = EntryFlags(1 << 5);
    pub const FUNCTRACE: EntryFlags = EntryFlags(1 << 6);
    /// Accept only integer values.
    pub const INTVAL: EntryFlags = EntryFlags(1 << 7);
    /// Special shell variable such as `$RANDOM`.
    pub const SPECIAL_VAR: EntryFlags = EntryFlags(1 << 8);
    /// Temporary variable used during arithmetic expansion.
    pub const TEMP_VAR: EntryFlags = EntryFlags(1 << 9);

    pub fn contains(self, other: EntryFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set.
    pub fn intersects(self, other: EntryFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: EntryFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: EntryFlags) {
        self.0 &= !other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for EntryFlags {
    type Output = EntryFlags;

    fn bitor(self, rhs: EntryFlags) -> EntryFlags {
        EntryFlags(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolType {
    /// Shell variable holding a string.
    Str,
    /// Shell function holding its body's AST.
    Func,
}

/// The value of an entry: a variable's string or a function's body tree.
/// The entry owns whichever one is live.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolValue {
    Str(String),
    Func(Node),
}

/// One named entry of a symbol table. Names are unique within a table.
#[derive(Debug, Clone, PartialEq)]
pub struct SymtabEntry {
    pub name: String,
    pub flags: EntryFlags,
    val: Option<SymbolValue>,
}

impl SymtabEntry {
    pub fn new(name: &str) -> Self {
        SymtabEntry {
            name: name.to_string(),
            flags: EntryFlags::NONE,
            val: None,
        }
    }

    pub fn symbol_type(&self) -> SymbolType {
        match self.val {
            Some(SymbolValue::Func(_)) => SymbolType::Func,
            _ => SymbolType::Str,
        }
    }

    /// Assign a string value. ALLCAPS/ALLSMALL fold the case here, at
    /// assignment time; reads return the value as stored. A READONLY entry
    /// refuses the assignment and keeps its current value.
    pub fn set_value(&mut self, val: &str) -> Result<(), SymtabError> {
        if self.flags.contains(EntryFlags::READONLY) {
            return Err(SymtabError::Readonly(self.name.clone()));
        }
        let val = if self.flags.contains(EntryFlags::ALLCAPS) {
            val.to_uppercase()
        } else if self.flags.contains(EntryFlags::ALLSMALL) {
            val.to_lowercase()
        } else {
            val.to_string()
        };
        self.val = Some(SymbolValue::Str(val));
        Ok(())
    }

    /// Install a function body, taking ownership of the tree. The previous
    /// value, string or tree, is released.
    pub fn set_func_body(&mut self, body: Node) -> Result<(), SymtabError> {
        if self.flags.contains(EntryFlags::READONLY) {
            return Err(SymtabError::Readonly(self.name.clone()));
        }
        self.val = Some(SymbolValue::Func(body));
        Ok(())
    }

    pub fn val(&self) -> Option<&SymbolValue> {
        self.val.as_ref()
    }

    pub fn value_str(&self) -> Option<&str> {
        match &self.val {
            Some(SymbolValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn func_body(&self) -> Option<&Node> {
        match &self.val {
            Some(SymbolValue::Func(n)) => Some(n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeType};

    #[test]
    fn flags_are_a_bitmask() {
        let mut flags = EntryFlags::NONE;
        assert!(flags.is_empty());
        flags.insert(EntryFlags::EXPORT | EntryFlags::READONLY);
        assert!(flags.contains(EntryFlags::EXPORT));
        assert!(flags.contains(EntryFlags::READONLY));
        assert!(!flags.contains(EntryFlags::LOCAL));
        assert!(flags.intersects(EntryFlags::EXPORT | EntryFlags::LOCAL));
        flags.remove(EntryFlags::EXPORT);
        assert!(!flags.contains(EntryFlags::EXPORT));
        assert!(flags.contains(EntryFlags::READONLY));
    }

    #[test]
    fn plain_assignment() {
        let mut e = SymtabEntry::new("x");
        e.set_value("hello").unwrap();
        assert_eq!(e.value_str(), Some("hello"));
        assert_eq!(e.symbol_type(), SymbolType::Str);
    }

    #[test]
    fn readonly_blocks_assignment() {
        let mut e = SymtabEntry::new("x");
        e.set_value("before").unwrap();
        e.flags.insert(EntryFlags::READONLY);
        assert_eq!(
            e.set_value("after"),
            Err(SymtabError::Readonly("x".to_string()))
        );
        assert_eq!(e.value_str(), Some("before"));
    }

    #[test]
    fn allcaps_folds_on_assignment() {
        let mut e = SymtabEntry::new("x");
        e.flags.insert(EntryFlags::ALLCAPS);
        e.set_value("abc").unwrap();
        assert_eq!(e.value_str(), Some("ABC"));
    }

    #[test]
    fn allsmall_folds_on_assignment() {
        let mut e = SymtabEntry::new("x");
        e.flags.insert(EntryFlags::ALLSMALL);
        e.set_value("MiXeD").unwrap();
        assert_eq!(e.value_str(), Some("mixed"));
    }

    #[test]
    fn function_body_replaces_string_value() {
        let mut e = SymtabEntry::new("f");
        e.set_value("shadowed").unwrap();
        let mut body = Node::new(NodeType::Command);
        let mut word = Node::new(NodeType::Var);
        word.set_val_str("echo");
        body.add_child(word);
        e.set_func_body(body).unwrap();
        assert_eq!(e.symbol_type(), SymbolType::Func);
        assert_eq!(e.value_str(), None);
        assert_eq!(e.func_body().unwrap().children(), 1);
    }

    #[test]
    fn readonly_blocks_function_body_too() {
        let mut e = SymtabEntry::new("f");
        e.flags.insert(EntryFlags::READONLY);
        let body = Node::new(NodeType::Command);
        assert!(e.set_func_body(body).is_err());
        assert_eq!(e.val(), None);
    }
}
