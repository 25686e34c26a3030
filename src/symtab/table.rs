use std::collections::HashMap;
use std::fmt;

use crate::symtab::entry::{EntryFlags, SymtabEntry};
use crate::symtab::SymtabError;

/// Storage strategy for a table, picked when the table is built. Both
/// backends satisfy the same contract; `List` keeps entries in insertion
/// order and scans linearly, `Hash` buckets them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Hash,
    List,
}

#[derive(Debug, Clone, PartialEq)]
enum Entries {
    Hash(HashMap<String, SymtabEntry>),
    List(Vec<SymtabEntry>),
}

/// One scope frame: a name -> entry mapping at a nesting level.
/// Level 0 is the global table; 1 and above are locals.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    level: usize,
    entries: Entries,
}

impl SymbolTable {
    pub fn new(level: usize, backend: Backend) -> Self {
        let entries = match backend {
            Backend::Hash => Entries::Hash(HashMap::new()),
            Backend::List => Entries::List(Vec::new()),
        };
        SymbolTable { level, entries }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Insert `name` if absent and hand back its entry. Uniqueness per
    /// table falls out of the insert-or-get contract.
    pub fn add(&mut self, name: &str) -> &mut SymtabEntry {
        match &mut self.entries {
            Entries::Hash(map) => map
                .entry(name.to_string())
                .or_insert_with(|| SymtabEntry::new(name)),
            Entries::List(list) => {
                let idx = match list.iter().position(|e| e.name == name) {
                    Some(i) => i,
                    None => {
                        list.push(SymtabEntry::new(name));
                        list.len() - 1
                    }
                };
                &mut list[idx]
            }
        }
    }

    /// Exact lookup within this table only.
    pub fn lookup(&self, name: &str) -> Option<&SymtabEntry> {
        match &self.entries {
            Entries::Hash(map) => map.get(name),
            Entries::List(list) => list.iter().find(|e| e.name == name),
        }
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut SymtabEntry> {
        match &mut self.entries {
            Entries::Hash(map) => map.get_mut(name),
            Entries::List(list) => list.iter_mut().find(|e| e.name == name),
        }
    }

    /// Remove an entry. READONLY entries refuse removal. `Ok(false)` means
    /// the name was not present.
    pub fn remove(&mut self, name: &str) -> Result<bool, SymtabError> {
        let Some(entry) = self.lookup(name) else {
            return Ok(false);
        };
        if entry.flags.contains(EntryFlags::READONLY) {
            return Err(SymtabError::Readonly(name.to_string()));
        }
        match &mut self.entries {
            Entries::Hash(map) => {
                map.remove(name);
            }
            Entries::List(list) => {
                if let Some(i) = list.iter().position(|e| e.name == name) {
                    list.remove(i);
                }
            }
        }
        Ok(true)
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &SymtabEntry> + '_> {
        match &self.entries {
            Entries::Hash(map) => Box::new(map.values()),
            Entries::List(list) => Box::new(list.iter()),
        }
    }

    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::Hash(map) => map.len(),
            Entries::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SymbolTable {
    /// `name=value` dump, one entry per line. Functions render as `name()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.iter() {
            match entry.value_str() {
                Some(v) => writeln!(f, "{}={}", entry.name, v)?,
                None if entry.func_body().is_some() => writeln!(f, "{}()", entry.name)?,
                None => writeln!(f, "{}=", entry.name)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every contract test runs against both storage strategies.
    fn both(check: impl Fn(SymbolTable)) {
        check(SymbolTable::new(0, Backend::Hash));
        check(SymbolTable::new(0, Backend::List));
    }

    #[test]
    fn add_is_insert_or_get() {
        both(|mut t| {
            t.add("x").set_value("1").unwrap();
            // Same name: the existing entry comes back, value intact.
            assert_eq!(t.add("x").value_str(), Some("1"));
            assert_eq!(t.len(), 1);
        });
    }

    #[test]
    fn lookup_is_exact() {
        both(|mut t| {
            t.add("path").set_value("/bin").unwrap();
            assert_eq!(t.lookup("path").unwrap().value_str(), Some("/bin"));
            assert_eq!(t.lookup("PATH"), None);
        });
    }

    #[test]
    fn remove_works_and_respects_readonly() {
        both(|mut t| {
            t.add("tmp").set_value("1").unwrap();
            assert_eq!(t.remove("tmp"), Ok(true));
            assert_eq!(t.lookup("tmp"), None);
            assert_eq!(t.remove("tmp"), Ok(false));

            let locked = t.add("locked");
            locked.set_value("v").unwrap();
            locked.flags.insert(EntryFlags::READONLY);
            assert_eq!(
                t.remove("locked"),
                Err(SymtabError::Readonly("locked".to_string()))
            );
            assert!(t.lookup("locked").is_some());
        });
    }

    #[test]
    fn list_backend_keeps_insertion_order() {
        let mut t = SymbolTable::new(0, Backend::List);
        t.add("b");
        t.add("a");
        t.add("c");
        let names: Vec<_> = t.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn dump_format() {
        let mut t = SymbolTable::new(0, Backend::List);
        t.add("x").set_value("1").unwrap();
        t.add("unset");
        assert_eq!(t.to_string(), "x=1\nunset=\n");
    }
}
