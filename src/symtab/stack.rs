use std::collections::HashMap;

use log::{debug, warn};

use crate::symtab::entry::{EntryFlags, SymtabEntry};
use crate::symtab::table::{Backend, SymbolTable};
use crate::symtab::SymtabError;

/// Upper bound on scope nesting.
pub const MAX_SYMTAB: usize = 256;

/// The stack of scope frames. The bottom frame is the global table and is
/// never popped; a frame is pushed on function or script entry and popped
/// on return.
///
/// Name resolution is two-level: the innermost local frame, then the global
/// table. Intermediate frames stay on the stack only so they can be
/// restored when inner scopes return; they are deliberately never searched
/// (bash-like dynamic scoping, not lexical chaining).
pub struct SymtabStack {
    tables: Vec<SymbolTable>,
    backend: Backend,
}

impl SymtabStack {
    pub fn new(backend: Backend) -> Self {
        SymtabStack {
            tables: vec![SymbolTable::new(0, backend)],
            backend,
        }
    }

    /// Number of frames, global included.
    pub fn depth(&self) -> usize {
        self.tables.len()
    }

    pub fn global(&self) -> &SymbolTable {
        &self.tables[0]
    }

    pub fn global_mut(&mut self) -> &mut SymbolTable {
        &mut self.tables[0]
    }

    /// The current table: innermost local frame, or the global table when
    /// no local scope is active.
    pub fn local(&self) -> &SymbolTable {
        self.tables.last().expect("stack always holds the global table")
    }

    pub fn local_mut(&mut self) -> &mut SymbolTable {
        self.tables.last_mut().expect("stack always holds the global table")
    }

    /// Enter a new local scope.
    pub fn push(&mut self) -> Result<&mut SymbolTable, SymtabError> {
        if self.tables.len() >= MAX_SYMTAB {
            return Err(SymtabError::StackFull);
        }
        let level = self.tables.len();
        self.tables.push(SymbolTable::new(level, self.backend));
        debug!("pushed symtab frame, level {}", level);
        Ok(self.local_mut())
    }

    /// Leave the current scope, handing its frame back to the caller. The
    /// frame's entries die with it unless the caller merges them first (see
    /// `merge_global`). The global table cannot be popped.
    pub fn pop(&mut self) -> Option<SymbolTable> {
        if self.tables.len() == 1 {
            return None;
        }
        let frame = self.tables.pop();
        debug!("popped symtab frame, level {}", self.tables.len());
        frame
    }

    /// Insert-or-get `name` in the current table.
    pub fn add(&mut self, name: &str) -> &mut SymtabEntry {
        self.local_mut().add(name)
    }

    /// Resolve `name`: innermost local frame first, then the global table.
    pub fn get(&self, name: &str) -> Option<&SymtabEntry> {
        if let Some(entry) = self.local().lookup(name) {
            return Some(entry);
        }
        if self.depth() > 1 {
            return self.global().lookup(name);
        }
        None
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SymtabEntry> {
        if self.local().lookup(name).is_some() {
            return self.local_mut().lookup_mut(name);
        }
        if self.depth() > 1 {
            return self.global_mut().lookup_mut(name);
        }
        None
    }

    /// Lookup in the current local table only.
    pub fn get_local(&self, name: &str) -> Option<&SymtabEntry> {
        self.local().lookup(name)
    }

    /// Remove `name` from the innermost frame that holds it, scanning the
    /// whole stack top-down. READONLY entries refuse removal.
    pub fn remove(&mut self, name: &str) -> Result<bool, SymtabError> {
        for table in self.tables.iter_mut().rev() {
            if table.lookup(name).is_some() {
                return table.remove(name);
            }
        }
        Ok(false)
    }

    /// Copy the EXPORT-flagged entries of `frame` into the global table,
    /// so a scope about to be discarded keeps its exported variables alive.
    pub fn merge_global(&mut self, frame: &SymbolTable) {
        for entry in frame.iter() {
            if !entry.flags.contains(EntryFlags::EXPORT) {
                continue;
            }
            let global = self.tables[0].add(&entry.name);
            if let Some(val) = entry.value_str() {
                if let Err(e) = global.set_value(val) {
                    warn!("merge into global scope skipped: {}", e);
                    continue;
                }
            }
            global.flags = entry.flags;
            global.flags.remove(EntryFlags::LOCAL);
        }
    }

    /// Seed the global table from the process environment, marking every
    /// imported variable for re-export.
    pub fn import_os_environ(&mut self) {
        for (name, val) in std::env::vars() {
            let entry = self.tables[0].add(&name);
            if entry.set_value(&val).is_ok() {
                entry.flags.insert(EntryFlags::EXPORT);
            }
        }
    }

    /// The `(name, value)` pairs the executor must place in a child's
    /// environment at fork time: visible string entries flagged EXPORT, or
    /// transiently CMD_EXPORT, with locals overriding globals.
    pub fn exported_vars(&self) -> Vec<(String, String)> {
        let exportable = EntryFlags::EXPORT | EntryFlags::CMD_EXPORT;
        let mut vars: HashMap<String, String> = HashMap::new();

        let mut collect = |table: &SymbolTable| {
            for entry in table.iter() {
                if !entry.flags.intersects(exportable) {
                    continue;
                }
                if let Some(val) = entry.value_str() {
                    vars.insert(entry.name.clone(), val.to_string());
                }
            }
        };

        collect(self.global());
        if self.depth() > 1 {
            collect(self.local());
        }
        vars.into_iter().collect()
    }
}
