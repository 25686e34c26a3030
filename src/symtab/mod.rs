pub mod entry;
pub mod stack;
pub mod table;

pub use entry::{EntryFlags, SymbolType, SymbolValue, SymtabEntry};
pub use stack::{SymtabStack, MAX_SYMTAB};
pub use table::{Backend, SymbolTable};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymtabError {
    #[error("{0}: readonly variable")]
    Readonly(String),
    #[error("too many nested scopes ({MAX_SYMTAB} frames)")]
    StackFull,
}
