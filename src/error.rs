use thiserror::Error;

use crate::config::ConfigError;
use crate::lexer::LexError;
use crate::reader::ReadError;
use crate::symtab::SymtabError;

/// Crate-level error: any failure the front end can surface to its caller.
/// Everything here is local to one input line or command; the caller
/// prints a diagnostic and goes back to the prompt loop.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("read error: {0}")]
    Read(#[from] ReadError),
    #[error("symbol table error: {0}")]
    Symtab(#[from] SymtabError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_each_layer_with_a_prefix() {
        let e: ShellError = LexError::NoData.into();
        assert_eq!(e.to_string(), "lex error: no input data to tokenize");

        let e: ShellError = SymtabError::Readonly("PATH".to_string()).into();
        assert_eq!(e.to_string(), "symbol table error: PATH: readonly variable");

        let e: ShellError = ConfigError::Parse("line 1: unknown key: x".to_string()).into();
        assert_eq!(e.to_string(), "config error: parse error: line 1: unknown key: x");
    }
}
