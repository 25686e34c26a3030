pub mod config;
pub mod error;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod prompt;
pub mod reader;
pub mod repl;
pub mod source;
pub mod symtab;
