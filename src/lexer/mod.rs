pub mod token;
pub mod tokenizer;

pub use token::Token;
pub use tokenizer::{LexError, Tokenizer};
