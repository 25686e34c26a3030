use log::warn;
use thiserror::Error;

use super::token::Token;
use crate::source::Source;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("no input data to tokenize")]
    NoData,
    #[error("token truncated: scratch buffer limit reached")]
    Truncated,
}

const INIT_BUF_CHARS: usize = 1024;
const MAX_BUF_CHARS: usize = 64 * 1024;

/// Splits a [`Source`] into whitespace/newline-delimited tokens.
///
/// The scratch buffer is owned by the instance and reused across calls, so
/// independent tokenization streams just use independent `Tokenizer`s. It
/// starts at the initial capacity and doubles on demand up to the ceiling;
/// a token that would outgrow the ceiling is truncated (see `alloc_failed`).
pub struct Tokenizer {
    buf: Vec<char>,
    cap: usize,
    max: usize,
    grow_failed: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::with_limits(INIT_BUF_CHARS, MAX_BUF_CHARS)
    }

    /// Explicit buffer geometry. `init` is the starting capacity, `max` the
    /// hard ceiling growth may never exceed.
    pub fn with_limits(init: usize, max: usize) -> Self {
        let cap = init.max(1);
        Tokenizer {
            buf: Vec::with_capacity(cap),
            cap,
            max: max.max(cap),
            grow_failed: false,
        }
    }

    /// True when the last `next_token` call had to drop characters because
    /// the scratch buffer could not grow. The returned token is truncated.
    pub fn alloc_failed(&self) -> bool {
        self.grow_failed
    }

    fn add_to_buf(&mut self, c: char) {
        if self.buf.len() >= self.cap {
            // A previous grow failed; dropping the character keeps us from
            // writing past the allowed capacity.
            return;
        }
        self.buf.push(c);
        if self.buf.len() >= self.cap {
            if self.cap * 2 <= self.max {
                self.buf.reserve(self.cap);
                self.cap *= 2;
            } else {
                self.grow_failed = true;
            }
        }
    }

    /// Cut the next token out of `src`.
    ///
    /// Splitting policy, maximal munch with no quoting:
    /// - space/tab ends a non-empty token and is otherwise skipped;
    /// - a newline ends a non-empty token (and is pushed back so the next
    ///   call sees it), or by itself becomes a one-character token acting
    ///   as a statement separator;
    /// - everything else is accumulated.
    ///
    /// Returns `Ok(None)` once the source is exhausted. An empty source is
    /// an error (`LexError::NoData`) rather than a silent end of input.
    pub fn next_token(&mut self, src: &mut Source) -> Result<Option<Token>, LexError> {
        if src.is_empty() {
            return Err(LexError::NoData);
        }

        self.buf.clear();
        self.grow_failed = false;

        let mut tok_start = src.pos();
        let mut ended_by_blank = false;

        let mut nc = match src.next_char() {
            Some(c) => c,
            None => return Ok(None),
        };

        loop {
            match nc {
                ' ' | '\t' => {
                    if !self.buf.is_empty() {
                        ended_by_blank = true;
                        break;
                    }
                    // Leading whitespace: keep scanning.
                }
                '\n' => {
                    if !self.buf.is_empty() {
                        // Leave the newline for the next call.
                        src.unget_char();
                    } else {
                        tok_start = src.pos() - 1;
                        self.add_to_buf('\n');
                    }
                    break;
                }
                _ => {
                    if self.buf.is_empty() {
                        tok_start = src.pos() - 1;
                    }
                    self.add_to_buf(nc);
                }
            }

            nc = match src.next_char() {
                Some(c) => c,
                None => break,
            };
        }

        if self.buf.is_empty() {
            return Ok(None);
        }

        // Boundary fix-up: with the buffer exactly full at termination,
        // step back one character instead of touching memory past the
        // capacity. A maximal-length token loses its last character here.
        if self.buf.len() >= self.cap {
            self.buf.pop();
        }

        if self.grow_failed {
            warn!("token buffer full ({} chars), token truncated", self.max);
        }

        let end = if ended_by_blank { src.pos() - 1 } else { src.pos() };
        let text: String = self.buf.iter().collect();
        Ok(Some(Token::new(text, (tok_start, end))))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(input: &str) -> Vec<String> {
        let mut src = Source::new(input);
        let mut tok = Tokenizer::new();
        let mut out = Vec::new();
        while let Some(t) = tok.next_token(&mut src).unwrap() {
            out.push(t.text);
        }
        out
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(all_tokens("echo hello\n"), vec!["echo", "hello", "\n"]);
    }

    #[test]
    fn tabs_and_runs_of_blanks() {
        assert_eq!(all_tokens("  ls \t -l  "), vec!["ls", "-l"]);
    }

    #[test]
    fn lone_newline_is_a_token() {
        assert_eq!(all_tokens("\n"), vec!["\n"]);
    }

    #[test]
    fn newline_is_pushed_back_after_a_word() {
        let mut src = Source::new("ab\ncd\n");
        let mut tok = Tokenizer::new();
        assert_eq!(tok.next_token(&mut src).unwrap().unwrap().text, "ab");
        assert_eq!(tok.next_token(&mut src).unwrap().unwrap().text, "\n");
        assert_eq!(tok.next_token(&mut src).unwrap().unwrap().text, "cd");
        assert_eq!(tok.next_token(&mut src).unwrap().unwrap().text, "\n");
        assert_eq!(tok.next_token(&mut src).unwrap(), None);
    }

    #[test]
    fn empty_source_is_no_data() {
        let mut src = Source::new("");
        let mut tok = Tokenizer::new();
        assert_eq!(tok.next_token(&mut src), Err(LexError::NoData));
    }

    #[test]
    fn spans_point_into_the_source() {
        let mut src = Source::new("echo hello\n");
        let mut tok = Tokenizer::new();
        let t = tok.next_token(&mut src).unwrap().unwrap();
        assert_eq!((t.text.as_str(), t.span), ("echo", (0, 4)));
        let t = tok.next_token(&mut src).unwrap().unwrap();
        assert_eq!((t.text.as_str(), t.span), ("hello", (5, 10)));
        let t = tok.next_token(&mut src).unwrap().unwrap();
        assert_eq!((t.text.as_str(), t.span), ("\n", (10, 11)));
    }

    #[test]
    fn long_token_survives_buffer_doublings() {
        let word = "x".repeat(100);
        let input = format!("{} tail\n", word);
        let mut src = Source::new(&input);
        let mut tok = Tokenizer::with_limits(4, 1024);
        let t = tok.next_token(&mut src).unwrap().unwrap();
        assert_eq!(t.text, word);
        assert_eq!(t.len(), 100);
        assert!(!tok.alloc_failed());
        assert_eq!(tok.next_token(&mut src).unwrap().unwrap().text, "tail");
    }

    // When the buffer is exactly full at termination the last character is
    // dropped, not written past the capacity. Lossy on purpose.
    #[test]
    fn full_buffer_truncates_last_char() {
        let mut src = Source::new("abcdefgh\n");
        let mut tok = Tokenizer::with_limits(4, 4);
        let t = tok.next_token(&mut src).unwrap().unwrap();
        assert_eq!(t.text, "abc");
        assert!(tok.alloc_failed());
        // The rest of the line is consumed; the newline still arrives.
        assert_eq!(tok.next_token(&mut src).unwrap().unwrap().text, "\n");
    }

    #[test]
    fn scratch_buffer_is_reused_across_calls() {
        let mut src = Source::new("aaaa bb\n");
        let mut tok = Tokenizer::with_limits(2, 64);
        assert_eq!(tok.next_token(&mut src).unwrap().unwrap().text, "aaaa");
        // The grow-failure flag resets on each call.
        assert_eq!(tok.next_token(&mut src).unwrap().unwrap().text, "bb");
        assert!(!tok.alloc_failed());
    }
}
