/// One token cut out of a [`Source`](crate::source::Source).
///
/// The token owns a fresh copy of its text; `span` records where in the
/// source the text came from, as `[start, end)` character positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub span: (usize, usize),
}

impl Token {
    pub fn new(text: impl Into<String>, span: (usize, usize)) -> Self {
        Token {
            text: text.into(),
            span,
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// A lone newline token acts as a statement separator.
    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }
}
