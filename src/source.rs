/// Input buffer for one logical command line.
///
/// The tokenizer pulls characters one at a time and may push the most
/// recent one back, which is all the lookahead whitespace splitting needs.
pub struct Source {
    chars: Vec<char>,
    pos: usize,
}

impl Source {
    pub fn new(text: &str) -> Self {
        Source {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    /// Next character, or `None` once the buffer is exhausted.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Undo the last `next_char`. One level only; calling it twice in a row
    /// rewinds a single character at most per successful advance.
    pub fn unget_char(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Current cursor position, in characters.
    pub fn pos(&self) -> usize {
        self.pos
    }
}
