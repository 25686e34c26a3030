use crate::lexer::{LexError, Tokenizer};
use crate::node::{Node, NodeType};
use crate::source::Source;

/// Assemble the next simple command from `src` into a COMMAND node whose
/// children are the words, in order. Consumes tokens up to and including
/// the terminating newline; empty statements (bare newlines) are skipped.
/// Returns `Ok(None)` when no command remains.
///
/// Control structures, redirections, and the rest of the grammar belong to
/// the full parser, which sits on top of this layer.
pub fn parse_simple_command(
    tok: &mut Tokenizer,
    src: &mut Source,
) -> Result<Option<Node>, LexError> {
    let mut cmd = Node::new(NodeType::Command);

    loop {
        let token = match tok.next_token(src)? {
            Some(t) => t,
            None => break,
        };
        if tok.alloc_failed() {
            // A truncated word must not flow into the command; the whole
            // line is abandoned.
            return Err(LexError::Truncated);
        }

        if token.is_newline() {
            if cmd.children() > 0 {
                break;
            }
            continue;
        }

        let mut word = Node::new(NodeType::Var);
        word.set_val_str(&token.text);
        cmd.add_child(word);
    }

    if cmd.children() == 0 {
        Ok(None)
    } else {
        Ok(Some(cmd))
    }
}
