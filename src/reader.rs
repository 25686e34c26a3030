use std::io::{self, BufRead};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("out of memory while reading command line")]
    OutOfMemory,
}

/// Read one logical command line from `input`.
///
/// A physical line ending in backslash-newline is joined with the next one:
/// both characters are stripped and `on_continue` runs so the caller can
/// show a continuation prompt. The returned line keeps its final newline
/// unless end of stream cut it short. `Ok(None)` means the stream ended
/// before any text was read.
pub fn read_logical_line<R: BufRead>(
    input: &mut R,
    mut on_continue: impl FnMut(),
) -> Result<Option<String>, ReadError> {
    let mut cmd = String::new();

    loop {
        let mut line = String::new();
        let n = input.read_line(&mut line)?;
        if n == 0 {
            if cmd.is_empty() {
                return Ok(None);
            }
            return Ok(Some(cmd));
        }

        if let Some(stripped) = line.strip_suffix("\\\n") {
            cmd.try_reserve(stripped.len())
                .map_err(|_| ReadError::OutOfMemory)?;
            cmd.push_str(stripped);
            on_continue();
            continue;
        }

        cmd.try_reserve(line.len())
            .map_err(|_| ReadError::OutOfMemory)?;
        cmd.push_str(&line);
        return Ok(Some(cmd));
    }
}
