use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Input closed while waiting for an answer")]
    InputClosed,

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Read lines from `input` until one parses as `T`.
///
/// `on_retry` sees each rejected line (trimmed) before the next read. Lines
/// that are not valid UTF-8 are rejected like any other unknown answer.
pub fn read_choice<R, T, F>(input: &mut R, mut on_retry: F) -> Result<T, PromptError>
where
    R: BufRead,
    T: FromStr,
    F: FnMut(&str),
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Err(PromptError::InputClosed);
        }

        let parsed = std::str::from_utf8(&buf).ok().and_then(|line| line.parse::<T>().ok());
        match parsed {
            Some(choice) => return Ok(choice),
            None => {
                let line = String::from_utf8_lossy(&buf);
                trace!(input = line.trim(), "Rejected input");
                on_retry(line.trim());
            }
        }
    }
}
