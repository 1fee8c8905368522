//! Folded line grammar: `frame;frame;...;leaf <samples>`

use crate::domain::{Result, TranslateError};

/// One input record split into its stack and sample count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldedLine<'a> {
    /// Frames joined by `;`, root first
    pub stack: &'a str,
    /// Sample count, kept verbatim
    pub samples: &'a str,
}

impl<'a> FoldedLine<'a> {
    /// Split a line at its final whitespace-delimited token
    ///
    /// # Errors
    /// Returns `MalformedLine` if the count is missing or not an integer, or
    /// the stack is empty
    pub fn parse(line: &'a str) -> Result<Self> {
        let line = line.trim();
        let malformed = |reason: &str| TranslateError::MalformedLine { reason: reason.to_string() };

        let Some((stack, samples)) = line.rsplit_once(char::is_whitespace) else {
            return Err(malformed("missing sample count"));
        };
        if samples.is_empty() || !samples.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("sample count is not an integer"));
        }

        let stack = stack.trim_end();
        if stack.is_empty() {
            return Err(malformed("empty stack"));
        }

        Ok(FoldedLine { stack, samples })
    }
}
