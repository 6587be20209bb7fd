//! Bidirectional byte cursor the value decoder runs on.
//!
//! Every byte the decoder treats specially is ASCII, so scanning UTF-8
//! input byte by byte never splits a multi-byte sequence that is later
//! re-emitted.

/// Cursor over an immutable input string.
///
/// The cursor starts *before* the first byte: call [`Scanner::advance`]
/// once before the first [`Scanner::current`].
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    /// `None` until the first `advance`. Never exceeds `input.len()`.
    cursor: Option<usize>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned before the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            cursor: None,
        }
    }

    /// Move one byte forward.
    ///
    /// Returns `false` once the cursor has run past the last byte.
    pub const fn advance(&mut self) -> bool {
        let next = match self.cursor {
            None => 0,
            Some(pos) if pos < self.input.len() => pos + 1,
            Some(pos) => pos,
        };
        self.cursor = Some(next);
        next < self.input.len()
    }

    /// Move one byte backward.
    ///
    /// Returns `false` when the new position is the first byte or
    /// before it; callers must not retreat past the first decoded byte
    /// without advancing again.
    pub const fn retreat(&mut self) -> bool {
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                false
            }
            Some(pos) => {
                self.cursor = Some(pos - 1);
                pos - 1 > 0
            }
        }
    }

    /// Byte under the cursor, or `None` when out of bounds.
    #[must_use]
    pub const fn current(&self) -> Option<u8> {
        match self.cursor {
            Some(pos) if pos < self.input.len() => Some(self.input[pos]),
            _ => None,
        }
    }

    /// Byte immediately before the cursor, or `None` at the first
    /// position (or before it).
    #[must_use]
    pub const fn previous(&self) -> Option<u8> {
        match self.cursor {
            Some(pos) if pos > 0 && pos <= self.input.len() => Some(self.input[pos - 1]),
            _ => None,
        }
    }

    /// Current cursor position, `None` before the first `advance`.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.cursor
    }
}
