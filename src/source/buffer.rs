// In-memory character source
// A zero byte ends the input, so NUL cannot appear in buffer text.

use super::traits::{scan_block, BlockKind, BlockScan, CharSource};
use std::io;

/// Character source reading from a byte slice
#[derive(Debug, Clone)]
pub struct BufferSource<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> BufferSource<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Offset of the next character to be read
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unread input up to the end-of-input marker
    pub fn remaining(&self) -> &'a [u8] {
        let rest = &self.input[self.pos..];
        let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        &rest[..end]
    }
}

impl<'a> From<&'a str> for BufferSource<'a> {
    fn from(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for BufferSource<'a> {
    fn from(input: &'a [u8]) -> Self {
        Self::new(input)
    }
}

impl CharSource for BufferSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<u8>> {
        match self.input.get(self.pos) {
            None | Some(0) => Ok(None),
            Some(&c) => {
                self.pos += 1;
                Ok(Some(c))
            }
        }
    }

    fn validate_block(&mut self, kind: BlockKind) -> io::Result<BlockScan> {
        let mut ahead = self.remaining().iter().copied();
        scan_block(kind, || Ok(ahead.next()))
    }
}
