// Character source capability shared by the buffer and stream adapters

use std::fmt;
use std::io;

/// Whitespace that separates tokens and terminates digit runs
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\r' | b'\n' | b'\t')
}

/// Delimited numeric blocks: `[...]` for hex, `(...)` for decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Hex,
    Decimal,
}

impl BlockKind {
    /// Character that closes the block
    pub fn close(&self) -> u8 {
        match self {
            BlockKind::Hex => b']',
            BlockKind::Decimal => b')',
        }
    }

    /// Characters allowed between the block delimiters.
    ///
    /// Decimal blocks also admit the sign and the size footer letters so
    /// that `(-5 200us)` validates.
    pub fn admits(&self, byte: u8) -> bool {
        if is_whitespace(byte) {
            return true;
        }
        match self {
            BlockKind::Hex => byte.is_ascii_hexdigit(),
            BlockKind::Decimal => {
                byte.is_ascii_digit() || matches!(byte, b'-' | b'u' | b'c' | b's' | b'l')
            }
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Hex => write!(f, "hex"),
            BlockKind::Decimal => write!(f, "decimal"),
        }
    }
}

/// Result of a non-consuming scan over a block body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockScan {
    /// Only admitted characters before the close delimiter
    Closed,
    /// A character outside the block alphabet follows `scanned` good ones
    Malformed { scanned: usize },
    /// Input ended after `scanned` characters without a close delimiter
    Unterminated { scanned: usize },
}

impl BlockScan {
    /// Numeric status: 0 when closed, otherwise the characters scanned
    pub fn status(&self) -> usize {
        match self {
            BlockScan::Closed => 0,
            BlockScan::Malformed { scanned } | BlockScan::Unterminated { scanned } => *scanned,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, BlockScan::Closed)
    }
}

/// Input capability handed to every transcoding call.
///
/// `next_char` returns `Ok(None)` at end of input. `validate_block` is only
/// called right after a block's open delimiter has been consumed and must
/// leave the read position where it found it.
pub trait CharSource {
    fn next_char(&mut self) -> io::Result<Option<u8>>;

    fn validate_block(&mut self, kind: BlockKind) -> io::Result<BlockScan>;

    fn validate_hex(&mut self) -> io::Result<BlockScan> {
        self.validate_block(BlockKind::Hex)
    }

    fn validate_dec(&mut self) -> io::Result<BlockScan> {
        self.validate_block(BlockKind::Decimal)
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> io::Result<Option<u8>> {
        (**self).next_char()
    }

    fn validate_block(&mut self, kind: BlockKind) -> io::Result<BlockScan> {
        (**self).validate_block(kind)
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn next_char(&mut self) -> io::Result<Option<u8>> {
        (**self).next_char()
    }

    fn validate_block(&mut self, kind: BlockKind) -> io::Result<BlockScan> {
        (**self).validate_block(kind)
    }
}

/// Scan a block body from a stream of characters.
///
/// Adapters feed this from a private cursor so the scan never consumes
/// input they expose.
pub(crate) fn scan_block<F>(kind: BlockKind, mut next: F) -> io::Result<BlockScan>
where
    F: FnMut() -> io::Result<Option<u8>>,
{
    let mut scanned = 0;

    loop {
        match next()? {
            None => return Ok(BlockScan::Unterminated { scanned }),
            Some(c) if c == kind.close() => return Ok(BlockScan::Closed),
            Some(c) if !kind.admits(c) => return Ok(BlockScan::Malformed { scanned }),
            Some(_) => scanned += 1,
        }
    }
}
