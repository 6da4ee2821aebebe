// Digit-run collection shared by the numeric decoders

use super::error::{Result, TranscodeError};
use crate::source::{is_whitespace, CharSource};
use std::fmt;

/// Numeric notation of a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Hex,
    Decimal,
}

impl Radix {
    /// Characters collected into a run of this radix.
    ///
    /// Decimal runs also collect the sign and footer letters; their
    /// placement is checked when the literal is parsed.
    pub fn admits(&self, byte: u8) -> bool {
        match self {
            Radix::Binary => matches!(byte, b'0' | b'1'),
            Radix::Hex => byte.is_ascii_hexdigit(),
            Radix::Decimal => {
                byte.is_ascii_digit() || matches!(byte, b'-' | b'u' | b'c' | b's' | b'l')
            }
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radix::Binary => write!(f, "binary"),
            Radix::Hex => write!(f, "hex"),
            Radix::Decimal => write!(f, "decimal"),
        }
    }
}

/// What ended a digit run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Whitespace,
    EndOfInput,
    /// The enclosing block's close delimiter
    Close,
    /// A `;` outside a block; the dispatcher reports it as a line end
    LineEnd,
    /// A character outside the run's alphabet
    Bad(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitRun {
    pub digits: Vec<u8>,
    pub end: RunEnd,
}

impl DigitRun {
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Fail if the run was ended by a character outside its alphabet.
    ///
    /// Decoders call this after writing the run, so its bytes are kept.
    pub fn check_end(&self, radix: Radix) -> Result<()> {
        match self.end {
            RunEnd::Bad(found) => Err(TranscodeError::MalformedDigits { radix, found }),
            _ => Ok(()),
        }
    }
}

/// Bytes written by a number token and what ended its digit run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub written: usize,
    pub end: RunEnd,
}

impl Decoded {
    pub fn ends_line(&self) -> bool {
        self.end == RunEnd::LineEnd
    }
}

/// Tokens without a digit run end where their own syntax ends
impl From<usize> for Decoded {
    fn from(written: usize) -> Self {
        Self {
            written,
            end: RunEnd::Whitespace,
        }
    }
}

/// Collect one run of `radix` characters.
///
/// The terminating character is consumed. `close` is the delimiter of the
/// enclosing block, if any. Outside a block `;` ends the run as a line end;
/// any other character outside the alphabet ends it as `RunEnd::Bad`.
pub fn read_run<S>(source: &mut S, radix: Radix, limit: usize, close: Option<u8>) -> Result<DigitRun>
where
    S: CharSource + ?Sized,
{
    let mut digits = Vec::new();

    let end = loop {
        let c = match source.next_char()? {
            None => break RunEnd::EndOfInput,
            Some(c) => c,
        };

        if Some(c) == close {
            break RunEnd::Close;
        }
        if is_whitespace(c) {
            break RunEnd::Whitespace;
        }
        if c == b';' && close.is_none() {
            break RunEnd::LineEnd;
        }
        if !radix.admits(c) {
            break RunEnd::Bad(c);
        }
        if digits.len() == limit {
            return Err(TranscodeError::DigitLimit { radix, limit });
        }
        digits.push(c);
    };

    Ok(DigitRun { digits, end })
}

/// Value of a hex digit character; other characters decode as zero
pub const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BufferSource;

    #[test]
    fn test_run_ends() {
        let mut src = BufferSource::from("1010 11");
        let run = read_run(&mut src, Radix::Binary, 32, None).unwrap();
        assert_eq!(run.digits, b"1010");
        assert_eq!(run.end, RunEnd::Whitespace);

        let run = read_run(&mut src, Radix::Binary, 32, None).unwrap();
        assert_eq!(run.digits, b"11");
        assert_eq!(run.end, RunEnd::EndOfInput);
    }

    #[test]
    fn test_run_close() {
        let mut src = BufferSource::from("aB]x");
        let run = read_run(&mut src, Radix::Hex, 64, Some(b']')).unwrap();
        assert_eq!(run.digits, b"aB");
        assert_eq!(run.end, RunEnd::Close);
        assert_eq!(src.position(), 3);
    }

    #[test]
    fn test_run_empty() {
        let mut src = BufferSource::from(" 12");
        let run = read_run(&mut src, Radix::Hex, 64, None).unwrap();
        assert!(run.is_empty());
        assert_eq!(run.end, RunEnd::Whitespace);
    }

    #[test]
    fn test_run_bad_terminator() {
        let mut src = BufferSource::from("12]");
        let run = read_run(&mut src, Radix::Hex, 64, None).unwrap();
        assert_eq!(run.digits, b"12");
        assert_eq!(run.end, RunEnd::Bad(b']'));
        assert!(matches!(
            run.check_end(Radix::Hex),
            Err(TranscodeError::MalformedDigits {
                radix: Radix::Hex,
                found: b']'
            })
        ));

        let mut src = BufferSource::from("102");
        let run = read_run(&mut src, Radix::Binary, 32, None).unwrap();
        assert_eq!(run.digits, b"10");
        assert_eq!(run.end, RunEnd::Bad(b'2'));
    }

    #[test]
    fn test_run_line_end() {
        let mut src = BufferSource::from("41;x");
        let run = read_run(&mut src, Radix::Hex, 64, None).unwrap();
        assert_eq!(run.digits, b"41");
        assert_eq!(run.end, RunEnd::LineEnd);
        assert!(run.check_end(Radix::Hex).is_ok());
        assert_eq!(src.position(), 3);

        // Inside a block `;` is just a bad character
        let mut src = BufferSource::from("41;]");
        let run = read_run(&mut src, Radix::Hex, 64, Some(b']')).unwrap();
        assert_eq!(run.end, RunEnd::Bad(b';'));
    }

    #[test]
    fn test_run_limit() {
        let mut src = BufferSource::from("12345");
        let err = read_run(&mut src, Radix::Hex, 4, None).unwrap_err();
        assert!(matches!(
            err,
            TranscodeError::DigitLimit {
                radix: Radix::Hex,
                limit: 4
            }
        ));

        let mut src = BufferSource::from("1234 ");
        assert_eq!(read_run(&mut src, Radix::Hex, 4, None).unwrap().digits, b"1234");
    }

    #[test]
    fn test_nibble() {
        assert_eq!(nibble(b'0'), 0);
        assert_eq!(nibble(b'9'), 9);
        assert_eq!(nibble(b'a'), 10);
        assert_eq!(nibble(b'F'), 15);
        assert_eq!(nibble(b'g'), 0);
    }
}
