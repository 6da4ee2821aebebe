// Driving loop: one token at a time from a character source into a queue

use super::decimal::{decode_decimal, decode_decimal_block};
use super::digits::Decoded;
use super::error::{Result, TranscodeError};
use super::numbers::{decode_binary, decode_hex, decode_hex_block};
use super::text::{decode_ascii, skip_comment};
use super::token::{next_token, Token};
use crate::core::Options;
use crate::queue::ByteQueue;
use crate::source::{BufferSource, CharSource, StreamSource};
use std::io::{Read, Seek};

/// Outcome of transcoding a single token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The token produced this many bytes (comments produce zero)
    Wrote(usize),
    /// A `;` line terminator, with the bytes of a number it ended
    LineEnd(usize),
    EndOfInput,
}

/// Why a transcoding loop stopped
#[derive(Debug)]
pub enum Stop {
    EndOfInput,
    LineEnd,
    Failed(TranscodeError),
}

/// Bytes produced by a transcoding loop and the reason it stopped.
///
/// Bytes written before a failure are kept.
#[derive(Debug)]
pub struct Outcome {
    pub written: usize,
    pub stop: Stop,
}

impl Outcome {
    /// Stopped at end of input or a line terminator
    pub fn is_complete(&self) -> bool {
        !matches!(self.stop, Stop::Failed(_))
    }

    pub fn error(&self) -> Option<&TranscodeError> {
        match &self.stop {
            Stop::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Byte count, or the error that stopped the loop
    pub fn into_result(self) -> Result<usize> {
        match self.stop {
            Stop::Failed(err) => Err(err),
            _ => Ok(self.written),
        }
    }
}

/// Transcoder bound to a set of options.
///
/// Holds no input state; every call receives its character source, so
/// separate calls never share a backend.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    options: Options,
}

impl Transcoder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Transcode exactly one token into `queue`
    pub fn transcode_one<S>(&self, source: &mut S, queue: &mut ByteQueue<'_>) -> Result<Step>
    where
        S: CharSource + ?Sized,
    {
        let token = next_token(source)?;
        let start = queue.length();

        let decoded: Decoded = match token {
            Token::EndOfInput => return Ok(Step::EndOfInput),
            Token::LineEnd => return Ok(Step::LineEnd(0)),
            Token::Malformed(c) => return Err(TranscodeError::MalformedToken(c)),
            Token::Comment => {
                if !skip_comment(source)? {
                    return Ok(Step::EndOfInput);
                }
                0.into()
            }
            Token::Ascii => decode_ascii(source, queue)?.into(),
            Token::Binary => decode_binary(source, queue, &self.options)?,
            Token::Hex => decode_hex(source, queue, &self.options)?,
            Token::HexBlock => decode_hex_block(source, queue, &self.options)?.into(),
            Token::Decimal => decode_decimal(source, queue, &self.options)?,
            Token::DecimalBlock => decode_decimal_block(source, queue, &self.options)?.into(),
        };

        tracing::debug!(
            "{} wrote {} byte(s): {:02X?}",
            token,
            decoded.written,
            &queue.written()[start..]
        );
        if decoded.ends_line() {
            Ok(Step::LineEnd(decoded.written))
        } else {
            Ok(Step::Wrote(decoded.written))
        }
    }

    /// Transcode tokens into `queue` until end of input, a line terminator
    /// or the first error
    pub fn transcode_into<S>(&self, source: &mut S, queue: &mut ByteQueue<'_>) -> Outcome
    where
        S: CharSource + ?Sized,
    {
        let start = queue.length();

        let stop = loop {
            match self.transcode_one(source, queue) {
                Ok(Step::Wrote(_)) => {}
                Ok(Step::LineEnd(_)) => break Stop::LineEnd,
                Ok(Step::EndOfInput) => break Stop::EndOfInput,
                Err(err) if err.is_malformed() => {
                    tracing::warn!("Malformed input after {} bytes: {}", queue.length() - start, err);
                    break Stop::Failed(err);
                }
                Err(err) => {
                    tracing::debug!("Transcoding stopped: {}", err);
                    break Stop::Failed(err);
                }
            }
        };

        Outcome {
            written: queue.length() - start,
            stop,
        }
    }

    /// Transcode into `output`, whose length is the capacity
    pub fn transcode_all<S>(&self, source: &mut S, output: &mut [u8]) -> Outcome
    where
        S: CharSource + ?Sized,
    {
        let mut queue = ByteQueue::with_byte_order(output, self.options.byte_order);
        queue.set_options(self.options.queue_flags);
        self.transcode_into(source, &mut queue)
    }

    /// Transcode into a buffer of the configured capacity.
    /// The returned bytes are truncated to what was written.
    pub fn to_vec<S>(&self, source: &mut S) -> (Vec<u8>, Outcome)
    where
        S: CharSource + ?Sized,
    {
        let mut output = vec![0u8; self.options.capacity];
        let outcome = self.transcode_all(source, &mut output);
        output.truncate(outcome.written);
        (output, outcome)
    }

    /// Transcode text held in memory
    pub fn transcode_str(&self, input: &str) -> (Vec<u8>, Outcome) {
        self.to_vec(&mut BufferSource::from(input))
    }

    /// Transcode from a seekable stream such as a file
    pub fn transcode_reader<R: Read + Seek>(&self, reader: R) -> (Vec<u8>, Outcome) {
        self.to_vec(&mut StreamSource::new(reader))
    }
}

/// Transcode one token with default options
pub fn transcode_one<S>(source: &mut S, queue: &mut ByteQueue<'_>) -> Result<Step>
where
    S: CharSource + ?Sized,
{
    Transcoder::default().transcode_one(source, queue)
}

/// Transcode into `output` with default options
pub fn transcode_all<S>(source: &mut S, output: &mut [u8]) -> Outcome
where
    S: CharSource + ?Sized,
{
    Transcoder::default().transcode_all(source, output)
}

/// Transcode text with default options
pub fn transcode_str(input: &str) -> (Vec<u8>, Outcome) {
    Transcoder::default().transcode_str(input)
}

/// Transcode a seekable stream with default options
pub fn transcode_reader<R: Read + Seek>(reader: R) -> (Vec<u8>, Outcome) {
    Transcoder::default().transcode_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::Endianness;
    use crate::source::mock::MockSource;
    use crate::source::BlockKind;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn bytes_of(input: &str) -> Vec<u8> {
        let (bytes, outcome) = transcode_str(input);
        assert!(outcome.is_complete(), "{:?}", outcome);
        bytes
    }

    #[test]
    fn test_comment_then_hex() {
        assert_eq!(bytes_of("# ignore this\nx41"), vec![0x41]);
    }

    #[test]
    fn test_mixed_line() {
        let bytes = bytes_of("[00 11 22 33] (32 64 96 128) d-5930 x9933 \"Blah\"");
        let mut expected = vec![0x00, 0x11, 0x22, 0x33, 32, 64, 96, 0x80, 0x00];
        expected.extend_from_slice(&(-5930i16).to_le_bytes());
        expected.extend_from_slice(&[0x99, 0x33]);
        expected.extend_from_slice(b"Blah");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_hex_prefix_tolerated() {
        assert_eq!(bytes_of("0x41 0xBEEF"), vec![0x41, 0xBE, 0xEF]);
    }

    #[test]
    fn test_binary_and_string() {
        assert_eq!(bytes_of("b101 b11110000 \"A\\nB\""), vec![0x05, 0xF0, 0x41, 0x0A, 0x42]);
    }

    #[test]
    fn test_transcode_one_steps() {
        let mut buf = [0u8; 16];
        let mut queue = ByteQueue::new(&mut buf);
        let mut src = BufferSource::from("x4142 # note\n; d1");

        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::Wrote(2));
        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::Wrote(0));
        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::LineEnd(0));
        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::Wrote(1));
        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::EndOfInput);
        assert_eq!(queue.written(), &[0x41, 0x42, 0x01]);
    }

    #[test]
    fn test_number_ended_by_line_end() {
        let mut buf = [0u8; 8];
        let mut queue = ByteQueue::new(&mut buf);
        let mut src = BufferSource::from("x41;x42 d5;");

        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::LineEnd(1));
        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::Wrote(1));
        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::LineEnd(1));
        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::EndOfInput);
        assert_eq!(queue.written(), &[0x41, 0x42, 0x05]);
    }

    #[test]
    fn test_bad_terminator_keeps_number() {
        let (bytes, outcome) = transcode_str("x11 b101, x33");
        assert_eq!(bytes, vec![0x11, 0x05]);
        assert!(matches!(
            outcome.error(),
            Some(TranscodeError::MalformedDigits { found: b',', .. })
        ));

        let (bytes, outcome) = transcode_str("x41;");
        assert_eq!(bytes, vec![0x41]);
        assert!(matches!(outcome.stop, Stop::LineEnd));
    }

    #[test]
    fn test_raw_bytes_in_string() {
        let mut src = BufferSource::new(b"\"\xFF\xC3(\" xFE");
        let mut buf = [0u8; 4];
        let outcome = transcode_all(&mut src, &mut buf);
        assert!(outcome.is_complete());
        assert_eq!(&buf[..outcome.written], &[0xFF, 0xC3, b'(', 0xFE]);
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let mut buf = [0u8; 4];
        let mut queue = ByteQueue::new(&mut buf);
        let mut src = BufferSource::from("# trailing");
        assert_eq!(transcode_one(&mut src, &mut queue).unwrap(), Step::EndOfInput);
    }

    #[test]
    fn test_line_end_stops_loop() {
        let mut src = BufferSource::from("x01; x02");
        let transcoder = Transcoder::default();
        let mut buf = [0u8; 8];
        let mut queue = ByteQueue::new(&mut buf);

        let first = transcoder.transcode_into(&mut src, &mut queue);
        assert_eq!(first.written, 1);
        assert!(matches!(first.stop, Stop::LineEnd));

        let second = transcoder.transcode_into(&mut src, &mut queue);
        assert_eq!(second.written, 1);
        assert!(matches!(second.stop, Stop::EndOfInput));
        assert_eq!(queue.written(), &[0x01, 0x02]);
    }

    #[test]
    fn test_error_keeps_prior_output() {
        let (bytes, outcome) = transcode_str("x11 x22 ? x33");
        assert_eq!(bytes, vec![0x11, 0x22]);
        assert_eq!(outcome.written, 2);
        assert!(matches!(
            outcome.error(),
            Some(TranscodeError::MalformedToken(b'?'))
        ));
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn test_leading_zero_decimal_quirk() {
        // "0d5" skips the zero and reads d5; a bare "05" is malformed
        assert_eq!(bytes_of("0d5"), vec![0x05]);
        let (_, outcome) = transcode_str("05");
        assert!(matches!(
            outcome.error(),
            Some(TranscodeError::MalformedToken(b'5'))
        ));
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut output = [0u8; 3];
        let outcome = transcode_all(&mut BufferSource::from("x1122 d1000"), &mut output);
        assert_eq!(outcome.written, 2);
        assert!(outcome.error().is_some_and(|e| e.is_capacity_exceeded()));
        assert_eq!(&output[..2], &[0x11, 0x22]);
    }

    #[test]
    fn test_big_endian_option() {
        let transcoder = Transcoder::new(Options::new().with_byte_order(Endianness::Big));
        let (bytes, outcome) = transcoder.transcode_str("d300 d70000");
        assert!(outcome.is_complete());
        assert_eq!(bytes, vec![0x01, 0x2C, 0x00, 0x01, 0x11, 0x70]);
    }

    #[test]
    fn test_capacity_option() {
        let transcoder = Transcoder::new(Options::new().with_capacity(2));
        let (bytes, outcome) = transcoder.transcode_str("\"abc\"");
        assert_eq!(bytes, b"ab");
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_idempotent() {
        let input = "[dead beef] b1 (1 -1 300) \"q\\\"\"";
        assert_eq!(bytes_of(input), bytes_of(input));
    }

    #[test]
    fn test_stream_matches_buffer() {
        let input = "# header\n[11223344 55667788]\nd65536 b0000000111 \"x\\ty\"";
        let (from_buffer, _) = transcode_str(input);

        let transcoder = Transcoder::default();
        let (from_cursor, outcome) = transcoder.transcode_reader(Cursor::new(input.as_bytes().to_vec()));
        assert!(outcome.is_complete());
        assert_eq!(from_cursor, from_buffer);

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(input.as_bytes()).unwrap();
        file.flush().unwrap();
        let mut src = StreamSource::open(file.path()).unwrap();
        let (from_file, _) = transcoder.to_vec(&mut src);
        assert_eq!(from_file, from_buffer);
    }

    #[test]
    fn test_blocks_use_lookahead() {
        let mut src = MockSource::new(b"[11] (2)");
        let mut buf = [0u8; 4];
        let outcome = transcode_all(&mut src, &mut buf);
        assert!(outcome.is_complete());
        assert_eq!(outcome.written, 2);
        assert_eq!(src.validations(), &[BlockKind::Hex, BlockKind::Decimal]);
    }

    #[test]
    fn test_io_error_surfaces() {
        let mut src = MockSource::new(b"x4142").failing_after(3);
        let mut buf = [0u8; 4];
        let outcome = transcode_all(&mut src, &mut buf);
        assert_eq!(outcome.written, 0);
        assert!(matches!(outcome.stop, Stop::Failed(TranscodeError::Io(_))));
    }

    #[test]
    fn test_dyn_source() {
        let mut boxed: Box<dyn CharSource> = Box::new(BufferSource::from("x7f"));
        let mut buf = [0u8; 1];
        let outcome = transcode_all(&mut boxed, &mut buf);
        assert_eq!(outcome.written, 1);
        assert_eq!(buf, [0x7F]);
    }
}
