// Comment and quoted-string decoders

use super::error::{Result, TranscodeError};
use crate::queue::ByteQueue;
use crate::source::CharSource;
use std::io;

/// Discard the rest of a comment line.
///
/// Returns `false` if the input ended before a newline.
pub fn skip_comment<S: CharSource + ?Sized>(source: &mut S) -> io::Result<bool> {
    loop {
        match source.next_char()? {
            None => return Ok(false),
            Some(b'\n') => return Ok(true),
            Some(_) => {}
        }
    }
}

/// Byte produced by the escape `\c`.
///
/// Unrecognized escapes produce the escaped character itself, so `\q`
/// yields `q`.
pub fn unescape(c: u8) -> u8 {
    match c {
        b'a' => 0x07,
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'v' => 0x0B,
        b'0' => 0x00,
        // \\ \" \' \? and anything unrecognized
        other => other,
    }
}

/// Decode a quoted string whose opening quote has been consumed.
///
/// Returns the number of bytes appended. Bytes appended before an
/// unterminated end of input stay in the queue.
pub fn decode_ascii<S>(source: &mut S, queue: &mut ByteQueue<'_>) -> Result<usize>
where
    S: CharSource + ?Sized,
{
    let start = queue.length();

    loop {
        let byte = match source.next_char()? {
            None => return Err(TranscodeError::Unterminated("string")),
            Some(b'"') => break,
            Some(b'\\') => match source.next_char()? {
                None => return Err(TranscodeError::Unterminated("string")),
                Some(c) => unescape(c),
            },
            Some(c) => c,
        };
        queue.write_byte(byte)?;
    }

    Ok(queue.length() - start)
}
