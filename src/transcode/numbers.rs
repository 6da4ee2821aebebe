// Binary and hex decoders, plus the block driver shared with decimal blocks

use super::digits::{nibble, read_run, Decoded, DigitRun, Radix, RunEnd};
use super::error::{Result, TranscodeError};
use crate::core::Options;
use crate::queue::ByteQueue;
use crate::source::{BlockKind, CharSource};

/// Pack binary digits MSB first.
///
/// A digit count that is not a multiple of eight leaves the short remainder
/// in the low bits of the first byte.
pub fn pack_binary(digits: &[u8]) -> Vec<u8> {
    let lead = digits.len() % 8;
    let (head, body) = digits.split_at(lead);

    let mut bytes = Vec::with_capacity(digits.len().div_ceil(8));
    if !head.is_empty() {
        bytes.push(bits_to_byte(head));
    }
    bytes.extend(body.chunks_exact(8).map(bits_to_byte));
    bytes
}

fn bits_to_byte(bits: &[u8]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}

/// Pack hex digits two per byte, high nibble first.
///
/// An odd digit count writes the first digit as a byte of its own.
pub fn pack_hex(digits: &[u8]) -> Vec<u8> {
    let (head, body) = digits.split_at(digits.len() % 2);

    let mut bytes = Vec::with_capacity(digits.len().div_ceil(2));
    if let Some(&first) = head.first() {
        bytes.push(nibble(first));
    }
    bytes.extend(
        body.chunks_exact(2)
            .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1])),
    );
    bytes
}

/// Decode a `b` number whose prefix has been consumed.
///
/// Digits read before a bad terminator are written before the error.
pub fn decode_binary<S>(source: &mut S, queue: &mut ByteQueue<'_>, options: &Options) -> Result<Decoded>
where
    S: CharSource + ?Sized,
{
    let run = read_run(source, Radix::Binary, options.max_binary_digits, None)?;
    let bytes = pack_binary(&run.digits);
    queue.write_string(&bytes)?;
    run.check_end(Radix::Binary)?;
    Ok(Decoded {
        written: bytes.len(),
        end: run.end,
    })
}

/// Decode an `x` number whose prefix has been consumed
pub fn decode_hex<S>(source: &mut S, queue: &mut ByteQueue<'_>, options: &Options) -> Result<Decoded>
where
    S: CharSource + ?Sized,
{
    let run = read_run(source, Radix::Hex, options.max_hex_digits, None)?;
    let written = write_hex_run(&run, queue)?;
    run.check_end(Radix::Hex)?;
    Ok(Decoded {
        written,
        end: run.end,
    })
}

fn write_hex_run(run: &DigitRun, queue: &mut ByteQueue<'_>) -> Result<usize> {
    let bytes = pack_hex(&run.digits);
    queue.write_string(&bytes)?;
    Ok(bytes.len())
}

/// Decode a `[...]` block whose open bracket has been consumed
pub fn decode_hex_block<S>(source: &mut S, queue: &mut ByteQueue<'_>, options: &Options) -> Result<usize>
where
    S: CharSource + ?Sized,
{
    decode_block(source, queue, BlockKind::Hex, options.max_hex_digits, |run, queue| {
        write_hex_run(run, queue)
    })
}

/// Run `entry` over each whitespace-separated entry of a block.
///
/// The block is validated by lookahead first; a block that does not close
/// cleanly is rejected before anything is written.
pub(crate) fn decode_block<S, F>(
    source: &mut S,
    queue: &mut ByteQueue<'_>,
    kind: BlockKind,
    limit: usize,
    mut entry: F,
) -> Result<usize>
where
    S: CharSource + ?Sized,
    F: FnMut(&DigitRun, &mut ByteQueue<'_>) -> Result<usize>,
{
    let scan = source.validate_block(kind)?;
    if !scan.is_closed() {
        return Err(TranscodeError::MalformedBlock { kind, scan });
    }

    let radix = match kind {
        BlockKind::Hex => Radix::Hex,
        BlockKind::Decimal => Radix::Decimal,
    };

    let start = queue.length();
    loop {
        let run = read_run(source, radix, limit, Some(kind.close()))?;
        if !run.is_empty() {
            entry(&run, queue)?;
        }
        run.check_end(radix)?;
        match run.end {
            RunEnd::Close => break,
            RunEnd::EndOfInput => {
                return Err(TranscodeError::Unterminated(match kind {
                    BlockKind::Hex => "hex block",
                    BlockKind::Decimal => "decimal block",
                }))
            }
            _ => {}
        }
    }

    Ok(queue.length() - start)
}
