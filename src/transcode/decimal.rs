// Decimal literals: optional sign, digits and a size footer
//
//   footer  width   notes
//   (none)  1/2/4   smallest signed width holding the value
//   u       1       unsigned byte
//   c s l   1 2 4   explicit width, optionally after u

use super::digits::{read_run, Decoded, DigitRun, Radix};
use super::error::{Result, TranscodeError};
use super::numbers::decode_block;
use crate::core::Options;
use crate::queue::ByteQueue;
use crate::source::{BlockKind, CharSource};
use nom::{
    character::complete::{char, digit1, one_of},
    combinator::opt,
    IResult, Parser,
};

/// Output width of a decimal value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Short,
    Long,
}

impl Width {
    pub fn bytes(&self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Short => 2,
            Width::Long => 4,
        }
    }

    fn from_footer(c: char) -> Self {
        match c {
            's' => Width::Short,
            'l' => Width::Long,
            _ => Width::Byte,
        }
    }
}

/// Exclusive bounds on `magnitude - (negative ? 1 : 0)` for the narrow widths
const SIGNED_BOUNDS: [(u64, Width); 2] = [(128, Width::Byte), (32768, Width::Short)];
const UNSIGNED_BOUNDS: [(u64, Width); 2] = [(256, Width::Byte), (65536, Width::Short)];

/// A parsed decimal literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalLiteral {
    pub value: i64,
    pub unsigned: bool,
    /// Width named by the footer, if any
    pub explicit: Option<Width>,
}

impl DecimalLiteral {
    /// Width the literal is written with
    pub fn width(&self) -> Width {
        match (self.explicit, self.unsigned) {
            (Some(width), _) => width,
            (None, true) => Width::Byte,
            (None, false) => infer_width(self.value, false),
        }
    }

    /// Whether the value is representable at `width` without truncation
    pub fn fits(&self, width: Width) -> bool {
        // Widest output is 32 bits; signed input may use the unsigned range
        let in_range = if self.unsigned {
            u32::try_from(self.value).is_ok()
        } else {
            (i64::from(i32::MIN)..=i64::from(u32::MAX)).contains(&self.value)
        };
        in_range && infer_width(self.value, self.unsigned).bytes() <= width.bytes()
    }
}

/// Smallest width whose range covers `value`
pub fn infer_width(value: i64, unsigned: bool) -> Width {
    let negative = value < 0;
    let max = value.unsigned_abs().saturating_sub(u64::from(negative));
    let bounds = if unsigned { &UNSIGNED_BOUNDS } else { &SIGNED_BOUNDS };

    bounds
        .iter()
        .find(|(bound, _)| max < *bound)
        .map(|(_, width)| *width)
        .unwrap_or(Width::Long)
}

fn literal(input: &[u8]) -> IResult<&[u8], DecimalLiteral> {
    (opt(char('-')), digit1, opt(char('u')), opt(one_of("csl")))
        .map(|(sign, digits, unsigned, size): (Option<char>, &[u8], Option<char>, Option<char>)| {
            // Overflow wraps; values are expected to fit 32 bits
            let magnitude = digits.iter().fold(0i64, |acc, d| {
                acc.wrapping_mul(10).wrapping_add(i64::from(d - b'0'))
            });
            DecimalLiteral {
                value: if sign.is_some() {
                    magnitude.wrapping_neg()
                } else {
                    magnitude
                },
                unsigned: unsigned.is_some(),
                explicit: size.map(Width::from_footer),
            }
        })
        .parse(input)
}

/// Parse the characters of one decimal run
pub fn parse_literal(text: &[u8]) -> Result<DecimalLiteral> {
    let malformed = |rest: &[u8]| TranscodeError::MalformedDigits {
        radix: Radix::Decimal,
        found: rest.first().or(text.last()).copied().unwrap_or(b'-'),
    };

    match literal(text) {
        Ok((rest, lit)) if rest.is_empty() => Ok(lit),
        Ok((rest, _)) => Err(malformed(rest)),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(malformed(e.input)),
        Err(nom::Err::Incomplete(_)) => Err(malformed(&[])),
    }
}

/// Write `lit` at its width
pub fn write_literal(lit: &DecimalLiteral, queue: &mut ByteQueue<'_>) -> Result<usize> {
    let width = lit.width();
    if !lit.fits(width) {
        tracing::warn!(
            "Decimal {} truncated to {} byte(s){}",
            lit.value,
            width.bytes(),
            if lit.unsigned { " unsigned" } else { "" }
        );
    }

    match width {
        Width::Byte => queue.write_byte(lit.value as u8)?,
        Width::Short => queue.write_short(lit.value as u16)?,
        Width::Long => queue.write_long(lit.value as u32)?,
    }
    Ok(width.bytes())
}

fn write_run(run: &DigitRun, queue: &mut ByteQueue<'_>) -> Result<usize> {
    let lit = parse_literal(&run.digits)?;
    write_literal(&lit, queue)
}

/// Decode a `d` number whose prefix has been consumed.
///
/// A literal ended by a bad character is written before the error.
pub fn decode_decimal<S>(source: &mut S, queue: &mut ByteQueue<'_>, options: &Options) -> Result<Decoded>
where
    S: CharSource + ?Sized,
{
    let run = read_run(source, Radix::Decimal, options.max_decimal_chars, None)?;
    let written = if run.is_empty() {
        0
    } else {
        write_run(&run, queue)?
    };
    run.check_end(Radix::Decimal)?;
    Ok(Decoded {
        written,
        end: run.end,
    })
}

/// Decode a `(...)` block whose open parenthesis has been consumed
pub fn decode_decimal_block<S>(
    source: &mut S,
    queue: &mut ByteQueue<'_>,
    options: &Options,
) -> Result<usize>
where
    S: CharSource + ?Sized,
{
    decode_block(
        source,
        queue,
        BlockKind::Decimal,
        options.max_decimal_chars,
        write_run,
    )
}
