// Text-to-binary transcoding of the token notation
// Each token is decoded straight into a byte queue.

pub mod decimal;
pub mod digits;
pub mod error;
pub mod numbers;
pub mod text;
pub mod token;
pub mod transcoder;

pub use decimal::{
    decode_decimal, decode_decimal_block, infer_width, parse_literal, DecimalLiteral, Width,
};
pub use digits::{read_run, Decoded, DigitRun, Radix, RunEnd};
pub use error::{Result, TranscodeError};
pub use numbers::{decode_binary, decode_hex, decode_hex_block, pack_binary, pack_hex};
pub use text::{decode_ascii, skip_comment, unescape};
pub use token::{next_token, Token};
pub use transcoder::{
    transcode_all, transcode_one, transcode_reader, transcode_str, Outcome, Step, Stop, Transcoder,
};
