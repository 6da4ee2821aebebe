// Token dispatcher: classifies the next token from its leading character

use crate::source::CharSource;
use std::fmt;
use std::io;

/// Classification of one token of the notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    EndOfInput,
    /// Leading character that starts no token
    Malformed(u8),
    /// `;` - caller-visible stop
    LineEnd,
    /// `#` to end of line
    Comment,
    /// `"..."`
    Ascii,
    /// `b0101`
    Binary,
    /// `x1F`
    Hex,
    /// `[11 22]`
    HexBlock,
    /// `d-12us`
    Decimal,
    /// `(1 2 3)`
    DecimalBlock,
}

impl Token {
    /// Classify a leading character; `None` means the character is skipped.
    ///
    /// A leading `0` is skipped so that `0x41` reads like `x41`. As a
    /// consequence no decimal token can start with `0`.
    pub fn classify(c: Option<u8>) -> Option<Token> {
        let c = match c {
            None => return Some(Token::EndOfInput),
            Some(c) => c,
        };

        match c {
            b'\n' | b'\r' | b'\t' | b' ' | b'0' => None,
            b'#' => Some(Token::Comment),
            b'"' => Some(Token::Ascii),
            b'b' => Some(Token::Binary),
            b'x' => Some(Token::Hex),
            b'[' => Some(Token::HexBlock),
            b'd' => Some(Token::Decimal),
            b'(' => Some(Token::DecimalBlock),
            b';' => Some(Token::LineEnd),
            other => Some(Token::Malformed(other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Token::EndOfInput => "end of input",
            Token::Malformed(_) => "malformed",
            Token::LineEnd => "line end",
            Token::Comment => "comment",
            Token::Ascii => "string",
            Token::Binary => "binary number",
            Token::Hex => "hex number",
            Token::HexBlock => "hex block",
            Token::Decimal => "decimal number",
            Token::DecimalBlock => "decimal block",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read characters until one classifies as a token
pub fn next_token<S: CharSource + ?Sized>(source: &mut S) -> io::Result<Token> {
    loop {
        if let Some(token) = Token::classify(source.next_char()?) {
            tracing::trace!("Classified token: {}", token);
            return Ok(token);
        }
    }
}
