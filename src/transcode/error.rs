// Errors raised while transcoding a token

use super::digits::Radix;
use crate::queue::QueueError;
use crate::source::{BlockKind, BlockScan};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("Malformed token: no token starts with {:?}", shown(.0))]
    MalformedToken(u8),

    #[error("Malformed {radix} digits: unexpected {:?}", shown(.found))]
    MalformedDigits { radix: Radix, found: u8 },

    #[error("Malformed {kind} block: {} characters scanned, {scan:?}", .scan.status())]
    MalformedBlock { kind: BlockKind, scan: BlockScan },

    #[error("Too many {radix} digits: limit is {limit}")]
    DigitLimit { radix: Radix, limit: usize },

    #[error("Unterminated {0}")]
    Unterminated(&'static str),

    #[error("Output queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl TranscodeError {
    /// Input that matches no part of the notation
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            TranscodeError::MalformedToken(_)
                | TranscodeError::MalformedDigits { .. }
                | TranscodeError::MalformedBlock { .. }
        )
    }

    /// The output buffer filled up before the token was complete
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(
            self,
            TranscodeError::Queue(QueueError::CapacityExceeded { .. })
        )
    }
}

fn shown(byte: &u8) -> char {
    char::from(*byte)
}

pub type Result<T> = std::result::Result<T, TranscodeError>;
