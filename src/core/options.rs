// Transcoder configuration, loadable from JSON

use super::constants::{DEFAULT_CAPACITY, MAX_BINARY_DIGITS, MAX_DECIMAL_CHARS, MAX_HEX_DIGITS};
use crate::queue::Endianness;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid option {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Settings shared by every transcoding call made through a `Transcoder`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Order for 16- and 32-bit decimal values
    pub byte_order: Endianness,

    /// Output buffer size for calls that allocate their own buffer
    pub capacity: usize,

    pub max_binary_digits: usize,

    pub max_hex_digits: usize,

    /// Decimal literal cap, counting the sign and footer letters
    pub max_decimal_chars: usize,

    /// Option word stored in the output queue
    pub queue_flags: u16,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            byte_order: Endianness::default(),
            capacity: DEFAULT_CAPACITY,
            max_binary_digits: MAX_BINARY_DIGITS,
            max_hex_digits: MAX_HEX_DIGITS,
            max_decimal_chars: MAX_DECIMAL_CHARS,
            queue_flags: 0,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_byte_order(mut self, byte_order: Endianness) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_digit_limits(mut self, binary: usize, hex: usize, decimal: usize) -> Self {
        self.max_binary_digits = binary;
        self.max_hex_digits = hex;
        self.max_decimal_chars = decimal;
        self
    }

    pub fn with_queue_flags(mut self, flags: u16) -> Self {
        self.queue_flags = flags;
        self
    }

    /// Reject limits that would make every literal of a kind unusable
    pub fn validate(&self) -> Result<(), OptionsError> {
        let limits = [
            ("max_binary_digits", self.max_binary_digits),
            ("max_hex_digits", self.max_hex_digits),
            ("max_decimal_chars", self.max_decimal_chars),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(OptionsError::Invalid {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Options = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
