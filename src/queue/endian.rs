// Byte order used for multi-byte queue values

use serde::{Deserialize, Serialize};

/// Byte order applied by the queue's native short/long accessors.
///
/// The `*_be` accessors ignore this setting and are always big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Byte order of the target the crate was built for
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    pub fn is_big(&self) -> bool {
        matches!(self, Endianness::Big)
    }

    pub fn is_little(&self) -> bool {
        matches!(self, Endianness::Little)
    }

    pub fn encode_u16(&self, value: u16) -> [u8; 2] {
        match self {
            Endianness::Big => value.to_be_bytes(),
            Endianness::Little => value.to_le_bytes(),
        }
    }

    pub fn encode_u32(&self, value: u32) -> [u8; 4] {
        match self {
            Endianness::Big => value.to_be_bytes(),
            Endianness::Little => value.to_le_bytes(),
        }
    }

    pub fn decode_u16(&self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::Big => u16::from_be_bytes(bytes),
            Endianness::Little => u16::from_le_bytes(bytes),
        }
    }

    pub fn decode_u32(&self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::Big => u32::from_be_bytes(bytes),
            Endianness::Little => u32::from_le_bytes(bytes),
        }
    }
}

/// Output is little-endian unless configured otherwise, so transcoded
/// bytes do not depend on the build host.
impl Default for Endianness {
    fn default() -> Self {
        Endianness::Little
    }
}

impl std::fmt::Display for Endianness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endianness::Big => write!(f, "big-endian"),
            Endianness::Little => write!(f, "little-endian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(Endianness::Big.encode_u16(0x1234), [0x12, 0x34]);
        assert_eq!(Endianness::Little.encode_u16(0x1234), [0x34, 0x12]);

        assert_eq!(
            Endianness::Big.encode_u32(0x12345678),
            [0x12, 0x34, 0x56, 0x78]
        );
        assert_eq!(
            Endianness::Little.encode_u32(0x12345678),
            [0x78, 0x56, 0x34, 0x12]
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(Endianness::Big.decode_u16([0x12, 0x34]), 0x1234);
        assert_eq!(Endianness::Little.decode_u16([0x12, 0x34]), 0x3412);
        assert_eq!(
            Endianness::Little.decode_u32([0x78, 0x56, 0x34, 0x12]),
            0x12345678
        );
    }

    #[test]
    fn test_default_and_native() {
        assert!(Endianness::default().is_little());
        let native = Endianness::native();
        assert_eq!(native.is_big(), cfg!(target_endian = "big"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Endianness::Big).unwrap();
        assert_eq!(json, "\"big\"");
        let parsed: Endianness = serde_json::from_str("\"little\"").unwrap();
        assert_eq!(parsed, Endianness::Little);
    }
}
