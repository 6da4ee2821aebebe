// Defaults for transcoder limits and output capacity

/// Output buffer size used when none is configured
pub const DEFAULT_CAPACITY: usize = 512;

/// Longest binary digit run accepted for one `b` token
pub const MAX_BINARY_DIGITS: usize = 32;

/// Longest hex digit run accepted for one `x` token or block entry
pub const MAX_HEX_DIGITS: usize = 64;

/// Longest decimal literal, counting sign and footer letters
pub const MAX_DECIMAL_CHARS: usize = 15;
