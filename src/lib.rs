// BinTex: text notation to binary transcoder
// Hex, binary, decimal and string tokens become raw bytes in a fixed-size queue.
// Copyright 2026 - Licensed under GPLv3

pub mod core;
pub mod queue;
pub mod source;
pub mod transcode;

// Re-export commonly used types
pub use crate::core::{constants::*, Options, OptionsError};
pub use queue::{ByteQueue, Endianness, QueueError};
pub use source::{BufferSource, CharSource, StreamSource};
pub use transcode::{
    transcode_all, transcode_one, transcode_reader, transcode_str, Outcome, Step, Stop,
    TranscodeError, Transcoder,
};

/// BinTex version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
