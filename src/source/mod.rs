// Character sources feeding the transcoder
pub mod buffer;
pub mod stream;
pub mod traits;

#[cfg(test)]
pub mod mock;

pub use buffer::BufferSource;
pub use stream::StreamSource;
pub use traits::{is_whitespace, BlockKind, BlockScan, CharSource};
