// Fixed-capacity output queue with independent read and write cursors
pub mod byte_queue;
pub mod endian;

pub use byte_queue::{hex_rows, ByteQueue, QueueError};
pub use endian::Endianness;
