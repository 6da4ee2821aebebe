// Byte queue over a caller-supplied buffer
// The queue owns only cursor state; the buffer belongs to the caller.

use super::endian::Endianness;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Capacity exceeded: need {needed} bytes, {space} left")]
    CapacityExceeded { needed: usize, space: usize },

    #[error("Queue exhausted: requested {requested} bytes, {available} unread")]
    Exhausted { requested: usize, available: usize },

    #[error("Offset {offset} outside queue of {alloc} bytes")]
    OffsetOutOfBounds { offset: usize, alloc: usize },
}

pub type Result<T> = std::result::Result<T, QueueError>;

/// Output queue with independent write (`putcursor`) and read (`getcursor`)
/// positions.
///
/// Cursor offsets are measured from the front of the buffer and always
/// satisfy `0 <= getcursor <= putcursor <= alloc`. Every write checks the
/// remaining space first and every read checks the unread span, so the
/// queue never touches memory outside its buffer.
#[derive(Debug)]
pub struct ByteQueue<'a> {
    buffer: &'a mut [u8],
    putcursor: usize,
    getcursor: usize,
    options: u16,
    byte_order: Endianness,
}

impl<'a> ByteQueue<'a> {
    /// Bind a queue to `buffer`; its length is the queue capacity
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self::with_byte_order(buffer, Endianness::default())
    }

    /// Bind a queue using the given order for short/long values
    pub fn with_byte_order(buffer: &'a mut [u8], byte_order: Endianness) -> Self {
        Self {
            buffer,
            putcursor: 0,
            getcursor: 0,
            options: 0,
            byte_order,
        }
    }

    /// Total capacity of the queue
    pub fn alloc(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes written since the front of the buffer
    pub fn length(&self) -> usize {
        self.putcursor
    }

    /// Bytes written but not yet read
    pub fn span(&self) -> usize {
        self.putcursor - self.getcursor
    }

    /// Bytes that can still be written
    pub fn space(&self) -> usize {
        self.buffer.len() - self.putcursor
    }

    pub fn putcursor(&self) -> usize {
        self.putcursor
    }

    pub fn getcursor(&self) -> usize {
        self.getcursor
    }

    pub fn options(&self) -> u16 {
        self.options
    }

    pub fn set_options(&mut self, options: u16) {
        self.options = options;
    }

    pub fn byte_order(&self) -> Endianness {
        self.byte_order
    }

    /// Rewind both cursors to the front and clear the option word
    pub fn empty(&mut self) {
        self.options = 0;
        self.putcursor = 0;
        self.getcursor = 0;
    }

    /// Empty the queue, then place both cursors at `offset`.
    /// Returns the resulting read position.
    pub fn start(&mut self, offset: usize, options: u16) -> Result<usize> {
        self.empty();

        if offset >= self.alloc() {
            return Err(QueueError::OffsetOutOfBounds {
                offset,
                alloc: self.alloc(),
            });
        }

        self.options = options;
        self.putcursor = offset;
        self.getcursor = offset;
        Ok(self.getcursor)
    }

    /// Return the current read position and skip `shift` unread bytes
    pub fn mark_byte(&mut self, shift: usize) -> Result<usize> {
        self.check_span(shift)?;
        let mark = self.getcursor;
        self.getcursor += shift;
        Ok(mark)
    }

    /// Everything written so far
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.putcursor]
    }

    /// Written bytes not yet consumed by a reader
    pub fn unread(&self) -> &[u8] {
        &self.buffer[self.getcursor..self.putcursor]
    }

    fn reserve(&mut self, needed: usize) -> Result<&mut [u8]> {
        let space = self.space();
        if needed > space {
            return Err(QueueError::CapacityExceeded { needed, space });
        }
        let start = self.putcursor;
        self.putcursor += needed;
        Ok(&mut self.buffer[start..start + needed])
    }

    fn check_span(&self, requested: usize) -> Result<()> {
        let available = self.span();
        if requested > available {
            return Err(QueueError::Exhausted {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn take(&mut self, requested: usize) -> Result<&[u8]> {
        self.check_span(requested)?;
        let start = self.getcursor;
        self.getcursor += requested;
        Ok(&self.buffer[start..start + requested])
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.reserve(1)?[0] = byte;
        Ok(())
    }

    /// Write a 16-bit value in the queue's byte order
    pub fn write_short(&mut self, value: u16) -> Result<()> {
        let bytes = self.byte_order.encode_u16(value);
        self.reserve(2)?.copy_from_slice(&bytes);
        Ok(())
    }

    /// Write a 16-bit value most-significant byte first
    pub fn write_short_be(&mut self, value: u16) -> Result<()> {
        self.reserve(2)?.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    /// Write a 32-bit value in the queue's byte order
    pub fn write_long(&mut self, value: u32) -> Result<()> {
        let bytes = self.byte_order.encode_u32(value);
        self.reserve(4)?.copy_from_slice(&bytes);
        Ok(())
    }

    pub fn write_string(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_short(&mut self) -> Result<u16> {
        let order = self.byte_order;
        let bytes = self.take(2)?;
        Ok(order.decode_u16([bytes[0], bytes[1]]))
    }

    pub fn read_short_be(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_long(&mut self) -> Result<u32> {
        let order = self.byte_order;
        let bytes = self.take(4)?;
        Ok(order.decode_u32([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Consume `length` unread bytes
    pub fn read_string(&mut self, length: usize) -> Result<&[u8]> {
        self.take(length)
    }

    /// Cursor summary followed by the written bytes in rows of eight
    pub fn printable(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Queue Length/Alloc: {}/{}\n",
            self.length(),
            self.alloc()
        ));
        output.push_str(&format!("Queue Getcursor:    {}\n", self.getcursor));
        output.push_str(&format!("Queue Putcursor:    {}\n", self.putcursor));
        output.push_str(&hex_rows(self.written(), 0));
        output
    }
}

impl fmt::Display for ByteQueue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ByteQueue({}/{} bytes, {} unread)",
            self.length(),
            self.alloc(),
            self.span()
        )
    }
}

/// Hex rows of eight bytes, each prefixed by its offset from `base`
pub fn hex_rows(data: &[u8], base: usize) -> String {
    let mut output = String::new();

    for (i, chunk) in data.chunks(8).enumerate() {
        output.push_str(&format!("{:04X}: ", base + i * 8));
        for byte in chunk {
            output.push_str(&format!("{:02X} ", byte));
        }
        output.push('\n');
    }

    output
}
