// Stream-backed character source
// Block lookahead saves the stream position and seeks back afterwards.

use super::traits::{scan_block, BlockKind, BlockScan, CharSource};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Character source reading through a buffered, seekable stream
#[derive(Debug)]
pub struct StreamSource<R> {
    reader: BufReader<R>,
}

impl<R: Read + Seek> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
        }
    }

    /// Current position in the underlying stream
    pub fn position(&mut self) -> io::Result<u64> {
        self.reader.stream_position()
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl StreamSource<File> {
    /// Open a file as a character source
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read + Seek> CharSource for StreamSource<R> {
    fn next_char(&mut self) -> io::Result<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    fn validate_block(&mut self, kind: BlockKind) -> io::Result<BlockScan> {
        let saved = self.reader.stream_position()?;
        let scan = scan_block(kind, || self.next_char());
        self.reader.seek(SeekFrom::Start(saved))?;
        scan
    }
}
