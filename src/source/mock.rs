// Scripted character source for testing the transcoder without real input

use super::traits::{scan_block, BlockKind, BlockScan, CharSource};
use std::collections::VecDeque;
use std::io;

/// Character source that replays scripted input and records its use
#[derive(Debug, Default)]
pub struct MockSource {
    pending: VecDeque<u8>,
    /// Fail with an I/O error once this many characters have been read
    fail_after: Option<usize>,
    reads: usize,
    validations: Vec<BlockKind>,
}

impl MockSource {
    pub fn new(script: &[u8]) -> Self {
        Self {
            pending: script.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Inject a read failure after `count` successful reads
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn push_input(&mut self, data: &[u8]) {
        self.pending.extend(data.iter().copied());
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn validations(&self) -> &[BlockKind] {
        &self.validations
    }

    pub fn remaining(&self) -> Vec<u8> {
        self.pending.iter().copied().collect()
    }
}

impl CharSource for MockSource {
    fn next_char(&mut self) -> io::Result<Option<u8>> {
        if self.fail_after.is_some_and(|limit| self.reads >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted failure"));
        }
        let next = self.pending.pop_front();
        if next.is_some() {
            self.reads += 1;
        }
        Ok(next)
    }

    fn validate_block(&mut self, kind: BlockKind) -> io::Result<BlockScan> {
        self.validations.push(kind);
        let mut ahead = self.pending.iter().copied();
        scan_block(kind, || Ok(ahead.next()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_replays_script() {
        let mut src = MockSource::new(b"ab");
        src.push_input(b"c");
        assert_eq!(src.next_char().unwrap(), Some(b'a'));
        assert_eq!(src.remaining(), b"bc");
        assert_eq!(src.reads(), 1);
    }

    #[test]
    fn test_mock_failure() {
        let mut src = MockSource::new(b"abc").failing_after(1);
        assert!(src.next_char().is_ok());
        assert!(src.next_char().is_err());
    }

    #[test]
    fn test_mock_records_validation() {
        let mut src = MockSource::new(b"1]");
        assert_eq!(src.validate_hex().unwrap(), BlockScan::Closed);
        assert_eq!(src.validations(), &[BlockKind::Hex]);
        assert_eq!(src.reads(), 0);
    }
}
