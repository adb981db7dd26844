//! In-memory byte container

use std::io;

use super::{eof, ByteContainer};

/// A container backed by a `Vec<u8>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryContainer {
    bytes: Vec<u8>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteContainer for MemoryContainer {
    fn read_at(&mut self, position: u64, buf: &mut [u8]) -> io::Result<()> {
        let start = position as usize;
        let end = start + buf.len();
        if end > self.bytes.len() {
            return Err(eof(position, buf.len(), self.len()));
        }
        buf.copy_from_slice(&self.bytes[start..end]);
        Ok(())
    }

    fn write_at(&mut self, position: u64, buf: &[u8]) -> io::Result<()> {
        let start = position as usize;
        let end = start + buf.len();
        if end > self.bytes.len() {
            self.bytes.resize(end, 0);
        }
        self.bytes[start..end].copy_from_slice(buf);
        Ok(())
    }

    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn set_len(&mut self, len: u64) -> io::Result<()> {
        self.bytes.resize(len as usize, 0);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let mut c = MemoryContainer::new();
        c.write_at(2, b"abc").unwrap();
        assert_eq!(c.len(), 5);

        let mut buf = [0u8; 3];
        c.read_at(2, &mut buf).unwrap();
        assert_eq!(&buf, b"abc");
    }

    #[test]
    fn test_read_past_end_fails() {
        let mut c = MemoryContainer::from_bytes(vec![1, 2, 3]);
        let mut buf = [0u8; 2];
        let err = c.read_at(2, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_set_len() {
        let mut c = MemoryContainer::from_bytes(vec![1, 2, 3]);
        c.set_len(1).unwrap();
        assert_eq!(c.as_bytes(), &[1]);
        c.set_len(3).unwrap();
        assert_eq!(c.as_bytes(), &[1, 0, 0]);
        assert!(!c.is_empty());
    }
}
