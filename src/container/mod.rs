//! Byte containers
//!
//! The engine only needs random access reads and writes plus the ability
//! to grow and shrink the container. Anything implementing `ByteContainer`
//! can hold a DTAUS file; two implementations ship with the crate.

mod file;
mod memory;

use std::io;

pub use file::FileContainer;
pub use memory::MemoryContainer;

/// Random access byte storage.
///
/// Reads past the end fail with `io::ErrorKind::UnexpectedEof`.
pub trait ByteContainer {
    /// Fills `buf` with the bytes starting at `position`.
    fn read_at(&mut self, position: u64, buf: &mut [u8]) -> io::Result<()>;

    /// Writes `buf` starting at `position`; writing past the end grows the
    /// container.
    fn write_at(&mut self, position: u64, buf: &[u8]) -> io::Result<()>;

    /// Current length in bytes.
    fn len(&self) -> u64;

    /// Truncates or zero-extends to `len` bytes.
    fn set_len(&mut self, len: u64) -> io::Result<()>;

    /// Pushes buffered writes to the underlying medium.
    fn flush(&mut self) -> io::Result<()>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn eof(position: u64, wanted: usize, len: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!(
            "read of {} bytes at position {} past end of container ({} bytes)",
            wanted, position, len
        ),
    )
}
