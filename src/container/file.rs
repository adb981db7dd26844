//! File-backed byte container

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::{eof, ByteContainer};

/// A container backed by a file on disk.
///
/// The length is cached; nothing else may resize the file while the
/// container is open.
#[derive(Debug)]
pub struct FileContainer {
    path: PathBuf,
    file: File,
    len: u64,
}

impl FileContainer {
    /// Opens an existing file for reading and writing.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            file,
            len,
        })
    }

    /// Opens read-only; writes fail with the OS error.
    pub fn open_read_only(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            file,
            len,
        })
    }

    /// Creates a new empty file; fails if it already exists.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            len: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteContainer for FileContainer {
    fn read_at(&mut self, position: u64, buf: &mut [u8]) -> io::Result<()> {
        if position + buf.len() as u64 > self.len {
            return Err(eof(position, buf.len(), self.len));
        }
        self.file.seek(SeekFrom::Start(position))?;
        self.file.read_exact(buf)
    }

    fn write_at(&mut self, position: u64, buf: &[u8]) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(position))?;
        self.file.write_all(buf)?;
        self.len = self.len.max(position + buf.len() as u64);
        Ok(())
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn set_len(&mut self, len: u64) -> io::Result<()> {
        self.file.set_len(len)?;
        self.len = len;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_all()
    }
}
