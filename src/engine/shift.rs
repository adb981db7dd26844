//! Byte shifting inside the container
//!
//! Inserting or removing bytes moves everything behind the gap. The copy
//! runs in chunks of `shift_chunk_size` bytes: back to front when opening
//! a gap, front to back when closing one, so no byte is overwritten before
//! it has been moved. Afterwards every cached absolute position behind the
//! gap is moved by the same amount; index entries are relative to their
//! header and are fixed up by the caller.

use crate::container::ByteContainer;
use crate::errors::{DtausError, DtausResult};
use crate::observability::Task;
use crate::physical::PhysicalFile;

impl<C: ByteContainer> PhysicalFile<C> {
    /// Opens a gap of `count` bytes at `position`.
    pub(crate) fn insert_bytes(&mut self, position: u64, count: u64) -> DtausResult<()> {
        let length = self.container.len();
        if position > length {
            return Err(DtausError::IllegalArgument(format!(
                "insert position {} beyond container length {}",
                position, length
            )));
        }
        if count == 0 {
            return Ok(());
        }
        self.container.set_len(length + count)?;

        let total = length - position;
        let mut buffer = vec![0u8; self.chunk_size(total)];
        let mut end = length;
        let mut done = 0;
        while end > position {
            let size = (end - position).min(buffer.len() as u64);
            let start = end - size;
            let chunk = &mut buffer[..size as usize];
            self.container.read_at(start, chunk)?;
            self.container.write_at(start + count, chunk)?;
            end = start;
            done += size;
            self.monitor.progress(Task::InsertBytes, done, total);
        }

        self.adjust_positions(|p| if p >= position { p + count } else { p });
        Ok(())
    }

    /// Closes `count` bytes at `position`.
    pub(crate) fn remove_bytes(&mut self, position: u64, count: u64) -> DtausResult<()> {
        let length = self.container.len();
        if position + count > length {
            return Err(DtausError::IllegalArgument(format!(
                "removing {} bytes at {} beyond container length {}",
                count, position, length
            )));
        }
        if count == 0 {
            return Ok(());
        }

        let tail = position + count;
        let total = length - tail;
        let mut buffer = vec![0u8; self.chunk_size(total)];
        let mut start = tail;
        while start < length {
            let size = (length - start).min(buffer.len() as u64);
            let chunk = &mut buffer[..size as usize];
            self.container.read_at(start, chunk)?;
            self.container.write_at(start - count, chunk)?;
            start += size;
            self.monitor.progress(Task::RemoveBytes, start - tail, total);
        }
        self.container.set_len(length - count)?;

        self.adjust_positions(|p| if p >= tail { p - count } else { p });
        Ok(())
    }

    fn chunk_size(&self, total: u64) -> usize {
        (self.config.shift_chunk_size as u64).min(total).max(1) as usize
    }

    fn adjust_positions(&mut self, shift: impl Fn(u64) -> u64) {
        for state in &mut self.files {
            state.header_position = shift(state.header_position);
            state.checksum_position = shift(state.checksum_position);
        }
    }
}
