//! Format detection

use crate::container::ByteContainer;
use crate::diagnostics::{Diagnostics, Message, MessageKind};
use crate::errors::{DtausError, DtausResult};
use crate::layout::{FormatProfile, DISK, TAPE};
use crate::observability::{log_event_with_fields, Event};

/// Detects the encoding of a container from its first record.
///
/// Disk files start with the ASCII record length `0128`, tape files with
/// the big-endian binary record length 150. A container whose length is
/// not a whole number of blocks raises `IllegalFileLength`.
pub fn analyse_format<C: ByteContainer>(
    container: &mut C,
    diagnostics: &mut Diagnostics,
) -> DtausResult<&'static FormatProfile> {
    let length = container.len();
    let mut magic = [0u8; 4];
    let available = length.min(magic.len() as u64) as usize;
    container.read_at(0, &mut magic[..available])?;

    let profile: &'static FormatProfile = if available == 4 && &magic == b"0128" {
        &DISK
    } else if available >= 2 && u16::from_be_bytes([magic[0], magic[1]]) as u64 == TAPE.block_size {
        &TAPE
    } else {
        return Err(DtausError::UnrecognizedFormat);
    };

    let block = profile.block_size;
    if length < block || length % block != 0 {
        diagnostics.raise(
            None,
            Message::new(
                MessageKind::IllegalFileLength,
                0,
                format!("length {} is not a multiple of {} bytes", length, block),
            ),
        )?;
    }

    let length_str = length.to_string();
    log_event_with_fields(
        Event::FormatDetected,
        &[("format", profile.format.as_str()), ("length", &length_str)],
    );
    Ok(profile)
}
