//! Physical files
//!
//! A physical file is a byte container holding a sequence of logical
//! files, each an A record, its C records and an E record:
//!
//! ```text
//! | A | C | C ... | E | A | C ... | E | ...
//! ```
//!
//! Opening a container detects its format and scans every logical file.
//! Mutations go through `LogicalFile` handles and are applied to the
//! container immediately; `commit` flushes it.

mod analyse;
mod collaborators;
mod logical_file;

use crate::config::DtausConfig;
use crate::container::ByteContainer;
use crate::diagnostics::Diagnostics;
use crate::directory::{CurrencyDirectory, TextschluesselDirectory};
use crate::engine::{CurrencyCounter, LogicalFileState};
use crate::errors::{DtausError, DtausResult};
use crate::layout::{Format, FormatProfile};
use crate::observability::{log_event_with_fields, Event, TaskMonitor};
use crate::types::{Checksum, Header, Transaction};
use crate::validation::{ValidationContext, Validators};

pub use analyse::analyse_format;
pub use collaborators::Collaborators;
pub use logical_file::LogicalFile;

/// A container of logical files in one format
pub struct PhysicalFile<C: ByteContainer> {
    pub(crate) container: C,
    pub(crate) profile: &'static FormatProfile,
    pub(crate) files: Vec<LogicalFileState>,
    pub(crate) config: DtausConfig,
    pub(crate) validators: Validators,
    pub(crate) textschluessel: Box<dyn TextschluesselDirectory>,
    pub(crate) currencies: Box<dyn CurrencyDirectory>,
    pub(crate) monitor: Box<dyn TaskMonitor>,
}

impl<C: ByteContainer> PhysicalFile<C> {
    /// Opens an existing container with the default collaborators.
    pub fn open(container: C, diagnostics: &mut Diagnostics) -> DtausResult<Self> {
        Self::open_with(container, Collaborators::default(), diagnostics)
    }

    /// Detects the format and scans all logical files.
    pub fn open_with(
        mut container: C,
        collaborators: Collaborators,
        diagnostics: &mut Diagnostics,
    ) -> DtausResult<Self> {
        let profile = analyse_format(&mut container, diagnostics)?;
        let mut physical = Self::assemble(container, profile, collaborators);
        physical.scan(diagnostics)?;
        Ok(physical)
    }

    /// Starts a physical file in `format` on an empty container.
    pub fn create(container: C, format: Format) -> DtausResult<Self> {
        Self::create_with(container, format, Collaborators::default())
    }

    pub fn create_with(container: C, format: Format, collaborators: Collaborators) -> DtausResult<Self> {
        if !container.is_empty() {
            return Err(DtausError::IllegalArgument(format!(
                "container already holds {} bytes",
                container.len()
            )));
        }
        Ok(Self::assemble(container, format.profile(), collaborators))
    }

    fn assemble(container: C, profile: &'static FormatProfile, collaborators: Collaborators) -> Self {
        let Collaborators {
            config,
            validators,
            textschluessel,
            currencies,
            monitor,
        } = collaborators;
        Self {
            container,
            profile,
            files: Vec::new(),
            config,
            validators,
            textschluessel,
            currencies,
            monitor,
        }
    }

    /// Scans the container from the start, rebuilding every logical file.
    fn scan(&mut self, diagnostics: &mut Diagnostics) -> DtausResult<()> {
        let block = self.profile.block_size;
        let length = self.container.len();
        let length_str = length.to_string();
        log_event_with_fields(
            Event::ScanBegin,
            &[("format", self.profile.format.as_str()), ("length", &length_str)],
        );

        self.files.clear();
        let mut position = 0;
        while position + block <= length {
            self.files.push(LogicalFileState::unscanned(position, block));
            let file = self.files.len() - 1;
            self.recompute_checksum(diagnostics, file)?;
            position = self.files[file].end_position(block);
        }

        let files_str = self.files.len().to_string();
        log_event_with_fields(Event::ScanComplete, &[("files", &files_str)]);
        Ok(())
    }

    pub fn format(&self) -> Format {
        self.profile.format
    }

    pub fn profile(&self) -> &'static FormatProfile {
        self.profile
    }

    pub fn config(&self) -> &DtausConfig {
        &self.config
    }

    pub fn logical_file_count(&self) -> usize {
        self.files.len()
    }

    fn check_file(&self, file: usize) -> DtausResult<()> {
        if file >= self.files.len() {
            return Err(DtausError::IndexOutOfBounds {
                index: file,
                len: self.files.len(),
            });
        }
        Ok(())
    }

    /// Handle on logical file `file`.
    pub fn logical_file(&mut self, file: usize) -> DtausResult<LogicalFile<'_, C>> {
        self.check_file(file)?;
        Ok(LogicalFile::new(self, file))
    }

    /// Appends a logical file with `header` and no transactions.
    pub fn add_logical_file(&mut self, diagnostics: &mut Diagnostics, header: Header) -> DtausResult<usize> {
        self.validate_header(None, &header)?;
        let block = self.profile.block_size;
        let header_bytes = self.encode_header(&header)?;
        let checksum_bytes = self.encode_checksum(&Checksum::default())?;

        let position = self.files.last().map_or(0, |state| state.end_position(block));
        self.insert_bytes(position, 2 * block)?;
        self.container.write_at(position, &header_bytes)?;
        self.container.write_at(position + block, &checksum_bytes)?;

        self.files.push(LogicalFileState::unscanned(position, block));
        let file = self.files.len() - 1;
        self.recompute_checksum(diagnostics, file)?;

        let file_str = file.to_string();
        let position_str = position.to_string();
        log_event_with_fields(
            Event::LogicalFileAdded,
            &[("file", &file_str), ("position", &position_str)],
        );
        Ok(file)
    }

    /// Removes logical file `file` with all its records. Returns its header.
    pub fn remove_logical_file(&mut self, file: usize) -> DtausResult<Option<Header>> {
        self.check_file(file)?;
        let block = self.profile.block_size;
        let position = self.files[file].header_position;
        let end = self.files[file].end_position(block);
        self.remove_bytes(position, end - position)?;
        let state = self.files.remove(file);

        let file_str = file.to_string();
        let position_str = position.to_string();
        log_event_with_fields(
            Event::LogicalFileRemoved,
            &[("file", &file_str), ("position", &position_str)],
        );
        Ok(state.header)
    }

    /// Flushes the container.
    pub fn commit(&mut self) -> DtausResult<()> {
        self.container.flush()?;
        let length_str = self.container.len().to_string();
        log_event_with_fields(Event::Commit, &[("length", &length_str)]);
        Ok(())
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn into_inner(self) -> C {
        self.container
    }

    fn validation_context(&self, file: Option<usize>) -> ValidationContext<'_> {
        ValidationContext {
            header: file.and_then(|f| self.files[f].header.as_ref()),
            config: &self.config,
            textschluessel: self.textschluessel.as_ref(),
            currencies: self.currencies.as_ref(),
        }
    }

    pub(crate) fn validate_header(&self, file: Option<usize>, header: &Header) -> DtausResult<()> {
        let empty = CurrencyCounter::default();
        let counter = file.map_or(&empty, |f| &self.files[f].counter);
        self.validators
            .validate_header(&self.validation_context(file), header, counter)
            .map_err(DtausError::Validation)
    }

    pub(crate) fn validate_transaction(&self, file: usize, transaction: &Transaction) -> DtausResult<()> {
        self.validators
            .validate_transaction(&self.validation_context(Some(file)), transaction)
            .map_err(DtausError::Validation)
    }
}
