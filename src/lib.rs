//! dtaus - reading, validating and editing DTAUS bulk payment files
//!
//! A DTAUS container holds one or more logical files, each a header (A),
//! transactions (C) and a checksum (E), in the disk (ASCII, 128 byte
//! blocks) or tape (EBCDIC, 150 byte blocks) encoding.
//!
//! ```no_run
//! use dtaus::{Diagnostics, FileContainer, PhysicalFile};
//!
//! let container = FileContainer::open_read_only("pay.dta".as_ref())?;
//! let mut diagnostics = Diagnostics::strict();
//! let mut physical = PhysicalFile::open(container, &mut diagnostics)?;
//! for i in 0..physical.logical_file_count() {
//!     let logical = physical.logical_file(i)?;
//!     println!("{:?} {:?}", logical.header(), logical.checksum());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod container;
pub mod diagnostics;
pub mod directory;
pub mod engine;
pub mod errors;
pub mod layout;
pub mod observability;
pub mod physical;
pub mod types;
pub mod validation;

pub use config::DtausConfig;
pub use container::{ByteContainer, FileContainer, MemoryContainer};
pub use diagnostics::{Diagnostics, ErrorPolicy, Message, MessageKind};
pub use errors::{DtausError, DtausResult};
pub use layout::Format;
pub use physical::{Collaborators, LogicalFile, PhysicalFile};
pub use types::{Checksum, Header, Transaction};
