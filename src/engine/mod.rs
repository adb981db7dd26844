//! Logical file engine
//!
//! Reads, writes and rescans the A, C and E records of logical files inside
//! a `PhysicalFile`. Everything here is written once against a
//! `FormatProfile`; disk and tape only differ in the profile passed in.
//!
//! Cached state per logical file lives in `LogicalFileState`:
//! - absolute header and checksum positions
//! - a transaction index relative to the header
//! - the decoded header
//! - the checksum and currency counts of all transactions

mod checksum;
mod counter;
mod header;
mod index;
mod operations;
mod record;
mod shift;
mod state;
mod transaction;

pub use counter::CurrencyCounter;
pub use index::{TransactionIndex, MAX_TRANSACTIONS};

pub(crate) use state::LogicalFileState;
