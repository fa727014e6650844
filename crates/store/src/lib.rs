//! Persistence boundary for Ledgerline.
//!
//! The engine never queries or writes storage itself. It receives record
//! sets through [`LedgerSource`] and hands its commands to [`LedgerSink`].
//! [`MemoryStore`] implements both over an in-memory [`Snapshot`].

pub mod error;
pub mod filter;
pub mod memory;
pub mod source;

pub use error::StoreError;
pub use filter::{AccountFilter, AssetFilter, ChequeFilter, MovementFilter, TransactionFilter};
pub use memory::{MemoryStore, Snapshot};
pub use source::{LedgerSink, LedgerSource};
