//! stakenet-storage — persistence for stakeholder-network analytics
//!
//! ## Components
//!
//! - [`adapter::DataStore`]: schema-qualified SQLite access with a
//!   per-table column cache and column-filtered parameterized inserts
//! - [`records`]: typed table records with explicit projections
//! - [`artifact::ArtifactCache`]: bincode graph artifacts keyed by
//!   `{organization}-{package}`
//! - [`store::NetworkStore`]: rebuild / cached-load lifecycle, eager
//!   statistics, save/delete against the store
//!
//! Single-threaded, synchronous, batch. Every insert commits
//! individually; callers must treat multi-record loads as non-atomic.

pub mod adapter;
pub mod artifact;
pub mod error;
pub mod records;
pub mod store;

pub use adapter::DataStore;
pub use artifact::ArtifactCache;
pub use error::{ErrorKind, Result, StorageError};
pub use records::{CentralityRecord, IssueCommentRecord, NetworkStatisticsRecord, TableRecord};
pub use store::{NetworkRenderer, NetworkStore, NoopRenderer};
