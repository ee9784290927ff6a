//! stockroom-core — record search and gallery logic for stockroom.
//!
//! This crate holds everything that does not depend on a terminal: the record
//! model, the search filter, the thumbnail swapper, dataset loading and the
//! layered configuration.
//!
//! # Architecture
//!
//! ```text
//! Config ──► Dataset ──► Search ──► ResultList ──► UI
//!    │
//!    └──► ImageSwapper ──────────────────────────► UI
//! ```
//!
//! Every operation is synchronous and runs to completion on the caller's
//! thread. The UI owns all state; the functions here only read records and
//! write into the [`ResultList`](search::ResultList) or
//! [`ImageSwapper`](thumbnail::ImageSwapper) they are handed.

pub mod config;
pub mod dataset;
pub mod demo;
pub mod error;
pub mod record;
pub mod search;
pub mod thumbnail;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use record::Record;
pub use search::{ResultList, ResultRow};
pub use thumbnail::ImageSwapper;
