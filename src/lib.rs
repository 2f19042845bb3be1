//! Collective actions table sync
//!
//!     The dataset of collective actions lives in two places: as an HTML table embedded in the
//!     project README, readable by people, and as a CSV file, readable by tools. This crate
//!     keeps the two in step.
//!
//! Architecture
//!
//!     - table: the in-memory model, an ordered list of records sharing a column set
//!     - markup: the container fragment, with its codec (fragment <-> table) and validator
//!     - document: finds the container in a full document and splices a new one in
//!     - canonical: the single canonical form (complete fields, newest first)
//!     - flat: the CSV representation
//!     - sources: providers of raw fragments to merge
//!     - pipeline: the end-to-end operations built from the above
//!
//!     This is a pure lib: no printing, no environment lookups. The actions-cli crate is the
//!     shell around it and actions-config resolves paths and identifiers.
//!
//! Trust
//!
//!     Fragments read out of a document are untrusted and validated before decoding.
//!     Fragments produced by the encoder are trusted by construction.

pub mod canonical;
pub mod dates;
pub mod document;
pub mod error;
pub mod flat;
pub mod markup;
pub mod pipeline;
pub mod schema;
pub mod sources;
pub mod table;

pub use canonical::{canonicalize, complete, sort};
pub use document::{locate, replace};
pub use error::{DataError, Result};
pub use markup::{decode, encode, is_valid, Fragment};
pub use schema::{Field, PROJECT_ID};
pub use sources::{DirectorySource, Source, SourceProvider};
pub use table::{Column, Record, Table};
