//! Error types shared by every stage of the table pipeline.

use std::io;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DataError>;

/// Everything that can go wrong while moving records between a document and a flat table.
///
/// All variants are terminal for the operation that raised them: nothing is retried and
/// nothing is written once one of these is returned.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no container with id '{id}' found in document")]
    NotFound { id: String },
    #[error("found {count} containers with id '{id}', expected exactly one")]
    MultipleFound { id: String, count: usize },
    #[error("container '{id}' is malformed")]
    Malformed { id: String },
    #[error("table has no date column")]
    MissingDateColumn,
    #[error("fragment must start with '<div' and end with '</div>'")]
    NotAContainer,
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("markup serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persist(#[from] tempfile::PersistError),
}
