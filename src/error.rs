//! Error and result types.
//!
//! End-of-data is never an error: reading operations return `Ok(None)`
//! once a stream is exhausted. Everything in this enum is a genuine
//! failure, and a malformed record is distinguishable from both
//! exhaustion and I/O trouble at the call site.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from opening and reading sequence streams.
#[derive(Debug, Error)]
pub enum Error
{
    /// The input could not be opened. Fatal to stream construction.
    #[error("failed to open {}: {source}", .path.display())]
    Open
    {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read from a plain byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A read from a gzip byte source failed. The stream yields no
    /// further valid data after this.
    #[error("gzip read error: {0}")]
    Gzip(io::Error),

    /// Sequence and quality lines of a record differ in length. The
    /// offending lines are carried for diagnosis; the stream itself
    /// stays readable and the next read starts at the following line.
    #[error("sequence and quality have different length in record {name} ({} vs {})", .sequence.len(), .quality.len())]
    MismatchedQuality
    {
        name: String,
        sequence: String,
        strand: String,
        quality: String,
    },
}
