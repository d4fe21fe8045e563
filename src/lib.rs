//! FqStream reads FastQ records from plain or gzipped files through a
//! fixed-size chunk buffer.
//!
//! The reader pulls raw bytes from a [`source::ByteSource`] (plain file,
//! gzip file, or stdin) into a fixed 1 MiB chunk, scans for line
//! boundaries with a small explicit state machine, carries partial
//! lines across refills, and groups four logical lines into a validated
//! [`FastqRecord`]. Quality-less input gets a synthesized quality
//! string, and two streams (or one interleaved stream) compose into a
//! synchronized pair stream.
//!
//! # Example
//!
//! ```no_run
//! use fqstream::FastqReader;
//! use std::path::Path;
//!
//! fn main() -> fqstream::Result<()>
//! {
//!     let mut reader = FastqReader::from_path(Path::new("reads.fq.gz"))?;
//!     while let Some(record) = reader.next_record()?
//!     {
//!         println!("{}\t{}", record.name, record.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod pair;
pub mod reader;
pub mod record;
pub mod scanner;
pub mod source;

pub use error::{Error, Result};
pub use pair::{FastqPair, FastqPairReader, Pairs};
pub use reader::{FastqReader, Records, RECORD_MARKER};
pub use record::{FastqRecord, QualityEncoding, NO_QUALITY_FILLER};
pub use scanner::{LineScanner, DEFAULT_CHUNK_CAPACITY};
pub use source::{source_from_path, ByteSource, GzipSource, PlainSource};
