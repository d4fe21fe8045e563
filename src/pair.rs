//! Synchronized paired reading.

use crate::error::Result;
use crate::reader::FastqReader;
use crate::record::{FastqRecord, QualityEncoding};
use crate::source::ByteSource;
use std::path::Path;

/// Two records taken positionally from the two sides of a pair.
///
/// No identity check is made between the two names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqPair
{
    pub left: FastqRecord,
    pub right: FastqRecord,
}

/// Reads two record streams in lockstep, or one interleaved stream
/// twice per step.
///
/// The pair stream ends as soon as either side does; a partial pair is
/// never returned. This assumes synchronized paired input and fails
/// fast on anything else.
pub struct FastqPairReader<S: ByteSource>
{
    left: FastqReader<S>,
    right: Option<FastqReader<S>>,
}

impl FastqPairReader<Box<dyn ByteSource>>
{
    /// Open two files as the left and right sides of a pair.
    pub fn from_paths(
        left: &Path,
        right: &Path,
        has_quality: bool,
        encoding: QualityEncoding,
    ) -> Result<Self>
    {
        Ok(Self {
            left: FastqReader::from_path_with(left, has_quality, encoding)?,
            right: Some(FastqReader::from_path_with(right, has_quality, encoding)?),
        })
    }

    /// Open a single interleaved file; each step reads the left record
    /// first, then the right.
    pub fn interleaved_from_path(
        path: &Path,
        has_quality: bool,
        encoding: QualityEncoding,
    ) -> Result<Self>
    {
        Ok(Self { left: FastqReader::from_path_with(path, has_quality, encoding)?, right: None })
    }
}

impl<S: ByteSource> FastqPairReader<S>
{
    /// Pair two already-open readers.
    pub fn new(left: FastqReader<S>, right: FastqReader<S>) -> Self
    {
        Self { left, right: Some(right) }
    }

    /// Treat a single already-open reader as an interleaved stream.
    pub fn interleaved(reader: FastqReader<S>) -> Self
    {
        Self { left: reader, right: None }
    }

    /// Read one record from each side.
    ///
    /// `Ok(None)` once either side is exhausted, even if the other
    /// still has records.
    pub fn next_pair(&mut self) -> Result<Option<FastqPair>>
    {
        let left = self.left.next_record()?;
        let right = match self.right.as_mut()
        {
            Some(reader) => reader.next_record()?,
            None => self.left.next_record()?,
        };
        match (left, right)
        {
            (Some(left), Some(right)) => Ok(Some(FastqPair { left, right })),
            _ => Ok(None),
        }
    }

    /// Iterator over the remaining pairs.
    pub fn pairs(&mut self) -> Pairs<'_, S>
    {
        Pairs { reader: self }
    }
}

/// Iterator returned by [`FastqPairReader::pairs`].
pub struct Pairs<'a, S: ByteSource>
{
    reader: &'a mut FastqPairReader<S>,
}

impl<S: ByteSource> Iterator for Pairs<'_, S>
{
    type Item = Result<FastqPair>;

    fn next(&mut self) -> Option<Self::Item>
    {
        self.reader.next_pair().transpose()
    }
}
