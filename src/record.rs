//! FastQ record value type.

use std::fmt;

/// Quality score encoding of a record, one of the two common ASCII
/// offsets. The reader records it and never reinterprets the quality
/// bytes; downstream consumers subtract [`offset`](QualityEncoding::offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityEncoding
{
    Phred33,
    Phred64,
}

impl QualityEncoding
{
    /// ASCII offset added to a quality score in this encoding.
    pub fn offset(&self) -> u8
    {
        match self
        {
            QualityEncoding::Phred33 => 33,
            QualityEncoding::Phred64 => 64,
        }
    }
}

/// Filler byte used when the input carries no quality line.
pub const NO_QUALITY_FILLER: u8 = b'K';

/// One FastQ record: name line (marker included), sequence, strand
/// line, quality.
///
/// `qual` always has the same length as `seq`; for quality-less input
/// it is synthesized from [`NO_QUALITY_FILLER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord
{
    pub name: String,
    pub seq: Vec<u8>,
    pub strand: String,
    pub qual: Vec<u8>,
    pub encoding: QualityEncoding,
}

impl FastqRecord
{
    /// Sequence length in bases.
    pub fn len(&self) -> usize
    {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.seq.is_empty()
    }
}

impl fmt::Display for FastqRecord
{
    /// The four record lines joined by `\n`, without a trailing terminator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(
            f,
            "{}\n{}\n{}\n{}",
            self.name,
            String::from_utf8_lossy(&self.seq),
            self.strand,
            String::from_utf8_lossy(&self.qual)
        )
    }
}
