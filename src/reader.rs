//! Record assembly on top of the line scanner.

use crate::error::{Error, Result};
use crate::record::{FastqRecord, QualityEncoding, NO_QUALITY_FILLER};
use crate::scanner::LineScanner;
use crate::source::{source_from_path, ByteSource};
use std::path::Path;

/// Marker character opening a record's name line.
pub const RECORD_MARKER: u8 = b'@';

/// Streaming FastQ reader: groups four logical lines into a record.
///
/// In quality-less mode (Fasta-style input forced through the same
/// reader) a record is three input lines and the quality string is
/// synthesized to the sequence length.
///
/// # Example
///
/// ```no_run
/// use fqstream::FastqReader;
/// use std::path::Path;
///
/// let mut reader = FastqReader::from_path(Path::new("reads.fq.gz")).unwrap();
/// while let Some(record) = reader.next_record().unwrap()
/// {
///     println!("{}\t{}", record.name, record.len());
/// }
/// ```
pub struct FastqReader<S: ByteSource>
{
    scanner: LineScanner<S>,
    has_quality: bool,
    encoding: QualityEncoding,
}

impl FastqReader<Box<dyn ByteSource>>
{
    /// Open a file, plain or gzip by extension, `-` for stdin.
    /// Assumes quality lines are present and Phred+33 encoded.
    pub fn from_path(path: &Path) -> Result<Self>
    {
        Self::from_path_with(path, true, QualityEncoding::Phred33)
    }

    /// Open with explicit quality handling.
    pub fn from_path_with(path: &Path, has_quality: bool, encoding: QualityEncoding) -> Result<Self>
    {
        let source = source_from_path(path)?;
        Self::with_options(source, has_quality, encoding)
    }
}

impl<S: ByteSource> FastqReader<S>
{
    /// Reader over any byte source, expecting quality lines, Phred+33.
    pub fn new(source: S) -> Result<Self>
    {
        Self::with_options(source, true, QualityEncoding::Phred33)
    }

    pub fn with_options(source: S, has_quality: bool, encoding: QualityEncoding) -> Result<Self>
    {
        Ok(Self { scanner: LineScanner::new(source)?, has_quality, encoding })
    }

    /// Reader with a custom chunk capacity.
    pub fn with_capacity(
        capacity: usize,
        source: S,
        has_quality: bool,
        encoding: QualityEncoding,
    ) -> Result<Self>
    {
        Ok(Self { scanner: LineScanner::with_capacity(capacity, source)?, has_quality, encoding })
    }

    /// True if the input's last byte was not a line terminator.
    pub fn has_no_newline_at_end(&self) -> bool
    {
        self.scanner.has_no_newline_at_end()
    }

    /// Read the next record.
    ///
    /// `Ok(None)` is ordinary end-of-data. A sequence/quality length
    /// mismatch is [`Error::MismatchedQuality`]; the reader stays
    /// usable and the next call continues at the following line.
    pub fn next_record(&mut self) -> Result<Option<FastqRecord>>
    {
        // Skip blank lines and stray content until a marker line shows
        // up. Only source exhaustion ends this loop.
        let name = loop
        {
            match self.scanner.read_line()?
            {
                None => return Ok(None),
                Some(line) if line.first() == Some(&RECORD_MARKER) =>
                {
                    break String::from_utf8_lossy(&line).into_owned();
                }
                Some(_) => continue,
            }
        };

        // A record cut off by end-of-input reads its missing lines as
        // empty, the same as a getline on an exhausted stream.
        let seq = self.scanner.read_line()?.unwrap_or_default();
        let strand = self.scanner.read_line()?.unwrap_or_default();
        let strand = String::from_utf8_lossy(&strand).into_owned();

        let qual = if self.has_quality
        {
            let qual = self.scanner.read_line()?.unwrap_or_default();
            if qual.len() != seq.len()
            {
                log::error!(
                    "sequence and quality have different length:\n{}\n{}\n{}\n{}",
                    name,
                    String::from_utf8_lossy(&seq),
                    strand,
                    String::from_utf8_lossy(&qual)
                );
                return Err(Error::MismatchedQuality {
                    name,
                    sequence: String::from_utf8_lossy(&seq).into_owned(),
                    strand,
                    quality: String::from_utf8_lossy(&qual).into_owned(),
                });
            }
            qual
        }
        else
        {
            vec![NO_QUALITY_FILLER; seq.len()]
        };

        Ok(Some(FastqRecord { name, seq, strand, qual, encoding: self.encoding }))
    }

    /// Iterator over the remaining records.
    pub fn records(&mut self) -> Records<'_, S>
    {
        Records { reader: self }
    }
}

/// Iterator returned by [`FastqReader::records`].
pub struct Records<'a, S: ByteSource>
{
    reader: &'a mut FastqReader<S>,
}

impl<S: ByteSource> Iterator for Records<'_, S>
{
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item>
    {
        self.reader.next_record().transpose()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::source::PlainSource;
    use std::io::Cursor;

    fn reader_over(data: &str) -> FastqReader<PlainSource<Cursor<Vec<u8>>>>
    {
        FastqReader::new(PlainSource::new(Cursor::new(data.as_bytes().to_vec()))).unwrap()
    }

    fn quality_less_reader(data: &str) -> FastqReader<PlainSource<Cursor<Vec<u8>>>>
    {
        FastqReader::with_options(
            PlainSource::new(Cursor::new(data.as_bytes().to_vec())),
            false,
            QualityEncoding::Phred33,
        )
        .unwrap()
    }

    #[test]
    fn test_single_record()
    {
        let mut reader = reader_over("@r1\nACGT\n+\n!!!!\n");
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.name, "@r1");
        assert_eq!(record.seq, b"ACGT");
        assert_eq!(record.strand, "+");
        assert_eq!(record.qual, b"!!!!");
        assert_eq!(record.encoding, QualityEncoding::Phred33);
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_multiple_records()
    {
        let mut reader = reader_over("@a\nAGTC\n+\n'&'*\n@b\nTAGCTTTT\n+\n'&'*+'&'*\n");
        assert_eq!(reader.next_record().unwrap().unwrap().name, "@a");
        assert_eq!(reader.next_record().unwrap().unwrap().name, "@b");
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_round_trip()
    {
        let data = "@r1 lane1\nACGTACGT\n+\n!!!!!!!!\n";
        let mut reader = reader_over(data);
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(format!("{}\n", record), data);
    }

    #[test]
    fn test_last_record_without_trailing_newline()
    {
        let mut reader = reader_over("@r1\nACGT\n+\n!!!!");
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.qual, b"!!!!");
        assert!(reader.next_record().unwrap().is_none());
        assert!(reader.has_no_newline_at_end());
    }

    #[test]
    fn test_quality_less_synthesizes_filler()
    {
        let mut reader = quality_less_reader("@r1\nACGTN\n+\n");
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.seq, b"ACGTN");
        assert_eq!(record.qual, b"KKKKK");
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_quality_less_reads_three_lines_per_record()
    {
        let mut reader = quality_less_reader("@r1\nAC\n+\n@r2\nGGT\n+\n");
        assert_eq!(reader.next_record().unwrap().unwrap().qual, b"KK");
        assert_eq!(reader.next_record().unwrap().unwrap().qual, b"KKK");
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_mismatched_quality_is_an_error_not_a_crash()
    {
        let mut reader = reader_over("@r1\nACGT\n+\n!!!\n");
        let err = reader.next_record().unwrap_err();
        match err
        {
            Error::MismatchedQuality { name, sequence, quality, .. } =>
            {
                assert_eq!(name, "@r1");
                assert_eq!(sequence, "ACGT");
                assert_eq!(quality, "!!!");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_stream_survives_a_malformed_record()
    {
        let mut reader = reader_over("@bad\nACGT\n+\n!!!\n@good\nGG\n+\n!!\n");
        assert!(reader.next_record().is_err());
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.name, "@good");
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_leading_blank_line_skipped()
    {
        let mut reader = reader_over("\n@r1\nACGT\n+\n!!!!\n");
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.name, "@r1");
        assert_eq!(record.seq, b"ACGT");
    }

    #[test]
    fn test_stray_lines_before_marker_skipped()
    {
        let mut reader = reader_over("# comment\njunk\n@r1\nAC\n+\n!!\n");
        assert_eq!(reader.next_record().unwrap().unwrap().name, "@r1");
    }

    #[test]
    fn test_empty_input_is_end_of_data()
    {
        let mut reader = reader_over("");
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_junk_only_input_is_end_of_data()
    {
        let mut reader = reader_over("no\nmarkers\nhere\n");
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_truncated_record_reports_mismatch()
    {
        let mut reader = reader_over("@r1\nACGT");
        assert!(matches!(reader.next_record(), Err(Error::MismatchedQuality { .. })));
    }

    #[test]
    fn test_crlf_line_endings()
    {
        let mut reader = reader_over("@r1\r\nACGT\r\n+\r\n!!!!\r\n");
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.name, "@r1");
        assert_eq!(record.seq, b"ACGT");
        assert_eq!(record.strand, "+");
        assert_eq!(record.qual, b"!!!!");
    }

    #[test]
    fn test_phred64_recorded_on_records()
    {
        let mut reader = FastqReader::with_options(
            PlainSource::new(Cursor::new(b"@r1\nAC\n+\nhh\n".to_vec())),
            true,
            QualityEncoding::Phred64,
        )
        .unwrap();
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.encoding, QualityEncoding::Phred64);
        assert_eq!(record.encoding.offset(), 64);
    }

    #[test]
    fn test_small_capacity_matches_default()
    {
        let data = "@a\nAGTCAGTC\n+\n!!!!!!!!\n@b\nTT\n+\n##\n@c\nGCTA\n+\n$$$$\n";
        let mut small =
            FastqReader::with_capacity(7, PlainSource::new(Cursor::new(data.as_bytes().to_vec())), true, QualityEncoding::Phred33)
                .unwrap();
        let mut default = reader_over(data);
        loop
        {
            let a = small.next_record().unwrap();
            let b = default.next_record().unwrap();
            assert_eq!(a, b);
            if a.is_none()
            {
                break;
            }
        }
    }

    #[test]
    fn test_records_iterator()
    {
        let mut reader = reader_over("@a\nAC\n+\n!!\n@b\nGT\n+\n##\n");
        let names: Vec<String> =
            reader.records().map(|r| r.unwrap().name).collect();
        assert_eq!(names, vec!["@a".to_string(), "@b".to_string()]);
    }
}
