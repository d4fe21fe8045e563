//! Byte sources feeding the chunk buffer.
//!
//! The line scanner pulls raw bytes through the [`ByteSource`]
//! capability: fill a caller-provided buffer, report how many bytes
//! arrived, report end-of-input. Two variants exist, plain and
//! gzip-compressed, chosen by file extension when opening a path.

use crate::error::{Error, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

/// Capability the line scanner consumes.
///
/// `fill` returns fewer bytes than `buf.len()` only at end-of-input,
/// and 0 means no more data is coming. Implementations loop over short
/// reads from the underlying stream so that a short fill always means
/// exhaustion, never a transient partial read.
pub trait ByteSource
{
    /// Fill `buf` with up to `buf.len()` bytes, returning how many were read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// True once the underlying stream has reported end-of-input.
    fn at_end(&self) -> bool;
}

impl std::fmt::Debug for Box<dyn ByteSource>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.write_str("Box<dyn ByteSource>")
    }
}

impl ByteSource for Box<dyn ByteSource>
{
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize>
    {
        (**self).fill(buf)
    }

    fn at_end(&self) -> bool
    {
        (**self).at_end()
    }
}

// Read::read may return short without being at the end of the stream,
// so keep going until the buffer is full or the stream reports 0 bytes.
fn fill_from<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize>
{
    let mut total = 0;
    while total < buf.len()
    {
        let n = reader.read(&mut buf[total..])?;
        if n == 0
        {
            break;
        }
        total += n;
    }
    Ok(total)
}

/// Plain byte source over any reader.
pub struct PlainSource<R: Read>
{
    inner: R,
    eof: bool,
}

impl<R: Read> PlainSource<R>
{
    pub fn new(inner: R) -> Self
    {
        Self { inner, eof: false }
    }
}

impl<R: Read> ByteSource for PlainSource<R>
{
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize>
    {
        let n = fill_from(&mut self.inner, buf).map_err(Error::Io)?;
        if n < buf.len()
        {
            self.eof = true;
        }
        Ok(n)
    }

    fn at_end(&self) -> bool
    {
        self.eof
    }
}

/// Gzip-compressed byte source.
///
/// Uses `MultiGzDecoder` so that files made of several concatenated
/// gzip members (bgzip output) decode to the end instead of stopping
/// after the first member.
pub struct GzipSource<R: Read>
{
    inner: MultiGzDecoder<R>,
    eof: bool,
}

impl<R: Read> GzipSource<R>
{
    pub fn new(inner: R) -> Self
    {
        Self { inner: MultiGzDecoder::new(inner), eof: false }
    }
}

impl<R: Read> ByteSource for GzipSource<R>
{
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize>
    {
        let n = fill_from(&mut self.inner, buf).map_err(|e| {
            log::error!("failed to read gzip stream: {}", e);
            Error::Gzip(e)
        })?;
        if n < buf.len()
        {
            self.eof = true;
        }
        Ok(n)
    }

    fn at_end(&self) -> bool
    {
        self.eof
    }
}

/// Open a path as a byte source, picking gzip or plain by extension.
///
/// `-` and `/dev/stdin` select standard input (always plain).
///
/// # Example
///
/// ```no_run
/// use fqstream::source::source_from_path;
/// use std::path::Path;
///
/// let source = source_from_path(Path::new("reads.fq.gz")).unwrap();
/// ```
pub fn source_from_path(path: &Path) -> Result<Box<dyn ByteSource>>
{
    if path == Path::new("-") || path == Path::new("/dev/stdin")
    {
        return Ok(Box::new(PlainSource::new(io::stdin())));
    }

    let file = File::open(path).map_err(|e| Error::Open { path: path.to_path_buf(), source: e })?;

    if path.extension().map(|e| e == "gz").unwrap_or(false)
    {
        Ok(Box::new(GzipSource::new(file)))
    }
    else
    {
        Ok(Box::new(PlainSource::new(file)))
    }
}

/// True for the plain FastQ/Fasta extensions the reader accepts.
pub fn is_fastq_path(path: &Path) -> bool
{
    ["fastq", "fq", "fasta", "fa"]
        .iter()
        .any(|ext| path.extension().map(|e| e == *ext).unwrap_or(false))
}

/// True for the gzip-compressed forms of the accepted extensions.
pub fn is_zipped_fastq_path(path: &Path) -> bool
{
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    [".fastq.gz", ".fq.gz", ".fasta.gz", ".fa.gz"]
        .iter()
        .any(|suffix| name.ends_with(suffix))
}
