//! Fixed-buffer line scanning.
//!
//! A [`LineScanner`] owns a byte source and a fixed-capacity chunk
//! buffer, and hands out one logical line per call. Lines that straddle
//! a chunk boundary are stitched back together through a carry
//! accumulator, so a line may span any number of refills and the chunk
//! capacity is a throughput knob, never a correctness limit.
//!
//! The control flow is an explicit three-state machine:
//!
//! * `Scanning` - look for the next terminator in the current chunk.
//! * `NeedsRefill` - chunk exhausted without a terminator; pull another
//!   chunk if more data can exist, otherwise finish.
//! * `Done` - terminal; the remaining carry, if any, is the final line.

use crate::error::Result;
use crate::source::ByteSource;
use memchr::memchr;

/// Default chunk capacity, 1 MiB.
pub const DEFAULT_CHUNK_CAPACITY: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState
{
    Scanning,
    NeedsRefill,
    Done,
}

/// One chunk of the input plus the scan cursors.
///
/// Invariant: `start <= end <= len <= buf.len()`.
struct ChunkBuffer
{
    buf: Vec<u8>,
    /// Bytes actually filled by the last refill.
    len: usize,
    /// Start of the current unreturned line fragment.
    start: usize,
    /// Next unexamined byte.
    end: usize,
    /// Partial line saved across refills.
    carry: Vec<u8>,
}

impl ChunkBuffer
{
    fn new(capacity: usize) -> Self
    {
        Self { buf: vec![0; capacity], len: 0, start: 0, end: 0, carry: Vec::new() }
    }

    fn capacity(&self) -> usize
    {
        self.buf.len()
    }

    /// Whether the last refill filled the chunk completely.
    fn was_full(&self) -> bool
    {
        self.len == self.buf.len()
    }
}

/// Produces logical lines from a byte source through a fixed buffer.
///
/// A single trailing carriage return is stripped from every returned
/// line, so platform-style line endings come out clean.
///
/// # Example
///
/// ```
/// use fqstream::scanner::LineScanner;
/// use fqstream::source::PlainSource;
/// use std::io::Cursor;
///
/// let source = PlainSource::new(Cursor::new(b"one\ntwo\n".to_vec()));
/// let mut scanner = LineScanner::new(source).unwrap();
/// assert_eq!(scanner.read_line().unwrap(), Some(b"one".to_vec()));
/// assert_eq!(scanner.read_line().unwrap(), Some(b"two".to_vec()));
/// assert_eq!(scanner.read_line().unwrap(), None);
/// ```
pub struct LineScanner<S: ByteSource>
{
    source: S,
    chunk: ChunkBuffer,
    state: ScanState,
    /// Sticky: the input ended without a final line terminator.
    no_newline_at_end: bool,
}

impl<S: ByteSource> LineScanner<S>
{
    /// Create a scanner with the default 1 MiB chunk capacity.
    ///
    /// The first chunk is pulled immediately, so construction fails if
    /// the source does.
    pub fn new(source: S) -> Result<Self>
    {
        Self::with_capacity(DEFAULT_CHUNK_CAPACITY, source)
    }

    /// Create a scanner with the given chunk capacity.
    pub fn with_capacity(capacity: usize, source: S) -> Result<Self>
    {
        let mut scanner = Self {
            source,
            chunk: ChunkBuffer::new(capacity),
            state: ScanState::Scanning,
            no_newline_at_end: false,
        };
        scanner.refill()?;
        Ok(scanner)
    }

    /// True if the input's last byte was not a line terminator.
    ///
    /// Informational only: the final line is still returned.
    pub fn has_no_newline_at_end(&self) -> bool
    {
        self.no_newline_at_end
    }

    /// Pull the next chunk and reset the cursors.
    fn refill(&mut self) -> Result<()>
    {
        let chunk = &mut self.chunk;
        chunk.len = self.source.fill(&mut chunk.buf)?;
        chunk.start = 0;
        chunk.end = 0;

        // A short refill is the last one; note when it does not close
        // its final line.
        if chunk.len > 0 && chunk.len < chunk.capacity() && chunk.buf[chunk.len - 1] != b'\n'
        {
            self.no_newline_at_end = true;
        }
        Ok(())
    }

    /// Return the next logical line, or `None` once the input is exhausted.
    ///
    /// The final line of an input lacking a trailing terminator is
    /// returned exactly once; an input ending on a terminator produces
    /// no spurious empty line. A refill failure surfaces as `Err` and
    /// is never reported as end-of-data.
    pub fn read_line(&mut self) -> Result<Option<Vec<u8>>>
    {
        loop
        {
            match self.state
            {
                ScanState::Scanning =>
                {
                    let chunk = &mut self.chunk;
                    match memchr(b'\n', &chunk.buf[chunk.end..chunk.len])
                    {
                        Some(offset) =>
                        {
                            let newline = chunk.end + offset;
                            let mut line = std::mem::take(&mut chunk.carry);
                            line.extend_from_slice(&chunk.buf[chunk.start..newline]);
                            chunk.start = newline + 1;
                            chunk.end = newline + 1;
                            strip_carriage_return(&mut line);
                            return Ok(Some(line));
                        }
                        None =>
                        {
                            chunk.carry.extend_from_slice(&chunk.buf[chunk.start..chunk.len]);
                            chunk.start = chunk.len;
                            chunk.end = chunk.len;
                            self.state = ScanState::NeedsRefill;
                        }
                    }
                }
                ScanState::NeedsRefill =>
                {
                    // A short or empty chunk means no more data exists;
                    // so does an exhausted source.
                    if !self.chunk.was_full() || self.chunk.len == 0 || self.source.at_end()
                    {
                        self.state = ScanState::Done;
                    }
                    else
                    {
                        self.refill()?;
                        self.state = ScanState::Scanning;
                    }
                }
                ScanState::Done =>
                {
                    if self.chunk.carry.is_empty()
                    {
                        return Ok(None);
                    }
                    let mut line = std::mem::take(&mut self.chunk.carry);
                    strip_carriage_return(&mut line);
                    return Ok(Some(line));
                }
            }
        }
    }
}

/// Strip exactly one trailing carriage return.
fn strip_carriage_return(line: &mut Vec<u8>)
{
    if line.last() == Some(&b'\r')
    {
        line.pop();
    }
}
