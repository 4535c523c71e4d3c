//! Reverse reader over a positionally readable, seekable byte source.
//!
//! This module provides [ReverseReader], which yields the bytes of a
//! [ByteSource] from its cursor toward offset zero, and [Forward], a view
//! that reads the same source in the usual direction.

use std::io::{self, ErrorKind, Read, SeekFrom};

use log::{debug, trace};

use crate::reader::read_error::ReadError;
use crate::source::{ByteSource, read_at_fully};

// =#========================================================================#=
// STEPPING
// =#========================================================================#=
/// Controls how a backward read moves the source's cursor.
///
/// Both strategies produce the same bytes, the same count and leave the
/// cursor at the same offset once a call returns. They differ in what another
/// holder of the source handle can observe *during* a call.
///
/// By default, a [ReverseReader] uses [Stepping::Batched]. Use
/// [per_byte()](ReverseReader::per_byte) or
/// [with_stepping()](ReverseReader::with_stepping) to override this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stepping {
    /// One positional read of the whole span below the cursor, reversed in
    /// place, followed by a single cursor step back by the number of bytes
    /// produced. On failure nothing is reported as read and the cursor stays
    /// where it was. This is the default.
    #[default]
    Batched,

    /// Steps the cursor back by one and reads one byte, for every byte.
    /// Between bytes the cursor matches what has been produced so far, and
    /// a failure reports exactly the bytes delivered before it. A failing
    /// read happens after its step, so the cursor then sits one byte below
    /// where the reported count puts it; no repair is attempted.
    PerByte,
}

// =#========================================================================#=
// FILLED
// =#========================================================================#=
/// Outcome of a successful read call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filled {
    /// Number of bytes written to the start of the caller's buffer.
    pub count: usize,
    /// `true` if the source ran out of bytes in the read direction before
    /// the buffer was full. Raised on the same call as the final bytes.
    pub end_of_stream: bool,
}

impl Filled {
    fn more(count: usize) -> Self {
        Self { count, end_of_stream: false }
    }

    fn end(count: usize) -> Self {
        Self { count, end_of_stream: true }
    }
}

// =#========================================================================#=
// REVERSE READER
// =#========================================================================#=
/// Reads a [ByteSource] backwards, byte by byte, from its cursor toward
/// offset zero.
///
/// The reader keeps no cursor of its own: every call asks the source where
/// its cursor is and leaves it moved by exactly the number of bytes produced.
/// Anyone else holding the same handle (e.g. another `&File`) sees the
/// cursor walk down as bytes are read, and may reposition it between calls.
///
/// Since [Read] is implemented, the reversed stream plugs into anything that
/// consumes a forward reader. Bytes come out reversed, so a line scanner
/// yields the last line first, with each line's bytes reversed as well.
///
/// # Positioning
/// A freshly created reader over a source whose cursor sits at `0` has
/// nothing to read. Move to the end first, either on the source itself,
/// through [seek_to_end()](Self::seek_to_end) or by creating the reader with
/// [from_end()](Self::from_end).
///
/// # Ownership
/// The reader holds whatever handle it is given. Pass `&mut source`, `&File`
/// or `Arc<File>` to keep the source's lifecycle with the caller; dropping
/// the reader then never closes anything.
///
/// # Concurrency
/// All reads take `&mut self`, so one reader cannot be used from two places
/// at once. Several readers over a shared handle share one cursor and must
/// be synchronized by the caller; a multi-byte read is not atomic.
///
/// # Example
/// ```
/// use std::io::{BufRead, BufReader, Cursor};
/// use reverse_reader::ReverseReader;
///
/// let source = Cursor::new(b"foo\nbar\nbaz".to_vec());
/// let reader = ReverseReader::from_end(source)?;
///
/// let lines: Vec<String> = BufReader::new(reader).lines().collect::<Result<_, _>>()?;
/// assert_eq!(lines, ["zab", "rab", "oof"]);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ReverseReader<S: ByteSource> {
    source: S,
    stepping: Stepping,
}

impl<S: ByteSource> ReverseReader<S> {
    /// Creates a new reader over `source`. Performs no I/O.
    ///
    /// # Arguments
    /// * `source` - The byte source (or a handle to it) to read
    pub fn new(source: S) -> Self {
        Self { source, stepping: Stepping::default() }
    }

    /// Creates a new reader over `source` and moves its cursor to the end.
    ///
    /// # Errors
    /// Returns an error if moving the cursor fails.
    pub fn from_end(source: S) -> io::Result<Self> {
        let mut reader = Self::new(source);
        reader.seek_to_end()?;
        Ok(reader)
    }

    /// Configure the reader to use the given [Stepping].
    pub fn with_stepping(mut self, stepping: Stepping) -> Self {
        self.stepping = stepping;
        self
    }

    /// Configure the reader to step the cursor **one byte at a time**.
    ///
    /// See [Stepping::PerByte].
    pub fn per_byte(self) -> Self {
        self.with_stepping(Stepping::PerByte)
    }

    /// Configure the reader to read each call's span **in one go** (default).
    ///
    /// See [Stepping::Batched].
    pub fn batched(self) -> Self {
        self.with_stepping(Stepping::Batched)
    }

    /// The configured [Stepping].
    pub fn stepping(&self) -> Stepping {
        self.stepping
    }

    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Gets a mutable reference to the underlying source.
    ///
    /// Repositioning through it is fine: the reader re-reads the cursor on
    /// every call.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwraps this reader, returning the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }

    // ----------------------------------------------------------------------
    // Cursor
    // ----------------------------------------------------------------------
    /// Moves the source's cursor to its end and returns the new offset.
    ///
    /// Same contract as `seek(SeekFrom::End(0))` on the source. To read from
    /// any other offset, position the source directly.
    pub fn seek_to_end(&mut self) -> io::Result<u64> {
        self.source.seek(SeekFrom::End(0))
    }

    /// Moves the source's cursor to offset zero and returns it.
    ///
    /// Same contract as `seek(SeekFrom::Start(0))` on the source.
    pub fn seek_to_start(&mut self) -> io::Result<u64> {
        self.source.seek(SeekFrom::Start(0))
    }

    /// Returns the source's current cursor.
    pub fn position(&mut self) -> io::Result<u64> {
        self.source.seek(SeekFrom::Current(0))
    }

    // ----------------------------------------------------------------------
    // Backward
    // ----------------------------------------------------------------------
    /// Reads up to `buf.len()` bytes in reverse order.
    ///
    /// `buf[0]` receives the byte just below the cursor, `buf[1]` the one
    /// below that, and so on. The cursor moves down by the returned count.
    ///
    /// # Returns
    /// * `Filled` - count of bytes written; `end_of_stream` is set when the
    ///   cursor reached zero before `buf` was full. At cursor zero this is
    ///   `count == 0` with `end_of_stream` set, and `buf` is left untouched.
    ///   An empty `buf` yields `count == 0` without end-of-stream and
    ///   without touching the source.
    ///
    /// # Errors
    /// Returns [ReadError] when the source's cursor operation or positional
    /// read fails. [ReadError::read] tells how many bytes were produced
    /// before that. Under [Stepping::Batched] the cursor is left unmoved;
    /// under [Stepping::PerByte] a failed positional read leaves it one
    /// byte below `pos - read`.
    pub fn read_back(&mut self, buf: &mut [u8]) -> Result<Filled, ReadError> {
        if buf.is_empty() {
            return Ok(Filled::more(0));
        }

        let result = match self.stepping {
            Stepping::Batched => self.read_back_batched(buf),
            Stepping::PerByte => self.read_back_per_byte(buf),
        };

        match &result {
            Ok(filled) => trace!(
                "backward read of {} bytes produced {} (end of stream: {})",
                buf.len(),
                filled.count,
                filled.end_of_stream
            ),
            Err(err) => debug!("{err}: {}", err.io_error()),
        }
        result
    }

    fn read_back_batched(&mut self, buf: &mut [u8]) -> Result<Filled, ReadError> {
        let pos = self.position().map_err(|e| ReadError::backward(0, e))?;

        // Only as many bytes as lie below the cursor
        let want = usize::try_from(pos).map_or(buf.len(), |pos| pos.min(buf.len()));
        if want == 0 {
            return Ok(Filled::end(0));
        }

        let span = &mut buf[..want];
        let start = pos - want as u64;
        let (n, failure) = read_at_fully(&self.source, span, start);
        if let Some(e) = failure {
            return Err(ReadError::backward(0, e));
        }
        if n < want {
            return Err(ReadError::backward(0, shrunk_source(start + n as u64)));
        }

        self.source
            .seek(SeekFrom::Current(-(want as i64)))
            .map_err(|e| ReadError::backward(0, e))?;
        span.reverse();

        if want < buf.len() {
            Ok(Filled::end(want))
        } else {
            Ok(Filled::more(want))
        }
    }

    fn read_back_per_byte(&mut self, buf: &mut [u8]) -> Result<Filled, ReadError> {
        let mut pos = self.position().map_err(|e| ReadError::backward(0, e))?;

        for (i, slot) in buf.iter_mut().enumerate() {
            if pos == 0 {
                return Ok(Filled::end(i));
            }

            // Step first so the cursor always matches what has been delivered
            pos = self
                .source
                .seek(SeekFrom::Current(-1))
                .map_err(|e| ReadError::backward(i, e))?;

            let (n, failure) = read_at_fully(&self.source, std::slice::from_mut(slot), pos);
            if let Some(e) = failure {
                return Err(ReadError::backward(i + n, e));
            }
            if n == 0 {
                return Err(ReadError::backward(i, shrunk_source(pos)));
            }
        }

        Ok(Filled::more(buf.len()))
    }

    // ----------------------------------------------------------------------
    // Forward
    // ----------------------------------------------------------------------
    /// Reads up to `buf.len()` bytes in the usual direction.
    ///
    /// The inverse of [read_back()](Self::read_back): after a backward read
    /// of `k` bytes, a forward read into a buffer of length `k` puts the
    /// cursor back where it was.
    ///
    /// # Returns
    /// * `Filled` - count of bytes written; `end_of_stream` is set when the
    ///   source ended before `buf` was full. An empty `buf` yields
    ///   `count == 0` without end-of-stream and without touching the source.
    ///
    /// # Errors
    /// Returns [ReadError] when the cursor query or the positional read
    /// fails. Bytes read before a positional failure are still counted and
    /// the cursor is still advanced past them. If the cursor cannot be
    /// advanced, [ReadError::read] is `0`, matching the unmoved cursor.
    pub fn read_forward(&mut self, buf: &mut [u8]) -> Result<Filled, ReadError> {
        if buf.is_empty() {
            return Ok(Filled::more(0));
        }

        let pos = self.position().map_err(|e| ReadError::forward(0, e))?;
        let (count, failure) = read_at_fully(&self.source, buf, pos);

        // Advance even when the read failed, so callers can continue past it
        if count > 0 {
            if let Err(e) = self.source.seek(SeekFrom::Current(count as i64)) {
                debug!("forward read of {count} bytes could not advance cursor: {e}");
                return Err(match failure {
                    None => ReadError::forward(0, e),
                    Some(read_failure) => ReadError::forward(0, read_failure),
                });
            }
        }

        match failure {
            Some(e) => {
                let err = ReadError::forward(count, e);
                debug!("{err}: {}", err.io_error());
                Err(err)
            }
            None => {
                trace!("forward read of {} bytes at {pos} produced {count}", buf.len());
                Ok(Filled { count, end_of_stream: count < buf.len() })
            }
        }
    }

    /// Returns a view that reads this reader's source forward through [Read].
    ///
    /// Each call on the view is a [read_forward()](Self::read_forward).
    pub fn forward(&mut self) -> Forward<'_, S> {
        Forward { reader: self }
    }
}

fn shrunk_source(offset: u64) -> io::Error {
    io::Error::new(
        ErrorKind::UnexpectedEof,
        format!("source ended at offset {offset}, below the cursor"),
    )
}

/// Maps a read outcome onto the [Read] contract, where an error means no
/// bytes were read. A failure after some bytes becomes a short read.
fn into_io_result(result: Result<Filled, ReadError>) -> io::Result<usize> {
    match result {
        Ok(filled) => Ok(filled.count),
        Err(err) if err.read() > 0 => Ok(err.read()),
        Err(err) => Err(err.into_parts().1),
    }
}

impl<S: ByteSource> Read for ReverseReader<S> {
    /// Backward read, see [ReverseReader::read_back].
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        into_io_result(self.read_back(buf))
    }
}

// =#========================================================================#=
// FORWARD
// =#========================================================================#=
/// Forward [Read] view of a [ReverseReader], created by
/// [ReverseReader::forward].
#[derive(Debug)]
pub struct Forward<'a, S: ByteSource> {
    reader: &'a mut ReverseReader<S>,
}

impl<S: ByteSource> Read for Forward<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        into_io_result(self.reader.read_forward(buf))
    }
}
