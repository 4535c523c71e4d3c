//! Byte source abstraction for reverse reading.
//!
//! This module provides the [ByteSource] trait, the minimum a value must offer
//! so that a [ReverseReader](crate::ReverseReader) can walk it backwards, and
//! the [read_at_fully] helper shared by all reading directions.

use std::io::{self, ErrorKind, SeekFrom};

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================#=
/// Trait defining the two capabilities a [ReverseReader](crate::ReverseReader)
/// needs from the data it reads.
///
/// A byte source is conceptually an array of `size` bytes together with a
/// mutable cursor in `[0, size]`:
/// - A **positional read** fetches bytes at an explicit offset and never
///   touches the cursor.
/// - A **cursor operation** moves the cursor relative to an anchor
///   (start, current, end) and reports the new absolute offset.
///
/// Implementations are provided for files (`File`, `&File`, `Arc<File>`),
/// for in-memory data wrapped in a [Cursor](std::io::Cursor), and for
/// `&mut S` and `Box<S>` of any other source.
///
/// The reader assumes that `size` does not shrink while it is in use.
pub trait ByteSource {
    /// Reads bytes starting at `offset` into `buf` without moving the cursor.
    ///
    /// # Arguments
    /// * `buf` - Destination, filled from its start
    /// * `offset` - Absolute byte offset to read from
    ///
    /// # Returns
    /// * `Ok(n)` - Number of bytes read, `0` if `offset` is at or past the end
    /// * `Err(io::Error)` - If the underlying read fails
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// Moves the cursor and returns its new absolute offset.
    ///
    /// `SeekFrom::Current(0)` queries the cursor without moving it.
    ///
    /// # Errors
    /// Returns an error if the target offset is invalid (e.g. negative)
    /// or the underlying seek fails.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        (**self).seek(pos)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        (**self).seek(pos)
    }
}

// =#========================================================================#=
// HELPERS
// =#========================================================================#=
/// Fills `buf` from `offset` onward by repeated positional reads.
///
/// Stops early only when the source reports no more bytes. Interrupted reads
/// are retried.
///
/// # Returns
/// The number of bytes placed in `buf`, paired with the error that cut the
/// fill short (if any). Bytes read before a failure are always counted.
pub fn read_at_fully<S: ByteSource + ?Sized>(
    source: &S,
    buf: &mut [u8],
    offset: u64,
) -> (usize, Option<io::Error>) {
    let mut filled = 0;

    while filled < buf.len() {
        match source.read_at(&mut buf[filled..], offset + filled as u64) {
            Ok(0) => break, // end of source
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return (filled, Some(e)),
        }
    }

    (filled, None)
}
