//! Error type for reverse and forward reads.
//!
//! This module provides [ReadError], which pairs the I/O failure raised by a
//! [ByteSource](crate::ByteSource) with the number of bytes the failing call
//! had already produced, and [Direction] to tell which kind of read failed.

use std::fmt;
use std::io;
use thiserror::Error;

// =#========================================================================#=
// DIRECTION
// =#========================================================================€=
/// Direction of the read that raised a [ReadError].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From the cursor toward offset zero.
    Backward,
    /// From the cursor toward the end of the source.
    Forward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Backward => write!(f, "backward"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

// =#========================================================================#=
// READ ERROR
// =#========================================================================$=
/// Failure of a cursor operation or positional read during a read call.
///
/// The wrapped [io::Error] is passed through verbatim from the source.
/// [read()](ReadError::read) tells how many bytes of the caller's buffer
/// were filled before the failure. The cursor moved by that much, except
/// after a failed per-byte backward read, which leaves it one byte lower
/// (see [Stepping::PerByte](crate::Stepping::PerByte)).
#[derive(Debug, Error)]
#[error("{direction} read failed after {read} bytes")]
pub struct ReadError {
    direction: Direction,
    read: usize,
    #[source]
    source: io::Error,
}

impl ReadError {
    /// Create a ReadError for a failed backward read
    pub fn backward(read: usize, source: io::Error) -> Self {
        Self { direction: Direction::Backward, read, source }
    }

    /// Create a ReadError for a failed forward read
    pub fn forward(read: usize, source: io::Error) -> Self {
        Self { direction: Direction::Forward, read, source }
    }

    /// Get the direction of the failed read
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of bytes produced before the failure
    pub fn read(&self) -> usize {
        self.read
    }

    /// Kind of the underlying I/O error
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    /// Get the underlying I/O error
    pub fn io_error(&self) -> &io::Error {
        &self.source
    }

    /// Splits into the partial count and the underlying I/O error.
    pub fn into_parts(self) -> (usize, io::Error) {
        (self.read, self.source)
    }
}

impl From<ReadError> for io::Error {
    fn from(err: ReadError) -> Self {
        io::Error::new(err.kind(), err)
    }
}
