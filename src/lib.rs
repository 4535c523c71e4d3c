//! Reverse-reader is a library to read seekable byte sources backwards.
//!
//! This crate offers an adapter that turns any source supporting positional
//! reads and a movable cursor into a byte stream running from the cursor
//! toward offset zero. Code that already consumes forward byte streams can
//! read through it unchanged and gets the content in reverse.
//! Core functionality provided:
//! - [ReverseReader]: backward reads ([read_back](ReverseReader::read_back)
//!   and [Read](std::io::Read)), forward reads as an escape hatch
//!   ([read_forward](ReverseReader::read_forward) and
//!   [forward](ReverseReader::forward)), and two cursor conveniences
//!   ([seek_to_end](ReverseReader::seek_to_end),
//!   [seek_to_start](ReverseReader::seek_to_start)).
//! - [ByteSource]: the two capabilities a source must offer. Implemented for
//!   `File`, `&File`, `Arc<File>`, in-memory [Cursor](std::io::Cursor)s,
//!   and `&mut S` / `Box<S>` of any source.
//! - Configurability:
//!   - [Stepping]: move the cursor once per call (default) or once per byte
//!
//! Limitations:
//! - Reversal is at byte level: multi-byte UTF-8 characters come out with
//!   their bytes reversed, and so does each line
//! - No buffering, no decoding, no notion of lines or records
//! - The reader keeps no cursor of its own, so everything holding the same
//!   source handle shares (and moves) one cursor
//!
//! # Usage patterns
//! 1. Scan a file from its end, e.g. to find the last lines of a log:
//!    [read_from_end] sets up a reader in one call.
//! 2. Wrap a handle with [ReverseReader::new], position it yourself and mix
//!    backward and forward reads. A backward read of `k` bytes followed by a
//!    forward read of `k` bytes leaves the cursor where it started.
//!
//! ## Example
//!
//! Read the lines of a file last to first:
//! ```no_run
//! use std::fs::File;
//! use std::io::{BufRead, BufReader};
//!
//! let file = File::open("app.log")?;
//! let reader = reverse_reader::read_from_end(&file)?;
//!
//! for line in BufReader::new(reader).lines().take(10) {
//!     // bytes within each line are reversed too
//!     let line: String = line?.chars().rev().collect();
//!     println!("{line}");
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Undo a backward read:
//! ```
//! use std::io::Cursor;
//! use reverse_reader::ReverseReader;
//!
//! let mut reader = ReverseReader::from_end(Cursor::new(b"hello world".to_vec()))?;
//!
//! let mut back = [0u8; 5];
//! reader.read_back(&mut back)?;
//! assert_eq!(&back, b"dlrow");
//! assert_eq!(reader.position()?, 6);
//!
//! let mut fwd = [0u8; 5];
//! reader.read_forward(&mut fwd)?;
//! assert_eq!(&fwd, b"world");
//! assert_eq!(reader.position()?, 11);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod reader;
pub mod source;

pub use reader::{Direction, Filled, Forward, ReadError, ReverseReader, Stepping};
pub use source::ByteSource;

use std::io;

// ============================================================================
// Quick API
// ============================================================================
/// Wraps `source` in a [ReverseReader] with default settings and moves the
/// cursor to the end, ready to read the whole source backwards.
///
/// See [ReverseReader::from_end].
///
/// # Errors
/// Returns an error if moving the cursor fails.
pub fn read_from_end<S: ByteSource>(source: S) -> io::Result<ReverseReader<S>> {
    ReverseReader::from_end(source)
}
