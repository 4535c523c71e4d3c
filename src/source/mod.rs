//! Byte sources that a reverse reader can walk.
//!
//! This module provides the [ByteSource] trait together with implementations
//! for files and in-memory data.

pub mod byte_source;
mod file_byte_source;
mod in_memory_byte_source;

pub use byte_source::{ByteSource, read_at_fully};
