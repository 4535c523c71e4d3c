//! Reading byte sources backwards (and forwards again).
//!
//! This module provides [ReverseReader], its forward [Read](std::io::Read)
//! view [Forward], the [Stepping] configuration and the [ReadError] raised
//! when the underlying source fails.

pub mod read_error;
pub mod reverse_reader;

pub use read_error::{Direction, ReadError};
pub use reverse_reader::{Filled, Forward, ReverseReader, Stepping};
