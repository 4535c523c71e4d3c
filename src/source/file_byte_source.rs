//! File implementations of byte source.
//!
//! This module makes [File], `&File` and `Arc<File>` usable as a
//! [ByteSource]. The cursor is the operating system's file offset, so every
//! handle to the same open file observes the moves a reader makes.
//!
//! On Unix, positional reads use `pread` and never touch the offset. Windows
//! has no offset-preserving read, so the offset is saved and restored around
//! each positional read there.

use std::fs::File;
use std::io::{self, Seek, SeekFrom};
use std::sync::Arc;

use crate::source::byte_source::ByteSource;

// =#========================================================================#=
// FILE BYTE SOURCE
// =#========================================================================$=
impl ByteSource for File {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        positional_read(self, buf, offset)
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(self, pos)
    }
}

impl ByteSource for &File {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        positional_read(self, buf, offset)
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(self, pos)
    }
}

impl ByteSource for Arc<File> {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        positional_read(self, buf, offset)
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let mut file: &File = self;
        Seek::seek(&mut file, pos)
    }
}

#[cfg(unix)]
fn positional_read(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    FileExt::read_at(file, buf, offset)
}

#[cfg(windows)]
fn positional_read(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    let mut handle = file;
    let cursor = handle.stream_position()?;
    let result = file.seek_read(buf, offset);
    Seek::seek(&mut handle, SeekFrom::Start(cursor))?;
    result
}

// =#========================================================================#=
// TESTS - FILE BYTE SOURCE
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file_with(content: &[u8]) -> File {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(content).unwrap();
        file.rewind().unwrap();
        file
    }

    #[test]
    fn test_file_read_at_keeps_offset() {
        let mut file = temp_file_with(b"foo\nbar\nbaz");
        ByteSource::seek(&mut file, SeekFrom::Start(5)).unwrap();

        let mut buf = [0u8; 3];
        assert_eq!(ByteSource::read_at(&file, &mut buf, 8).unwrap(), 3);
        assert_eq!(&buf, b"baz");
        assert_eq!(file.stream_position().unwrap(), 5);
    }

    #[test]
    fn test_shared_handles_see_one_offset() {
        let file = Arc::new(temp_file_with(b"0123456789"));
        let mut first = Arc::clone(&file);
        let mut second = &*file;

        assert_eq!(ByteSource::seek(&mut first, SeekFrom::End(-3)).unwrap(), 7);
        assert_eq!(ByteSource::seek(&mut second, SeekFrom::Current(0)).unwrap(), 7);
    }
}
