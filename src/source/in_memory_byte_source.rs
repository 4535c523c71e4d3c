//! In-memory implementation of byte source.
//!
//! Any [Cursor] over bytes is a [ByteSource]: the cursor position is the
//! source's cursor and its inner buffer is read positionally.

use std::io::{self, Cursor, Seek, SeekFrom};

use crate::source::byte_source::ByteSource;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let data = self.get_ref().as_ref();
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= data.len() {
            return Ok(0);
        }

        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        Ok(n)
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(self, pos)
    }
}
