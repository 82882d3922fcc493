//! Positional (random-access) I/O.
//!
//! [`ReadAt`] and [`WriteAt`] address a source or sink by absolute byte
//! offset instead of a shared cursor. [`SectionReader`] turns a bounded
//! window of a `ReadAt` into a sequential `Read` that tracks how far it got,
//! which is how positional reads reuse the sequential envelope decoder.

use crate::error::EnvelopeError;
use std::fs::File;
use std::io::{self, Read};

/// A source that can be read at arbitrary offsets.
pub trait ReadAt {
    /// Reads into `buf` starting at `offset`, returning the bytes read.
    ///
    /// Returns `Ok(0)` at or beyond the end of the source.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

/// A sink that can be written at arbitrary offsets.
pub trait WriteAt {
    /// Writes from `buf` starting at `offset`, returning the bytes written.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize>;

    /// Writes all of `buf` starting at `offset`.
    fn write_all_at(&mut self, mut buf: &[u8], mut offset: u64) -> io::Result<()> {
        while !buf.is_empty() {
            match self.write_at(buf, offset) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole buffer",
                    ))
                }
                Ok(n) => {
                    buf = &buf[n..];
                    offset = offset.checked_add(n as u64).ok_or_else(|| {
                        io::Error::new(io::ErrorKind::InvalidInput, "offset out of range")
                    })?;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl ReadAt for File {
    #[cfg(unix)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

impl WriteAt for File {
    #[cfg(unix)]
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::write_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_write(self, buf, offset)
    }
}

impl ReadAt for [u8] {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let start = match usize::try_from(offset) {
            Ok(start) if start < self.len() => start,
            _ => return Ok(0),
        };
        let n = buf.len().min(self.len() - start);
        buf[..n].copy_from_slice(&self[start..start + n]);
        Ok(n)
    }
}

impl ReadAt for Vec<u8> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self.as_slice().read_at(buf, offset)
    }
}

impl<R: ReadAt + ?Sized> ReadAt for &R {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}

/// Writing past the end zero-fills the gap.
impl WriteAt for Vec<u8> {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset out of range"))?;
        let end = start
            .checked_add(buf.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "offset out of range"))?;

        if end > self.len() {
            self.resize(end, 0);
        }
        self[start..end].copy_from_slice(buf);
        Ok(buf.len())
    }
}

impl<W: WriteAt + ?Sized> WriteAt for &mut W {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        (**self).write_at(buf, offset)
    }
}

/// Sequential reader over `[base, base + limit)` of a positional source.
pub struct SectionReader<'a, R: ReadAt + ?Sized> {
    source: &'a R,
    base: u64,
    pos: u64,
    end: u64,
}

impl<'a, R: ReadAt + ?Sized> SectionReader<'a, R> {
    /// Creates a reader starting at `base` that stops after `limit` bytes.
    ///
    /// `limit` is an upper bound, not the expected length; the reader also
    /// stops wherever the source ends.
    pub fn new(source: &'a R, base: u64, limit: u64) -> Self {
        Self {
            source,
            base,
            pos: base,
            end: base.saturating_add(limit),
        }
    }

    /// Returns the number of bytes consumed since `base`.
    pub fn position(&self) -> Result<u64, EnvelopeError> {
        self.pos.checked_sub(self.base).ok_or_else(|| {
            EnvelopeError::Internal(format!(
                "section position {} is before its base {}",
                self.pos, self.base
            ))
        })
    }

    /// Returns the number of bytes left before the limit.
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.pos)
    }
}

impl<R: ReadAt + ?Sized> Read for SectionReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let max = (buf.len() as u64).min(remaining) as usize;
        let n = self.source.read_at(&mut buf[..max], self.pos)?;
        self.pos += n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempfile;

    #[test]
    fn test_slice_read_at() {
        let data = b"0123456789".to_vec();
        let mut buf = [0u8; 4];

        assert_eq!(data.read_at(&mut buf, 2).unwrap(), 4);
        assert_eq!(&buf, b"2345");

        assert_eq!(data.read_at(&mut buf, 8).unwrap(), 2);
        assert_eq!(&buf[..2], b"89");

        assert_eq!(data.read_at(&mut buf, 10).unwrap(), 0);
        assert_eq!(data.read_at(&mut buf, u64::MAX).unwrap(), 0);
    }

    #[test]
    fn test_vec_write_at_extends() {
        let mut sink = Vec::<u8>::new();
        sink.write_all_at(b"tail", 4).unwrap();
        assert_eq!(sink, b"\0\0\0\0tail");

        sink.write_all_at(b"head", 0).unwrap();
        assert_eq!(sink, b"headtail");

        sink.write_all_at(b"XY", 3).unwrap();
        assert_eq!(sink, b"heaXYail");
    }

    #[test]
    fn test_vec_write_at_out_of_range() {
        let mut sink = Vec::<u8>::new();
        let err = sink.write_at(b"x", u64::MAX).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_file_positional_io() {
        let mut file = tempfile().unwrap();
        file.write_all_at(b"world", 6).unwrap();
        file.write_all_at(b"hello ", 0).unwrap();

        let mut buf = [0u8; 11];
        assert_eq!(file.read_at(&mut buf, 0).unwrap(), 11);
        assert_eq!(&buf, b"hello world");
        assert_eq!(file.read_at(&mut buf, 11).unwrap(), 0);
    }

    #[test]
    fn test_section_reader_window() {
        let data = b"xxxxPAYLOADyyyy".to_vec();
        let mut section = SectionReader::new(&data, 4, 7);

        let mut out = String::new();
        section.read_to_string(&mut out).unwrap();
        assert_eq!(out, "PAYLOAD");
        assert_eq!(section.position().unwrap(), 7);
        assert_eq!(section.remaining(), 0);
    }

    #[test]
    fn test_section_reader_stops_at_source_end() {
        let data = b"abcdef".to_vec();
        let mut section = SectionReader::new(&data, 2, 1024);

        let mut out = Vec::new();
        section.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"cdef");
        assert_eq!(section.position().unwrap(), 4);
    }

    #[test]
    fn test_section_reader_limit_saturates() {
        let data = b"abc".to_vec();
        let section = SectionReader::new(&data, u64::MAX - 1, u64::MAX);
        assert_eq!(section.remaining(), 1);
        assert_eq!(section.position().unwrap(), 0);
    }

    #[test]
    fn test_section_reader_corrupt_position() {
        let data = b"abc".to_vec();
        let mut section = SectionReader::new(&data, 2, 10);
        section.pos = 1;
        assert!(matches!(
            section.position(),
            Err(EnvelopeError::Internal(_))
        ));
    }
}
