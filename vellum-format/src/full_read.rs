//! Exact-length reads over sequential streams.
//!
//! `Read::read` may return fewer bytes than requested. The helpers here keep
//! reading until the requested length is reached and classify how a stream
//! ended:
//!
//! - nothing read at all: [`FullRead::Empty`], a clean end of stream
//! - some bytes, then end of stream: `io::ErrorKind::UnexpectedEof`
//! - everything read: [`FullRead::Complete`]

use std::io::{self, Read};

/// Initial capacity cap for length-prefixed reads (64 KiB).
///
/// Larger buffers grow as bytes actually arrive, so a corrupt length field
/// cannot trigger a huge allocation up front.
const INITIAL_READ_CAPACITY: u64 = 64 * 1024;

/// Outcome of a successful [`read_full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullRead {
    /// The buffer was filled.
    Complete,
    /// The stream was already at its end; no bytes were read.
    Empty,
}

/// Fills `buf` completely, retrying short reads.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<FullRead> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    if filled == buf.len() {
        Ok(FullRead::Complete)
    } else if filled == 0 {
        Ok(FullRead::Empty)
    } else {
        Err(short_read(filled as u64, buf.len() as u64))
    }
}

/// Reads exactly `len` bytes into a new buffer.
///
/// Running out of input before `len` bytes is an `UnexpectedEof` error,
/// including when the stream is empty.
pub fn read_len<R: Read + ?Sized>(reader: &mut R, len: u64) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len.min(INITIAL_READ_CAPACITY) as usize);
    reader.take(len).read_to_end(&mut buf)?;

    if (buf.len() as u64) < len {
        return Err(short_read(buf.len() as u64, len));
    }
    Ok(buf)
}

/// Consumes and discards exactly `len` bytes.
pub fn skip_len<R: Read + ?Sized>(reader: &mut R, len: u64) -> io::Result<()> {
    let skipped = io::copy(&mut reader.take(len), &mut io::sink())?;
    if skipped < len {
        return Err(short_read(skipped, len));
    }
    Ok(())
}

fn short_read(got: u64, wanted: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("short read: got {} of {} bytes", got, wanted),
    )
}
