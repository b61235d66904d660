//! Length-prefixed record framing.
//!
//! A log is a sequence of `u16` little-endian length prefixes, each followed
//! by that many payload bytes. The prefix is always little-endian, whatever
//! the byte order of the payloads.

use std::io::{self, ErrorKind, Read, Write};

use tracing::debug;

/// Width of the length prefix.
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// Reads `u16`-length-prefixed records.
///
/// Ends cleanly when fewer than two bytes remain. A record whose payload is
/// shorter than its prefix is dropped and ends the stream. Other I/O errors
/// are yielded once and end the stream.
#[derive(Debug)]
pub struct FramedReader<R> {
    inner: R,
    records_read: u64,
    truncated_tail: bool,
    done: bool,
}

impl<R: Read> FramedReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            records_read: 0,
            truncated_tail: false,
            done: false,
        }
    }

    /// Whole records yielded so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// `true` if the stream ended inside a record's payload.
    pub fn truncated_tail(&self) -> bool {
        self.truncated_tail
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fill `buf` as far as the stream allows; returns bytes read.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            let Some(rest) = buf.get_mut(filled..) else {
                break;
            };
            match self.inner.read(rest) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn next_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        if self.fill(&mut prefix)? < LENGTH_PREFIX_SIZE {
            return Ok(None);
        }
        let declared = usize::from(u16::from_le_bytes(prefix));
        let mut payload = vec![0u8; declared];
        let got = self.fill(&mut payload)?;
        if got < declared {
            debug!(
                declared,
                got,
                record = self.records_read,
                "dropping truncated trailing record"
            );
            self.truncated_tail = true;
            return Ok(None);
        }
        self.records_read += 1;
        Ok(Some(payload))
    }
}

impl<R: Read> Iterator for FramedReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Writes records with the same framing [`FramedReader`] reads.
#[derive(Debug)]
pub struct FramedWriter<W: Write> {
    inner: W,
    records_written: u64,
    bytes_written: u64,
}

impl<W: Write> FramedWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records_written: 0,
            bytes_written: 0,
        }
    }

    /// Append one record. Payloads longer than `u16::MAX` are rejected with
    /// `InvalidInput` and nothing is written.
    pub fn write_record(&mut self, payload: &[u8]) -> io::Result<()> {
        let Ok(len) = u16::try_from(payload.len()) else {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "record of {} bytes exceeds the {} byte frame limit",
                    payload.len(),
                    u16::MAX
                ),
            ));
        };
        self.inner.write_all(&len.to_le_bytes())?;
        self.inner.write_all(payload)?;
        self.records_written += 1;
        self.bytes_written += (LENGTH_PREFIX_SIZE + payload.len()) as u64;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Bytes written including length prefixes.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
