//! Incremental chunk reader over a response body.

use std::io::{ErrorKind, Read};

use super::types::{AudioChunk, SynthesisError};

/// Largest chunk handed out per read.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024;

/// Yields a body as [`AudioChunk`]s as soon as bytes are readable.
///
/// A body that ends before producing any byte yields a single
/// [`SynthesisError::EmptyStream`]. The iterator is fused after the end of
/// the body or the first error.
pub struct ChunkStream<R> {
    reader: R,
    chunk_size: usize,
    bytes_read: usize,
    finished: bool,
}

impl<R: Read> ChunkStream<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, MAX_CHUNK_SIZE)
    }

    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            bytes_read: 0,
            finished: false,
        }
    }
}

impl<R: Read> Iterator for ChunkStream<R> {
    type Item = Result<AudioChunk, SynthesisError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut buf = vec![0u8; self.chunk_size];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.finished = true;
                    if self.bytes_read == 0 {
                        return Some(Err(SynthesisError::EmptyStream));
                    }
                    return None;
                }
                Ok(n) => {
                    self.bytes_read += n;
                    buf.truncate(n);
                    return Some(Ok(AudioChunk::new(buf)));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(map_read_error(e)));
                }
            }
        }
    }
}

fn map_read_error(e: std::io::Error) -> SynthesisError {
    let timed_out = e.kind() == ErrorKind::TimedOut
        || e
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            .is_some_and(reqwest::Error::is_timeout);

    if timed_out {
        SynthesisError::Timeout
    } else {
        SynthesisError::InvalidResponse(format!("Body read failed: {e}"))
    }
}
