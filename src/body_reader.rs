use std::io::{self, Read};

use crate::error::BodyError;

pub const CHUNK_SIZE: usize = 4096;

/// What is left of a request body after it has been consumed.
///
/// Only the final chunk is kept; earlier chunks are overwritten as the body is
/// read, so memory stays bounded by `CHUNK_SIZE` whatever the declared length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedBody {
    pub bytes_received: u64,
    pub last_chunk: Vec<u8>,
}

/// Consume exactly `declared_length` bytes from `reader` in `CHUNK_SIZE` reads.
///
/// Callers bound-check `declared_length` against the configured maximum first.
pub fn read_body<R: Read>(reader: &mut R, declared_length: u64) -> Result<ReceivedBody, BodyError> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut last_chunk = Vec::with_capacity(declared_length.min(CHUNK_SIZE as u64) as usize);
    let mut received: u64 = 0;

    while received < declared_length {
        let to_read = (declared_length - received).min(CHUNK_SIZE as u64) as usize;
        let n = read_full(reader, &mut buf[..to_read]).map_err(BodyError::Read)?;
        if n == 0 {
            break;
        }

        last_chunk.clear();
        last_chunk.extend_from_slice(&buf[..n]);
        received += n as u64;
        log::debug!("Read chunk of {} bytes ({}/{})", n, received, declared_length);

        if n < to_read {
            // Stream ended inside this chunk
            break;
        }
    }

    if received != declared_length {
        return Err(BodyError::Incomplete {
            received,
            expected: declared_length,
        });
    }

    Ok(ReceivedBody {
        bytes_received: received,
        last_chunk,
    })
}

// Fill `buf` unless the stream ends first; returns the number of bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
