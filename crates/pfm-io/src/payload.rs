//! Raw payload ingestion.
//!
//! Reads the exact byte count the header implies. The read outcome is
//! classified rather than coerced: a short delivery is reported and the
//! zero-filled tail stands in for the missing samples, so a truncated
//! stream degrades to a partially black image instead of failing the
//! whole load.

use std::io::{self, ErrorKind, Read};

use tracing::{debug, warn};

/// Probe window used to detect bytes left unread after the payload.
const TRAILING_PROBE: usize = 512;

/// Classification of a payload read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// Exactly the expected byte count was delivered.
    Complete,
    /// The stream ended early; the remainder of the buffer is zeroed.
    Short {
        /// Bytes actually delivered.
        read: usize,
        /// Bytes the header implied.
        expected: usize,
    },
    /// The stream still held bytes after the payload was consumed.
    Trailing {
        /// Bytes observed past the payload (lower bound).
        pending: usize,
    },
}

/// Payload bytes plus the outcome of reading them.
#[derive(Debug, Clone)]
pub struct RawPayload {
    bytes: Vec<u8>,
    status: ReadStatus,
}

impl RawPayload {
    /// Payload bytes; always `expected` long, zero-filled past a short read.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// How the read went.
    pub fn status(&self) -> ReadStatus {
        self.status
    }
}

/// Reads up to `expected` payload bytes from a stream positioned on the
/// first payload byte.
///
/// The destination is zero-initialized before any read so positions the
/// stream never fills are defined. Short and trailing deliveries are
/// logged and reported through [`ReadStatus`]; only a stream fault is an
/// error.
pub fn read_payload<R: Read>(reader: &mut R, expected: usize) -> io::Result<RawPayload> {
    let mut bytes = vec![0u8; expected];
    let mut filled = 0;

    while filled < expected {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    let status = if filled < expected {
        warn!(read = filled, expected, "not enough data read");
        ReadStatus::Short {
            read: filled,
            expected,
        }
    } else {
        match probe_trailing(reader) {
            0 => {
                debug!(bytes = expected, "payload read complete");
                ReadStatus::Complete
            }
            pending => {
                debug!(pending, "remaining data not read");
                ReadStatus::Trailing { pending }
            }
        }
    };

    Ok(RawPayload { bytes, status })
}

/// Returns a lower bound on bytes still pending in the stream.
///
/// Consumes what it sees; the payload is already fully read at this
/// point and the count is for diagnostics only.
fn probe_trailing<R: Read>(reader: &mut R) -> usize {
    let mut probe = [0u8; TRAILING_PROBE];
    match reader.read(&mut probe) {
        Ok(n) => n,
        Err(_) => 0,
    }
}
