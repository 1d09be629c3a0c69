//! # pfm-io
//!
//! Decoding of "portable float map" and "portable half map" HDR images.
//!
//! PFM/PHM files are a short text header followed by a raw binary grid
//! of float32 or float16 radiance samples:
//!
//! ```text
//! <magic> <width> <height> <scale_endian>\n
//! <width * height * channels * bytes_per_sample raw bytes>
//! ```
//!
//! | magic | precision | channels |
//! |-------|-----------|----------|
//! | `Pf`  | float32   | 1 (mono) |
//! | `PF`  | float32   | 3 (RGB)  |
//! | `Ph`  | float16   | 1 (mono) |
//! | `PH`  | float16   | 3 (RGB)  |
//!
//! The scale/endianness token is a float whose sign selects payload
//! byte order (negative = little-endian) and whose magnitude is a
//! radiometric scale carried through untouched.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pfm_io::PortableMap;
//!
//! let map = PortableMap::read("render.pfm")?;
//! println!("{}x{}", map.header.width, map.header.height);
//! ```
//!
//! Streams work too, piped stdin included:
//!
//! ```rust,ignore
//! let stdin = std::io::stdin();
//! let map = PortableMap::read_from(&mut stdin.lock())?;
//! ```
//!
//! # Error Policy
//!
//! A header implying zero bytes or more than 1 GB of payload is
//! rejected before any allocation ([`FormatError`]). A stream that
//! under-delivers is *not* an error: the missing tail is zero-filled
//! and the outcome reported as [`ReadStatus::Short`], so a truncated
//! file still yields a (partially black) image.

#![warn(missing_docs)]

mod error;
mod header;
mod payload;

pub use error::{FormatError, LoadError, LoadResult};
pub use header::{MapHeader, MAX_RAW_BYTES};
pub use payload::{read_payload, RawPayload, ReadStatus};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

/// A decoded PFM/PHM image: validated header plus raw sample bytes.
///
/// Both parts are immutable after load; display pipelines re-derive
/// everything downstream from them.
#[derive(Debug, Clone)]
pub struct PortableMap {
    /// Validated header.
    pub header: MapHeader,
    /// Raw sample bytes, exactly `header.raw_byte_size()` long.
    pub payload: RawPayload,
}

impl PortableMap {
    /// Reads a PFM/PHM image from a file.
    ///
    /// # Errors
    ///
    /// See [`PortableMap::read_from`].
    pub fn read<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads a PFM/PHM image from an arbitrary byte stream.
    ///
    /// The header is parsed and validated first; the payload is only
    /// allocated and read once the implied size passed validation.
    ///
    /// # Errors
    ///
    /// [`LoadError::Format`] for an invalid header and [`LoadError::Io`]
    /// for a stream fault. A short payload delivery is not an error.
    pub fn read_from<R: Read>(reader: &mut R) -> LoadResult<Self> {
        let header = MapHeader::parse(reader)?;
        debug!(
            magic = %header.magic,
            width = header.width,
            height = header.height,
            scale_endian = header.scale_endian,
            "parsed header"
        );

        let expected = header.raw_byte_size() as usize;
        debug!(bytes = expected, "about to read payload");
        let payload = read_payload(reader, expected)?;

        Ok(PortableMap { header, payload })
    }
}
