//! PFM/PHM header parsing.
//!
//! The header is four whitespace-separated text tokens: magic, width,
//! height, scale/endianness. The magic's second character selects both
//! channel layout (lowercase = mono, uppercase = RGB) and sample
//! precision (`h` = float16, anything else = float32). The scale token's
//! sign selects payload byte order; its magnitude is a radiometric scale
//! that is carried through untouched.

use std::io::Read;

use crate::error::{FormatError, LoadError, LoadResult};

/// Hard ceiling on payload size derived from the header.
pub const MAX_RAW_BYTES: u64 = 1_000_000_000;

/// Parsed and validated PFM/PHM header.
#[derive(Debug, Clone, PartialEq)]
pub struct MapHeader {
    /// Magic token, e.g. `PF`, `Pf`, `PH`, `Ph`.
    pub magic: String,
    /// Image width in pixels.
    pub width: i64,
    /// Image height in pixels.
    pub height: i64,
    /// Scale factor; negative means little-endian payload.
    pub scale_endian: f32,
}

impl MapHeader {
    /// Reads and validates a header from the start of a stream.
    ///
    /// Consumes exactly one whitespace byte after the last token, so
    /// the stream is left positioned on the first payload byte.
    ///
    /// # Errors
    ///
    /// [`FormatError::Malformed`] when a token is missing or fails
    /// numeric parsing, [`FormatError::NoData`] / [`FormatError::TooLarge`]
    /// when the implied payload size is zero or over [`MAX_RAW_BYTES`],
    /// and [`LoadError::Io`] when the stream faults.
    pub fn parse<R: Read>(reader: &mut R) -> LoadResult<Self> {
        let magic = next_token(reader)?;
        let width = parse_token::<i64>(reader, "width")?;
        let height = parse_token::<i64>(reader, "height")?;
        let scale_endian = parse_token::<f32>(reader, "scale")?;

        let header = MapHeader {
            magic,
            width,
            height,
            scale_endian,
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<(), FormatError> {
        match self.checked_raw_byte_size() {
            Some(0) => Err(FormatError::NoData {
                width: self.width,
                height: self.height,
            }),
            Some(n) if n <= MAX_RAW_BYTES => Ok(()),
            // Over the ceiling, or the product does not even fit a u64.
            _ => Err(FormatError::TooLarge {
                width: self.width,
                height: self.height,
            }),
        }
    }

    fn magic_second_char(&self) -> Option<char> {
        self.magic.chars().nth(1)
    }

    /// True when samples are 2-byte float16 values.
    pub fn is_half(&self) -> bool {
        self.magic_second_char()
            .is_some_and(|c| c.to_ascii_lowercase() == 'h')
    }

    /// True for single-channel (grayscale) images.
    pub fn is_mono(&self) -> bool {
        self.magic_second_char().is_some_and(|c| c.is_lowercase())
    }

    /// Number of stored channels per pixel: 1 or 3.
    pub fn channel_count(&self) -> u32 {
        if self.is_mono() {
            1
        } else {
            3
        }
    }

    /// Bytes per stored sample: 2 for float16, 4 for float32.
    pub fn bytes_per_sample(&self) -> u32 {
        if self.is_half() {
            2
        } else {
            4
        }
    }

    /// True when the payload is little-endian (negative scale token).
    pub fn is_little_endian(&self) -> bool {
        self.scale_endian < 0.0
    }

    /// Radiometric scale magnitude, sign stripped.
    pub fn scale(&self) -> f32 {
        self.scale_endian.abs()
    }

    /// Exact payload size implied by the header, in bytes.
    ///
    /// Zero when either dimension is zero or negative, and saturated at
    /// `u64::MAX` when the product overflows; neither kind of header
    /// survives validation, so neither ever reaches allocation.
    pub fn raw_byte_size(&self) -> u64 {
        self.checked_raw_byte_size().unwrap_or(u64::MAX)
    }

    fn checked_raw_byte_size(&self) -> Option<u64> {
        if self.width <= 0 || self.height <= 0 {
            return Some(0);
        }
        (self.width as u64)
            .checked_mul(self.height as u64)?
            .checked_mul(u64::from(self.channel_count()))?
            .checked_mul(u64::from(self.bytes_per_sample()))
    }
}

/// Reads one whitespace-delimited token, consuming its single
/// terminating whitespace byte (or stopping at end of stream).
fn next_token<R: Read>(reader: &mut R) -> LoadResult<String> {
    let mut token = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        if reader.read(&mut byte)? == 0 {
            return Err(FormatError::Malformed("unexpected end of header".into()).into());
        }
        if !byte[0].is_ascii_whitespace() {
            token.push(byte[0]);
            break;
        }
    }

    loop {
        if reader.read(&mut byte)? == 0 || byte[0].is_ascii_whitespace() {
            break;
        }
        token.push(byte[0]);
    }

    String::from_utf8(token)
        .map_err(|_| FormatError::Malformed("header token is not valid UTF-8".into()).into())
}

fn parse_token<T: std::str::FromStr>(reader: &mut impl Read, field: &str) -> LoadResult<T> {
    let token = next_token(reader)?;
    token.parse().map_err(|_| {
        LoadError::from(FormatError::Malformed(format!(
            "cannot parse {field} from {token:?}"
        )))
    })
}
