//! Tone-mapping kernels.
//!
//! [`ToneMapper`] is the narrow seam between the decoder and the
//! numeric kernel that turns radiance samples into quantized display
//! values. The production system drives a SIMD code-generated kernel
//! through this same contract; the two built-in implementations here
//! are deterministic stand-ins that make the pipeline testable.
//!
//! Kernels emit one *signed* byte per channel per pixel, biased so that
//! -128 is black and 127 is full intensity (a code-generator-friendly
//! output space). [`crate::remap`] shifts it back to unsigned display
//! range.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use half::f16;
use pfm_io::MapHeader;

/// Display gamma applied when gamma encoding is enabled.
const DISPLAY_GAMMA: f32 = 2.2;

/// Converts raw radiance samples to biased signed display bytes.
///
/// Implementations must be deterministic and pure: same input plus same
/// exposure always yields the same output, and repeated invocation with
/// different exposures on the same buffer is safe.
pub trait ToneMapper {
    /// Maps every sample in `raw` through exposure, optional filmic
    /// tone curve and optional gamma encoding, quantized to a signed
    /// byte centered on -128 = black.
    ///
    /// Trailing bytes that do not form a whole sample are ignored.
    fn convert(&self, raw: &[u8], exposure: f32) -> Vec<i8>;
}

/// Kernel configuration derived from header and viewer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneOptions {
    /// Apply display gamma encoding after tone mapping.
    pub gamma: bool,
    /// Apply the filmic tone curve.
    pub tone: bool,
    /// Payload samples are little-endian.
    pub little_endian: bool,
}

/// Stand-in kernel for float32 payloads.
#[derive(Debug, Clone, Copy)]
pub struct F32ToneMapper {
    opts: ToneOptions,
}

/// Stand-in kernel for float16 payloads.
#[derive(Debug, Clone, Copy)]
pub struct F16ToneMapper {
    opts: ToneOptions,
}

impl F32ToneMapper {
    /// Creates a float32 kernel with the given options.
    pub fn new(opts: ToneOptions) -> Self {
        Self { opts }
    }
}

impl F16ToneMapper {
    /// Creates a float16 kernel with the given options.
    pub fn new(opts: ToneOptions) -> Self {
        Self { opts }
    }
}

impl ToneMapper for F32ToneMapper {
    fn convert(&self, raw: &[u8], exposure: f32) -> Vec<i8> {
        raw.chunks_exact(4)
            .map(|chunk| {
                let v = if self.opts.little_endian {
                    LittleEndian::read_f32(chunk)
                } else {
                    BigEndian::read_f32(chunk)
                };
                quantize(v, exposure, self.opts)
            })
            .collect()
    }
}

impl ToneMapper for F16ToneMapper {
    fn convert(&self, raw: &[u8], exposure: f32) -> Vec<i8> {
        raw.chunks_exact(2)
            .map(|chunk| {
                let bytes = [chunk[0], chunk[1]];
                let v = if self.opts.little_endian {
                    f16::from_le_bytes(bytes)
                } else {
                    f16::from_be_bytes(bytes)
                };
                quantize(v.to_f32(), exposure, self.opts)
            })
            .collect()
    }
}

/// Selects the kernel matching the header's sample precision.
pub fn for_header(header: &MapHeader, gamma: bool, tone: bool) -> Box<dyn ToneMapper> {
    let opts = ToneOptions {
        gamma,
        tone,
        little_endian: header.is_little_endian(),
    };
    if header.is_half() {
        Box::new(F16ToneMapper::new(opts))
    } else {
        Box::new(F32ToneMapper::new(opts))
    }
}

fn quantize(sample: f32, exposure: f32, opts: ToneOptions) -> i8 {
    let mut v = sample * exposure;
    if opts.tone {
        v = filmic(v);
    }
    if opts.gamma {
        v = gamma_oetf(v, DISPLAY_GAMMA);
    }
    // NaN casts to 0, so undefined samples land on black.
    let q = (v.clamp(0.0, 1.0) * 255.0).round() as i32;
    (q - 128) as i8
}

/// Filmic tone curve (ACES fit); compresses unbounded radiance into [0, 1].
fn filmic(x: f32) -> f32 {
    let x = x.max(0.0);
    (x * (2.51 * x + 0.03)) / (x * (2.43 * x + 0.59) + 0.14)
}

/// OETF for arbitrary gamma: `l^(1/gamma)`.
fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 {
        0.0
    } else {
        l.powf(1.0 / gamma)
    }
}
