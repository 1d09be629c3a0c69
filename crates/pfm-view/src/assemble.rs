//! Display buffer assembly.
//!
//! Expands per-channel display values into the row-major RGB buffer
//! the renderer blits: mono sources replicate across R=G=B, and the
//! vertical flip happens here by reversing row placement.

/// Row-major RGB display buffer, ready for blitting.
///
/// Rebuilt wholesale on every pipeline run; the renderer never sees a
/// partially updated buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DisplayBuffer {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB triplets, `width * height * 3` bytes, top row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// One row of RGB triplets.
    ///
    /// # Panics
    ///
    /// Panics when `y` is out of range.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }
}

/// Assembles unsigned channel data into a display buffer.
///
/// `channels` holds `width * height * channel_count` values in payload
/// order (channels first within a pixel, rows top to bottom). Mono
/// input is expanded to gray triplets. With `flip_y`, source row `y`
/// lands on destination row `height - 1 - y`. Missing values read as
/// zero, so an undersized slice produces black instead of panicking.
pub fn assemble(
    channels: &[u8],
    width: u32,
    height: u32,
    channel_count: u32,
    flip_y: bool,
) -> DisplayBuffer {
    let w = width as usize;
    let h = height as usize;
    let ch = channel_count as usize;
    let mut pixels = vec![0u8; w * h * 3];

    for y in 0..h {
        let dst_y = if flip_y { h - 1 - y } else { y };
        for x in 0..w {
            let src = (y * w + x) * ch;
            let dst = (dst_y * w + x) * 3;
            if ch >= 3 {
                for c in 0..3 {
                    pixels[dst + c] = channels.get(src + c).copied().unwrap_or(0);
                }
            } else {
                let gray = channels.get(src).copied().unwrap_or(0);
                pixels[dst] = gray;
                pixels[dst + 1] = gray;
                pixels[dst + 2] = gray;
            }
        }
    }

    DisplayBuffer {
        width,
        height,
        pixels,
    }
}
