//! Signed-to-unsigned channel remapping.
//!
//! Kernels quantize into the signed byte range with -128 as black;
//! the display wants plain 0-255. One fixed +128 bias closes the gap.

/// Remaps one biased signed channel value into unsigned display range.
#[inline]
pub fn centered_to_unsigned(value: i8) -> u8 {
    (i16::from(value) + 128) as u8
}

/// Remaps a whole signed channel buffer.
pub fn remap_channels(signed: &[i8]) -> Vec<u8> {
    signed.iter().copied().map(centered_to_unsigned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_endpoints() {
        assert_eq!(centered_to_unsigned(-128), 0);
        assert_eq!(centered_to_unsigned(0), 128);
        assert_eq!(centered_to_unsigned(127), 255);
    }

    #[test]
    fn remap_is_total() {
        // Every signed byte lands in range without wrapping.
        let all: Vec<i8> = (i8::MIN..=i8::MAX).collect();
        let out = remap_channels(&all);
        assert_eq!(out.first(), Some(&0));
        assert_eq!(out.last(), Some(&255));
        assert!(out.windows(2).all(|w| w[0] < w[1]));
    }
}
