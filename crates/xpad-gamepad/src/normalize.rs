use serde::Deserialize;

/// How raw axis samples are turned into floats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeMode {
    /// Pass the raw value through unchanged.
    Identity,
    /// Divide by the full range of the sample width: unsigned samples land in
    /// `[0, 1]`, signed ones in roughly `[-0.5, 0.5]`.
    #[default]
    Scale,
}

/// Normalize a raw sample of `bit_width` bits.
///
/// `bit_width` must be at least 1.
#[inline]
pub fn normalize(raw: i64, bit_width: u32, mode: NormalizeMode) -> f64 {
    debug_assert!(bit_width > 0, "bit width must be positive");
    match mode {
        NormalizeMode::Identity => raw as f64,
        NormalizeMode::Scale => raw as f64 / (2f64.powi(bit_width as i32) - 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_a_no_op() {
        for raw in [-32768, -1, 0, 1, 255, 32767] {
            for width in [1, 8, 16, 32] {
                assert_eq!(normalize(raw, width, NormalizeMode::Identity), raw as f64);
            }
        }
    }

    #[test]
    fn scale_maps_unsigned_bytes_to_unit_range() {
        assert_eq!(normalize(0, 8, NormalizeMode::Scale), 0.0);
        assert_eq!(normalize(255, 8, NormalizeMode::Scale), 1.0);
        assert!((normalize(51, 8, NormalizeMode::Scale) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn scale_maps_signed_words_to_half_range() {
        let max = normalize(i64::from(i16::MAX), 16, NormalizeMode::Scale);
        let min = normalize(i64::from(i16::MIN), 16, NormalizeMode::Scale);
        assert!((max - 0.5).abs() < 1e-4);
        assert!((min + 0.5).abs() < 1e-4);
    }

    #[test]
    fn scale_is_monotonic() {
        let mut last = f64::NEG_INFINITY;
        for raw in (i64::from(i16::MIN)..=i64::from(i16::MAX)).step_by(97) {
            let value = normalize(raw, 16, NormalizeMode::Scale);
            assert!(value >= last);
            last = value;
        }
    }
}
