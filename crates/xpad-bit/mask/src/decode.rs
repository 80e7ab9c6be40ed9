use smallvec::SmallVec;

/// Decode `value` into exactly `width` bits, most significant bit first.
///
/// The result is zero-padded on the high end. Callers must pass a `width`
/// large enough to hold every set bit of `value`: bits at positions
/// `>= width` are dropped.
///
/// ```
/// use xpad_bit_mask::decode_bits;
///
/// assert_eq!(decode_bits(1, 4).as_slice(), &[0, 0, 0, 1]);
/// assert_eq!(decode_bits(3, 2).as_slice(), &[1, 1]);
/// ```
pub fn decode_bits(value: u64, width: usize) -> SmallVec<[u8; 32]> {
    let mut bits = SmallVec::with_capacity(width);
    for position in (0..width).rev() {
        let bit = if position < 64 { (value >> position) & 1 } else { 0 };
        bits.push(bit as u8);
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::decode_bits;

    #[test]
    fn zero_decodes_to_all_zeros() {
        for width in 0..40 {
            let bits = decode_bits(0, width);
            assert_eq!(bits.len(), width);
            assert!(bits.iter().all(|b| *b == 0));
        }
    }

    #[test]
    fn emits_most_significant_bit_first() {
        assert_eq!(decode_bits(1, 4).as_slice(), &[0, 0, 0, 1]);
        assert_eq!(decode_bits(3, 2).as_slice(), &[1, 1]);
        assert_eq!(decode_bits(3, 4).as_slice(), &[0, 0, 1, 1]);
        assert_eq!(decode_bits(0x8001, 16)[0], 1);
        assert_eq!(decode_bits(0x8001, 16)[15], 1);
    }

    #[test]
    fn matches_reference_word() {
        let expected = [
            1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1,
            0, 1, 1, 1, 0, 1, 1, 1, 1,
        ];
        assert_eq!(decode_bits(0xDEAD_BEEF, 32).as_slice(), &expected);
    }

    #[test]
    fn high_bits_beyond_width_are_dropped() {
        assert_eq!(decode_bits(0b1_0110, 4).as_slice(), &[0, 1, 1, 0]);
    }

    #[test]
    fn widths_past_u64_are_zero_padded() {
        let bits = decode_bits(u64::MAX, 70);
        assert_eq!(bits.len(), 70);
        assert!(bits[..6].iter().all(|b| *b == 0));
        assert!(bits[6..].iter().all(|b| *b == 1));
    }

    #[test]
    fn xor_marks_exactly_the_differing_positions() {
        let a: u64 = 0b1010_0110_0000_1111;
        let b: u64 = 0b0010_0111_1000_1011;
        let changed = decode_bits(a ^ b, 16);
        let left = decode_bits(a, 16);
        let right = decode_bits(b, 16);
        for i in 0..16 {
            assert_eq!(changed[i] == 1, left[i] != right[i], "position {i}");
        }
    }
}
