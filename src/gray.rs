//! Reflected binary (Gray) code conversion
//!
//! Shared by every altitude-bearing message. Gillham altitude codes are
//! built from interleaved Gray-coded groups of different widths, so the
//! width is a parameter instead of assuming a full machine word.

/// Convert a `bits` wide Gray code to standard binary.
///
/// Bits are processed from most to least significant. Each output bit is the
/// exclusive-or of the Gray bit and the output bit above it (0 above the most
/// significant position). Bits above `bits` are ignored; widths over 32
/// are treated as 32.
pub fn gray_to_binary(gray: u32, bits: u32) -> u32 {
    let bits = bits.min(u32::BITS);

    let mut binary = 0u32;
    let mut previous = 0u32;
    for i in (0..bits).rev() {
        let bit = ((gray >> i) & 1) ^ previous;
        binary |= bit << i;
        previous = bit;
    }
    binary
}

/// Convert a `bits` wide binary number to its Gray code.
pub fn binary_to_gray(binary: u32, bits: u32) -> u32 {
    let bits = bits.min(u32::BITS);

    let binary = if bits == u32::BITS {
        binary
    } else {
        binary & ((1u32 << bits) - 1)
    };
    binary ^ (binary >> 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gray_to_binary_3_bit_truth_table() {
        // gray -> binary, worked by hand from the reflected sequence
        // 000 001 011 010 110 111 101 100
        let table = [
            (0b000, 0),
            (0b001, 1),
            (0b011, 2),
            (0b010, 3),
            (0b110, 4),
            (0b111, 5),
            (0b101, 6),
            (0b100, 7),
        ];
        for (gray, binary) in table {
            assert_eq!(gray_to_binary(gray, 3), binary, "gray {:03b}", gray);
        }
    }

    #[test]
    fn test_gray_to_binary_4_bit() {
        assert_eq!(gray_to_binary(0b0000, 4), 0);
        assert_eq!(gray_to_binary(0b0110, 4), 4);
        assert_eq!(gray_to_binary(0b1100, 4), 8);
        assert_eq!(gray_to_binary(0b1111, 4), 10);
        assert_eq!(gray_to_binary(0b1000, 4), 15);
    }

    #[test]
    fn test_bits_above_width_are_ignored() {
        assert_eq!(gray_to_binary(0b1_011, 3), 2);
        assert_eq!(binary_to_gray(0b1_010, 3), 0b011);
    }

    #[test]
    fn test_full_width() {
        assert_eq!(gray_to_binary(0x8000_0000, 32), u32::MAX);
        assert_eq!(binary_to_gray(u32::MAX, 32), 0x8000_0000);
    }

    #[test]
    fn test_widths_over_32_are_clamped() {
        assert_eq!(gray_to_binary(0x8000_0000, 40), u32::MAX);
        assert_eq!(gray_to_binary(0b110, 255), gray_to_binary(0b110, 32));
        assert_eq!(binary_to_gray(u32::MAX, 64), 0x8000_0000);
    }

    proptest! {
        #[test]
        fn gray_round_trips(bits in 1u32..=32, value in any::<u32>()) {
            let gray = if bits == 32 { value } else { value & ((1u32 << bits) - 1) };
            prop_assert_eq!(binary_to_gray(gray_to_binary(gray, bits), bits), gray);
        }

        #[test]
        fn successive_codes_differ_in_one_bit(bits in 2u32..=16, n in any::<u32>()) {
            let n = n % ((1u32 << bits) - 1);
            let a = binary_to_gray(n, bits);
            let b = binary_to_gray(n + 1, bits);
            prop_assert_eq!((a ^ b).count_ones(), 1);
        }
    }
}
