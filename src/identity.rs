//! 13-bit identity (Mode A) code
//!
//! ```plain
//! bit:    12 11 10  9  8  7  6  5  4  3  2  1  0
//! field:  C1 A1 C2 A2 C4 A4  X B1 D1 B2 D2 B4 D4
//! ```
//!
//! Each squawk digit is the 3-bit group `x4 x2 x1` of one letter, in the
//! order A B C D.

use std::fmt;

use serde::{Serialize, Serializer};

/// A 4-digit octal transponder code
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Squawk(u16);

impl Squawk {
    pub const HIJACK: Self = Self(0o7500);
    pub const RADIO_FAILURE: Self = Self(0o7600);
    pub const EMERGENCY: Self = Self(0o7700);

    pub const fn from_digits(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self(
            ((a as u16 & 7) << 9) | ((b as u16 & 7) << 6) | ((c as u16 & 7) << 3) | (d as u16 & 7),
        )
    }

    /// The code as a number whose octal digits are the squawk digits.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn is_emergency(&self) -> bool {
        matches!(*self, Self::HIJACK | Self::RADIO_FAILURE | Self::EMERGENCY)
    }
}

impl fmt::Display for Squawk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl Serialize for Squawk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 13-bit identity code
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityCode(u16);

impl IdentityCode {
    /// Masks `word` to 13 bits.
    pub const fn from_u16(word: u16) -> Self {
        Self(word & 0x1FFF)
    }

    pub fn from_frame_bytes(high: u8, low: u8) -> Self {
        Self::from_u16((u16::from(high) << 8) | u16::from(low))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn squawk(&self) -> Squawk {
        let bit = |mask: u16| u8::from(self.0 & mask != 0);

        let a = (bit(0x0080) << 2) | (bit(0x0200) << 1) | bit(0x0800);
        let b = (bit(0x0002) << 2) | (bit(0x0008) << 1) | bit(0x0020);
        let c = (bit(0x0100) << 2) | (bit(0x0400) << 1) | bit(0x1000);
        let d = (bit(0x0001) << 2) | (bit(0x0004) << 1) | bit(0x0010);

        Squawk::from_digits(a, b, c, d)
    }
}

impl Serialize for IdentityCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.squawk().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squawk_from_identity_code() {
        assert_eq!(IdentityCode::from_u16(2214).squawk().to_string(), "5502");
        assert_eq!(IdentityCode::from_u16(2048).squawk().to_string(), "1000");
        assert_eq!(IdentityCode::from_u16(5147).squawk().to_string(), "0635");
        assert_eq!(IdentityCode::from_u16(0).squawk().to_string(), "0000");
    }

    #[test]
    fn test_x_bit_is_ignored() {
        assert_eq!(
            IdentityCode::from_u16(2214 | 0x0040).squawk(),
            IdentityCode::from_u16(2214).squawk()
        );
    }

    #[test]
    fn test_emergency_codes() {
        assert!(Squawk::from_digits(7, 7, 0, 0).is_emergency());
        assert!(Squawk::from_digits(7, 5, 0, 0).is_emergency());
        assert!(Squawk::from_digits(7, 6, 0, 0).is_emergency());
        assert!(!Squawk::from_digits(7, 0, 0, 0).is_emergency());
        assert_eq!(Squawk::EMERGENCY.to_string(), "7700");
    }
}
