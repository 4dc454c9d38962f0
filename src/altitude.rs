//! Altitude codes
//!
//! <https://mode-s.org/1090mhz/content/mode-s/3-surveillance.html>
//!
//! The 13-bit altitude code of DF 0, 4, 16 and 20 is laid out as
//!
//! ```plain
//! bit:    12 11 10  9  8  7  6  5  4  3  2  1  0
//! field:  C1 A1 C2 A2 C4 A4  M B1  Q B2 D2 B4 D4
//! ```
//!
//! With M clear and Q set the remaining 11 bits are a binary count of 25 ft
//! steps. Otherwise the code is a Gillham (Mode C) code in 100 ft steps.
//! Extended squitter airborne positions carry the same code without the M
//! bit (12 bits).

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::gray::gray_to_binary;

pub const FEET_TO_METERS: f64 = 0.3048;

/// Mask of a 13-bit altitude code.
pub const AC13_MASK: u16 = 0x1FFF;
/// Mask of a 12-bit extended squitter altitude code.
pub const AC12_MASK: u16 = 0x0FFF;

/// Metric unit marker.
pub const M_BIT: u16 = 0x0040;
/// 25 ft increment marker.
pub const Q_BIT: u16 = 0x0010;

const C1: u16 = 0x1000;
const A1: u16 = 0x0800;
const C2: u16 = 0x0400;
const A2: u16 = 0x0200;
const C4: u16 = 0x0100;
const A4: u16 = 0x0080;
const B1: u16 = 0x0020;
const B2: u16 = 0x0008;
const D2: u16 = 0x0004;
const B4: u16 = 0x0002;
const D4: u16 = 0x0001;

/// 13-bit altitude code
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AltitudeCode(u16);

impl AltitudeCode {
    /// Masks `word` to 13 bits.
    pub const fn from_u16(word: u16) -> Self {
        Self(word & AC13_MASK)
    }

    /// Extract the code from the two payload bytes that carry it.
    ///
    /// ```plain
    /// byte         0        1
    /// bit   01234567 01234567
    /// value ...aaaaa aaaaaaaa
    /// ```
    pub fn from_frame_bytes(high: u8, low: u8) -> Self {
        Self::from_u16((u16::from(high) << 8) | u16::from(low))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn m_bit(&self) -> bool {
        self.0 & M_BIT != 0
    }

    pub fn q_bit(&self) -> bool {
        self.0 & Q_BIT != 0
    }

    /// Whether the code is a binary count of 25 ft steps.
    pub fn is_linear(&self) -> bool {
        !self.m_bit() && self.q_bit()
    }

    /// Decoded altitude in feet.
    pub fn feet(&self) -> i32 {
        if self.is_linear() {
            decode_linear(self.0)
        } else {
            decode_gillham(self.0)
        }
    }

    /// Decoded altitude in meters.
    pub fn meters(&self) -> f64 {
        f64::from(self.feet()) * FEET_TO_METERS
    }
}

impl Serialize for AltitudeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AltitudeCode", 2)?;
        state.serialize_field("code", &self.0)?;
        state.serialize_field("meters", &self.meters())?;
        state.end()
    }
}

/// 12-bit extended squitter altitude code (the 13-bit code without M).
///
/// ```plain
/// bit:    11 10  9  8  7  6  5  4  3  2  1  0
/// field:  C1 A1 C2 A2 C4 A4 B1  Q B2 D2 B4 D4
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EsAltitudeCode(u16);

impl EsAltitudeCode {
    /// Masks `word` to 12 bits.
    pub const fn from_u16(word: u16) -> Self {
        Self(word & AC12_MASK)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// A code of zero means no altitude information.
    pub fn is_available(&self) -> bool {
        self.0 != 0
    }

    /// The equivalent 13-bit code, with a clear M bit inserted.
    pub fn to_ac13(&self) -> AltitudeCode {
        AltitudeCode::from_u16(((self.0 & 0x0FC0) << 1) | (self.0 & 0x003F))
    }

    pub fn feet(&self) -> Option<i32> {
        self.is_available().then(|| self.to_ac13().feet())
    }

    pub fn meters(&self) -> Option<f64> {
        self.is_available().then(|| self.to_ac13().meters())
    }
}

impl Serialize for EsAltitudeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EsAltitudeCode", 2)?;
        state.serialize_field("code", &self.0)?;
        state.serialize_field("meters", &self.meters())?;
        state.end()
    }
}

/// 25 ft increments: N is the code with M and Q squeezed out.
fn decode_linear(code: u16) -> i32 {
    let n = (code & 0x000F) | ((code & 0x0020) >> 1) | ((code & 0x1F80) >> 2);
    25 * i32::from(n) - 1000
}

/// 100 ft increments, Gillham coded.
fn decode_gillham(code: u16) -> i32 {
    let bit = |mask: u16| u32::from(code & mask != 0);

    // 500 ft counter: D2 D4 A1 A2 A4 B1 B2 B4, most significant first
    let n500 = gray_to_binary(
        (bit(D2) << 7)
            | (bit(D4) << 6)
            | (bit(A1) << 5)
            | (bit(A2) << 4)
            | (bit(A4) << 3)
            | (bit(B1) << 2)
            | (bit(B2) << 1)
            | bit(B4),
        8,
    ) as i32;

    // 100 ft counter: C1 C2 C4, offset by one
    let mut n100 = gray_to_binary((bit(C1) << 2) | (bit(C2) << 1) | bit(C4), 3) as i32 - 1;
    if n100 == 6 {
        n100 = 4;
    }
    // the 100 ft counter runs backwards in odd 500 ft bands
    if n500 % 2 != 0 {
        n100 = 4 - n100;
    }

    -1200 + n500 * 500 + n100 * 100
}
