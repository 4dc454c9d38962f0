//! Aircraft identification and category (FTC 1-4)

use serde::Serialize;

use crate::envelope::{ExtendedSquitter, RawEnvelope, ALL_SUBTYPES};
use crate::error::Result;

/// 6-bit character set for flight IDs. Codes outside letters, digits and
/// space are not assigned and render as space.
const AIS_CHARSET: &[u8; 64] = b" ABCDEFGHIJKLMNOPQRSTUVWXYZ                     0123456789      ";

/// Decode 8 6-bit characters packed in 6 bytes, with trailing padding removed.
pub(crate) fn decode_callsign(bytes: &[u8]) -> String {
    let char_indices = [
        (bytes[0] >> 2) as usize,
        (((bytes[0] & 0x03) << 4) | (bytes[1] >> 4)) as usize,
        (((bytes[1] & 0x0F) << 2) | (bytes[2] >> 6)) as usize,
        (bytes[2] & 0x3F) as usize,
        (bytes[3] >> 2) as usize,
        (((bytes[3] & 0x03) << 4) | (bytes[4] >> 4)) as usize,
        (((bytes[4] & 0x0F) << 2) | (bytes[5] >> 6)) as usize,
        (bytes[5] & 0x3F) as usize,
    ];

    let callsign: String = char_indices
        .iter()
        .map(|&idx| AIS_CHARSET[idx] as char)
        .collect();
    callsign.trim_end().to_string()
}

/// Extended squitter identification message
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Identification {
    #[serde(flatten)]
    squitter: ExtendedSquitter,
    emitter_category: u8,
    callsign: String,
}

impl Identification {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        let squitter = ExtendedSquitter::new(envelope)?;
        squitter.expect_format(&[1, 2, 3, 4], ALL_SUBTYPES)?;

        let me = squitter.message();
        Ok(Self {
            emitter_category: me[0] & 0x07,
            callsign: decode_callsign(&me[1..7]),
            squitter,
        })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(RawEnvelope::from_hex(hex)?)
    }

    pub fn squitter(&self) -> &ExtendedSquitter {
        &self.squitter
    }

    pub fn envelope(&self) -> &RawEnvelope {
        self.squitter.envelope()
    }

    pub fn emitter_category(&self) -> u8 {
        self.emitter_category
    }

    /// Category set letter: A for FTC 4 down to D for FTC 1.
    pub fn category_set(&self) -> char {
        match self.squitter.format_type_code() {
            4 => 'A',
            3 => 'B',
            2 => 'C',
            _ => 'D',
        }
    }

    pub fn category_description(&self) -> &'static str {
        if self.emitter_category == 0 {
            return "No category information";
        }
        match (self.category_set(), self.emitter_category) {
            ('A', 1) => "Light (< 15500 lbs)",
            ('A', 2) => "Small (15500 to 75000 lbs)",
            ('A', 3) => "Large (75000 to 300000 lbs)",
            ('A', 4) => "High vortex large",
            ('A', 5) => "Heavy (> 300000 lbs)",
            ('A', 6) => "High performance (> 5g acceleration and > 400 kts)",
            ('A', 7) => "Rotorcraft",
            ('B', 1) => "Glider / sailplane",
            ('B', 2) => "Lighter-than-air",
            ('B', 3) => "Parachutist / skydiver",
            ('B', 4) => "Ultralight / hang-glider / paraglider",
            ('B', 6) => "Unmanned aerial vehicle",
            ('B', 7) => "Space / trans-atmospheric vehicle",
            ('C', 1) => "Surface vehicle, emergency",
            ('C', 2) => "Surface vehicle, service",
            ('C', 3) => "Point obstacle",
            ('C', 4) => "Cluster obstacle",
            ('C', 5) => "Line obstacle",
            _ => "Reserved",
        }
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }
}
