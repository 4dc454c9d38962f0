//! ACAS resolution advisory report
//!
//! The same 56-bit block is carried by Comm-B register 3,0, the MV field of a
//! long air-air reply and the extended squitter aircraft status subtype 2.
//! Only the first byte differs (register number or type code), the rest is
//!
//! ```plain
//! byte  1        2        3        4 5 6
//!       aaaaaaaa aaaaaarr rrTMtt.. identity (26 bits from byte 3 bit 1)
//! ```

use serde::Serialize;

use crate::altitude::AltitudeCode;
use crate::envelope::IcaoAddress;

const DO_NOT_PASS_BELOW: u8 = 0b1000;
const DO_NOT_PASS_ABOVE: u8 = 0b0100;
const DO_NOT_TURN_LEFT: u8 = 0b0010;
const DO_NOT_TURN_RIGHT: u8 = 0b0001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResolutionAdvisory {
    /// 14-bit active resolution advisories
    pub active_advisories: u16,
    /// 4-bit resolution advisory complements record
    pub complements: u8,
    pub terminated: bool,
    pub multiple_threats: bool,
    pub threat: ThreatIdentity,
}

impl ResolutionAdvisory {
    /// Decode from a 7-byte block. Byte 0 is not part of the report.
    pub fn decode(block: &[u8; 7]) -> Self {
        let threat_type = (block[3] >> 2) & 0x03;
        let threat_data = (u32::from(block[3] & 0x03) << 24)
            | (u32::from(block[4]) << 16)
            | (u32::from(block[5]) << 8)
            | u32::from(block[6]);

        Self {
            active_advisories: (u16::from(block[1]) << 6) | u16::from(block[2] >> 2),
            complements: ((block[2] & 0x03) << 2) | (block[3] >> 6),
            terminated: block[3] & 0x20 != 0,
            multiple_threats: block[3] & 0x10 != 0,
            threat: ThreatIdentity::decode(threat_type, threat_data),
        }
    }

    pub fn do_not_pass_below(&self) -> bool {
        self.complements & DO_NOT_PASS_BELOW != 0
    }

    pub fn do_not_pass_above(&self) -> bool {
        self.complements & DO_NOT_PASS_ABOVE != 0
    }

    pub fn do_not_turn_left(&self) -> bool {
        self.complements & DO_NOT_TURN_LEFT != 0
    }

    pub fn do_not_turn_right(&self) -> bool {
        self.complements & DO_NOT_TURN_RIGHT != 0
    }
}

/// Threat identity data, selected by the 2-bit threat type indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ThreatIdentity {
    /// No identity data, the 26 bits are carried as is.
    None { data: u32 },
    /// Mode S address of the threat.
    Address { address: IcaoAddress },
    /// Altitude, range and bearing of a threat without Mode S.
    AltitudeRangeBearing {
        altitude: AltitudeCode,
        /// 7-bit range code
        range: u8,
        /// 6-bit bearing code
        bearing: u8,
    },
    NotAssigned { data: u32 },
}

impl ThreatIdentity {
    fn decode(threat_type: u8, data: u32) -> Self {
        match threat_type {
            0 => Self::None { data },
            1 => {
                // 24-bit address followed by two zero bits
                let address = data >> 2;
                Self::Address {
                    address: IcaoAddress([(address >> 16) as u8, (address >> 8) as u8, address as u8]),
                }
            }
            2 => Self::AltitudeRangeBearing {
                altitude: AltitudeCode::from_u16((data >> 13) as u16),
                range: ((data >> 6) & 0x7F) as u8,
                bearing: (data & 0x3F) as u8,
            },
            _ => Self::NotAssigned { data },
        }
    }

    /// Range in NM from a range code. `None` if no estimate is available.
    pub fn range_nm(range: u8) -> Option<f64> {
        match range {
            0 => None,
            1 => Some(0.05),
            2..=126 => Some(f64::from(range - 1) / 10.0),
            _ => Some(12.6),
        }
    }

    /// Lower bound of the 6 degree bearing sector. `None` if not available.
    pub fn bearing_degrees(bearing: u8) -> Option<f64> {
        match bearing {
            1..=60 => Some(f64::from(bearing - 1) * 6.0),
            _ => None,
        }
    }
}
