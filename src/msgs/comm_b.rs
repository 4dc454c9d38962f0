//! Comm-B replies (DF 20 and DF 21)
//!
//! Same leading fields as DF 4 / DF 5, followed by the 56-bit MB field
//! carrying the contents of a transponder register.

use std::fmt;

use serde::Serialize;

use crate::altitude::AltitudeCode;
use crate::envelope::RawEnvelope;
use crate::error::Result;
use crate::fields::{DownlinkRequest, FlightStatus, SurveillanceFields, UtilityMessage};
use crate::identity::{IdentityCode, Squawk};
use crate::msgs::identification::decode_callsign;
use crate::msgs::resolution_advisory::ResolutionAdvisory;

/// Comm-B data selector register contents.
///
/// Only registers that carry their own number in the first MB byte are
/// recognized. Everything else is kept as raw bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "register", rename_all = "snake_case")]
pub enum BdsData {
    /// BDS 1,0
    DataLinkCapability {
        continuation_flag: bool,
        overlay_capability: bool,
    },
    /// BDS 2,0
    AircraftIdentification { callsign: String },
    /// BDS 3,0
    AcasResolutionAdvisory(ResolutionAdvisory),
    Unknown { data: [u8; 7] },
}

impl BdsData {
    pub fn decode(mb: &[u8; 7]) -> Self {
        match mb[0] {
            0x10 => BdsData::DataLinkCapability {
                continuation_flag: mb[1] & 0x80 != 0,
                overlay_capability: mb[1] & 0x02 != 0,
            },
            0x20 => BdsData::AircraftIdentification {
                callsign: decode_callsign(&mb[1..7]),
            },
            0x30 => BdsData::AcasResolutionAdvisory(ResolutionAdvisory::decode(mb)),
            _ => BdsData::Unknown { data: *mb },
        }
    }
}

impl fmt::Display for BdsData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BdsData::DataLinkCapability {
                continuation_flag,
                overlay_capability,
            } => write!(
                f,
                "BDS 1,0 - Data Link Capability (cont={}, overlay={})",
                continuation_flag, overlay_capability
            ),
            BdsData::AircraftIdentification { callsign } => {
                write!(f, "BDS 2,0 - Aircraft ID:  {}", callsign)
            }
            BdsData::AcasResolutionAdvisory(ra) => write!(
                f,
                "BDS 3,0 - ACAS RA (ARA={}, RAC={}, RAT={}, MTE={})",
                ra.active_advisories, ra.complements, ra.terminated, ra.multiple_threats
            ),
            BdsData::Unknown { data } => {
                write!(f, "BDS ?,? - Raw:  ")?;
                for byte in data {
                    write!(f, "{:02X}", byte)?;
                }
                Ok(())
            }
        }
    }
}

fn mb_field(envelope: &RawEnvelope) -> [u8; 7] {
    let mut mb = [0u8; 7];
    mb.copy_from_slice(&envelope.payload()[3..10]);
    mb
}

/// Comm-B altitude reply (DF 20)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommBAltitudeReply {
    #[serde(flatten)]
    envelope: RawEnvelope,
    #[serde(flatten)]
    fields: SurveillanceFields,
    altitude: AltitudeCode,
    bds: BdsData,
}

impl CommBAltitudeReply {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        envelope.expect_downlink_format(&[20])?;

        let payload = envelope.payload();
        Ok(Self {
            fields: SurveillanceFields::decode(envelope.first_field(), payload),
            altitude: AltitudeCode::from_frame_bytes(payload[1], payload[2]),
            bds: BdsData::decode(&mb_field(&envelope)),
            envelope,
        })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(RawEnvelope::from_hex(hex)?)
    }

    pub fn envelope(&self) -> &RawEnvelope {
        &self.envelope
    }

    pub fn flight_status(&self) -> FlightStatus {
        self.fields.flight_status
    }

    pub fn downlink_request(&self) -> DownlinkRequest {
        self.fields.downlink_request
    }

    pub fn utility_message(&self) -> UtilityMessage {
        self.fields.utility_message
    }

    pub fn altitude_code(&self) -> AltitudeCode {
        self.altitude
    }

    /// Altitude in meters.
    pub fn altitude(&self) -> f64 {
        self.altitude.meters()
    }

    /// The 56-bit MB field.
    pub fn message(&self) -> [u8; 7] {
        mb_field(&self.envelope)
    }

    pub fn bds(&self) -> &BdsData {
        &self.bds
    }
}

/// Comm-B identify reply (DF 21)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommBIdentifyReply {
    #[serde(flatten)]
    envelope: RawEnvelope,
    #[serde(flatten)]
    fields: SurveillanceFields,
    identity: IdentityCode,
    bds: BdsData,
}

impl CommBIdentifyReply {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        envelope.expect_downlink_format(&[21])?;

        let payload = envelope.payload();
        Ok(Self {
            fields: SurveillanceFields::decode(envelope.first_field(), payload),
            identity: IdentityCode::from_frame_bytes(payload[1], payload[2]),
            bds: BdsData::decode(&mb_field(&envelope)),
            envelope,
        })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(RawEnvelope::from_hex(hex)?)
    }

    pub fn envelope(&self) -> &RawEnvelope {
        &self.envelope
    }

    pub fn flight_status(&self) -> FlightStatus {
        self.fields.flight_status
    }

    pub fn downlink_request(&self) -> DownlinkRequest {
        self.fields.downlink_request
    }

    pub fn utility_message(&self) -> UtilityMessage {
        self.fields.utility_message
    }

    pub fn identity_code(&self) -> IdentityCode {
        self.identity
    }

    pub fn squawk(&self) -> Squawk {
        self.identity.squawk()
    }

    /// The 56-bit MB field.
    pub fn message(&self) -> [u8; 7] {
        mb_field(&self.envelope)
    }

    pub fn bds(&self) -> &BdsData {
        &self.bds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_comm_b_identification() {
        // DF 20, FS 0, altitude 0x0F1F, MB = register 2,0 "KLM1023"
        let msg = CommBAltitudeReply::from_hex("A0000F1F202CC371C32CE0000000").unwrap();
        assert_eq!(msg.altitude_code().as_u16(), 0x0F1F);
        assert_relative_eq!(msg.altitude(), 7124.7, epsilon = 1e-6);
        assert_eq!(
            msg.bds(),
            &BdsData::AircraftIdentification {
                callsign: "KLM1023".to_string()
            }
        );
        assert_eq!(msg.bds().to_string(), "BDS 2,0 - Aircraft ID:  KLM1023");
    }

    #[test]
    fn test_comm_b_data_link_capability() {
        // DF 21, FS 5, identity 2214 -> 5502, MB = register 1,0
        let msg = CommBIdentifyReply::from_hex("AD0008A610820000000000000000").unwrap();
        assert!(msg.flight_status().has_spi());
        assert_eq!(msg.squawk().to_string(), "5502");
        assert_eq!(
            msg.bds(),
            &BdsData::DataLinkCapability {
                continuation_flag: true,
                overlay_capability: true,
            }
        );
    }

    #[test]
    fn test_comm_b_resolution_advisory() {
        let msg = CommBAltitudeReply::from_hex("A0000F1F30800004123454000000").unwrap();
        let BdsData::AcasResolutionAdvisory(ra) = msg.bds() else {
            panic!("unexpected register {:?}", msg.bds());
        };
        assert_eq!(ra.active_advisories, 0x2000);
    }

    #[test]
    fn test_comm_b_unknown_register() {
        let msg = CommBAltitudeReply::from_hex("A0000F1F40123456789ABC000000").unwrap();
        assert_eq!(
            msg.bds(),
            &BdsData::Unknown {
                data: [0x40, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC]
            }
        );
        assert_eq!(msg.message()[0], 0x40);
        assert_eq!(msg.bds().to_string(), "BDS ?,? - Raw:  40123456789ABC");
    }
}
