//! Surveillance replies (DF 4 and DF 5)
//!
//! ```plain
//! byte  0        1        2        3
//!       DDDDDfff dddddUUU UUUccccc cccccccc
//! ```
//!
//! The 13-bit code is an altitude code for DF 4 and an identity code for
//! DF 5.

use serde::Serialize;

use crate::altitude::AltitudeCode;
use crate::envelope::RawEnvelope;
use crate::error::Result;
use crate::fields::{DownlinkRequest, FlightStatus, SurveillanceFields, UtilityMessage};
use crate::identity::{IdentityCode, Squawk};

/// Surveillance altitude reply (DF 4)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AltitudeReply {
    #[serde(flatten)]
    envelope: RawEnvelope,
    #[serde(flatten)]
    fields: SurveillanceFields,
    altitude: AltitudeCode,
}

impl AltitudeReply {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        envelope.expect_downlink_format(&[4])?;

        let payload = envelope.payload();
        Ok(Self {
            fields: SurveillanceFields::decode(envelope.first_field(), payload),
            altitude: AltitudeCode::from_frame_bytes(payload[1], payload[2]),
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
}

/// Surveillance identify reply (DF 5)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IdentifyReply {
    #[serde(flatten)]
    envelope: RawEnvelope,
    #[serde(flatten)]
    fields: SurveillanceFields,
    identity: IdentityCode,
}

impl IdentifyReply {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        envelope.expect_downlink_format(&[5])?;

        let payload = envelope.payload();
        Ok(Self {
            fields: SurveillanceFields::decode(envelope.first_field(), payload),
            identity: IdentityCode::from_frame_bytes(payload[1], payload[2]),
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
}
