//! Air-air surveillance replies (DF 0 and DF 16)
//!
//! ```plain
//! byte  0        1        2        3
//!       DDDDDVC. SSS..RRR R..AAAAA AAAAAAAA
//! ```
//!
//! DF 16 has no cross-link bit and carries a 56-bit MV field after the
//! altitude code.

use serde::Serialize;

use crate::altitude::AltitudeCode;
use crate::envelope::RawEnvelope;
use crate::error::Result;
use crate::msgs::resolution_advisory::ResolutionAdvisory;

/// Maximum cruising true airspeed announced in the RI field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaximumAirspeed {
    /// Upper bound of the announced speed band, in m/s.
    Bounded(f64),
    /// Faster than 2220 km/h.
    Unbounded,
    /// RI carries ACAS information or no airspeed data.
    Unknown,
}

impl MaximumAirspeed {
    pub fn from_reply_information(ri: u8) -> Self {
        match ri {
            9 => Self::Bounded(kmh_to_mps(140.0)),
            10 => Self::Bounded(kmh_to_mps(280.0)),
            11 => Self::Bounded(kmh_to_mps(560.0)),
            12 => Self::Bounded(kmh_to_mps(1110.0)),
            13 => Self::Bounded(kmh_to_mps(2220.0)),
            14 => Self::Unbounded,
            _ => Self::Unknown,
        }
    }
}

fn kmh_to_mps(kmh: f64) -> f64 {
    kmh / 3.6
}

/// Fields shared by both air-air formats.
struct AcasFields {
    sensitivity_level: u8,
    reply_information: u8,
    altitude_code: AltitudeCode,
}

impl AcasFields {
    fn decode(payload: &[u8]) -> Self {
        Self {
            sensitivity_level: payload[0] >> 5,
            reply_information: ((payload[0] & 0x07) << 1) | (payload[1] >> 7),
            altitude_code: AltitudeCode::from_frame_bytes(payload[1], payload[2]),
        }
    }
}

fn reply_information_description(ri: u8) -> &'static str {
    match ri {
        0 => "No operating ACAS",
        2 => "ACAS with resolution capability inhibited",
        3 => "ACAS with vertical-only resolution capability",
        7 => "ACAS with vertical and horizontal resolution capability",
        8 => "No maximum airspeed data available",
        9 => "Airspeed <= 75 kt",
        10 => "Airspeed > 75 and <= 150 kt",
        11 => "Airspeed > 150 and <= 300 kt",
        12 => "Airspeed > 300 and <= 600 kt",
        13 => "Airspeed > 600 and <= 1200 kt",
        14 => "Airspeed > 1200 kt",
        _ => "Not assigned",
    }
}

/// Short air-air surveillance reply (DF 0)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShortAcas {
    #[serde(flatten)]
    envelope: RawEnvelope,
    airborne: bool,
    cross_link_capability: bool,
    sensitivity_level: u8,
    reply_information: u8,
    maximum_airspeed: MaximumAirspeed,
    altitude: AltitudeCode,
}

impl ShortAcas {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        envelope.expect_downlink_format(&[0])?;

        let first_field = envelope.first_field();
        let fields = AcasFields::decode(envelope.payload());

        Ok(Self {
            airborne: first_field & 0x04 == 0,
            cross_link_capability: first_field & 0x02 != 0,
            sensitivity_level: fields.sensitivity_level,
            reply_information: fields.reply_information,
            maximum_airspeed: MaximumAirspeed::from_reply_information(fields.reply_information),
            altitude: fields.altitude_code,
            envelope,
        })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(RawEnvelope::from_hex(hex)?)
    }

    pub fn envelope(&self) -> &RawEnvelope {
        &self.envelope
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    /// Whether the transponder supports cross-link (DF 0 replies to UF 0 with
    /// the contents of a Comm-B register).
    pub fn has_cross_link_capability(&self) -> bool {
        self.cross_link_capability
    }

    /// 0 means ACAS is inoperative.
    pub fn sensitivity_level(&self) -> u8 {
        self.sensitivity_level
    }

    pub fn reply_information(&self) -> u8 {
        self.reply_information
    }

    pub fn reply_information_description(&self) -> &'static str {
        reply_information_description(self.reply_information)
    }

    pub fn maximum_airspeed(&self) -> MaximumAirspeed {
        self.maximum_airspeed
    }

    pub fn has_operating_acas(&self) -> bool {
        self.reply_information != 0
    }

    pub fn altitude_code(&self) -> AltitudeCode {
        self.altitude
    }

    /// Altitude in meters.
    pub fn altitude(&self) -> f64 {
        self.altitude.meters()
    }
}

/// Long air-air surveillance reply (DF 16)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LongAcas {
    #[serde(flatten)]
    envelope: RawEnvelope,
    airborne: bool,
    sensitivity_level: u8,
    reply_information: u8,
    maximum_airspeed: MaximumAirspeed,
    altitude: AltitudeCode,
    resolution_advisory: Option<ResolutionAdvisory>,
}

impl LongAcas {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        envelope.expect_downlink_format(&[16])?;

        let payload = envelope.payload();
        let fields = AcasFields::decode(payload);
        let mut mv = [0u8; 7];
        mv.copy_from_slice(&payload[3..10]);

        // MV starting with 0x30 is a register 3,0 report
        let resolution_advisory = (mv[0] == 0x30).then(|| ResolutionAdvisory::decode(&mv));

        Ok(Self {
            airborne: envelope.first_field() & 0x04 == 0,
            sensitivity_level: fields.sensitivity_level,
            reply_information: fields.reply_information,
            maximum_airspeed: MaximumAirspeed::from_reply_information(fields.reply_information),
            altitude: fields.altitude_code,
            resolution_advisory,
            envelope,
        })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(RawEnvelope::from_hex(hex)?)
    }

    pub fn envelope(&self) -> &RawEnvelope {
        &self.envelope
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn sensitivity_level(&self) -> u8 {
        self.sensitivity_level
    }

    pub fn reply_information(&self) -> u8 {
        self.reply_information
    }

    pub fn reply_information_description(&self) -> &'static str {
        reply_information_description(self.reply_information)
    }

    pub fn maximum_airspeed(&self) -> MaximumAirspeed {
        self.maximum_airspeed
    }

    pub fn has_operating_acas(&self) -> bool {
        self.reply_information != 0
    }

    pub fn altitude_code(&self) -> AltitudeCode {
        self.altitude
    }

    /// Altitude in meters.
    pub fn altitude(&self) -> f64 {
        self.altitude.meters()
    }

    /// The 56-bit MV field.
    pub fn message(&self) -> [u8; 7] {
        let mut mv = [0u8; 7];
        mv.copy_from_slice(&self.envelope.payload()[3..10]);
        mv
    }

    pub fn resolution_advisory(&self) -> Option<&ResolutionAdvisory> {
        self.resolution_advisory.as_ref()
    }
}
