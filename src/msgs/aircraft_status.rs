//! Extended squitter aircraft status (FTC 28)

use serde::Serialize;

use crate::envelope::{ExtendedSquitter, RawEnvelope};
use crate::error::Result;
use crate::identity::{IdentityCode, Squawk};
use crate::msgs::resolution_advisory::ResolutionAdvisory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyState {
    NoEmergency,
    GeneralEmergency,
    LifeguardMedical,
    MinimumFuel,
    NoCommunications,
    UnlawfulInterference,
    DownedAircraft,
    Reserved,
}

impl EmergencyState {
    pub fn from_u8(value: u8) -> Self {
        match value & 0x07 {
            0 => Self::NoEmergency,
            1 => Self::GeneralEmergency,
            2 => Self::LifeguardMedical,
            3 => Self::MinimumFuel,
            4 => Self::NoCommunications,
            5 => Self::UnlawfulInterference,
            6 => Self::DownedAircraft,
            _ => Self::Reserved,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NoEmergency => "no emergency",
            Self::GeneralEmergency => "general emergency",
            Self::LifeguardMedical => "lifeguard/medical",
            Self::MinimumFuel => "minimum fuel",
            Self::NoCommunications => "no communications",
            Self::UnlawfulInterference => "unlawful interference",
            Self::DownedAircraft => "downed aircraft",
            Self::Reserved => "reserved",
        }
    }
}

/// Emergency/priority status (subtype 1)
///
/// ```plain
/// ME byte  0        1        2
///          TTTTTsss eeeiiiii iiiiiiii
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmergencyStatus {
    #[serde(flatten)]
    squitter: ExtendedSquitter,
    emergency_state: EmergencyState,
    identity: IdentityCode,
}

impl EmergencyStatus {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        let squitter = ExtendedSquitter::new(envelope)?;
        squitter.expect_format(&[28], &[1])?;

        let me = squitter.message();
        Ok(Self {
            emergency_state: EmergencyState::from_u8(me[1] >> 5),
            identity: IdentityCode::from_frame_bytes(me[1] & 0x1F, me[2]),
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

    pub fn emergency_state(&self) -> EmergencyState {
        self.emergency_state
    }

    pub fn identity_code(&self) -> IdentityCode {
        self.identity
    }

    pub fn squawk(&self) -> Squawk {
        self.identity.squawk()
    }
}

/// 1090ES TCAS resolution advisory (subtype 2)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TcasResolutionAdvisory {
    #[serde(flatten)]
    squitter: ExtendedSquitter,
    advisory: ResolutionAdvisory,
}

impl TcasResolutionAdvisory {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        let squitter = ExtendedSquitter::new(envelope)?;
        squitter.expect_format(&[28], &[2])?;

        Ok(Self {
            advisory: ResolutionAdvisory::decode(&squitter.message()),
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

    pub fn advisory(&self) -> &ResolutionAdvisory {
        &self.advisory
    }
}
