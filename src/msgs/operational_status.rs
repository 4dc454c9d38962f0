//! Aircraft operational status (FTC 31, subtypes 0 and 1)
//!
//! Decoded with the version 1 and 2 layout. Version 0 transmitters send
//! this message rarely and leave most fields zero.
//!
//! ```plain
//! ME byte  0        1 2                 3 4                  5        6
//!          TTTTTsss capability class    operational mode     VVVNpppp ggssBH..
//! ```

use serde::Serialize;

use crate::envelope::{ExtendedSquitter, RawEnvelope};
use crate::error::Result;

/// Capability class codes, laid out differently for airborne and surface
/// participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapabilityClass {
    Airborne {
        acas_operational: bool,
        es_in: bool,
        air_referenced_velocity: bool,
        target_state_report: bool,
        trajectory_change_report: u8,
        uat_in: bool,
    },
    Surface {
        position_offset_applied: bool,
        es_in: bool,
        class_b2_low_power: bool,
        uat_in: bool,
        nac_v: u8,
        nic_supplement_c: bool,
        /// Aircraft length and width code
        length_width: u8,
    },
}

impl CapabilityClass {
    fn decode(surface: bool, cc: u16) -> Self {
        if surface {
            Self::Surface {
                position_offset_applied: cc & 0x2000 != 0,
                es_in: cc & 0x1000 != 0,
                class_b2_low_power: cc & 0x0200 != 0,
                uat_in: cc & 0x0100 != 0,
                nac_v: ((cc >> 5) & 0x07) as u8,
                nic_supplement_c: cc & 0x0010 != 0,
                length_width: (cc & 0x000F) as u8,
            }
        } else {
            Self::Airborne {
                acas_operational: cc & 0x2000 != 0,
                es_in: cc & 0x1000 != 0,
                air_referenced_velocity: cc & 0x0200 != 0,
                target_state_report: cc & 0x0100 != 0,
                trajectory_change_report: ((cc >> 6) & 0x03) as u8,
                uat_in: cc & 0x0020 != 0,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OperationalMode {
    pub tcas_ra_active: bool,
    pub ident_switch_active: bool,
    pub receiving_atc_services: bool,
    pub single_antenna: bool,
    pub system_design_assurance: u8,
    /// Surface only, 0 when airborne
    pub gps_antenna_offset: u8,
}

impl OperationalMode {
    fn decode(om: u16) -> Self {
        Self {
            tcas_ra_active: om & 0x2000 != 0,
            ident_switch_active: om & 0x1000 != 0,
            receiving_atc_services: om & 0x0800 != 0,
            single_antenna: om & 0x0400 != 0,
            system_design_assurance: ((om >> 8) & 0x03) as u8,
            gps_antenna_offset: (om & 0x00FF) as u8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OperationalStatus {
    #[serde(flatten)]
    squitter: ExtendedSquitter,
    capability_class: CapabilityClass,
    operational_mode: OperationalMode,
    version: u8,
    nic_supplement_a: bool,
    nac_p: u8,
    geometric_vertical_accuracy: u8,
    source_integrity_level: u8,
    nic_baro_or_track_heading: bool,
    horizontal_reference_magnetic: bool,
}

impl OperationalStatus {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        let squitter = ExtendedSquitter::new(envelope)?;
        squitter.expect_format(&[31], &[0, 1])?;

        let me = squitter.message();
        let cc = (u16::from(me[1]) << 8) | u16::from(me[2]);
        let om = (u16::from(me[3]) << 8) | u16::from(me[4]);

        Ok(Self {
            capability_class: CapabilityClass::decode(squitter.subtype() == 1, cc),
            operational_mode: OperationalMode::decode(om),
            version: me[5] >> 5,
            nic_supplement_a: me[5] & 0x10 != 0,
            nac_p: me[5] & 0x0F,
            geometric_vertical_accuracy: me[6] >> 6,
            source_integrity_level: (me[6] >> 4) & 0x03,
            nic_baro_or_track_heading: me[6] & 0x08 != 0,
            horizontal_reference_magnetic: me[6] & 0x04 != 0,
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

    pub fn is_surface(&self) -> bool {
        self.squitter.subtype() == 1
    }

    pub fn capability_class(&self) -> &CapabilityClass {
        &self.capability_class
    }

    pub fn operational_mode(&self) -> &OperationalMode {
        &self.operational_mode
    }

    /// ADS-B version number (0, 1 or 2).
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn nic_supplement_a(&self) -> bool {
        self.nic_supplement_a
    }

    /// Navigation accuracy category for position
    pub fn nac_p(&self) -> u8 {
        self.nac_p
    }

    /// Reserved for surface participants.
    pub fn geometric_vertical_accuracy(&self) -> u8 {
        self.geometric_vertical_accuracy
    }

    pub fn source_integrity_level(&self) -> u8 {
        self.source_integrity_level
    }

    /// NIC-baro when airborne, track angle/heading flag on the surface.
    pub fn nic_baro_or_track_heading(&self) -> bool {
        self.nic_baro_or_track_heading
    }

    /// Horizontal reference direction: magnetic north if set, true north
    /// otherwise.
    pub fn horizontal_reference_magnetic(&self) -> bool {
        self.horizontal_reference_magnetic
    }
}
