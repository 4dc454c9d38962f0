//! Surface (FTC 5-8) and airborne (FTC 9-18, 20-22) position messages
//!
//! Positions are delivered as raw CPR encoded latitude and longitude. Global
//! decoding needs an even/odd pair (or a reference position) and is left to
//! the caller.
//!
//! ```plain
//! ME byte  0        1        2        3        4        5        6
//! surface  TTTTTmmm mmmmSttt ttttTFll llllllll lllllllL LLLLLLLL LLLLLLLL
//! airborne TTTTTssN aaaaaaaa aaaaTFll llllllll lllllllL LLLLLLLL LLLLLLLL
//! ```

use serde::Serialize;

use crate::altitude::EsAltitudeCode;
use crate::envelope::{ExtendedSquitter, RawEnvelope, ALL_SUBTYPES};
use crate::error::Result;
use crate::msgs::KNOTS_TO_MPS;

/// Raw 17-bit CPR coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CprFrame {
    /// `false` for even, `true` for odd format
    pub odd_format: bool,
    pub latitude: u32,
    pub longitude: u32,
}

impl CprFrame {
    fn decode(me: &[u8; 7]) -> Self {
        Self {
            odd_format: me[2] & 0x04 != 0,
            latitude: (u32::from(me[2] & 0x03) << 15) | (u32::from(me[3]) << 7) | u32::from(me[4] >> 1),
            longitude: (u32::from(me[4] & 0x01) << 16) | (u32::from(me[5]) << 8) | u32::from(me[6]),
        }
    }
}

/// Ground speed from the 7-bit surface movement field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundMovement {
    NotAvailable,
    /// Below 0.125 kt
    Stopped,
    /// Speed in m/s
    Moving(f64),
    /// 175 kt or more
    AtLeast175Knots,
    Reserved,
}

impl GroundMovement {
    pub fn from_u8(movement: u8) -> Self {
        let knots = |base: f64, step: f64, first: u8| base + f64::from(movement - first) * step;

        match movement {
            0 => Self::NotAvailable,
            1 => Self::Stopped,
            2..=8 => Self::Moving(knots(0.125, 0.125, 2) * KNOTS_TO_MPS),
            9..=12 => Self::Moving(knots(1.0, 0.25, 9) * KNOTS_TO_MPS),
            13..=38 => Self::Moving(knots(2.0, 0.5, 13) * KNOTS_TO_MPS),
            39..=93 => Self::Moving(knots(15.0, 1.0, 39) * KNOTS_TO_MPS),
            94..=108 => Self::Moving(knots(70.0, 2.0, 94) * KNOTS_TO_MPS),
            109..=123 => Self::Moving(knots(100.0, 5.0, 109) * KNOTS_TO_MPS),
            124 => Self::AtLeast175Knots,
            _ => Self::Reserved,
        }
    }

    /// Speed in m/s. 0 when stopped, `None` if not available or reserved.
    pub fn speed(&self) -> Option<f64> {
        match *self {
            Self::Stopped => Some(0.0),
            Self::Moving(speed) => Some(speed),
            Self::AtLeast175Knots => Some(175.0 * KNOTS_TO_MPS),
            Self::NotAvailable | Self::Reserved => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfacePosition {
    #[serde(flatten)]
    squitter: ExtendedSquitter,
    movement: GroundMovement,
    ground_track_valid: bool,
    ground_track_code: u8,
    time_synchronized: bool,
    cpr: CprFrame,
}

impl SurfacePosition {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        let squitter = ExtendedSquitter::new(envelope)?;
        squitter.expect_format(&[5, 6, 7, 8], ALL_SUBTYPES)?;

        let me = squitter.message();
        Ok(Self {
            movement: GroundMovement::from_u8(((me[0] & 0x07) << 4) | (me[1] >> 4)),
            ground_track_valid: me[1] & 0x08 != 0,
            ground_track_code: ((me[1] & 0x07) << 4) | (me[2] >> 4),
            time_synchronized: me[2] & 0x08 != 0,
            cpr: CprFrame::decode(&me),
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

    pub fn movement(&self) -> GroundMovement {
        self.movement
    }

    /// Ground speed in m/s, see [`GroundMovement::speed`].
    pub fn ground_speed(&self) -> Option<f64> {
        self.movement.speed()
    }

    pub fn has_ground_track(&self) -> bool {
        self.ground_track_valid
    }

    /// Ground track in degrees clockwise from true north, if valid.
    pub fn ground_track(&self) -> Option<f64> {
        self.ground_track_valid
            .then(|| f64::from(self.ground_track_code) * 360.0 / 128.0)
    }

    /// Whether the time of applicability is synchronized to UTC.
    pub fn is_time_synchronized(&self) -> bool {
        self.time_synchronized
    }

    pub fn cpr(&self) -> CprFrame {
        self.cpr
    }

    pub fn is_odd_format(&self) -> bool {
        self.cpr.odd_format
    }

    /// Horizontal containment radius limit in meters.
    pub fn horizontal_containment_radius(&self) -> Option<f64> {
        match self.squitter.format_type_code() {
            5 => Some(7.5),
            6 => Some(25.0),
            7 => Some(185.2),
            _ => None,
        }
    }

    /// Navigation integrity category.
    pub fn navigation_integrity_category(&self) -> u8 {
        match self.squitter.format_type_code() {
            5 => 11,
            6 => 10,
            7 => 8,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AirbornePosition {
    #[serde(flatten)]
    squitter: ExtendedSquitter,
    surveillance_status: u8,
    nic_supplement: bool,
    altitude_code: u16,
    time_synchronized: bool,
    cpr: CprFrame,
}

impl AirbornePosition {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        let squitter = ExtendedSquitter::new(envelope)?;
        squitter.expect_format(
            &[9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 20, 21, 22],
            ALL_SUBTYPES,
        )?;

        let me = squitter.message();
        Ok(Self {
            surveillance_status: (me[0] >> 1) & 0x03,
            nic_supplement: me[0] & 0x01 != 0,
            altitude_code: ((u16::from(me[1]) << 4) | u16::from(me[2] >> 4)) & 0x0FFF,
            time_synchronized: me[2] & 0x08 != 0,
            cpr: CprFrame::decode(&me),
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

    pub fn surveillance_status(&self) -> u8 {
        self.surveillance_status
    }

    pub fn surveillance_status_description(&self) -> &'static str {
        match self.surveillance_status {
            0 => "No condition information",
            1 => "Permanent alert (emergency condition)",
            2 => "Temporary alert (change in Mode A identity code other than emergency condition)",
            _ => "SPI condition",
        }
    }

    pub fn nic_supplement(&self) -> bool {
        self.nic_supplement
    }

    /// Barometric altitude for FTC 9-18, GNSS height for FTC 20-22.
    pub fn is_barometric_altitude(&self) -> bool {
        self.squitter.format_type_code() < 19
    }

    /// The raw 12-bit altitude field.
    pub fn altitude_code(&self) -> u16 {
        self.altitude_code
    }

    /// Altitude in meters, `None` if not available.
    pub fn altitude(&self) -> Option<f64> {
        if self.is_barometric_altitude() {
            EsAltitudeCode::from_u16(self.altitude_code).meters()
        } else {
            (self.altitude_code != 0).then(|| f64::from(self.altitude_code))
        }
    }

    pub fn is_time_synchronized(&self) -> bool {
        self.time_synchronized
    }

    pub fn cpr(&self) -> CprFrame {
        self.cpr
    }

    pub fn is_odd_format(&self) -> bool {
        self.cpr.odd_format
    }

    /// Horizontal containment radius limit in meters.
    pub fn horizontal_containment_radius(&self) -> Option<f64> {
        let radius = match self.squitter.format_type_code() {
            9 | 20 => 7.5,
            10 | 21 => 25.0,
            11 if self.nic_supplement => 75.0,
            11 => 185.2,
            12 => 370.4,
            13 if self.nic_supplement => 1111.2,
            13 => 926.0,
            14 => 1852.0,
            15 => 3704.0,
            16 if self.nic_supplement => 7408.0,
            16 => 14816.0,
            17 => 37040.0,
            _ => return None,
        };
        Some(radius)
    }

    /// Navigation integrity category.
    pub fn navigation_integrity_category(&self) -> u8 {
        match self.squitter.format_type_code() {
            9 | 20 => 11,
            10 | 21 => 10,
            11 if self.nic_supplement => 9,
            11 => 8,
            12 => 7,
            13 => 6,
            14 => 5,
            15 => 4,
            16 if self.nic_supplement => 3,
            16 => 2,
            17 => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_airborne_position() {
        let msg = AirbornePosition::from_hex("8D40621D58C382D690C8AC2863A7").unwrap();
        assert_eq!(msg.squitter().format_type_code(), 11);
        assert_eq!(msg.surveillance_status(), 0);
        assert!(!msg.nic_supplement());
        assert!(msg.is_barometric_altitude());
        assert_eq!(msg.altitude_code(), 0xC38);
        assert_relative_eq!(msg.altitude().unwrap(), 38000.0 * 0.3048, epsilon = 1e-6);
        assert!(!msg.is_time_synchronized());
        assert!(!msg.is_odd_format());
        assert_eq!(msg.cpr().latitude, 93000);
        assert_eq!(msg.cpr().longitude, 51372);
        assert_eq!(msg.horizontal_containment_radius(), Some(185.2));
        assert_eq!(msg.navigation_integrity_category(), 8);
    }

    #[test]
    fn test_airborne_position_odd_frame() {
        let msg = AirbornePosition::from_hex("8D40621D58C386435CC412692AD6").unwrap();
        assert!(msg.is_odd_format());
        assert_eq!(msg.cpr().latitude, 74158);
        assert_eq!(msg.cpr().longitude, 50194);
    }

    #[test]
    fn test_gnss_height() {
        // FTC 20, altitude field 0x123 = 291 m
        let msg = AirbornePosition::from_hex("8D40621DA0123000000000000000").unwrap();
        assert!(!msg.is_barometric_altitude());
        assert_eq!(msg.altitude(), Some(291.0));
        assert_eq!(msg.horizontal_containment_radius(), Some(7.5));
        assert_eq!(msg.navigation_integrity_category(), 11);
    }

    #[test]
    fn test_altitude_not_available() {
        // FTC 18 is the lowest integrity, altitude code 0
        let msg = AirbornePosition::from_hex("8D40621D90000000000000000000").unwrap();
        assert_eq!(msg.altitude(), None);
        assert_eq!(msg.horizontal_containment_radius(), None);
        assert_eq!(msg.navigation_integrity_category(), 0);
    }

    #[test]
    fn test_nic_supplement_refines_containment() {
        // FTC 16 with and without the supplement bit
        let with = AirbornePosition::from_hex("8D40621D81C382D690C8AC2863A7").unwrap();
        let without = AirbornePosition::from_hex("8D40621D80C382D690C8AC2863A7").unwrap();
        assert!(with.nic_supplement());
        assert_eq!(with.horizontal_containment_radius(), Some(7408.0));
        assert_eq!(with.navigation_integrity_category(), 3);
        assert_eq!(without.horizontal_containment_radius(), Some(14816.0));
        assert_eq!(without.navigation_integrity_category(), 2);
    }

    #[test]
    fn test_surface_position() {
        let msg = SurfacePosition::from_hex("8C4841753A9A153237AEF0F275BE").unwrap();
        assert_eq!(msg.squitter().format_type_code(), 7);
        assert_eq!(msg.movement(), GroundMovement::Moving(17.0 * KNOTS_TO_MPS));
        assert!(msg.has_ground_track());
        assert_relative_eq!(msg.ground_track().unwrap(), 92.8125);
        assert!(msg.is_odd_format());
        assert_eq!(msg.cpr().latitude, 39195);
        assert_eq!(msg.cpr().longitude, 110320);
        assert_eq!(msg.horizontal_containment_radius(), Some(185.2));
        assert_eq!(msg.navigation_integrity_category(), 8);
    }

    #[test]
    fn test_ground_movement_table() {
        assert_eq!(GroundMovement::from_u8(0), GroundMovement::NotAvailable);
        assert_eq!(GroundMovement::from_u8(0).speed(), None);
        assert_eq!(GroundMovement::from_u8(1), GroundMovement::Stopped);
        assert_eq!(GroundMovement::from_u8(1).speed(), Some(0.0));
        assert_eq!(GroundMovement::from_u8(124), GroundMovement::AtLeast175Knots);
        assert_eq!(GroundMovement::from_u8(125), GroundMovement::Reserved);
        assert_eq!(GroundMovement::from_u8(127).speed(), None);

        let knots = |m: u8| GroundMovement::from_u8(m).speed().unwrap() / KNOTS_TO_MPS;
        assert_relative_eq!(knots(2), 0.125, epsilon = 1e-9);
        assert_relative_eq!(knots(8), 0.875, epsilon = 1e-9);
        assert_relative_eq!(knots(9), 1.0, epsilon = 1e-9);
        assert_relative_eq!(knots(12), 1.75, epsilon = 1e-9);
        assert_relative_eq!(knots(13), 2.0, epsilon = 1e-9);
        assert_relative_eq!(knots(38), 14.5, epsilon = 1e-9);
        assert_relative_eq!(knots(39), 15.0, epsilon = 1e-9);
        assert_relative_eq!(knots(93), 69.0, epsilon = 1e-9);
        assert_relative_eq!(knots(94), 70.0, epsilon = 1e-9);
        assert_relative_eq!(knots(108), 98.0, epsilon = 1e-9);
        assert_relative_eq!(knots(109), 100.0, epsilon = 1e-9);
        assert_relative_eq!(knots(123), 170.0, epsilon = 1e-9);
    }
}
