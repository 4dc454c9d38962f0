//! Airborne velocity (FTC 19)
//!
//! Subtypes 1 and 2 carry velocity over ground, 3 and 4 airspeed and
//! heading. Subtypes 2 and 4 are the supersonic variants with 4 kt units.
//!
//! ```plain
//! ME byte  0        1        2        3        4        5        6
//! ground   TTTTTsss IIfffWee eeeeeeee Snnnnnnn nnnBDvvv vvvvvv.. Gggggggg
//! air      TTTTTsss IIfffHhh hhhhhhhh Taaaaaaa aaaBDvvv vvvvvv.. Gggggggg
//! ```
//!
//! Every speed field is offset by one, a raw 0 means "not available".

use serde::Serialize;

use crate::altitude::FEET_TO_METERS;
use crate::envelope::{ExtendedSquitter, RawEnvelope};
use crate::error::Result;
use crate::msgs::KNOTS_TO_MPS;

const FEET_PER_MINUTE_TO_MPS: f64 = FEET_TO_METERS / 60.0;

/// A sign and magnitude field with the magnitude offset by one.
fn signed_field(negative: bool, raw: u16, unit: f64) -> Option<f64> {
    if raw == 0 {
        return None;
    }
    let value = f64::from(raw - 1) * unit;
    Some(if negative { -value } else { value })
}

/// Fields common to all velocity subtypes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VelocityCommon {
    pub intent_change: bool,
    pub ifr_capability: bool,
    /// Navigation accuracy category for velocity
    pub nac_v: u8,
    /// Vertical rate from barometric altitude (otherwise GNSS)
    pub barometric_vertical_rate: bool,
    /// Vertical rate in m/s, positive up
    pub vertical_rate: Option<f64>,
    /// GNSS height minus barometric altitude in meters
    pub geo_minus_baro: Option<f64>,
}

impl VelocityCommon {
    fn decode(me: &[u8; 7]) -> Self {
        let vertical_rate_raw = (u16::from(me[4] & 0x07) << 6) | u16::from(me[5] >> 2);
        Self {
            intent_change: me[1] & 0x80 != 0,
            ifr_capability: me[1] & 0x40 != 0,
            nac_v: (me[1] >> 3) & 0x07,
            barometric_vertical_rate: me[4] & 0x10 != 0,
            vertical_rate: signed_field(
                me[4] & 0x08 != 0,
                vertical_rate_raw,
                64.0 * FEET_PER_MINUTE_TO_MPS,
            ),
            geo_minus_baro: signed_field(
                me[6] & 0x80 != 0,
                u16::from(me[6] & 0x7F),
                25.0 * FEET_TO_METERS,
            ),
        }
    }
}

/// Velocity over ground (subtypes 1 and 2)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VelocityOverGround {
    #[serde(flatten)]
    squitter: ExtendedSquitter,
    #[serde(flatten)]
    common: VelocityCommon,
    /// m/s, positive east
    east_west_velocity: Option<f64>,
    /// m/s, positive north
    north_south_velocity: Option<f64>,
}

impl VelocityOverGround {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        let squitter = ExtendedSquitter::new(envelope)?;
        squitter.expect_format(&[19], &[1, 2])?;

        let me = squitter.message();
        let unit = if squitter.subtype() == 2 {
            4.0 * KNOTS_TO_MPS
        } else {
            KNOTS_TO_MPS
        };

        Ok(Self {
            common: VelocityCommon::decode(&me),
            east_west_velocity: signed_field(
                me[1] & 0x04 != 0,
                (u16::from(me[1] & 0x03) << 8) | u16::from(me[2]),
                unit,
            ),
            north_south_velocity: signed_field(
                me[3] & 0x80 != 0,
                (u16::from(me[3] & 0x7F) << 3) | u16::from(me[4] >> 5),
                unit,
            ),
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

    pub fn common(&self) -> &VelocityCommon {
        &self.common
    }

    pub fn is_supersonic(&self) -> bool {
        self.squitter.subtype() == 2
    }

    pub fn east_west_velocity(&self) -> Option<f64> {
        self.east_west_velocity
    }

    pub fn north_south_velocity(&self) -> Option<f64> {
        self.north_south_velocity
    }

    /// Ground speed in m/s.
    pub fn ground_speed(&self) -> Option<f64> {
        let (ew, ns) = (self.east_west_velocity?, self.north_south_velocity?);
        Some((ew * ew + ns * ns).sqrt())
    }

    /// Track angle in degrees clockwise from true north.
    pub fn track(&self) -> Option<f64> {
        let (ew, ns) = (self.east_west_velocity?, self.north_south_velocity?);
        let mut track = ew.atan2(ns).to_degrees();
        if track < 0.0 {
            track += 360.0;
        }
        Some(track)
    }

    /// Vertical rate in m/s, positive up.
    pub fn vertical_rate(&self) -> Option<f64> {
        self.common.vertical_rate
    }
}

/// Airspeed and heading (subtypes 3 and 4)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AirspeedHeading {
    #[serde(flatten)]
    squitter: ExtendedSquitter,
    #[serde(flatten)]
    common: VelocityCommon,
    heading: Option<f64>,
    true_airspeed: bool,
    airspeed: Option<f64>,
}

impl AirspeedHeading {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        let squitter = ExtendedSquitter::new(envelope)?;
        squitter.expect_format(&[19], &[3, 4])?;

        let me = squitter.message();
        let unit = if squitter.subtype() == 4 {
            4.0 * KNOTS_TO_MPS
        } else {
            KNOTS_TO_MPS
        };
        let heading_code = (u16::from(me[1] & 0x03) << 8) | u16::from(me[2]);

        Ok(Self {
            common: VelocityCommon::decode(&me),
            heading: (me[1] & 0x04 != 0).then(|| f64::from(heading_code) * 360.0 / 1024.0),
            true_airspeed: me[3] & 0x80 != 0,
            airspeed: signed_field(
                false,
                (u16::from(me[3] & 0x7F) << 3) | u16::from(me[4] >> 5),
                unit,
            ),
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

    pub fn common(&self) -> &VelocityCommon {
        &self.common
    }

    pub fn is_supersonic(&self) -> bool {
        self.squitter.subtype() == 4
    }

    /// Magnetic heading in degrees, if available.
    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    /// True airspeed if set, indicated airspeed otherwise.
    pub fn is_true_airspeed(&self) -> bool {
        self.true_airspeed
    }

    /// Airspeed in m/s.
    pub fn airspeed(&self) -> Option<f64> {
        self.airspeed
    }

    /// Vertical rate in m/s, positive up.
    pub fn vertical_rate(&self) -> Option<f64> {
        self.common.vertical_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_velocity_over_ground() {
        let msg = VelocityOverGround::from_hex("8D485020994409940838175B284F").unwrap();
        assert!(!msg.is_supersonic());
        let common = msg.common();
        assert!(!common.intent_change);
        assert!(common.ifr_capability);
        assert_eq!(common.nac_v, 0);
        assert!(!common.barometric_vertical_rate);

        assert_relative_eq!(msg.east_west_velocity().unwrap(), -8.0 * KNOTS_TO_MPS);
        assert_relative_eq!(msg.north_south_velocity().unwrap(), -159.0 * KNOTS_TO_MPS);
        assert_relative_eq!(
            msg.ground_speed().unwrap() / KNOTS_TO_MPS,
            159.20,
            epsilon = 0.01
        );
        assert_relative_eq!(msg.track().unwrap(), 182.88, epsilon = 0.01);
        assert_relative_eq!(
            msg.vertical_rate().unwrap(),
            -832.0 * FEET_PER_MINUTE_TO_MPS,
            epsilon = 1e-9
        );
        assert_relative_eq!(common.geo_minus_baro.unwrap(), 550.0 * FEET_TO_METERS, epsilon = 1e-9);
    }

    #[test]
    fn test_velocity_not_available() {
        // all velocity fields zero
        let msg = VelocityOverGround::from_hex("8D48502099000000000000000000").unwrap();
        assert_eq!(msg.east_west_velocity(), None);
        assert_eq!(msg.north_south_velocity(), None);
        assert_eq!(msg.ground_speed(), None);
        assert_eq!(msg.track(), None);
        assert_eq!(msg.vertical_rate(), None);
        assert_eq!(msg.common().geo_minus_baro, None);
    }

    #[test]
    fn test_supersonic_velocity() {
        // subtype 2, east 10 raw -> 9 * 4 kt
        let msg = VelocityOverGround::from_hex("8D4850209A000A00000000000000").unwrap();
        assert!(msg.is_supersonic());
        assert_relative_eq!(msg.east_west_velocity().unwrap(), 36.0 * KNOTS_TO_MPS);
        assert_eq!(msg.north_south_velocity(), None);
        assert_eq!(msg.track(), None);
    }

    #[test]
    fn test_airspeed_heading() {
        let msg = AirspeedHeading::from_hex("8DA05F219B06B6AF189400CBC33F").unwrap();
        assert!(!msg.is_supersonic());
        assert_relative_eq!(msg.heading().unwrap(), 243.984375);
        assert!(msg.is_true_airspeed());
        assert_relative_eq!(msg.airspeed().unwrap(), 375.0 * KNOTS_TO_MPS);
        assert!(msg.common().barometric_vertical_rate);
        assert_relative_eq!(
            msg.vertical_rate().unwrap(),
            -2304.0 * FEET_PER_MINUTE_TO_MPS,
            epsilon = 1e-9
        );
        assert_eq!(msg.common().geo_minus_baro, None);
    }

    #[test]
    fn test_velocity_subtypes_are_checked() {
        assert!(VelocityOverGround::from_hex("8DA05F219B06B6AF189400CBC33F").is_err());
        assert!(AirspeedHeading::from_hex("8D485020994409940838175B284F").is_err());
    }
}
