//! Fields shared by several downlink formats

use serde::Serialize;

/// 3-bit flight status (DF 4, 5, 20, 21)
///
/// <https://mode-s.org/1090mhz/content/mode-s/3-surveillance.html>
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FlightStatus(u8);

impl FlightStatus {
    pub const fn from_u8(byte: u8) -> Self {
        Self(byte & 0x07)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn has_alert(&self) -> bool {
        matches!(self.0, 2 | 3 | 4)
    }

    pub fn has_spi(&self) -> bool {
        matches!(self.0, 4 | 5)
    }

    /// Known to be on the ground. Status 4 and 5 don't tell.
    pub fn is_on_ground(&self) -> bool {
        matches!(self.0, 1 | 3)
    }

    /// Known to be airborne. Status 4 and 5 don't tell.
    pub fn is_airborne(&self) -> bool {
        matches!(self.0, 0 | 2)
    }

    pub fn description(&self) -> &'static str {
        match self.0 {
            0 => "Normal, Airborne",
            1 => "Normal, On the ground",
            2 => "ALERT, Airborne",
            3 => "ALERT, On the ground",
            4 => "ALERT & Special Position Identification",
            5 => "Special Position Identification",
            _ => "Not assigned",
        }
    }
}

/// 5-bit downlink request
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DownlinkRequest(u8);

impl DownlinkRequest {
    pub const fn from_u8(byte: u8) -> Self {
        Self(byte & 0x1F)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn description(&self) -> &'static str {
        match self.0 {
            0 => "No downlink request",
            1 => "Request to send Comm-B message",
            4 => "Comm-B broadcast message 1 available",
            5 => "Comm-B broadcast message 2 available",
            16..=31 => "Extended length message",
            _ => "Not assigned",
        }
    }
}

/// 6-bit utility message
///
/// ```plain
/// bit   5 4 3 2 1 0
///       i i i i t t     IIS (interrogator identifier), IDS (reservation type)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UtilityMessage(u8);

impl UtilityMessage {
    pub const fn from_u8(byte: u8) -> Self {
        Self(byte & 0x3F)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// IIS subfield
    pub fn interrogator_identifier(&self) -> u8 {
        self.0 >> 2
    }

    /// IDS subfield
    pub fn reservation_type(&self) -> u8 {
        self.0 & 0x03
    }
}

/// 3-bit transponder capability (DF 11, 17)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Capability(u8);

impl Capability {
    pub const fn from_u8(byte: u8) -> Self {
        Self(byte & 0x07)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn description(&self) -> &'static str {
        match self.0 {
            0 => "Level 1 (Surveillance Only)",
            1..=3 => "Reserved",
            4 => "Level 2+ (on ground)",
            5 => "Level 2+ (airborne)",
            6 => "Level 2+ (on ground or airborne)",
            _ => "DR not zero or FS 2-5 (on ground or airborne)",
        }
    }
}

/// Leading fields of a surveillance or Comm-B reply payload.
///
/// ```plain
/// payload [0]      [1]      [2]
///         ddddduuu uuuaaaaa aaaaaaaa
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SurveillanceFields {
    pub flight_status: FlightStatus,
    pub downlink_request: DownlinkRequest,
    pub utility_message: UtilityMessage,
}

impl SurveillanceFields {
    pub fn decode(first_field: u8, payload: &[u8]) -> Self {
        Self {
            flight_status: FlightStatus::from_u8(first_field),
            downlink_request: DownlinkRequest::from_u8(payload[0] >> 3),
            utility_message: UtilityMessage::from_u8(((payload[0] & 0x07) << 3) | (payload[1] >> 5)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_status_flags() {
        let table = [
            // fs, alert, spi, ground, airborne
            (0, false, false, false, true),
            (1, false, false, true, false),
            (2, true, false, false, true),
            (3, true, false, true, false),
            (4, true, true, false, false),
            (5, false, true, false, false),
        ];
        for (fs, alert, spi, ground, airborne) in table {
            let status = FlightStatus::from_u8(fs);
            assert_eq!(status.has_alert(), alert, "fs {}", fs);
            assert_eq!(status.has_spi(), spi, "fs {}", fs);
            assert_eq!(status.is_on_ground(), ground, "fs {}", fs);
            assert_eq!(status.is_airborne(), airborne, "fs {}", fs);
        }
    }

    #[test]
    fn test_surveillance_fields() {
        // dr = 0b10101, um = 0b011110
        let fields = SurveillanceFields::decode(0x05, &[0b1010_1011, 0b1101_0000, 0x00]);
        assert_eq!(fields.flight_status.as_u8(), 5);
        assert_eq!(fields.downlink_request.as_u8(), 0b10101);
        assert_eq!(fields.utility_message.as_u8(), 0b011110);
        assert_eq!(fields.utility_message.interrogator_identifier(), 0b0111);
        assert_eq!(fields.utility_message.reservation_type(), 0b10);
    }
}
