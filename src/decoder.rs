//! Message type dispatcher
//!
//! Routes a parsed envelope to the most specific decoder by downlink format
//! and, for extended squitters, by format type code and subtype. Formats
//! without a decoder are returned as fallback values, never as errors.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::envelope::{ExtendedSquitter, IcaoAddress, RawEnvelope, EXTENDED_SQUITTER_FORMATS};
use crate::error::Result;
use crate::msgs::{
    AirbornePosition, AirspeedHeading, AllCallReply, AltitudeReply, CommBAltitudeReply,
    CommBIdentifyReply, EmergencyStatus, GroundMovement, Identification, IdentifyReply, LongAcas,
    MaximumAirspeed, OperationalStatus, ShortAcas, SurfacePosition, TcasResolutionAdvisory,
    VelocityOverGround,
};

/// A decoded Mode S message.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModesMessage {
    ShortAcas(ShortAcas),
    LongAcas(LongAcas),
    AltitudeReply(AltitudeReply),
    IdentifyReply(IdentifyReply),
    AllCallReply(AllCallReply),
    Identification(Identification),
    SurfacePosition(SurfacePosition),
    AirbornePosition(AirbornePosition),
    VelocityOverGround(VelocityOverGround),
    AirspeedHeading(AirspeedHeading),
    EmergencyStatus(EmergencyStatus),
    TcasResolutionAdvisory(TcasResolutionAdvisory),
    OperationalStatus(OperationalStatus),
    CommBAltitudeReply(CommBAltitudeReply),
    CommBIdentifyReply(CommBIdentifyReply),
    /// Extended squitter with a format type code or subtype without decoder.
    UnknownExtendedSquitter(ExtendedSquitter),
    /// Downlink format without decoder.
    Unknown(RawEnvelope),
}

/// Parse and decode a hex string.
pub fn decode(hex: &str) -> Result<ModesMessage> {
    decode_envelope(RawEnvelope::from_hex(hex)?)
}

/// Decode raw frame bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<ModesMessage> {
    decode_envelope(RawEnvelope::from_bytes(bytes)?)
}

/// Decode an already parsed envelope.
pub fn decode_envelope(envelope: RawEnvelope) -> Result<ModesMessage> {
    let df = envelope.downlink_format();
    trace!(df, "routing frame");

    let msg = match df {
        0 => ModesMessage::ShortAcas(ShortAcas::new(envelope)?),
        4 => ModesMessage::AltitudeReply(AltitudeReply::new(envelope)?),
        5 => ModesMessage::IdentifyReply(IdentifyReply::new(envelope)?),
        11 => ModesMessage::AllCallReply(AllCallReply::new(envelope)?),
        16 => ModesMessage::LongAcas(LongAcas::new(envelope)?),
        17 | 18 => decode_extended_squitter(ExtendedSquitter::new(envelope)?)?,
        20 => ModesMessage::CommBAltitudeReply(CommBAltitudeReply::new(envelope)?),
        21 => ModesMessage::CommBIdentifyReply(CommBIdentifyReply::new(envelope)?),
        _ => {
            debug!(df, "no decoder for downlink format");
            ModesMessage::Unknown(envelope)
        }
    };

    Ok(msg)
}

fn decode_extended_squitter(squitter: ExtendedSquitter) -> Result<ModesMessage> {
    let ftc = squitter.format_type_code();
    let subtype = squitter.subtype();
    trace!(ftc, subtype, "routing extended squitter");

    let msg = match (ftc, subtype) {
        (1..=4, _) => ModesMessage::Identification(Identification::new(squitter.into_envelope())?),
        (5..=8, _) => {
            ModesMessage::SurfacePosition(SurfacePosition::new(squitter.into_envelope())?)
        }
        (9..=18 | 20..=22, _) => {
            ModesMessage::AirbornePosition(AirbornePosition::new(squitter.into_envelope())?)
        }
        (19, 1 | 2) => {
            ModesMessage::VelocityOverGround(VelocityOverGround::new(squitter.into_envelope())?)
        }
        (19, 3 | 4) => {
            ModesMessage::AirspeedHeading(AirspeedHeading::new(squitter.into_envelope())?)
        }
        (28, 1) => ModesMessage::EmergencyStatus(EmergencyStatus::new(squitter.into_envelope())?),
        (28, 2) => ModesMessage::TcasResolutionAdvisory(TcasResolutionAdvisory::new(
            squitter.into_envelope(),
        )?),
        (31, 0 | 1) => {
            ModesMessage::OperationalStatus(OperationalStatus::new(squitter.into_envelope())?)
        }
        _ => {
            debug!(ftc, subtype, "no decoder for extended squitter format");
            ModesMessage::UnknownExtendedSquitter(squitter)
        }
    };

    Ok(msg)
}

impl ModesMessage {
    /// Stable snake case name of the message kind, as used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ModesMessage::ShortAcas(_) => "short_acas",
            ModesMessage::LongAcas(_) => "long_acas",
            ModesMessage::AltitudeReply(_) => "altitude_reply",
            ModesMessage::IdentifyReply(_) => "identify_reply",
            ModesMessage::AllCallReply(_) => "all_call_reply",
            ModesMessage::Identification(_) => "identification",
            ModesMessage::SurfacePosition(_) => "surface_position",
            ModesMessage::AirbornePosition(_) => "airborne_position",
            ModesMessage::VelocityOverGround(_) => "velocity_over_ground",
            ModesMessage::AirspeedHeading(_) => "airspeed_heading",
            ModesMessage::EmergencyStatus(_) => "emergency_status",
            ModesMessage::TcasResolutionAdvisory(_) => "tcas_resolution_advisory",
            ModesMessage::OperationalStatus(_) => "operational_status",
            ModesMessage::CommBAltitudeReply(_) => "comm_b_altitude_reply",
            ModesMessage::CommBIdentifyReply(_) => "comm_b_identify_reply",
            ModesMessage::UnknownExtendedSquitter(_) => "unknown_extended_squitter",
            ModesMessage::Unknown(_) => "unknown",
        }
    }

    /// Whether no specific decoder claimed the message.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            ModesMessage::UnknownExtendedSquitter(_) | ModesMessage::Unknown(_)
        )
    }

    pub fn envelope(&self) -> &RawEnvelope {
        match self {
            ModesMessage::ShortAcas(m) => m.envelope(),
            ModesMessage::LongAcas(m) => m.envelope(),
            ModesMessage::AltitudeReply(m) => m.envelope(),
            ModesMessage::IdentifyReply(m) => m.envelope(),
            ModesMessage::AllCallReply(m) => m.envelope(),
            ModesMessage::Identification(m) => m.envelope(),
            ModesMessage::SurfacePosition(m) => m.envelope(),
            ModesMessage::AirbornePosition(m) => m.envelope(),
            ModesMessage::VelocityOverGround(m) => m.envelope(),
            ModesMessage::AirspeedHeading(m) => m.envelope(),
            ModesMessage::EmergencyStatus(m) => m.envelope(),
            ModesMessage::TcasResolutionAdvisory(m) => m.envelope(),
            ModesMessage::OperationalStatus(m) => m.envelope(),
            ModesMessage::CommBAltitudeReply(m) => m.envelope(),
            ModesMessage::CommBIdentifyReply(m) => m.envelope(),
            ModesMessage::UnknownExtendedSquitter(m) => m.envelope(),
            ModesMessage::Unknown(m) => m,
        }
    }

    pub fn downlink_format(&self) -> u8 {
        self.envelope().downlink_format()
    }

    pub fn address(&self) -> IcaoAddress {
        self.envelope().address()
    }

    /// One line: raw frame, DF, kind and address.
    pub fn summary(&self) -> String {
        format!(
            "{} DF{:<2} {:<26} {}",
            self.envelope(),
            self.downlink_format(),
            self.kind(),
            self.address()
        )
    }

    /// Multi-line human readable rendering, optionally without the parity line.
    pub fn describe(&self, show_parity: bool) -> Describe<'_> {
        Describe {
            msg: self,
            show_parity,
        }
    }
}

impl fmt::Display for ModesMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(true).fmt(f)
    }
}

/// Helper returned by [`ModesMessage::describe`].
pub struct Describe<'a> {
    msg: &'a ModesMessage,
    show_parity: bool,
}

fn or_na(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.2} {}", v, unit))
        .unwrap_or_else(|| "N/A".to_string())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn cpr_format(odd: bool) -> &'static str {
    if odd { "odd" } else { "even" }
}

fn maximum_airspeed_str(speed: MaximumAirspeed) -> String {
    match speed {
        MaximumAirspeed::Bounded(speed) => format!("<= {:.1} m/s", speed),
        MaximumAirspeed::Unbounded => "unbounded".to_string(),
        MaximumAirspeed::Unknown => "unknown".to_string(),
    }
}

impl fmt::Display for Describe<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.msg;
        let envelope = msg.envelope();
        let df = envelope.downlink_format();

        writeln!(f, "{}", envelope)?;

        if self.show_parity {
            let overlay = !matches!(df, 11 | 17 | 18);
            if overlay {
                writeln!(f, "CRC:  {:06x} (address/parity)", envelope.parity())?;
            } else {
                writeln!(
                    f,
                    "CRC:  {:06x} ({})",
                    envelope.parity(),
                    if envelope.has_valid_parity() { "ok" } else { "wrong" }
                )?;
            }
        }

        match msg {
            ModesMessage::ShortAcas(m) => {
                writeln!(f, "DF 0: Short Air-Air Surveillance.")?;
                writeln!(f, "  Airborne       : {}", yes_no(m.is_airborne()))?;
                writeln!(f, "  Cross-link     : {}", yes_no(m.has_cross_link_capability()))?;
                writeln!(f, "  Sensitivity    : {}", m.sensitivity_level())?;
                writeln!(
                    f,
                    "  Reply info     : {} ({})",
                    m.reply_information(),
                    m.reply_information_description()
                )?;
                writeln!(f, "  Max airspeed   : {}", maximum_airspeed_str(m.maximum_airspeed()))?;
                writeln!(f, "  Altitude       : {:.2} meters", m.altitude())?;
            }
            ModesMessage::LongAcas(m) => {
                writeln!(f, "DF 16: Long Air-Air Surveillance.")?;
                writeln!(f, "  Airborne       : {}", yes_no(m.is_airborne()))?;
                writeln!(f, "  Sensitivity    : {}", m.sensitivity_level())?;
                writeln!(
                    f,
                    "  Reply info     : {} ({})",
                    m.reply_information(),
                    m.reply_information_description()
                )?;
                writeln!(f, "  Altitude       : {:.2} meters", m.altitude())?;
                if let Some(ra) = m.resolution_advisory() {
                    writeln!(
                        f,
                        "  ACAS RA        : ARA={}, RAC={}, RAT={}, MTE={}",
                        ra.active_advisories, ra.complements, ra.terminated, ra.multiple_threats
                    )?;
                }
            }
            ModesMessage::AltitudeReply(m) => {
                writeln!(f, "DF 4: Surveillance, Altitude Reply.")?;
                writeln!(f, "  Flight Status  : {}", m.flight_status().description())?;
                writeln!(f, "  DR             : {}", m.downlink_request().as_u8())?;
                writeln!(f, "  UM             : {}", m.utility_message().as_u8())?;
                writeln!(f, "  Altitude       : {:.2} meters", m.altitude())?;
            }
            ModesMessage::CommBAltitudeReply(m) => {
                writeln!(f, "DF 20: Comm-B, Altitude Reply.")?;
                writeln!(f, "  Flight Status  : {}", m.flight_status().description())?;
                writeln!(f, "  DR             : {}", m.downlink_request().as_u8())?;
                writeln!(f, "  UM             : {}", m.utility_message().as_u8())?;
                writeln!(f, "  Altitude       : {:.2} meters", m.altitude())?;
                writeln!(f, "  MB Field (BDS) : {}", m.bds())?;
            }
            ModesMessage::IdentifyReply(m) => {
                writeln!(f, "DF 5: Surveillance, Identity Reply.")?;
                writeln!(f, "  Flight Status  : {}", m.flight_status().description())?;
                writeln!(f, "  DR             : {}", m.downlink_request().as_u8())?;
                writeln!(f, "  UM             : {}", m.utility_message().as_u8())?;
                writeln!(f, "  Squawk         : {}", m.squawk())?;
            }
            ModesMessage::CommBIdentifyReply(m) => {
                writeln!(f, "DF 21: Comm-B, Identity Reply.")?;
                writeln!(f, "  Flight Status  : {}", m.flight_status().description())?;
                writeln!(f, "  DR             : {}", m.downlink_request().as_u8())?;
                writeln!(f, "  UM             : {}", m.utility_message().as_u8())?;
                writeln!(f, "  Squawk         : {}", m.squawk())?;
                writeln!(f, "  MB Field (BDS) : {}", m.bds())?;
            }
            ModesMessage::AllCallReply(m) => {
                writeln!(f, "DF 11: All Call Reply.")?;
                writeln!(f, "  Capability     : {}", m.capabilities().description())?;
            }
            ModesMessage::Unknown(_) => {
                writeln!(f, "DF {} (decoding not implemented)", df)?;
            }
            _ => write_extended_squitter(f, msg)?,
        }

        writeln!(f, "  ICAO Address   : {}", msg.address())
    }
}

fn write_extended_squitter(f: &mut fmt::Formatter<'_>, msg: &ModesMessage) -> fmt::Result {
    let envelope = msg.envelope();
    let df = envelope.downlink_format();
    debug_assert!(EXTENDED_SQUITTER_FORMATS.contains(&df));

    let me0 = envelope.bytes()[4];
    let (ftc, subtype) = (me0 >> 3, me0 & 0x07);

    writeln!(f, "DF {}: ADS-B message.", df)?;
    writeln!(f, "  Capability     : {}", envelope.first_field())?;
    writeln!(f, "  Extended Squitter  Type: {}", ftc)?;
    writeln!(f, "  Extended Squitter  Sub : {}", subtype)?;
    writeln!(f, "  Extended Squitter  Name: {}", get_me_description(ftc, subtype))?;

    match msg {
        ModesMessage::Identification(m) => {
            writeln!(
                f,
                "    Aircraft Type  : {} ({})",
                m.category_set(),
                m.category_description()
            )?;
            writeln!(f, "    Identification : {}", m.callsign())?;
        }
        ModesMessage::SurfacePosition(m) => {
            let movement = match m.movement() {
                GroundMovement::NotAvailable => "N/A".to_string(),
                GroundMovement::Stopped => "stopped".to_string(),
                GroundMovement::Moving(speed) => format!("{:.2} m/s", speed),
                GroundMovement::AtLeast175Knots => ">= 175 kt".to_string(),
                GroundMovement::Reserved => "reserved".to_string(),
            };
            writeln!(f, "    Movement : {}", movement)?;
            writeln!(f, "    Track    : {}", or_na(m.ground_track(), "deg"))?;
            writeln!(f, "    F flag   : {}", cpr_format(m.is_odd_format()))?;
            writeln!(f, "    Latitude : {} (not decoded)", m.cpr().latitude)?;
            writeln!(f, "    Longitude: {} (not decoded)", m.cpr().longitude)?;
        }
        ModesMessage::AirbornePosition(m) => {
            writeln!(f, "    F flag   : {}", cpr_format(m.is_odd_format()))?;
            writeln!(
                f,
                "    T flag   : {}",
                if m.is_time_synchronized() { "UTC" } else { "non-UTC" }
            )?;
            writeln!(
                f,
                "    Altitude : {} ({})",
                or_na(m.altitude(), "meters"),
                if m.is_barometric_altitude() { "barometric" } else { "GNSS" }
            )?;
            writeln!(f, "    Latitude : {} (not decoded)", m.cpr().latitude)?;
            writeln!(f, "    Longitude: {} (not decoded)", m.cpr().longitude)?;
            writeln!(f, "    NIC      : {}", m.navigation_integrity_category())?;
        }
        ModesMessage::VelocityOverGround(m) => {
            writeln!(f, "    EW velocity       : {}", or_na(m.east_west_velocity(), "m/s"))?;
            writeln!(f, "    NS velocity       : {}", or_na(m.north_south_velocity(), "m/s"))?;
            writeln!(f, "    Ground speed      : {}", or_na(m.ground_speed(), "m/s"))?;
            writeln!(f, "    Track             : {}", or_na(m.track(), "deg"))?;
            writeln!(f, "    Vertical rate     : {}", or_na(m.vertical_rate(), "m/s"))?;
        }
        ModesMessage::AirspeedHeading(m) => {
            writeln!(f, "    Heading           : {}", or_na(m.heading(), "deg"))?;
            writeln!(
                f,
                "    Airspeed          : {} ({})",
                or_na(m.airspeed(), "m/s"),
                if m.is_true_airspeed() { "TAS" } else { "IAS" }
            )?;
            writeln!(f, "    Vertical rate     : {}", or_na(m.vertical_rate(), "m/s"))?;
        }
        ModesMessage::EmergencyStatus(m) => {
            writeln!(f, "    Emergency : {}", m.emergency_state().description())?;
            writeln!(f, "    Squawk    : {}", m.squawk())?;
        }
        ModesMessage::TcasResolutionAdvisory(m) => {
            let ra = m.advisory();
            writeln!(
                f,
                "    ACAS RA   : ARA={}, RAC={}, RAT={}, MTE={}",
                ra.active_advisories, ra.complements, ra.terminated, ra.multiple_threats
            )?;
        }
        ModesMessage::OperationalStatus(m) => {
            writeln!(f, "    Version   : {}", m.version())?;
            writeln!(f, "    NACp      : {}", m.nac_p())?;
            writeln!(f, "    SIL       : {}", m.source_integrity_level())?;
        }
        _ => {
            writeln!(
                f,
                "    Unrecognized ME type: {} subtype: {}",
                ftc, subtype
            )?;
        }
    }

    Ok(())
}

/// Name of an extended squitter format.
pub fn get_me_description(ftc: u8, subtype: u8) -> &'static str {
    match ftc {
        1..=4 => "Aircraft Identification and Category",
        5..=8 => "Surface Position",
        9..=18 => "Airborne Position (Baro Altitude)",
        19 if (1..=4).contains(&subtype) => "Airborne Velocity",
        20..=22 => "Airborne Position (GNSS Height)",
        23 if subtype == 0 => "Test Message",
        24 if subtype == 1 => "Surface System Status",
        28 if subtype == 1 => "Extended Squitter Aircraft Status (Emergency)",
        28 if subtype == 2 => "Extended Squitter Aircraft Status (1090ES TCAS RA)",
        29 if subtype == 0 || subtype == 1 => "Target State and Status Message",
        31 if subtype == 0 || subtype == 1 => "Aircraft Operational Status Message",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{frame_len_by_df, frame_lens_by_df};
    use crate::error::FormatError;
    use proptest::prelude::*;

    fn frame(df: u8, me0: u8) -> Vec<u8> {
        let mut bytes = vec![0u8; frame_len_by_df(df)];
        bytes[0] = df << 3;
        if bytes.len() > 4 {
            bytes[4] = me0;
        }
        bytes
    }

    #[test]
    fn test_decode_short_acas() {
        let msg = decode("02E19715AA8F22").unwrap();
        assert_eq!(msg.kind(), "short_acas");
        assert_eq!(msg.downlink_format(), 0);
        assert!(!msg.is_fallback());
        let ModesMessage::ShortAcas(acas) = &msg else {
            panic!("unexpected kind {}", msg.kind());
        };
        assert_eq!(acas.sensitivity_level(), 7);
    }

    #[test]
    fn test_decode_df17_message() {
        let msg = decode("8D4840D6202CC371C32CE0576098").unwrap();
        assert_eq!(msg.kind(), "identification");
        assert_eq!(msg.address().to_string(), "4840D6");
        assert_eq!(msg.envelope().parity(), 0x576098);
    }

    #[test]
    fn test_routing_table() {
        let cases: &[(u8, u8, &str)] = &[
            (0, 0, "short_acas"),
            (4, 0, "altitude_reply"),
            (5, 0, "identify_reply"),
            (11, 0, "all_call_reply"),
            (16, 0, "long_acas"),
            (17, 1 << 3, "identification"),
            (18, 4 << 3, "identification"),
            (17, 5 << 3, "surface_position"),
            (17, 8 << 3, "surface_position"),
            (17, 9 << 3, "airborne_position"),
            (17, 18 << 3, "airborne_position"),
            (17, 20 << 3, "airborne_position"),
            (17, 22 << 3, "airborne_position"),
            (17, (19 << 3) | 1, "velocity_over_ground"),
            (17, (19 << 3) | 2, "velocity_over_ground"),
            (17, (19 << 3) | 3, "airspeed_heading"),
            (17, (19 << 3) | 4, "airspeed_heading"),
            (17, (28 << 3) | 1, "emergency_status"),
            (17, (28 << 3) | 2, "tcas_resolution_advisory"),
            (17, 31 << 3, "operational_status"),
            (17, (31 << 3) | 1, "operational_status"),
            (20, 0, "comm_b_altitude_reply"),
            (21, 0, "comm_b_identify_reply"),
        ];
        for &(df, me0, kind) in cases {
            let msg = decode_bytes(&frame(df, me0)).unwrap();
            assert_eq!(msg.kind(), kind, "df {} me0 {:02x}", df, me0);
            assert!(!msg.is_fallback());
        }
    }

    #[test]
    fn test_unsupported_subtypes_fall_back() {
        for me0 in [
            0,
            19 << 3,
            (19 << 3) | 5,
            (19 << 3) | 7,
            23 << 3,
            28 << 3,
            (28 << 3) | 3,
            (31 << 3) | 2,
            29 << 3,
        ] {
            let msg = decode_bytes(&frame(17, me0)).unwrap();
            assert_eq!(msg.kind(), "unknown_extended_squitter", "me0 {:02x}", me0);
            assert!(msg.is_fallback());
            let ModesMessage::UnknownExtendedSquitter(squitter) = &msg else {
                unreachable!();
            };
            assert_eq!(squitter.format_type_code(), me0 >> 3);
            assert_eq!(squitter.subtype(), me0 & 0x07);
        }
    }

    #[test]
    fn test_unknown_downlink_formats_fall_back() {
        for df in [1, 2, 3, 6, 7, 8, 9, 10, 12, 13, 14, 15, 19, 22, 23, 24, 31] {
            let msg = decode_bytes(&frame(df, 0)).unwrap();
            assert_eq!(msg.kind(), "unknown", "df {}", df);
            assert!(msg.is_fallback());
            assert_eq!(msg.downlink_format(), df);
        }
    }

    #[test]
    fn test_short_comm_d_falls_back() {
        let msg = decode("C0000000000000").unwrap();
        assert_eq!(msg.kind(), "unknown");
        assert_eq!(msg.downlink_format(), 24);
        assert_eq!(msg.envelope().bits(), 56);
        assert!(msg.to_string().contains("DF 24 (decoding not implemented)"));
    }

    #[test]
    fn test_dispatch_is_total() {
        for df in 0u8..32 {
            let me0_values: Vec<u8> = if EXTENDED_SQUITTER_FORMATS.contains(&df) {
                (0..=255).collect()
            } else {
                vec![0]
            };
            for me0 in me0_values {
                let result = decode_bytes(&frame(df, me0));
                assert!(result.is_ok(), "df {} me0 {:02x}: {:?}", df, me0, result);
            }
            for &len in frame_lens_by_df(df) {
                let mut bytes = vec![0u8; len];
                bytes[0] = df << 3;
                let result = decode_bytes(&bytes);
                assert!(result.is_ok(), "df {} len {}: {:?}", df, len, result);
            }
        }
    }

    #[test]
    fn test_parse_errors_are_propagated() {
        assert_eq!(decode("02E"), Err(FormatError::OddLength { length: 3 }));
        assert!(matches!(
            decode("8D4840D6"),
            Err(FormatError::LengthMismatch {
                expected: 14,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_display() {
        let text = decode("02E19715AA8F22").unwrap().to_string();
        assert!(text.starts_with("*02E19715AA8F22;\n"));
        assert!(text.contains("DF 0: Short Air-Air Surveillance."));
        assert!(text.contains("Altitude       : 10949.94 meters"));

        let text = decode("8D4840D6202CC371C32CE0576098").unwrap().to_string();
        assert!(text.contains("CRC:  576098 (ok)"));
        assert!(text.contains("Identification : KLM1023"));
        assert!(text.contains("ICAO Address   : 4840D6"));

        let msg = decode("8D4840D6202CC371C32CE0576098").unwrap();
        assert!(!msg.describe(false).to_string().contains("CRC:"));
    }

    #[test]
    fn test_summary() {
        let msg = decode("8D4840D6202CC371C32CE0576098").unwrap();
        let summary = msg.summary();
        assert!(summary.starts_with("*8D4840D6202CC371C32CE0576098; DF17 identification"));
        assert!(summary.ends_with("4840D6"));
    }

    #[test]
    fn test_json_is_tagged_by_kind() {
        let msg = decode("02E19715AA8F22").unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["kind"], "short_acas");
        assert_eq!(json["hex"], "02E19715AA8F22");
        assert_eq!(json["downlink_format"], 0);
        assert_eq!(json["sensitivity_level"], 7);
        assert_eq!(json["maximum_airspeed"], "unknown");
        assert_eq!(json["altitude"]["code"], 0x1715);

        let msg = decode("8D4840D6202CC371C32CE0576098").unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["kind"], "identification");
        assert_eq!(json["callsign"], "KLM1023");
        assert_eq!(json["format_type_code"], 4);
    }

    #[test]
    fn test_me_description() {
        assert_eq!(get_me_description(4, 0), "Aircraft Identification and Category");
        assert_eq!(get_me_description(19, 0), "Unknown");
        assert_eq!(get_me_description(28, 2), "Extended Squitter Aircraft Status (1090ES TCAS RA)");
    }

    proptest! {
        #[test]
        fn any_well_formed_frame_decodes(long in any::<bool>(), bytes in prop::collection::vec(any::<u8>(), 14)) {
            let mut bytes = bytes;
            // force the DF to agree with the frame length
            let df = bytes[0] >> 3;
            let len = if long { 14 } else { 7 };
            if frame_len_by_df(df) != len {
                bytes[0] ^= 0x80;
            }
            let bytes = &bytes[..frame_len_by_df(bytes[0] >> 3)];
            let msg = decode_bytes(bytes).unwrap();
            prop_assert_eq!(msg.envelope().bytes(), bytes);
        }
    }
}
