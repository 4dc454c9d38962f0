//! Mode S frame envelope
//!
//! Turns a hex string into validated frame bytes plus the downlink format.
//! Nothing here knows about the meaning of any specific message.
//!
//! ```plain
//! byte    0        1 .. n-4     n-3 .. n-1
//! bits    DDDDDfff payload      parity (24 bits)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::crc;
use crate::error::{FormatError, Result};

pub const MODES_LONG_MSG_BITS: usize = 112;
pub const MODES_SHORT_MSG_BITS: usize = 56;
pub const MODES_LONG_MSG_BYTES: usize = 14;
pub const MODES_SHORT_MSG_BYTES: usize = 7;

/// Downlink formats that announce the address in clear in bytes 1..4.
const ADDRESS_ANNOUNCED: &[u8] = &[11, 17, 18];

/// Downlink formats of extended squitters.
pub const EXTENDED_SQUITTER_FORMATS: &[u8] = &[17, 18];

/// Nominal frame length in bytes implied by a downlink format.
///
/// DF 0-15 are 56-bit replies, DF 16 and up are 112-bit.
pub fn frame_len_by_df(df: u8) -> usize {
    if df < 16 {
        MODES_SHORT_MSG_BYTES
    } else {
        MODES_LONG_MSG_BYTES
    }
}

/// Every frame length in bytes a downlink format is accepted with.
///
/// Comm-D (DF 24-31, whose DF is really only the leading `11`) arrives as
/// both 56 and 112-bit frames.
pub fn frame_lens_by_df(df: u8) -> &'static [usize] {
    match df {
        0..=15 => &[MODES_SHORT_MSG_BYTES],
        16..=23 => &[MODES_LONG_MSG_BYTES],
        _ => &[MODES_LONG_MSG_BYTES, MODES_SHORT_MSG_BYTES],
    }
}

/// 24-bit aircraft address
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IcaoAddress(pub [u8; 3]);

impl IcaoAddress {
    pub fn as_u32(&self) -> u32 {
        (u32::from(self.0[0]) << 16) | (u32::from(self.0[1]) << 8) | u32::from(self.0[2])
    }
}

impl fmt::Display for IcaoAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl Serialize for IcaoAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A validated Mode S frame.
///
/// Equality compares the frame bytes, not the spelling of the hex string.
#[derive(Clone, Debug, Serialize)]
pub struct RawEnvelope {
    hex: String,
    #[serde(skip)]
    frame: [u8; MODES_LONG_MSG_BYTES],
    #[serde(skip)]
    len: usize,
    downlink_format: u8,
}

impl RawEnvelope {
    /// Parse a hex string (case-insensitive, no delimiters).
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() % 2 != 0 {
            debug!(length = hex.len(), "rejecting odd length hex string");
            return Err(FormatError::OddLength { length: hex.len() });
        }

        if let Some((position, character)) =
            hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit())
        {
            debug!(position, ?character, "rejecting invalid hex digit");
            return Err(FormatError::InvalidHexDigit {
                position,
                character,
            });
        }

        // every character is ASCII from here on
        let digits = hex.as_bytes();
        let actual = digits.len() / 2;
        let Some(&first) = digits.first() else {
            return Err(FormatError::LengthMismatch {
                expected: MODES_SHORT_MSG_BYTES,
                actual,
            });
        };

        // the DF is in the first hex digit pair, so read it before the length
        let df = (hex_digit_val(first) << 1) | (hex_digit_val(digits[1]) >> 3);
        if !frame_lens_by_df(df).contains(&actual) {
            let expected = frame_len_by_df(df);
            debug!(df, expected, actual, "rejecting frame with wrong length");
            return Err(FormatError::LengthMismatch { expected, actual });
        }

        let mut frame = [0u8; MODES_LONG_MSG_BYTES];
        for (i, pair) in digits.chunks(2).enumerate() {
            frame[i] = (hex_digit_val(pair[0]) << 4) | hex_digit_val(pair[1]);
        }

        Ok(Self {
            hex: hex.to_string(),
            frame,
            len: actual,
            downlink_format: df,
        })
    }

    /// Build an envelope from raw frame bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Some(&first) = bytes.first() else {
            return Err(FormatError::LengthMismatch {
                expected: MODES_SHORT_MSG_BYTES,
                actual: 0,
            });
        };
        let df = first >> 3;
        let len = bytes.len();
        if !frame_lens_by_df(df).contains(&len) {
            return Err(FormatError::LengthMismatch {
                expected: frame_len_by_df(df),
                actual: len,
            });
        }

        let mut frame = [0u8; MODES_LONG_MSG_BYTES];
        frame[..len].copy_from_slice(bytes);
        let hex = bytes.iter().map(|b| format!("{:02X}", b)).collect();

        Ok(Self {
            hex,
            frame,
            len,
            downlink_format: df,
        })
    }

    /// The hex string as it was given.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The whole frame, parity included.
    pub fn bytes(&self) -> &[u8] {
        &self.frame[..self.len]
    }

    pub fn bits(&self) -> usize {
        self.len * 8
    }

    pub fn downlink_format(&self) -> u8 {
        self.downlink_format
    }

    /// The 3 bits following the DF (CA, FS, VS/CC, CF or AF depending on DF).
    pub fn first_field(&self) -> u8 {
        self.frame[0] & 0x07
    }

    /// Everything between the first byte and the parity field.
    pub fn payload(&self) -> &[u8] {
        &self.frame[1..self.len - 3]
    }

    /// The transmitted 24-bit parity field.
    pub fn parity(&self) -> u32 {
        crc::extract_parity(self.bytes())
    }

    /// The parity computed over the frame's data bits.
    pub fn computed_parity(&self) -> u32 {
        crc::compute_parity(self.bytes())
    }

    /// Whether the parity field is the plain CRC of the frame.
    ///
    /// Only meaningful for DF 17/18 and DF 11 replies to interrogator code 0;
    /// other formats overlay the address on the parity.
    pub fn has_valid_parity(&self) -> bool {
        self.parity() == self.computed_parity()
    }

    /// The aircraft address: announced in clear for DF 11/17/18, recovered
    /// from the address/parity field otherwise.
    pub fn address(&self) -> IcaoAddress {
        if ADDRESS_ANNOUNCED.contains(&self.downlink_format) {
            IcaoAddress([self.frame[1], self.frame[2], self.frame[3]])
        } else {
            IcaoAddress(crc::recover_address(self.bytes()))
        }
    }

    /// Fail unless the DF is one of `expected`.
    pub(crate) fn expect_downlink_format(&self, expected: &'static [u8]) -> Result<()> {
        if expected.contains(&self.downlink_format) {
            Ok(())
        } else {
            Err(FormatError::WrongDownlinkFormat {
                expected,
                actual: self.downlink_format,
            })
        }
    }
}

impl PartialEq for RawEnvelope {
    fn eq(&self, other: &Self) -> bool {
        self.bytes() == other.bytes()
    }
}

impl Eq for RawEnvelope {}

impl FromStr for RawEnvelope {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for RawEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*")?;
        for byte in self.bytes() {
            write!(f, "{:02X}", byte)?;
        }
        write!(f, ";")
    }
}

/// Extended squitter (DF 17/18) envelope.
///
/// ```plain
/// byte  0        1 2 3    4        5 .. 10  11 12 13
///       DDDDDccc address  TTTTTsss ME ...   parity
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtendedSquitter {
    #[serde(flatten)]
    envelope: RawEnvelope,
    format_type_code: u8,
    subtype: u8,
}

impl ExtendedSquitter {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        envelope.expect_downlink_format(EXTENDED_SQUITTER_FORMATS)?;
        let me0 = envelope.frame[4];
        Ok(Self {
            format_type_code: me0 >> 3,
            subtype: me0 & 0x07,
            envelope,
        })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(RawEnvelope::from_hex(hex)?)
    }

    pub fn envelope(&self) -> &RawEnvelope {
        &self.envelope
    }

    pub fn into_envelope(self) -> RawEnvelope {
        self.envelope
    }

    /// CA for DF 17, CF for DF 18.
    pub fn capabilities(&self) -> u8 {
        self.envelope.first_field()
    }

    pub fn address(&self) -> IcaoAddress {
        self.envelope.address()
    }

    /// The 56-bit ME field.
    pub fn message(&self) -> [u8; 7] {
        let mut me = [0u8; 7];
        me.copy_from_slice(&self.envelope.frame[4..11]);
        me
    }

    pub fn format_type_code(&self) -> u8 {
        self.format_type_code
    }

    /// Low 3 bits of the first ME byte. Only a subtype for some type codes.
    pub fn subtype(&self) -> u8 {
        self.subtype
    }

    /// Fail unless the type code and subtype are in the expected sets.
    pub(crate) fn expect_format(
        &self,
        expected_type: &'static [u8],
        expected_subtype: &'static [u8],
    ) -> Result<()> {
        if expected_type.contains(&self.format_type_code)
            && expected_subtype.contains(&self.subtype)
        {
            Ok(())
        } else {
            Err(FormatError::WrongFormatType {
                expected_type,
                expected_subtype,
                actual_type: self.format_type_code,
                actual_subtype: self.subtype,
            })
        }
    }
}

/// Any subtype is accepted.
pub(crate) const ALL_SUBTYPES: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7];

/// Value of an ASCII hex digit. Callers have already validated the digit.
fn hex_digit_val(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}
