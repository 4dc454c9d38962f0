//! Decode failures
//!
//! Every failure is a local validation error on a single input. Payloads that
//! parse but cannot be classified are not errors, see
//! [`ModesMessage::Unknown`](crate::decoder::ModesMessage::Unknown).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("hex string has odd length {length}")]
    OddLength { length: usize },

    #[error("invalid hex digit {character:?} at position {position}")]
    InvalidHexDigit { position: usize, character: char },

    #[error("expected {expected} bytes for the frame, but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("expected downlink format {expected:?}, but message has DF {actual}")]
    WrongDownlinkFormat {
        expected: &'static [u8],
        actual: u8,
    },

    #[error(
        "expected extended squitter format type {expected_type:?} (subtypes {expected_subtype:?}), \
         but message has type {actual_type} subtype {actual_subtype}"
    )]
    WrongFormatType {
        expected_type: &'static [u8],
        expected_subtype: &'static [u8],
        actual_type: u8,
        actual_subtype: u8,
    },
}

pub type Result<T, E = FormatError> = std::result::Result<T, E>;
