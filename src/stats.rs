//! Decode statistics
//!
//! Counts decoded messages per kind and per aircraft address, plus parse
//! failures per error kind, for the `--stats` report printed at exit.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use modes_decode::{FormatError, IcaoAddress, ModesMessage};

#[derive(Debug, Default, Serialize)]
pub struct DecodeStats {
    /// Input lines handed to the decoder
    pub lines: u64,
    pub decoded: u64,
    pub errors: u64,
    /// Decoded messages no specific decoder claimed
    pub fallbacks: u64,
    /// DF 11/17/18 frames whose parity is not the plain CRC
    pub bad_parity: u64,
    by_kind: BTreeMap<&'static str, u64>,
    errors_by_kind: BTreeMap<&'static str, u64>,
    #[serde(skip)]
    by_address: HashMap<IcaoAddress, u64>,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from a decoded message
    pub fn record_message(&mut self, msg: &ModesMessage) {
        self.lines += 1;
        self.decoded += 1;
        if msg.is_fallback() {
            self.fallbacks += 1;
        }
        if matches!(msg.downlink_format(), 11 | 17 | 18) && !msg.envelope().has_valid_parity() {
            self.bad_parity += 1;
        }
        *self.by_kind.entry(msg.kind()).or_insert(0) += 1;
        *self.by_address.entry(msg.address()).or_insert(0) += 1;
    }

    pub fn record_error(&mut self, err: &FormatError) {
        self.lines += 1;
        self.errors += 1;
        *self.errors_by_kind.entry(error_kind(err)).or_insert(0) += 1;
    }

    /// Number of distinct addresses seen, recovered addresses included.
    pub fn addresses(&self) -> usize {
        self.by_address.len()
    }

    /// Addresses ordered by message count, busiest first.
    pub fn busiest(&self, n: usize) -> Vec<(IcaoAddress, u64)> {
        let mut all: Vec<_> = self.by_address.iter().map(|(a, c)| (*a, *c)).collect();
        all.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        all.truncate(n);
        all
    }
}

/// Addresses listed in the text report.
const BUSIEST_SHOWN: usize = 5;

fn error_kind(err: &FormatError) -> &'static str {
    match err {
        FormatError::OddLength { .. } => "odd_length",
        FormatError::InvalidHexDigit { .. } => "invalid_hex_digit",
        FormatError::LengthMismatch { .. } => "length_mismatch",
        FormatError::WrongDownlinkFormat { .. } => "wrong_downlink_format",
        FormatError::WrongFormatType { .. } => "wrong_format_type",
    }
}

impl fmt::Display for DecodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} lines", self.lines)?;
        writeln!(f, "{} decoded messages", self.decoded)?;
        writeln!(f, "{} parse errors", self.errors)?;
        for (kind, count) in &self.errors_by_kind {
            writeln!(f, "  {:<26} {}", kind, count)?;
        }
        writeln!(f, "{} unclassified messages", self.fallbacks)?;
        writeln!(f, "{} DF 11/17/18 messages with wrong CRC", self.bad_parity)?;
        writeln!(f, "{} distinct addresses", self.addresses())?;
        for (address, count) in self.busiest(BUSIEST_SHOWN) {
            writeln!(f, "  {:<26} {}", address.to_string(), count)?;
        }
        writeln!(f, "Messages by kind:")?;
        for (kind, count) in &self.by_kind {
            writeln!(f, "  {:<26} {}", kind, count)?;
        }
        Ok(())
    }
}
