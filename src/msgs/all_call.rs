//! All-call reply (DF 11)

use serde::Serialize;

use crate::envelope::{IcaoAddress, RawEnvelope};
use crate::error::Result;
use crate::fields::Capability;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllCallReply {
    #[serde(flatten)]
    envelope: RawEnvelope,
    capabilities: Capability,
    address: IcaoAddress,
}

impl AllCallReply {
    pub fn new(envelope: RawEnvelope) -> Result<Self> {
        envelope.expect_downlink_format(&[11])?;

        Ok(Self {
            capabilities: Capability::from_u8(envelope.first_field()),
            address: envelope.address(),
            envelope,
        })
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(RawEnvelope::from_hex(hex)?)
    }

    pub fn envelope(&self) -> &RawEnvelope {
        &self.envelope
    }

    pub fn capabilities(&self) -> Capability {
        self.capabilities
    }

    /// The announced address.
    pub fn address(&self) -> IcaoAddress {
        self.address
    }

    /// Interrogator identifier overlaid on the parity field (II or SI code).
    /// 0 for replies to acquisition squitters and to interrogator 0.
    pub fn interrogator_code(&self) -> u32 {
        self.envelope.parity() ^ self.envelope.computed_parity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc;

    fn all_call_frame(interrogator: u32) -> Vec<u8> {
        let mut frame = vec![0x5D, 0x48, 0x40, 0xD6, 0, 0, 0];
        let parity = crc::compute_parity(&frame) ^ interrogator;
        frame[4..].copy_from_slice(&[(parity >> 16) as u8, (parity >> 8) as u8, parity as u8]);
        frame
    }

    #[test]
    fn test_all_call_reply() {
        let envelope = RawEnvelope::from_bytes(&all_call_frame(0)).unwrap();
        let msg = AllCallReply::new(envelope).unwrap();
        assert_eq!(msg.capabilities().as_u8(), 5);
        assert_eq!(msg.address().to_string(), "4840D6");
        assert!(msg.envelope().has_valid_parity());
        assert_eq!(msg.interrogator_code(), 0);
    }

    #[test]
    fn test_interrogator_code() {
        let envelope = RawEnvelope::from_bytes(&all_call_frame(0x0B)).unwrap();
        let msg = AllCallReply::new(envelope).unwrap();
        assert!(!msg.envelope().has_valid_parity());
        assert_eq!(msg.interrogator_code(), 0x0B);
        // the address is announced, not recovered from parity
        assert_eq!(msg.address().as_u32(), 0x4840D6);
    }
}
