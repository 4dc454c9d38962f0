//! Mode S / ADS-B message decoding
//!
//! Turns a hex encoded 56 or 112 bit Mode S frame into a typed message:
//!
//! ```
//! use modes_decode::{decode, ModesMessage};
//!
//! let msg = decode("8D4840D6202CC371C32CE0576098").unwrap();
//! assert_eq!(msg.kind(), "identification");
//! if let ModesMessage::Identification(ident) = &msg {
//!     assert_eq!(ident.callsign(), "KLM1023");
//! }
//! ```
//!
//! Decoding is pure: no state is kept between frames, every message type is
//! an immutable value, and all types are `Send + Sync`. Position fields are
//! returned as raw CPR values, global position decoding needs state across
//! frames and is left to the caller.

pub mod altitude;
pub mod crc;
pub mod decoder;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod gray;
pub mod identity;
pub mod msgs;

pub use altitude::{AltitudeCode, EsAltitudeCode};
pub use decoder::{decode, decode_bytes, decode_envelope, ModesMessage};
pub use envelope::{ExtendedSquitter, IcaoAddress, RawEnvelope};
pub use error::{FormatError, Result};
pub use fields::{Capability, DownlinkRequest, FlightStatus, SurveillanceFields, UtilityMessage};
pub use gray::{binary_to_gray, gray_to_binary};
pub use identity::{IdentityCode, Squawk};
