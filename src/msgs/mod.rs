//! Message decoders, one per message kind.
//!
//! Every decoder takes ownership of a [`RawEnvelope`](crate::RawEnvelope)
//! and refuses envelopes whose downlink format (and for extended squitters,
//! format type code and subtype) it does not own.

pub mod acas;
pub mod aircraft_status;
pub mod all_call;
pub mod comm_b;
pub mod identification;
pub mod operational_status;
pub mod position;
pub mod resolution_advisory;
pub mod surveillance;
pub mod velocity;

pub use acas::{LongAcas, MaximumAirspeed, ShortAcas};
pub use aircraft_status::{EmergencyState, EmergencyStatus, TcasResolutionAdvisory};
pub use all_call::AllCallReply;
pub use comm_b::{BdsData, CommBAltitudeReply, CommBIdentifyReply};
pub use identification::Identification;
pub use operational_status::{CapabilityClass, OperationalMode, OperationalStatus};
pub use position::{AirbornePosition, CprFrame, GroundMovement, SurfacePosition};
pub use resolution_advisory::{ResolutionAdvisory, ThreatIdentity};
pub use surveillance::{AltitudeReply, IdentifyReply};
pub use velocity::{AirspeedHeading, VelocityCommon, VelocityOverGround};

/// 1 kt = 1852 m/h
pub const KNOTS_TO_MPS: f64 = 1852.0 / 3600.0;
