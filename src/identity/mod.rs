//! Instance identifiers
//!
//! Every constructed error carries a 26-character, time-ordered identifier
//! so that one occurrence can be followed across logs and responses.

pub mod generator;
pub mod id;

pub use generator::InstanceIdGenerator;
pub use id::InstanceId;
pub use ulid::DecodeError as ParseInstanceIdError;
