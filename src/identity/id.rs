//! ULID identifier value

use core::fmt;
use core::str::FromStr;
use serde::Serialize;
use ulid::{DecodeError, Ulid};

/// A 128-bit ULID: 48-bit millisecond timestamp, 80 random bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InstanceId(Ulid);

impl InstanceId {
    /// Build an id from its two components
    #[must_use]
    #[inline]
    pub fn from_parts(timestamp_ms: u64, random: u128) -> Self {
        Self(Ulid::from_parts(timestamp_ms, random))
    }

    /// Milliseconds since the Unix epoch at generation time
    #[must_use]
    #[inline]
    pub fn timestamp_ms(self) -> u64 {
        self.0.timestamp_ms()
    }

    /// The 80-bit random component
    #[must_use]
    #[inline]
    pub fn random(self) -> u128 {
        self.0.random()
    }

    /// The underlying ULID
    #[must_use]
    #[inline]
    pub const fn as_ulid(self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for InstanceId {
    #[inline]
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for InstanceId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for InstanceId {
    type Err = DecodeError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}
