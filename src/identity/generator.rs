//! Monotonic identifier generation

use super::id::InstanceId;
use crate::system::System;
use core::fmt;
use rand::RngCore;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use ulid::{Generator, Ulid};

/// Produces strictly increasing [`InstanceId`]s
///
/// Within one millisecond, or when the clock steps backwards, the previous id
/// is incremented. When that overflows the id moves to the next millisecond.
#[derive(Default)]
pub struct InstanceIdGenerator {
    state: Mutex<GeneratorState>,
}

struct GeneratorState {
    generator: Generator,
    last_ms: u64,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            generator: Generator::new(),
            last_ms: 0,
        }
    }
}

impl fmt::Debug for InstanceIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceIdGenerator").finish_non_exhaustive()
    }
}

impl InstanceIdGenerator {
    /// Create a generator with no history
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next identifier from the system clock and entropy
    pub fn next_id(&self, system: &dyn System) -> InstanceId {
        let now_ms = system.now_millis();
        let mut source = SystemEntropy(system);
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let ulid = match state
            .generator
            .generate_from_datetime_with_source(at_millis(now_ms), &mut source)
        {
            Ok(ulid) => ulid,
            Err(_) => {
                let bumped = state.last_ms.max(now_ms).saturating_add(1);
                state
                    .generator
                    .generate_from_datetime_with_source(at_millis(bumped), &mut source)
                    .unwrap_or_else(|_| Ulid::from_parts(bumped, system.random_u128()))
            }
        };

        state.last_ms = ulid.timestamp_ms();
        ulid.into()
    }
}

fn at_millis(millis: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(millis)
}

/// Feeds [`System::random_u128`] to the ULID generator
struct SystemEntropy<'a>(&'a dyn System);

impl RngCore for SystemEntropy<'_> {
    #[allow(clippy::cast_possible_truncation, reason = "Low bits are the sample")]
    fn next_u32(&mut self) -> u32 {
        self.0.random_u128() as u32
    }

    #[allow(clippy::cast_possible_truncation, reason = "Low bits are the sample")]
    fn next_u64(&mut self) -> u64 {
        self.0.random_u128() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
