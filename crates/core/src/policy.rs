//! Cleanup failure policy
//!
//! A deleter that fails while its handle is being dropped has nowhere to
//! return an error to. [`CleanupPolicy`] decides what happens instead. Every
//! policy reports the failure through `tracing`; none of them discards it.
//!
//! The process-wide default is seeded from the `OWNHANDLE_CLEANUP_POLICY`
//! environment variable the first time it is read and can be changed at
//! runtime with [`set_default_cleanup_policy`].

use crate::constants::{OWNHANDLE_CLEANUP_POLICY_VAR, POLICY_ABORT, POLICY_LOG, POLICY_PANIC};
use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// What to do when a deleter fails on the drop path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupPolicy {
    /// Emit an error event and finish the drop
    #[default]
    Log,
    /// Panic with the failure, or log it if the thread is already unwinding
    Panic,
    /// Log the failure and abort the process
    Abort,
}

impl CleanupPolicy {
    /// The canonical lowercase name of this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanupPolicy::Log => POLICY_LOG,
            CleanupPolicy::Panic => POLICY_PANIC,
            CleanupPolicy::Abort => POLICY_ABORT,
        }
    }

    /// Reads the policy from `OWNHANDLE_CLEANUP_POLICY`
    ///
    /// An unset variable yields the default. An unparsable value is reported
    /// with a warning and also yields the default.
    pub fn from_env() -> Self {
        policy_from_env_value(std::env::var(OWNHANDLE_CLEANUP_POLICY_VAR).ok().as_deref())
    }

    fn to_u8(self) -> u8 {
        match self {
            CleanupPolicy::Log => 0,
            CleanupPolicy::Panic => 1,
            CleanupPolicy::Abort => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => CleanupPolicy::Panic,
            2 => CleanupPolicy::Abort,
            _ => CleanupPolicy::Log,
        }
    }
}

impl fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleanupPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            POLICY_LOG => Ok(CleanupPolicy::Log),
            POLICY_PANIC => Ok(CleanupPolicy::Panic),
            POLICY_ABORT => Ok(CleanupPolicy::Abort),
            _ => Err(Error::configuration(format!(
                "unknown cleanup policy '{s}', expected one of: {POLICY_LOG}, {POLICY_PANIC}, {POLICY_ABORT}"
            ))),
        }
    }
}

fn policy_from_env_value(value: Option<&str>) -> CleanupPolicy {
    match value {
        None => CleanupPolicy::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(
                variable = OWNHANDLE_CLEANUP_POLICY_VAR,
                value = raw,
                "ignoring invalid cleanup policy: {e}"
            );
            CleanupPolicy::default()
        }),
    }
}

static DEFAULT_POLICY: Lazy<AtomicU8> =
    Lazy::new(|| AtomicU8::new(CleanupPolicy::from_env().to_u8()));

/// Returns the process-wide default cleanup policy
pub fn default_cleanup_policy() -> CleanupPolicy {
    CleanupPolicy::from_u8(DEFAULT_POLICY.load(Ordering::Relaxed))
}

/// Replaces the process-wide default cleanup policy, returning the previous one
///
/// Handles created with an explicit policy are unaffected.
pub fn set_default_cleanup_policy(policy: CleanupPolicy) -> CleanupPolicy {
    CleanupPolicy::from_u8(DEFAULT_POLICY.swap(policy.to_u8(), Ordering::Relaxed))
}
