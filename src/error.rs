//! Errors for the fallible edges of the crate.
//!
//! The simulation itself never fails: degenerate geometry and exhausted spawn
//! searches are handled in place. Only loading configuration and restoring
//! snapshots can go wrong, and those paths report through [`SimError`].

use std::fmt;

/// Top-level error enum for horde-arena.
#[derive(Debug)]
pub enum SimError {
    /// JSON could not be parsed into the expected structure.
    Parse(serde_json::Error),

    /// A tuning value is outside the range the simulation can honour.
    InvalidTuning {
        /// Dotted path of the field, e.g. `spawn.max_attempts`.
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// Snapshot was written by an incompatible format version.
    SnapshotVersion {
        found: u32,
        expected: u32,
    },

    /// Reading a config or snapshot file failed.
    Io(std::io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Parse(e) => write!(f, "failed to parse JSON: {e}"),
            SimError::InvalidTuning {
                name,
                value,
                expected,
            } => write!(f, "tuning value `{name}` = {value} is invalid (expected {expected})"),
            SimError::SnapshotVersion { found, expected } => write!(
                f,
                "snapshot format version {found} is not supported (expected {expected})"
            ),
            SimError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Parse(e) => Some(e),
            SimError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_invalid_tuning() {
        let err = SimError::InvalidTuning {
            name: "spawn.max_attempts",
            value: 0.0,
            expected: ">= 1",
        };
        let msg = err.to_string();
        assert!(msg.contains("spawn.max_attempts"));
        assert!(msg.contains(">= 1"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = SimError::from(json_err);
        assert!(err.source().is_some());
    }
}
