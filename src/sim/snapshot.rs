//! Versioned JSON snapshots of a running session
//!
//! A snapshot carries the full [`GameState`], RNG included, so a restored
//! session produces exactly the same subsequent frames as the saved one.
//! Per-tick events are not saved.

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::error::SimError;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    state: &'a GameState,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    state: GameState,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

/// Serialize the session to a JSON snapshot
pub fn save(state: &GameState) -> Result<String, SimError> {
    let json = serde_json::to_string(&SnapshotRef {
        version: SNAPSHOT_VERSION,
        state,
    })?;
    Ok(json)
}

/// Restore a session from a JSON snapshot
pub fn load(json: &str) -> Result<GameState, SimError> {
    // Check the version before committing to the state layout
    let header: SnapshotHeader = serde_json::from_str(json)?;
    if header.version != SNAPSHOT_VERSION {
        return Err(SimError::SnapshotVersion {
            found: header.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let snapshot: Snapshot = serde_json::from_str(json)?;
    snapshot.state.tuning.validate()?;
    log::info!(
        "Restored snapshot at frame {} ({} hostiles, {} projectiles)",
        snapshot.state.frame,
        snapshot.state.hostiles.len(),
        snapshot.state.projectiles.len()
    );
    Ok(snapshot.state)
}
