//! JSON persistence boundary for the panorama aggregate.
//!
//! The persistence collaborator stores the aggregate as plain structured
//! data and restores it wholesale; this module is the only fallible edge of
//! the crate. Decoding recalculates the layout so the derived fields can
//! never disagree with the frame list a snapshot carried.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use crate::model::Panorama;

/// Error returned by [`from_json`] / [`to_json`].
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("snapshot deserialization failed: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// Serialize a panorama to a JSON snapshot.
///
/// # Errors
///
/// Returns [`SnapshotError::Serialize`] when encoding fails.
pub fn to_json(panorama: &Panorama) -> Result<String, SnapshotError> {
    serde_json::to_string(panorama).map_err(SnapshotError::Serialize)
}

/// Restore a panorama from a JSON snapshot, recalculating derived layout.
///
/// # Errors
///
/// Returns [`SnapshotError::Deserialize`] for malformed or mistyped input.
pub fn from_json(json: &str) -> Result<Panorama, SnapshotError> {
    let mut panorama: Panorama =
        serde_json::from_str(json).map_err(SnapshotError::Deserialize)?;
    panorama.recalculate();
    Ok(panorama)
}
