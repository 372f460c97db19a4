//! Shared numeric constants for the panorama engine.

// ── Canvas ──────────────────────────────────────────────────────

/// Canonical frame width in canvas units; every catalog ratio is 1080 wide.
pub const REFERENCE_WIDTH: f64 = 1080.0;

// ── Snapping ────────────────────────────────────────────────────

/// Snap threshold in canvas units at 1× scale. A guide further than this
/// from a candidate point never fires.
pub const SNAP_THRESHOLD: f64 = 15.0;

// ── Gestures ────────────────────────────────────────────────────

/// Minimum full-box width/height in canvas units. Resize steps that would
/// shrink either dimension below this are not applied.
pub const MIN_IMAGE_SIZE: f64 = 50.0;

/// Canvas-space hit slop for corner resize handles.
pub const HANDLE_RADIUS: f64 = 8.0;

// ── Templates ───────────────────────────────────────────────────

/// Gutter fraction between and around slots in the built-in templates.
pub const GUTTER: f64 = 0.02;
