//! Geometry and template-slot engine for a panorama photo splitter.
//!
//! This crate is the pure-logic core of an editor that lines up several
//! fixed-aspect-ratio frames into one wide composite canvas, lets the user
//! place and transform photographs on top of it, optionally binds photos to
//! fractional layout-template slots, and later slices the composite back
//! into per-frame exports. It owns the coordinate system, the crop-aware
//! placement model, guide snapping, and the drag/resize gesture state
//! machine. The host layer is responsible only for wiring pointer events to
//! [`engine::EditorCore`], painting the composite, and persisting snapshots.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor façade: panorama + image resources + session |
//! | [`model`] | Panorama aggregate, frames, placed images, layout |
//! | [`ratio`] | Fixed aspect-ratio catalog at the 1080 px reference scale |
//! | [`template`] | Fractional slot layouts and canvas-space slot binding |
//! | [`catalog`] | Built-in template library |
//! | [`snap`] | Guide snapping with per-gesture hysteresis |
//! | [`session`] | Drag/resize gesture state machine and selection |
//! | [`snapshot`] | JSON persistence boundary for the aggregate |
//! | [`geom`] | Points and rectangles |
//! | [`consts`] | Shared numeric constants (snap threshold, size floor) |

pub mod catalog;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod model;
pub mod ratio;
pub mod session;
pub mod snap;
pub mod snapshot;
pub mod template;
