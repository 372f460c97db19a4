//! Guide snapping for drag and resize gestures.
//!
//! Candidate guides come from two independently toggleable sets: structural
//! borders (canvas edges and every frame boundary) and other placed images'
//! *visible* rect edges and centers. Position snapping corrects at most one
//! x and one y value per step; resize snapping adjusts the single free
//! scale factor so the moving visible edge lands on a guide, with
//! per-gesture hysteresis so two near-tied guides never make the edge
//! flicker between them.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::consts::{MIN_IMAGE_SIZE, SNAP_THRESHOLD};
use crate::geom::{Point, Rect};
use crate::model::{Crop, Panorama, PlacedImageId};
use crate::session::Corner;

/// Which axis a snap line runs perpendicular to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapAxis {
    X,
    Y,
}

/// A guide line that fired, reported for visual feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapLine {
    pub axis: SnapAxis,
    /// Canvas-space coordinate of the guide.
    pub position: f64,
}

/// Which guide sets participate in snapping.
#[derive(Debug, Clone, Copy)]
pub struct SnapConfig {
    /// Canvas edges and frame boundaries.
    pub borders: bool,
    /// Other images' visible-rect edges and centers.
    pub images: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { borders: true, images: true }
    }
}

impl SnapConfig {
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.borders || self.images
    }
}

/// The winning (point, target) pair of a snap search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapHit {
    /// Signed correction to add to the snapped point.
    pub delta: f64,
    /// The guide coordinate the point lands on.
    pub at: f64,
}

/// Smallest-|delta| pair of `points` × `targets` under the snap threshold.
///
/// Ties resolve to the first-encountered pair; returns `None` when nothing
/// is within threshold.
#[must_use]
pub fn find_best_snap(points: &[f64], targets: &[f64]) -> Option<SnapHit> {
    let mut best: Option<(SnapHit, f64)> = None;
    for &p in points {
        for &t in targets {
            let delta = t - p;
            let abs = delta.abs();
            if abs < SNAP_THRESHOLD && best.is_none_or(|(_, b)| abs < b) {
                best = Some((SnapHit { delta, at: t }, abs));
            }
        }
    }
    best.map(|(hit, _)| hit)
}

/// X guide values for the configured target sets, excluding one image.
#[must_use]
pub fn x_targets(panorama: &Panorama, exclude: &PlacedImageId, config: SnapConfig) -> Vec<f64> {
    let mut targets = Vec::new();
    if config.borders {
        push_unique(&mut targets, 0.0);
        push_unique(&mut targets, panorama.total_width);
        for frame in &panorama.frames {
            push_unique(&mut targets, frame.x_offset);
            push_unique(&mut targets, frame.right());
        }
    }
    if config.images {
        for img in panorama.placed_images.iter().filter(|img| img.id != *exclude) {
            let vr = img.visible_rect();
            targets.push(vr.x);
            targets.push(vr.right());
            targets.push(vr.center().x);
        }
    }
    targets
}

/// Y guide values for the configured target sets, excluding one image.
#[must_use]
pub fn y_targets(panorama: &Panorama, exclude: &PlacedImageId, config: SnapConfig) -> Vec<f64> {
    let mut targets = Vec::new();
    if config.borders {
        push_unique(&mut targets, 0.0);
        push_unique(&mut targets, panorama.max_height);
    }
    if config.images {
        for img in panorama.placed_images.iter().filter(|img| img.id != *exclude) {
            let vr = img.visible_rect();
            targets.push(vr.y);
            targets.push(vr.bottom());
            targets.push(vr.center().y);
        }
    }
    targets
}

fn push_unique(targets: &mut Vec<f64>, value: f64) {
    if !targets.contains(&value) {
        targets.push(value);
    }
}

/// Correction produced by [`snap_position`].
#[derive(Debug, Clone, Default)]
pub struct SnapAdjust {
    pub dx: f64,
    pub dy: f64,
    pub lines: Vec<SnapLine>,
}

/// Snap a prospective visible rect during a drag.
///
/// Tests the rect's left/right/h-center against x guides and its
/// top/bottom/v-center against y guides; applies at most one correction per
/// axis (the axes are independent).
#[must_use]
pub fn snap_position(
    visible: Rect,
    panorama: &Panorama,
    exclude: &PlacedImageId,
    config: SnapConfig,
) -> SnapAdjust {
    let mut adjust = SnapAdjust::default();
    if !config.enabled() {
        return adjust;
    }

    let tx = x_targets(panorama, exclude, config);
    let xs = [visible.x, visible.right(), visible.center().x];
    if let Some(hit) = find_best_snap(&xs, &tx) {
        adjust.dx = hit.delta;
        adjust.lines.push(SnapLine { axis: SnapAxis::X, position: hit.at });
    }

    let ty = y_targets(panorama, exclude, config);
    let ys = [visible.y, visible.bottom(), visible.center().y];
    if let Some(hit) = find_best_snap(&ys, &ty) {
        adjust.dy = hit.delta;
        adjust.lines.push(SnapLine { axis: SnapAxis::Y, position: hit.at });
    }

    adjust
}

/// Per-gesture hysteresis state for resize snapping, one lock per axis.
///
/// While an axis is locked to a guide, other candidates on that axis are
/// ignored until the moving edge exits the guide's threshold band. Must be
/// reset at resize-gesture start and end.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapMemory {
    locked_x: Option<f64>,
    locked_y: Option<f64>,
}

impl SnapMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Release both axis locks.
    pub fn reset(&mut self) {
        self.locked_x = None;
        self.locked_y = None;
    }

    /// The guide the x axis is currently locked to, if any.
    #[must_use]
    pub fn locked_x(&self) -> Option<f64> {
        self.locked_x
    }

    /// The guide the y axis is currently locked to, if any.
    #[must_use]
    pub fn locked_y(&self) -> Option<f64> {
        self.locked_y
    }
}

/// Geometry of an in-progress aspect-locked resize, for [`snap_resize`].
#[derive(Debug, Clone, Copy)]
pub struct ResizeSnapParams {
    /// The non-moving corner of the full box.
    pub fixed: Point,
    /// The corner being dragged.
    pub corner: Corner,
    /// Full-box size at gesture start.
    pub orig_w: f64,
    pub orig_h: f64,
    /// Crop fractions at gesture start (zero when the image has no crop).
    pub crop: Crop,
    /// Unsnapped scale proposed by the pointer.
    pub scale: f64,
}

/// Snap the free scale factor of an aspect-locked resize.
///
/// Per axis, finds the guide nearest the moving visible edge and computes
/// the scale that would align the edge to it, rejecting scales that shrink
/// either full-box dimension below the minimum floor. When both axes yield
/// a candidate, the one closer to the unsnapped scale wins; ties favor x.
/// Aspect ratio is never broken to satisfy two guides at once.
#[must_use]
pub fn snap_resize(
    params: ResizeSnapParams,
    panorama: &Panorama,
    exclude: &PlacedImageId,
    config: SnapConfig,
    memory: &mut SnapMemory,
) -> (f64, Option<SnapLine>) {
    if !config.enabled() {
        return (params.scale, None);
    }

    let tx = x_targets(panorama, exclude, config);
    let candidate_x = snap_axis_scale(&params, AxisGeometry::x(&params), &tx, &mut memory.locked_x);

    let ty = y_targets(panorama, exclude, config);
    let candidate_y = snap_axis_scale(&params, AxisGeometry::y(&params), &ty, &mut memory.locked_y);

    match (candidate_x, candidate_y) {
        (Some((sx, gx)), Some((sy, gy))) => {
            // Ties favor x; arbitrary but deterministic.
            if (sy - params.scale).abs() < (sx - params.scale).abs() {
                (sy, Some(SnapLine { axis: SnapAxis::Y, position: gy }))
            } else {
                (sx, Some(SnapLine { axis: SnapAxis::X, position: gx }))
            }
        }
        (Some((sx, gx)), None) => (sx, Some(SnapLine { axis: SnapAxis::X, position: gx })),
        (None, Some((sy, gy))) => (sy, Some(SnapLine { axis: SnapAxis::Y, position: gy })),
        (None, None) => (params.scale, None),
    }
}

/// How one axis's moving visible edge relates to the scale factor:
/// `edge(s) = anchor + sign · s · span`.
struct AxisGeometry {
    anchor: f64,
    sign: f64,
    span: f64,
}

impl AxisGeometry {
    fn x(params: &ResizeSnapParams) -> Self {
        let moving_left = params.corner.moves_left();
        let inset = if moving_left { params.crop.left } else { params.crop.right };
        Self {
            anchor: params.fixed.x,
            sign: if moving_left { -1.0 } else { 1.0 },
            span: params.orig_w * (1.0 - inset),
        }
    }

    fn y(params: &ResizeSnapParams) -> Self {
        let moving_top = params.corner.moves_top();
        let inset = if moving_top { params.crop.top } else { params.crop.bottom };
        Self {
            anchor: params.fixed.y,
            sign: if moving_top { -1.0 } else { 1.0 },
            span: params.orig_h * (1.0 - inset),
        }
    }

    fn edge_at(&self, scale: f64) -> f64 {
        self.anchor + self.sign * scale * self.span
    }

    /// Scale that puts the moving edge exactly on `target`.
    fn scale_for(&self, target: f64) -> f64 {
        (target - self.anchor) / (self.sign * self.span)
    }
}

/// One axis of resize snapping: returns `(snapped scale, guide)` or `None`.
fn snap_axis_scale(
    params: &ResizeSnapParams,
    geometry: AxisGeometry,
    targets: &[f64],
    lock: &mut Option<f64>,
) -> Option<(f64, f64)> {
    if geometry.span <= 0.0 {
        return None;
    }
    let edge = geometry.edge_at(params.scale);

    // A held lock wins over every other guide while the edge stays in band.
    if let Some(guide) = *lock {
        if (edge - guide).abs() < SNAP_THRESHOLD {
            return accept_scale(params, &geometry, guide).map(|s| (s, guide));
        }
        *lock = None;
    }

    let mut best: Option<(f64, f64, f64)> = None;
    for &t in targets {
        let dist = (edge - t).abs();
        if dist >= SNAP_THRESHOLD {
            continue;
        }
        let Some(s) = accept_scale(params, &geometry, t) else {
            continue;
        };
        if best.is_none_or(|(_, _, d)| dist < d) {
            best = Some((s, t, dist));
        }
    }
    best.map(|(s, t, _)| {
        *lock = Some(t);
        (s, t)
    })
}

/// Validate the scale implied by a guide: positive and above the size floor.
fn accept_scale(params: &ResizeSnapParams, geometry: &AxisGeometry, target: f64) -> Option<f64> {
    let s = geometry.scale_for(target);
    if s <= 0.0 || s * params.orig_w < MIN_IMAGE_SIZE || s * params.orig_h < MIN_IMAGE_SIZE {
        return None;
    }
    Some(s)
}
