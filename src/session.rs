//! The drag/resize gesture state machine and selection.
//!
//! All gesture context lives in an [`InteractionSession`] value owned by the
//! caller and passed into every pointer handler, so there is no hidden
//! global state and gestures are testable in isolation. At most one gesture
//! is active at a time: a pointer-down while a gesture is in progress is a
//! no-op. Tentative positions are piped through the snap engine before
//! being applied; slot-bound images keep their visible rect anchored to the
//! slot automatically because their crop is derived from the binding.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::trace;

use crate::consts::{HANDLE_RADIUS, MIN_IMAGE_SIZE};
use crate::geom::{Point, Rect};
use crate::model::{Crop, Panorama, PlacedImageId};
use crate::snap::{self, ResizeSnapParams, SnapConfig, SnapLine, SnapMemory};

/// A corner of a placed image's visible rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Tl,
    Tr,
    Bl,
    Br,
}

impl Corner {
    /// The geometrically opposite corner; the one that stays fixed while
    /// this corner is dragged.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Tl => Self::Br,
            Self::Tr => Self::Bl,
            Self::Bl => Self::Tr,
            Self::Br => Self::Tl,
        }
    }

    /// Whether dragging this corner moves the box's left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Tl | Self::Bl)
    }

    /// Whether dragging this corner moves the box's top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Tl | Self::Tr)
    }
}

/// The active gesture, with the context needed to apply each pointer step
/// and to revert on cancellation.
#[derive(Debug, Clone, Copy)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,
    /// Moving an image. `offset` is pointer-minus-origin at gesture start,
    /// so the box does not jump to the pointer.
    Dragging {
        image_id: PlacedImageId,
        offset: Point,
        /// Box origin at gesture start, restored on cancel.
        orig_x: f64,
        orig_y: f64,
    },
    /// Resizing an image about the fixed corner opposite the dragged one.
    Resizing {
        image_id: PlacedImageId,
        /// The corner being dragged.
        corner: Corner,
        /// The non-moving corner of the full box.
        fixed: Point,
        /// Full box at gesture start, restored on cancel.
        orig_box: Rect,
        /// Diagonal length of `orig_box`; the scale denominator.
        orig_diag: f64,
        /// Crop fractions at gesture start (zero crop when none).
        orig_crop: Crop,
    },
}

/// Selection plus gesture state for one editor surface.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    selected_id: Option<PlacedImageId>,
    gesture: GestureState,
    memory: SnapMemory,
    /// Which guide sets snapping consults; host-toggleable.
    pub snap_config: SnapConfig,
    snap_lines: Vec<SnapLine>,
}

impl InteractionSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected_id: None,
            gesture: GestureState::Idle,
            memory: SnapMemory::new(),
            snap_config: SnapConfig::default(),
            snap_lines: Vec::new(),
        }
    }

    /// The currently selected image, if any.
    #[must_use]
    pub fn selection(&self) -> Option<PlacedImageId> {
        self.selected_id
    }

    /// Select an image (or clear with `None`). Independent of gestures.
    pub fn select(&mut self, id: Option<PlacedImageId>) {
        self.selected_id = id;
    }

    #[must_use]
    pub fn is_selected(&self, id: &PlacedImageId) -> bool {
        self.selected_id.as_ref() == Some(id)
    }

    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, GestureState::Idle)
    }

    /// The active gesture, for hosts that render gesture affordances.
    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Guide lines that fired on the last pointer step, for visual feedback.
    #[must_use]
    pub fn snap_lines(&self) -> &[SnapLine] {
        &self.snap_lines
    }

    /// Delete the selected image and clear the selection.
    pub fn delete_selected(&mut self, panorama: &mut Panorama) -> bool {
        let Some(id) = self.selected_id else {
            return false;
        };
        if !panorama.remove_image(&id) {
            return false;
        }
        self.selected_id = None;
        true
    }

    /// Drop the selection when the selected image no longer exists.
    pub fn prune_selection(&mut self, panorama: &Panorama) {
        if let Some(id) = self.selected_id {
            if panorama.image(&id).is_none() {
                self.selected_id = None;
            }
        }
    }

    /// Handle pointer-down. Starts a resize when the pointer lands on one
    /// of the selected image's corner handles, a drag when it lands inside
    /// an image's visible rect (selecting it), and otherwise clears the
    /// selection. Returns `true` when a gesture started. A pointer-down
    /// while a gesture is active is a no-op.
    pub fn pointer_down(&mut self, panorama: &Panorama, p: Point) -> bool {
        if !self.is_idle() {
            return false;
        }

        if let Some((id, corner)) = self.handle_at(panorama, p) {
            // Resize gesture anchored at the opposite corner of the full box.
            let Some(image) = panorama.image(&id) else {
                return false;
            };
            let full = image.full_box();
            let fixed = Point::new(
                if corner.moves_left() { full.right() } else { full.x },
                if corner.moves_top() { full.bottom() } else { full.y },
            );
            self.gesture = GestureState::Resizing {
                image_id: id,
                corner,
                fixed,
                orig_box: full,
                orig_diag: full.w.hypot(full.h),
                orig_crop: image.crop_fractions().unwrap_or_default(),
            };
            self.memory.reset();
            trace!(image = %id, ?corner, "resize started");
            return true;
        }

        if let Some(image) = panorama.image_at(p) {
            self.selected_id = Some(image.id);
            self.gesture = GestureState::Dragging {
                image_id: image.id,
                offset: Point::new(p.x - image.x, p.y - image.y),
                orig_x: image.x,
                orig_y: image.y,
            };
            trace!(image = %image.id, "drag started");
            return true;
        }

        self.selected_id = None;
        false
    }

    /// Handle pointer-move: compute the tentative box for the active
    /// gesture, snap it, and apply it to the model. Returns `true` when a
    /// step was applied.
    pub fn pointer_move(&mut self, panorama: &mut Panorama, p: Point) -> bool {
        match self.gesture {
            GestureState::Idle => false,
            GestureState::Dragging { image_id, offset, .. } => {
                self.drag_step(panorama, image_id, p, offset)
            }
            GestureState::Resizing { image_id, corner, fixed, orig_box, orig_diag, orig_crop } => {
                self.resize_step(panorama, image_id, corner, fixed, orig_box, orig_diag, orig_crop, p)
            }
        }
    }

    /// Handle pointer-up: commit the last applied step and return to idle.
    /// Returns `true` when a gesture was active.
    pub fn pointer_up(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        self.finish_gesture();
        true
    }

    /// Cancel the active gesture (pointer left the surface), restoring the
    /// image's box to its gesture-start state.
    pub fn cancel(&mut self, panorama: &mut Panorama) {
        match self.gesture {
            GestureState::Idle => return,
            GestureState::Dragging { image_id, orig_x, orig_y, .. } => {
                if let Some(image) = panorama.image_mut(&image_id) {
                    image.set_origin(orig_x, orig_y);
                }
            }
            GestureState::Resizing { image_id, orig_box, .. } => {
                if let Some(image) = panorama.image_mut(&image_id) {
                    image.set_box(orig_box);
                }
            }
        }
        self.finish_gesture();
    }

    fn finish_gesture(&mut self) {
        self.gesture = GestureState::Idle;
        self.memory.reset();
        self.snap_lines.clear();
    }

    /// The selected image's corner handle under `p`, if any.
    fn handle_at(&self, panorama: &Panorama, p: Point) -> Option<(PlacedImageId, Corner)> {
        let id = self.selected_id?;
        let vr = panorama.image(&id)?.visible_rect();
        let corners = [
            (Corner::Tl, Point::new(vr.x, vr.y)),
            (Corner::Tr, Point::new(vr.right(), vr.y)),
            (Corner::Bl, Point::new(vr.x, vr.bottom())),
            (Corner::Br, Point::new(vr.right(), vr.bottom())),
        ];
        corners
            .into_iter()
            .find(|(_, pt)| p.distance_to(*pt) <= HANDLE_RADIUS)
            .map(|(corner, _)| (id, corner))
    }

    fn drag_step(
        &mut self,
        panorama: &mut Panorama,
        image_id: PlacedImageId,
        p: Point,
        offset: Point,
    ) -> bool {
        let Some(image) = panorama.image(&image_id) else {
            return false;
        };
        let candidate = Point::new(p.x - offset.x, p.y - offset.y);

        // Prospective visible rect: the current one translated to the
        // candidate origin. Crop fractions are origin-independent.
        let vr = image.visible_rect();
        let prospective =
            Rect::new(vr.x + (candidate.x - image.x), vr.y + (candidate.y - image.y), vr.w, vr.h);
        let adjust = snap::snap_position(prospective, panorama, &image_id, self.snap_config);

        let Some(image) = panorama.image_mut(&image_id) else {
            return false;
        };
        image.set_origin(candidate.x + adjust.dx, candidate.y + adjust.dy);
        self.snap_lines = adjust.lines;
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn resize_step(
        &mut self,
        panorama: &mut Panorama,
        image_id: PlacedImageId,
        corner: Corner,
        fixed: Point,
        orig_box: Rect,
        orig_diag: f64,
        orig_crop: Crop,
        p: Point,
    ) -> bool {
        // One free scalar: pointer distance to the fixed corner over the
        // original diagonal, floored at the minimum size.
        let floor = MIN_IMAGE_SIZE / orig_box.w.min(orig_box.h);
        let scale = (p.distance_to(fixed) / orig_diag).max(floor);

        let params = ResizeSnapParams {
            fixed,
            corner,
            orig_w: orig_box.w,
            orig_h: orig_box.h,
            crop: orig_crop,
            scale,
        };
        let (scale, line) =
            snap::snap_resize(params, panorama, &image_id, self.snap_config, &mut self.memory);

        let w = orig_box.w * scale;
        let h = orig_box.h * scale;
        let x = if corner.moves_left() { fixed.x - w } else { fixed.x };
        let y = if corner.moves_top() { fixed.y - h } else { fixed.y };

        let Some(image) = panorama.image_mut(&image_id) else {
            return false;
        };
        image.set_box(Rect::new(x, y, w, h));
        self.snap_lines = line.into_iter().collect();
        true
    }
}

impl Default for InteractionSession {
    fn default() -> Self {
        Self::new()
    }
}
