//! The panorama aggregate: frames, placed images, and layout.
//!
//! This module defines the root data model (`Panorama`) plus the entities it
//! owns: `Frame` cells in the horizontal strip and `PlacedImage` photographs
//! on the composite canvas. Frame `x_offset` and the composite dimensions
//! are derived fields, recomputed by [`Panorama::recalculate`] after every
//! structural mutation; no call site ever hand-sets them.
//!
//! The placement model is crop-aware: a placed image carries a full
//! (un-cropped) box, and its *visible* rectangle is always derived, either
//! from stored crop fractions or, while the image is bound to a template
//! slot, from the fixed slot rectangle it must keep covering.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::geom::{Point, Rect};
use crate::ratio::AspectRatio;

/// Unique identifier for a frame in the strip.
pub type FrameId = Uuid;

/// Unique identifier for a placed image (one placement, not the resource).
pub type PlacedImageId = Uuid;

/// Unique identifier for a loaded image resource.
pub type ImageId = Uuid;

/// Identifier shared by every frame and binding produced by one template
/// application.
pub type TemplateGroupId = Uuid;

/// Fractional crop insets from each edge of an image's full box.
///
/// Each inset is in `[0, 1)` and `left + right < 1`, `top + bottom < 1`:
/// a crop never consumes the whole box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Crop {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Crop {
    /// Build a crop, clamping each inset to be non-negative.
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: left.max(0.0),
            top: top.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
        }
    }

    /// Crop fractions that anchor the visible area of `full` to `slot`.
    ///
    /// Each fraction is clamped to ≥ 0, so a box fully containing its slot
    /// never produces a negative inset; a box smaller than the slot yields
    /// zero insets on the short sides (visible rect = slot ∩ full box).
    #[must_use]
    pub fn anchor_to_slot(full: Rect, slot: Rect) -> Self {
        Self::new(
            (slot.x - full.x) / full.w,
            (slot.y - full.y) / full.h,
            (full.right() - slot.right()) / full.w,
            (full.bottom() - slot.bottom()) / full.h,
        )
    }

    /// Whether all four insets are zero.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

/// Canvas-space materialization of one template slot at apply time.
///
/// The rectangle is a stable anchor: it does not move as the bound image is
/// dragged or resized; the image's crop is what tracks the gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotBinding {
    /// Shared by every frame and binding from one template application.
    pub group_id: TemplateGroupId,
    /// Slot id within the template (e.g. `"s1"`).
    pub slot_id: String,
    /// Absolute canvas-space slot rectangle.
    pub rect: Rect,
}

/// Template linkage carried by a frame while it is in template mode.
///
/// Bundling these fields keeps "in template mode" and "has a group id"
/// from ever disagreeing: a frame is in template mode iff its `template`
/// field is `Some`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateTag {
    pub group_id: TemplateGroupId,
    /// Which catalog template was applied.
    pub template_id: String,
    /// Snapshot of canvas-space slot rects, shared by all frames of the group.
    pub slots: Vec<SlotBinding>,
}

/// One fixed-aspect-ratio cell in the horizontal frame strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    pub aspect_ratio: AspectRatio,
    /// Derived: sum of preceding frame widths. Recomputed, never hand-set.
    pub x_offset: f64,
    /// Present while the frame belongs to an applied template.
    pub template: Option<TemplateTag>,
}

impl Frame {
    #[must_use]
    pub fn new(aspect_ratio: AspectRatio) -> Self {
        Self { id: Uuid::new_v4(), aspect_ratio, x_offset: 0.0, template: None }
    }

    /// Whether this frame is in template mode.
    #[must_use]
    pub fn template_mode(&self) -> bool {
        self.template.is_some()
    }

    /// Right edge x-coordinate (left edge is `x_offset`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x_offset + self.aspect_ratio.width()
    }
}

/// How a placed image's visible area is determined.
///
/// The two mechanisms are mutually exclusive by construction: exiting
/// template mode converts a `SlotBound` placement into the equivalent
/// `Freeform` crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Free placement; visible rect is the full box reduced by `crop`.
    Freeform { crop: Option<Crop> },
    /// Anchored to a fixed template slot rectangle; the crop is derived
    /// from the slot on every read so it can never go stale.
    SlotBound(SlotBinding),
}

impl Default for Placement {
    fn default() -> Self {
        Self::Freeform { crop: None }
    }
}

/// A photograph instance on the composite canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedImage {
    pub id: PlacedImageId,
    /// The loaded image resource this placement shows.
    pub image_id: ImageId,
    /// Full transform box: top-left, un-rotated, un-cropped.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees about the box center, applied at render.
    pub rotation: f64,
    /// Uniform render-time scale multiplier about the box center.
    pub scale: f64,
    pub placement: Placement,
}

impl PlacedImage {
    #[must_use]
    pub fn new(image_id: ImageId, rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_id,
            x: rect.x,
            y: rect.y,
            width: rect.w,
            height: rect.h,
            rotation: 0.0,
            scale: 1.0,
            placement: Placement::default(),
        }
    }

    /// The full (un-cropped) box.
    #[must_use]
    pub fn full_box(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move the full box without touching its size.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Replace the full box.
    pub fn set_box(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.w;
        self.height = rect.h;
    }

    /// Effective crop fractions for the current box, if any.
    ///
    /// For slot-bound images this derives fresh fractions from the fixed
    /// slot rectangle, so the visible rect keeps matching the slot after
    /// every move or resize without a separate recompute step.
    #[must_use]
    pub fn crop_fractions(&self) -> Option<Crop> {
        match &self.placement {
            Placement::Freeform { crop } => *crop,
            Placement::SlotBound(binding) => {
                Some(Crop::anchor_to_slot(self.full_box(), binding.rect))
            }
        }
    }

    /// The visible (post-crop) rectangle; the full box when there is no crop.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        let Some(c) = self.crop_fractions() else {
            return self.full_box();
        };
        Rect::new(
            self.x + c.left * self.width,
            self.y + c.top * self.height,
            self.width * (1.0 - c.left - c.right),
            self.height * (1.0 - c.top - c.bottom),
        )
    }

    /// The slot binding, when this image is bound to a template slot.
    #[must_use]
    pub fn slot_binding(&self) -> Option<&SlotBinding> {
        match &self.placement {
            Placement::SlotBound(binding) => Some(binding),
            Placement::Freeform { .. } => None,
        }
    }
}

/// The root aggregate: frames, placed images, and composite dimensions.
///
/// `placed_images` order is z-order: the last element draws topmost.
/// `total_width` / `max_height` are derived from the frame list and only
/// valid after [`Panorama::recalculate`], which every structural mutation
/// in this module calls before returning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panorama {
    pub id: Uuid,
    pub frames: Vec<Frame>,
    pub placed_images: Vec<PlacedImage>,
    pub background_color: String,
    /// Derived: sum of frame widths.
    pub total_width: f64,
    /// Derived: max frame height.
    pub max_height: f64,
}

impl Panorama {
    /// Create an empty panorama with no frames.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            frames: Vec::new(),
            placed_images: Vec::new(),
            background_color: "#ffffff".to_owned(),
            total_width: 0.0,
            max_height: 0.0,
        }
    }

    /// Recompute frame offsets and composite dimensions from the frame list.
    ///
    /// Walks frames in order, assigning each `x_offset` as the running sum
    /// of preceding widths, and sets `total_width` / `max_height`.
    pub fn recalculate(&mut self) {
        let mut x = 0.0;
        let mut max_h: f64 = 0.0;
        for frame in &mut self.frames {
            frame.x_offset = x;
            x += frame.aspect_ratio.width();
            max_h = max_h.max(frame.aspect_ratio.height());
        }
        self.total_width = x;
        self.max_height = max_h;
    }

    /// Append a frame to the strip. Returns the new frame's id.
    pub fn add_frame(&mut self, aspect_ratio: AspectRatio) -> FrameId {
        let frame = Frame::new(aspect_ratio);
        let id = frame.id;
        self.frames.push(frame);
        self.recalculate();
        id
    }

    /// Remove a frame by id. Returns `false` if no such frame exists.
    ///
    /// Placed images whose full box no longer overlaps the visible strip
    /// `[0, total_width)` are dropped; images are not retained floating
    /// outside it.
    pub fn remove_frame(&mut self, id: &FrameId) -> bool {
        let Some(index) = self.frames.iter().position(|f| f.id == *id) else {
            return false;
        };
        self.frames.remove(index);
        self.recalculate();

        let before = self.placed_images.len();
        let total_width = self.total_width;
        self.placed_images.retain(|img| img.full_box().overlaps_x_range(0.0, total_width));
        if self.placed_images.len() != before {
            debug!(dropped = before - self.placed_images.len(), "frame removal dropped out-of-strip images");
        }
        true
    }

    /// Change a frame's aspect ratio. Returns `false` if no such frame exists.
    pub fn set_frame_ratio(&mut self, id: &FrameId, aspect_ratio: AspectRatio) -> bool {
        let Some(frame) = self.frames.iter_mut().find(|f| f.id == *id) else {
            return false;
        };
        frame.aspect_ratio = aspect_ratio;
        self.recalculate();
        true
    }

    /// The frame whose x-range contains `x`, if any.
    #[must_use]
    pub fn frame_at(&self, x: f64) -> Option<&Frame> {
        self.frames.iter().find(|f| x >= f.x_offset && x < f.right())
    }

    /// The rectangle the export collaborator must crop out of the full
    /// composite for the frame at `index`. Frames shorter than `max_height`
    /// are centered vertically.
    #[must_use]
    pub fn export_rect(&self, index: usize) -> Option<Rect> {
        let frame = self.frames.get(index)?;
        Some(Rect::new(
            frame.x_offset,
            (self.max_height - frame.aspect_ratio.height()) / 2.0,
            frame.aspect_ratio.width(),
            frame.aspect_ratio.height(),
        ))
    }

    /// Place an image resource with the given natural size onto the canvas.
    ///
    /// The box fits the image's aspect ratio into the panorama height, or
    /// into the panorama width when fit-by-height would overflow the strip.
    /// It is centered on `position` when given (panorama center otherwise)
    /// and clamped into `[0, total_width] × [0, max_height]`. Returns `None`
    /// without placing anything when the panorama has no frames.
    pub fn add_image(
        &mut self,
        image_id: ImageId,
        natural: (f64, f64),
        position: Option<Point>,
    ) -> Option<PlacedImageId> {
        if self.total_width <= 0.0 || self.max_height <= 0.0 {
            return None;
        }
        let (natural_w, natural_h) = natural;
        if natural_w <= 0.0 || natural_h <= 0.0 {
            return None;
        }
        let aspect = natural_w / natural_h;

        let mut width = self.max_height * aspect;
        let mut height = self.max_height;
        if width > self.total_width {
            width = self.total_width;
            height = width / aspect;
        }

        let center = position
            .unwrap_or_else(|| Point::new(self.total_width / 2.0, self.max_height / 2.0));
        let x = (center.x - width / 2.0).min(self.total_width - width).max(0.0);
        let y = (center.y - height / 2.0).min(self.max_height - height).max(0.0);

        let image = PlacedImage::new(image_id, Rect::new(x, y, width, height));
        let id = image.id;
        self.placed_images.push(image);
        Some(id)
    }

    /// Remove a placed image by id. No-op (returns `false`) when absent.
    pub fn remove_image(&mut self, id: &PlacedImageId) -> bool {
        let before = self.placed_images.len();
        self.placed_images.retain(|img| img.id != *id);
        self.placed_images.len() != before
    }

    /// Look up a placed image by id.
    #[must_use]
    pub fn image(&self, id: &PlacedImageId) -> Option<&PlacedImage> {
        self.placed_images.iter().find(|img| img.id == *id)
    }

    /// Mutable lookup of a placed image by id.
    pub fn image_mut(&mut self, id: &PlacedImageId) -> Option<&mut PlacedImage> {
        self.placed_images.iter_mut().find(|img| img.id == *id)
    }

    /// Topmost placed image whose visible rect contains `p`, if any.
    ///
    /// Iterates in reverse insertion order so the last-added image wins.
    #[must_use]
    pub fn image_at(&self, p: Point) -> Option<&PlacedImage> {
        self.placed_images.iter().rev().find(|img| img.visible_rect().contains(p))
    }

    /// Move a placed image to the top of the z-order. Returns `false` when
    /// the id is unknown.
    pub fn raise_to_top(&mut self, id: &PlacedImageId) -> bool {
        let Some(index) = self.placed_images.iter().position(|img| img.id == *id) else {
            return false;
        };
        let image = self.placed_images.remove(index);
        self.placed_images.push(image);
        true
    }

    /// Set the composite background color (any CSS color string).
    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }
}

impl Default for Panorama {
    fn default() -> Self {
        Self::new()
    }
}
