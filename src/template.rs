//! Fractional slot layouts and template application.
//!
//! A template is a reusable layout: an ordered list of frame aspect ratios
//! plus slots whose `x/y/w/h` are fractions of the template's own combined
//! canvas (sum of frame widths × max frame height), so a slot may span
//! several frames. Applying a template materializes every slot into a
//! canvas-space [`SlotBinding`] at the insertion offset; exiting converts
//! each bound image's anchor into an equivalent static crop, leaving the
//! visible composite pixel-identical.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::geom::{Point, Rect};
use crate::model::{
    Crop, Frame, FrameId, ImageId, Panorama, PlacedImage, PlacedImageId, Placement, SlotBinding,
    TemplateGroupId, TemplateTag,
};
use crate::ratio::AspectRatio;

/// One placeholder slot within a template. All coordinates are fractions of
/// the template's own combined canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSlot {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A reusable layout spanning one or more frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    /// Aspect ratios of the frames this template inserts, left to right.
    pub frames: Vec<AspectRatio>,
    pub slots: Vec<TemplateSlot>,
}

/// Combined canvas size of a template at the reference scale:
/// sum of frame widths × max frame height.
#[must_use]
pub fn dimensions(template: &Template) -> (f64, f64) {
    let mut total_width = 0.0;
    let mut max_height: f64 = 0.0;
    for ratio in &template.frames {
        total_width += ratio.width();
        max_height = max_height.max(ratio.height());
    }
    (total_width, max_height)
}

/// Box dimensions that cover-fit an image into a slot.
///
/// Preserves the image's aspect ratio, covers the slot fully (no
/// letterboxing), and centers the box on the slot: fit-by-height when the
/// image is relatively wider than the slot, fit-by-width otherwise.
#[must_use]
pub fn cover_fit(natural_w: f64, natural_h: f64, slot: Rect) -> Rect {
    let image_ar = natural_w / natural_h;
    let slot_ar = slot.w / slot.h;

    let (w, h) = if image_ar > slot_ar {
        (slot.h * image_ar, slot.h)
    } else {
        (slot.w, slot.w / image_ar)
    };

    Rect::new(slot.x + (slot.w - w) / 2.0, slot.y + (slot.h - h) / 2.0, w, h)
}

/// Materialize a template's slots into canvas-space bindings at an offset.
#[must_use]
pub fn slots_to_canvas(
    template: &Template,
    insert_x_offset: f64,
    group_id: TemplateGroupId,
) -> Vec<SlotBinding> {
    let (total_width, max_height) = dimensions(template);
    template
        .slots
        .iter()
        .map(|slot| SlotBinding {
            group_id,
            slot_id: slot.id.clone(),
            rect: Rect::new(
                insert_x_offset + slot.x * total_width,
                slot.y * max_height,
                slot.w * total_width,
                slot.h * max_height,
            ),
        })
        .collect()
}

/// Apply a template to the panorama, inserting its frames at `insert_index`.
///
/// Frames listed in `replace_frame_ids` are removed first, together with any
/// placed image whose full box overlaps a removed frame's x-range. The slot
/// bindings are materialized at the true insertion offset (after the removal
/// recalculation) under a freshly generated group id that tags every
/// inserted frame. Returns the new group id.
pub fn apply(
    panorama: &mut Panorama,
    template: &Template,
    insert_index: usize,
    replace_frame_ids: &[FrameId],
) -> TemplateGroupId {
    let group_id = Uuid::new_v4();

    // Remove replaced frames, remembering their x-ranges as laid out now.
    let mut removed_ranges: Vec<(f64, f64)> = Vec::new();
    for id in replace_frame_ids {
        if let Some(index) = panorama.frames.iter().position(|f| f.id == *id) {
            let frame = panorama.frames.remove(index);
            removed_ranges.push((frame.x_offset, frame.right()));
        }
    }
    if !removed_ranges.is_empty() {
        panorama.placed_images.retain(|img| {
            !removed_ranges.iter().any(|&(min, max)| img.full_box().overlaps_x_range(min, max))
        });
    }

    // Recalculate so the insertion offset reflects the post-removal layout.
    panorama.recalculate();
    let insert_x_offset = match panorama.frames.get(insert_index) {
        Some(frame) => frame.x_offset,
        None => panorama.total_width,
    };

    let slots = slots_to_canvas(template, insert_x_offset, group_id);

    let new_frames: Vec<Frame> = template
        .frames
        .iter()
        .map(|&ratio| {
            let mut frame = Frame::new(ratio);
            frame.template = Some(TemplateTag {
                group_id,
                template_id: template.id.clone(),
                slots: slots.clone(),
            });
            frame
        })
        .collect();
    let insert_index = insert_index.min(panorama.frames.len());
    panorama.frames.splice(insert_index..insert_index, new_frames);

    panorama.recalculate();
    debug!(template = %template.id, %group_id, insert_index, "applied template");
    group_id
}

/// The slot binding of `group_id` whose center is nearest the drop point.
///
/// Ties break to the first-encountered slot. `None` when no frame carries
/// the group id.
#[must_use]
pub fn nearest_slot(
    panorama: &Panorama,
    drop_point: Point,
    group_id: TemplateGroupId,
) -> Option<&SlotBinding> {
    let tag = panorama
        .frames
        .iter()
        .find_map(|f| f.template.as_ref().filter(|t| t.group_id == group_id))?;

    let mut best: Option<(&SlotBinding, f64)> = None;
    for slot in &tag.slots {
        let dist = drop_point.distance_to(slot.rect.center());
        if best.is_none_or(|(_, b)| dist < b) {
            best = Some((slot, dist));
        }
    }
    best.map(|(slot, _)| slot)
}

/// Crop fractions anchoring a bound image's visible rect to its slot.
///
/// `None` when the image is not slot-bound. Each fraction is clamped to ≥ 0;
/// a box fully containing its slot never produces a negative inset.
#[must_use]
pub fn recompute_slot_crop(image: &PlacedImage) -> Option<Crop> {
    let binding = image.slot_binding()?;
    Some(Crop::anchor_to_slot(image.full_box(), binding.rect))
}

/// Cover-fit an image into the slot nearest `drop_point` and bind it there.
///
/// Returns the new placement's id, or `None` when the group id is unknown.
pub fn place_in_slot(
    panorama: &mut Panorama,
    image_id: ImageId,
    natural: (f64, f64),
    drop_point: Point,
    group_id: TemplateGroupId,
) -> Option<PlacedImageId> {
    if natural.0 <= 0.0 || natural.1 <= 0.0 {
        return None;
    }
    let binding = nearest_slot(panorama, drop_point, group_id)?.clone();
    let full = cover_fit(natural.0, natural.1, binding.rect);

    let mut image = PlacedImage::new(image_id, full);
    image.placement = Placement::SlotBound(binding);
    let id = image.id;
    panorama.placed_images.push(image);
    Some(id)
}

/// Exit template mode for every frame and image of `group_id`.
///
/// Frames lose their template tag; each bound image's slot anchor becomes
/// the equivalent static crop, so its visible appearance is pixel-identical
/// to the instant before exit. Returns `false` when no frame carried the
/// group id.
pub fn exit(panorama: &mut Panorama, group_id: TemplateGroupId) -> bool {
    let mut found = false;
    for frame in &mut panorama.frames {
        if frame.template.as_ref().is_some_and(|t| t.group_id == group_id) {
            frame.template = None;
            found = true;
        }
    }
    if !found {
        return false;
    }

    for image in &mut panorama.placed_images {
        let bound = image.slot_binding().is_some_and(|b| b.group_id == group_id);
        if bound {
            let crop = recompute_slot_crop(image);
            image.placement = Placement::Freeform { crop };
        }
    }
    panorama.recalculate();
    debug!(%group_id, "exited template mode");
    true
}
