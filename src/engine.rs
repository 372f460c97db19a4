//! Editor façade: the panorama, the image-resource registry, and the
//! interaction session, wired together the way a host drives them.
//!
//! The host layer feeds pointer events and catalog actions into
//! [`EditorCore`] and reads back the composite for painting. The engine
//! never decodes image bytes; the resource registry only records natural
//! pixel dimensions supplied by the host.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use tracing::debug;

use crate::geom::{Point, Rect};
use crate::model::{FrameId, ImageId, Panorama, PlacedImage, PlacedImageId, TemplateGroupId};
use crate::ratio::AspectRatio;
use crate::session::InteractionSession;
use crate::template::{self, Template};

/// Natural pixel dimensions of a loaded image resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalSize {
    pub width: f64,
    pub height: f64,
}

/// The full editor state for one project.
pub struct EditorCore {
    pub panorama: Panorama,
    pub session: InteractionSession,
    resources: HashMap<ImageId, NaturalSize>,
}

impl EditorCore {
    /// Create an editor with a single default square frame, the state a
    /// fresh project starts from.
    #[must_use]
    pub fn new() -> Self {
        let mut panorama = Panorama::new();
        panorama.add_frame(AspectRatio::default());
        Self { panorama, session: InteractionSession::new(), resources: HashMap::new() }
    }

    // --- Image resources ---

    /// Record a loaded resource's natural dimensions.
    pub fn register_image(&mut self, id: ImageId, width: f64, height: f64) {
        self.resources.insert(id, NaturalSize { width, height });
    }

    /// Forget a resource and remove every placement that shows it.
    pub fn remove_image_resource(&mut self, id: &ImageId) -> bool {
        if self.resources.remove(id).is_none() {
            return false;
        }
        self.panorama.placed_images.retain(|img| img.image_id != *id);
        self.session.prune_selection(&self.panorama);
        true
    }

    /// Natural dimensions for a resource, if registered.
    #[must_use]
    pub fn natural_size(&self, id: &ImageId) -> Option<NaturalSize> {
        self.resources.get(id).copied()
    }

    // --- Frames ---

    /// Append a frame to the strip.
    pub fn add_frame(&mut self, ratio: AspectRatio) -> FrameId {
        self.panorama.add_frame(ratio)
    }

    /// Remove a frame; placements left outside the strip are dropped and
    /// a dangling selection is cleared.
    pub fn remove_frame(&mut self, id: &FrameId) -> bool {
        let removed = self.panorama.remove_frame(id);
        if removed {
            self.session.prune_selection(&self.panorama);
        }
        removed
    }

    /// Change a frame's aspect ratio by catalog name (e.g. `"portrait"`).
    pub fn set_frame_ratio(&mut self, id: &FrameId, ratio_name: &str) -> bool {
        let Some(ratio) = AspectRatio::by_name(ratio_name) else {
            return false;
        };
        self.panorama.set_frame_ratio(id, ratio)
    }

    // --- Placements ---

    /// Place a registered image onto the canvas, optionally centered on a
    /// drop position. Skipped (returns `None`) when the resource is
    /// unknown; no partial placement is created.
    pub fn add_image(&mut self, image_id: ImageId, position: Option<Point>) -> Option<PlacedImageId> {
        let size = self.natural_size(&image_id)?;
        self.panorama.add_image(image_id, (size.width, size.height), position)
    }

    /// Remove a placement by id. Idempotent.
    pub fn remove_placed_image(&mut self, id: &PlacedImageId) -> bool {
        let removed = self.panorama.remove_image(id);
        if removed {
            self.session.prune_selection(&self.panorama);
        }
        removed
    }

    // --- Templates ---

    /// Apply a template at `insert_index`, optionally replacing existing
    /// frames. Returns the new template group id.
    pub fn apply_template(
        &mut self,
        template: &Template,
        insert_index: usize,
        replace_frame_ids: &[FrameId],
    ) -> TemplateGroupId {
        let group_id = template::apply(&mut self.panorama, template, insert_index, replace_frame_ids);
        self.session.prune_selection(&self.panorama);
        group_id
    }

    /// Cover-fit a registered image into the template slot nearest the
    /// drop point and bind it there.
    pub fn place_image_in_slot(
        &mut self,
        image_id: ImageId,
        drop_point: Point,
        group_id: TemplateGroupId,
    ) -> Option<PlacedImageId> {
        let size = self.natural_size(&image_id)?;
        template::place_in_slot(
            &mut self.panorama,
            image_id,
            (size.width, size.height),
            drop_point,
            group_id,
        )
    }

    /// Exit template mode for a group, freezing bound images into crops.
    pub fn exit_template_mode(&mut self, group_id: TemplateGroupId) -> bool {
        template::exit(&mut self.panorama, group_id)
    }

    // --- Persistence entry points ---

    /// Replace the in-memory panorama wholesale with a restored snapshot.
    pub fn restore(&mut self, mut panorama: Panorama) {
        panorama.recalculate();
        debug!(panorama = %panorama.id, "restored snapshot");
        self.panorama = panorama;
        self.session = InteractionSession::new();
    }

    /// Reset to the fresh-project state. Registered resources are kept;
    /// the host clears them separately when the project's images go away.
    pub fn reset(&mut self) {
        debug!("reset to empty project");
        let mut panorama = Panorama::new();
        panorama.add_frame(AspectRatio::default());
        self.panorama = panorama;
        self.session = InteractionSession::new();
    }

    // --- Composite queries for the rendering collaborator ---

    /// Composite dimensions: `(total_width, max_height)`.
    #[must_use]
    pub fn composite_size(&self) -> (f64, f64) {
        (self.panorama.total_width, self.panorama.max_height)
    }

    /// Interior frame boundary x-positions (excludes the outer edges).
    #[must_use]
    pub fn frame_boundaries(&self) -> Vec<f64> {
        self.panorama.frames.iter().skip(1).map(|f| f.x_offset).collect()
    }

    /// Placed images in z-order (first element draws bottom-most).
    #[must_use]
    pub fn images_in_z_order(&self) -> &[PlacedImage] {
        &self.panorama.placed_images
    }

    /// The rectangle to crop out of the composite for a per-frame export.
    #[must_use]
    pub fn export_rect(&self, frame_index: usize) -> Option<Rect> {
        self.panorama.export_rect(frame_index)
    }
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new()
    }
}
