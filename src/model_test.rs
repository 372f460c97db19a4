#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn two_square_panorama() -> Panorama {
    let mut p = Panorama::new();
    p.add_frame(AspectRatio::Square);
    p.add_frame(AspectRatio::Square);
    p
}

fn image_at(x: f64, y: f64, w: f64, h: f64) -> PlacedImage {
    PlacedImage::new(Uuid::new_v4(), Rect::new(x, y, w, h))
}

// =============================================================
// Layout recalculation
// =============================================================

#[test]
fn two_square_frames_layout() {
    let p = two_square_panorama();
    assert_eq!(p.total_width, 2160.0);
    assert_eq!(p.max_height, 1080.0);
    assert_eq!(p.frames[0].x_offset, 0.0);
    assert_eq!(p.frames[1].x_offset, 1080.0);
}

#[test]
fn offsets_are_running_sum_after_any_mutation() {
    let mut p = Panorama::new();
    p.add_frame(AspectRatio::Square);
    p.add_frame(AspectRatio::Landscape);
    p.add_frame(AspectRatio::Story);
    let removed = p.frames[1].id;
    p.remove_frame(&removed);
    p.add_frame(AspectRatio::Portrait);

    let mut expected = 0.0;
    for (i, frame) in p.frames.iter().enumerate() {
        assert_eq!(frame.x_offset, expected, "frame {i}");
        expected += frame.aspect_ratio.width();
    }
    assert_eq!(p.total_width, expected);
    assert_eq!(p.max_height, 1920.0);
}

#[test]
fn max_height_recomputed_on_ratio_change() {
    let mut p = two_square_panorama();
    let id = p.frames[1].id;
    assert!(p.set_frame_ratio(&id, AspectRatio::Story));
    assert_eq!(p.max_height, 1920.0);
    assert!(p.set_frame_ratio(&id, AspectRatio::Square));
    assert_eq!(p.max_height, 1080.0);
}

#[test]
fn set_frame_ratio_unknown_id_is_noop() {
    let mut p = two_square_panorama();
    assert!(!p.set_frame_ratio(&Uuid::new_v4(), AspectRatio::Story));
    assert_eq!(p.max_height, 1080.0);
}

#[test]
fn frame_at_uses_half_open_ranges() {
    let p = two_square_panorama();
    assert_eq!(p.frame_at(0.0).unwrap().id, p.frames[0].id);
    assert_eq!(p.frame_at(1079.9).unwrap().id, p.frames[0].id);
    assert_eq!(p.frame_at(1080.0).unwrap().id, p.frames[1].id);
    assert!(p.frame_at(2160.0).is_none());
    assert!(p.frame_at(-1.0).is_none());
}

// =============================================================
// Frame removal drops out-of-strip images
// =============================================================

#[test]
fn remove_frame_drops_fully_contained_image() {
    let mut p = two_square_panorama();
    p.placed_images.push(image_at(1200.0, 0.0, 500.0, 500.0));
    let second = p.frames[1].id;
    assert!(p.remove_frame(&second));
    assert_eq!(p.total_width, 1080.0);
    assert!(p.placed_images.is_empty());
}

#[test]
fn remove_frame_keeps_image_overlapping_surviving_frame() {
    let mut p = two_square_panorama();
    // Straddles the boundary: partially over the first, surviving frame.
    p.placed_images.push(image_at(900.0, 0.0, 500.0, 500.0));
    let second = p.frames[1].id;
    assert!(p.remove_frame(&second));
    assert_eq!(p.placed_images.len(), 1);
}

#[test]
fn remove_last_frame_drops_everything() {
    let mut p = Panorama::new();
    let id = p.add_frame(AspectRatio::Square);
    p.placed_images.push(image_at(0.0, 0.0, 100.0, 100.0));
    assert!(p.remove_frame(&id));
    assert_eq!(p.total_width, 0.0);
    assert!(p.placed_images.is_empty());
}

#[test]
fn remove_frame_unknown_id_is_noop() {
    let mut p = two_square_panorama();
    assert!(!p.remove_frame(&Uuid::new_v4()));
    assert_eq!(p.frames.len(), 2);
}

// =============================================================
// Crop and visible rect
// =============================================================

#[test]
fn visible_rect_without_crop_is_full_box() {
    let img = image_at(5.0, 6.0, 100.0, 50.0);
    assert_eq!(img.visible_rect(), img.full_box());
}

#[test]
fn visible_rect_applies_crop_fractions() {
    let mut img = image_at(0.0, 0.0, 100.0, 50.0);
    img.placement = Placement::Freeform { crop: Some(Crop::new(0.1, 0.0, 0.1, 0.0)) };
    let vr = img.visible_rect();
    assert_eq!(vr, Rect::new(10.0, 0.0, 80.0, 50.0));
}

#[test]
fn crop_new_clamps_negative_insets() {
    let c = Crop::new(-0.2, 0.1, -0.0, 0.3);
    assert_eq!(c.left, 0.0);
    assert_eq!(c.top, 0.1);
    assert_eq!(c.right, 0.0);
    assert_eq!(c.bottom, 0.3);
}

#[test]
fn anchor_to_slot_yields_slot_as_visible_rect() {
    let full = Rect::new(0.0, 0.0, 400.0, 200.0);
    let slot = Rect::new(100.0, 50.0, 200.0, 100.0);
    let c = Crop::anchor_to_slot(full, slot);
    assert_eq!(c, Crop::new(0.25, 0.25, 0.25, 0.25));

    let mut img = image_at(0.0, 0.0, 400.0, 200.0);
    img.placement = Placement::Freeform { crop: Some(c) };
    assert_eq!(img.visible_rect(), slot);
}

#[test]
fn anchor_to_slot_clamps_when_box_is_inside_slot() {
    // Box smaller than the slot on all sides: zero insets, not negative.
    let full = Rect::new(120.0, 60.0, 100.0, 50.0);
    let slot = Rect::new(100.0, 50.0, 200.0, 100.0);
    let c = Crop::anchor_to_slot(full, slot);
    assert!(c.is_none());
}

#[test]
fn slot_bound_crop_tracks_the_box() {
    let binding = SlotBinding {
        group_id: Uuid::new_v4(),
        slot_id: "s1".to_owned(),
        rect: Rect::new(100.0, 100.0, 200.0, 200.0),
    };
    let mut img = image_at(50.0, 50.0, 400.0, 400.0);
    img.placement = Placement::SlotBound(binding.clone());
    assert_eq!(img.visible_rect(), binding.rect);

    // Moving the box does not move the visible rect while it still covers
    // the slot; the derived crop absorbs the motion.
    img.set_origin(0.0, 80.0);
    assert_eq!(img.visible_rect(), binding.rect);
}

// =============================================================
// add_image fitting
// =============================================================

#[test]
fn add_image_fits_panorama_height_then_width() {
    // 2000×1000 into a 2160×1080 strip: fit-by-height gives 2160×1080,
    // which exactly fills the strip.
    let mut p = two_square_panorama();
    let id = p.add_image(Uuid::new_v4(), (2000.0, 1000.0), None).unwrap();
    let img = p.image(&id).unwrap();
    assert_eq!(img.width, 2160.0);
    assert_eq!(img.height, 1080.0);
    assert_eq!(img.x, 0.0);
    assert_eq!(img.y, 0.0);
}

#[test]
fn add_image_refits_by_width_when_too_wide() {
    let mut p = Panorama::new();
    p.add_frame(AspectRatio::Square);
    // 4:1 image: fit-by-height would be 4320 wide, so refit by width.
    let id = p.add_image(Uuid::new_v4(), (4000.0, 1000.0), None).unwrap();
    let img = p.image(&id).unwrap();
    assert_eq!(img.width, 1080.0);
    assert_eq!(img.height, 270.0);
    // Centered vertically by the default position.
    assert_eq!(img.y, 405.0);
}

#[test]
fn add_image_centers_on_position_and_clamps() {
    let mut p = two_square_panorama();
    let id = p
        .add_image(Uuid::new_v4(), (1000.0, 1000.0), Some(Point::new(10.0, 10.0)))
        .unwrap();
    let img = p.image(&id).unwrap();
    // A 1080×1080 box centered at (10,10) would stick out; clamped to 0.
    assert_eq!(img.x, 0.0);
    assert_eq!(img.y, 0.0);
}

#[test]
fn add_image_without_frames_is_skipped() {
    let mut p = Panorama::new();
    assert!(p.add_image(Uuid::new_v4(), (1000.0, 1000.0), None).is_none());
    assert!(p.placed_images.is_empty());
}

#[test]
fn add_image_with_degenerate_natural_size_is_skipped() {
    let mut p = two_square_panorama();
    assert!(p.add_image(Uuid::new_v4(), (0.0, 1000.0), None).is_none());
}

// =============================================================
// Placement queries and z-order
// =============================================================

#[test]
fn remove_image_is_idempotent() {
    let mut p = two_square_panorama();
    let img = image_at(0.0, 0.0, 100.0, 100.0);
    let id = img.id;
    p.placed_images.push(img);
    assert!(p.remove_image(&id));
    assert!(!p.remove_image(&id));
}

#[test]
fn image_at_returns_topmost() {
    let mut p = two_square_panorama();
    let bottom = image_at(0.0, 0.0, 200.0, 200.0);
    let top = image_at(100.0, 100.0, 200.0, 200.0);
    let (bottom_id, top_id) = (bottom.id, top.id);
    p.placed_images.push(bottom);
    p.placed_images.push(top);

    // Overlap region: last added wins.
    assert_eq!(p.image_at(Point::new(150.0, 150.0)).unwrap().id, top_id);
    // Only the bottom image covers this point.
    assert_eq!(p.image_at(Point::new(50.0, 50.0)).unwrap().id, bottom_id);
    assert!(p.image_at(Point::new(500.0, 500.0)).is_none());
}

#[test]
fn image_at_uses_visible_rect_not_full_box() {
    let mut p = two_square_panorama();
    let mut img = image_at(0.0, 0.0, 200.0, 200.0);
    img.placement = Placement::Freeform { crop: Some(Crop::new(0.5, 0.0, 0.0, 0.0)) };
    p.placed_images.push(img);
    // Left half is cropped away.
    assert!(p.image_at(Point::new(50.0, 50.0)).is_none());
    assert!(p.image_at(Point::new(150.0, 50.0)).is_some());
}

#[test]
fn raise_to_top_moves_image_to_end() {
    let mut p = two_square_panorama();
    let a = image_at(0.0, 0.0, 100.0, 100.0);
    let b = image_at(0.0, 0.0, 100.0, 100.0);
    let a_id = a.id;
    p.placed_images.push(a);
    p.placed_images.push(b);
    assert!(p.raise_to_top(&a_id));
    assert_eq!(p.placed_images.last().unwrap().id, a_id);
    assert!(!p.raise_to_top(&Uuid::new_v4()));
}

// =============================================================
// Export rects
// =============================================================

#[test]
fn export_rect_centers_short_frames_vertically() {
    let mut p = Panorama::new();
    p.add_frame(AspectRatio::Square);
    p.add_frame(AspectRatio::Landscape);
    assert_eq!(p.export_rect(0), Some(Rect::new(0.0, 0.0, 1080.0, 1080.0)));
    assert_eq!(p.export_rect(1), Some(Rect::new(1080.0, 236.0, 1080.0, 608.0)));
    assert_eq!(p.export_rect(2), None);
}

#[test]
fn frame_template_mode_tracks_tag_presence() {
    let mut frame = Frame::new(AspectRatio::Square);
    assert!(!frame.template_mode());
    frame.template = Some(TemplateTag {
        group_id: Uuid::new_v4(),
        template_id: "sq-1-full".to_owned(),
        slots: Vec::new(),
    });
    assert!(frame.template_mode());
}
