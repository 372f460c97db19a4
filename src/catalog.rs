//! Built-in template library.
//!
//! Slot coordinates are fractions of the template's own combined canvas
//! (total width × max height). Seven single-frame layouts are instantiated
//! for each catalog aspect ratio, followed by the multi-frame panorama
//! layouts. A 2% gutter separates and surrounds slots throughout.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::consts::GUTTER;
use crate::ratio::AspectRatio;
use crate::template::{Template, TemplateSlot};

fn slot(id: &str, x: f64, y: f64, w: f64, h: f64) -> TemplateSlot {
    TemplateSlot { id: id.to_owned(), x, y, w, h }
}

fn template(id: String, name: String, frames: Vec<AspectRatio>, slots: Vec<TemplateSlot>) -> Template {
    Template { id, name, frames, slots }
}

/// The seven single-frame layouts for one aspect ratio.
fn single_frame_templates(ar: AspectRatio) -> Vec<Template> {
    let g = GUTTER;
    let label = ar.label();
    let third = (1.0 - 4.0 * g) / 3.0;

    vec![
        template(
            format!("{}-1-full", ar.name()),
            format!("{label} — Full"),
            vec![ar],
            vec![slot("s1", g, g, 1.0 - 2.0 * g, 1.0 - 2.0 * g)],
        ),
        template(
            format!("{}-2-lr", ar.name()),
            format!("{label} — Left/Right"),
            vec![ar],
            vec![
                slot("s1", g, g, 0.5 - 1.5 * g, 1.0 - 2.0 * g),
                slot("s2", 0.5 + 0.5 * g, g, 0.5 - 1.5 * g, 1.0 - 2.0 * g),
            ],
        ),
        template(
            format!("{}-2-tb", ar.name()),
            format!("{label} — Top/Bottom"),
            vec![ar],
            vec![
                slot("s1", g, g, 1.0 - 2.0 * g, 0.5 - 1.5 * g),
                slot("s2", g, 0.5 + 0.5 * g, 1.0 - 2.0 * g, 0.5 - 1.5 * g),
            ],
        ),
        template(
            format!("{}-2-6040", ar.name()),
            format!("{label} — 60/40"),
            vec![ar],
            vec![
                slot("s1", g, g, 0.60 - 1.5 * g, 1.0 - 2.0 * g),
                slot("s2", 0.60 + 0.5 * g, g, 0.40 - 1.5 * g, 1.0 - 2.0 * g),
            ],
        ),
        template(
            format!("{}-3-cols", ar.name()),
            format!("{label} — 3 Columns"),
            vec![ar],
            vec![
                slot("s1", g, g, third, 1.0 - 2.0 * g),
                slot("s2", g + third + g, g, third, 1.0 - 2.0 * g),
                slot("s3", g + 2.0 * (third + g), g, third, 1.0 - 2.0 * g),
            ],
        ),
        template(
            format!("{}-3-l2r", ar.name()),
            format!("{label} — Large Left + 2 Right"),
            vec![ar],
            vec![
                slot("s1", g, g, 0.60 - 1.5 * g, 1.0 - 2.0 * g),
                slot("s2", 0.60 + 0.5 * g, g, 0.40 - 1.5 * g, 0.5 - 1.5 * g),
                slot("s3", 0.60 + 0.5 * g, 0.5 + 0.5 * g, 0.40 - 1.5 * g, 0.5 - 1.5 * g),
            ],
        ),
        template(
            format!("{}-4-grid", ar.name()),
            format!("{label} — 2×2 Grid"),
            vec![ar],
            vec![
                slot("s1", g, g, 0.5 - 1.5 * g, 0.5 - 1.5 * g),
                slot("s2", 0.5 + 0.5 * g, g, 0.5 - 1.5 * g, 0.5 - 1.5 * g),
                slot("s3", g, 0.5 + 0.5 * g, 0.5 - 1.5 * g, 0.5 - 1.5 * g),
                slot("s4", 0.5 + 0.5 * g, 0.5 + 0.5 * g, 0.5 - 1.5 * g, 0.5 - 1.5 * g),
            ],
        ),
    ]
}

/// Layouts spanning two or more frames. The combined canvas is the sum of
/// frame widths by the max frame height, and slots may cross frame borders.
fn multi_frame_templates() -> Vec<Template> {
    let g = GUTTER;
    let sq = AspectRatio::Square;
    let port = AspectRatio::Portrait;
    let land = AspectRatio::Landscape;
    let land_share = land.width() / (land.width() + sq.width());

    vec![
        template(
            "sq-sq-panorama".to_owned(),
            "2×Square — Full Panorama".to_owned(),
            vec![sq, sq],
            vec![slot("s1", g, g, 1.0 - 2.0 * g, 1.0 - 2.0 * g)],
        ),
        template(
            "sq-sq-banner-2".to_owned(),
            "2×Square — Banner + 2 Below".to_owned(),
            vec![sq, sq],
            vec![
                slot("s1", g, g, 1.0 - 2.0 * g, 0.5 - 1.5 * g),
                slot("s2", g, 0.5 + 0.5 * g, 0.5 - 1.5 * g, 0.5 - 1.5 * g),
                slot("s3", 0.5 + 0.5 * g, 0.5 + 0.5 * g, 0.5 - 1.5 * g, 0.5 - 1.5 * g),
            ],
        ),
        template(
            "pt-pt-panorama".to_owned(),
            "2×Portrait — Full Panorama".to_owned(),
            vec![port, port],
            vec![slot("s1", g, g, 1.0 - 2.0 * g, 1.0 - 2.0 * g)],
        ),
        template(
            "sq-sq-sq-panorama".to_owned(),
            "3×Square — Full Panorama".to_owned(),
            vec![sq, sq, sq],
            vec![slot("s1", g, g, 1.0 - 2.0 * g, 1.0 - 2.0 * g)],
        ),
        template(
            "sq-sq-sq-wide-flanks".to_owned(),
            "3×Square — Wide Center + Flanks".to_owned(),
            vec![sq, sq, sq],
            vec![
                slot("s1", g, g, 1.0 / 3.0 - 1.5 * g, 1.0 - 2.0 * g),
                slot("s2", 1.0 / 3.0 + 0.5 * g, g, 1.0 / 3.0 - g, 1.0 - 2.0 * g),
                slot("s3", 2.0 / 3.0 + 0.5 * g, g, 1.0 / 3.0 - 1.5 * g, 1.0 - 2.0 * g),
            ],
        ),
        template(
            "land-land-panorama".to_owned(),
            "2×Landscape — Full Panorama".to_owned(),
            vec![land, land],
            vec![slot("s1", g, g, 1.0 - 2.0 * g, 1.0 - 2.0 * g)],
        ),
        template(
            "land-sq-split".to_owned(),
            "Landscape + Square".to_owned(),
            vec![land, sq],
            vec![
                slot("s1", g, g, land_share - 1.5 * g, 1.0 - 2.0 * g),
                slot("s2", land_share + 0.5 * g, g, 1.0 - land_share - 1.5 * g, 1.0 - 2.0 * g),
            ],
        ),
    ]
}

/// The full built-in template library, in presentation order.
///
/// The engine only ever reads from this list; hosts may append their own
/// templates but the built-ins are never mutated.
#[must_use]
pub fn builtin_templates() -> Vec<Template> {
    let mut all = Vec::new();
    for ar in AspectRatio::ALL {
        all.extend(single_frame_templates(ar));
    }
    all.extend(multi_frame_templates());
    all
}

/// Look up a built-in template by id.
#[must_use]
pub fn builtin_template(id: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.id == id)
}
