// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Export plan: resolved dimensions and an ordered draw list for one export.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

use montage_core::config::{CanvasConfig, Color, SheetFormat};
use montage_core::geometry::layer_pixel_rect;
use montage_core::scene::{ImageSource, LayerId, Scene};

use crate::compose::ExportError;

/// Long-edge pixel size for preset-format exports.
pub const EXPORT_BASE_PX: u32 = 3840;

/// Resolves the output pixel dimensions for a config.
///
/// Custom formats export at their stored dimensions verbatim (already
/// clamped by the config). Preset formats scale so the longer edge is
/// [`EXPORT_BASE_PX`] and the ratio matches the format.
#[must_use]
pub fn surface_dimensions(config: &CanvasConfig) -> (u32, u32) {
    if config.format == SheetFormat::Custom {
        return (config.custom.width, config.custom.height);
    }
    let ratio = config.aspect_ratio();
    let base = f64::from(EXPORT_BASE_PX);
    if ratio >= 1.0 {
        // Landscape or square: width is the long edge.
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ratio >= 1 keeps the quotient within [1, EXPORT_BASE_PX]"
        )]
        let height = (base / ratio).round() as u32;
        (EXPORT_BASE_PX, height)
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ratio < 1 keeps the product within [1, EXPORT_BASE_PX]"
        )]
        let width = (base * ratio).round() as u32;
        (width, EXPORT_BASE_PX)
    }
}

/// A single draw command in the export plan.
///
/// Items are produced in back-to-front order: ascending `z_index`, with the
/// scene's insertion order breaking ties.
#[derive(Clone, Debug)]
pub struct ExportItem {
    /// The layer this item originates from.
    pub id: LayerId,
    /// The layer's display name (used in skip diagnostics).
    pub name: String,
    /// Encoded image bytes to decode and paint.
    pub source: ImageSource,
    /// Destination rectangle in surface pixel coordinates. May extend past
    /// the surface edges; backends clip.
    pub rect: Rect,
}

/// The resolved inputs for one export: dimensions, background, and draw
/// items in paint order.
#[derive(Clone, Debug)]
pub struct ExportPlan {
    /// Output surface width in pixels.
    pub width: u32,
    /// Output surface height in pixels.
    pub height: u32,
    /// Background fill.
    pub background: Color,
    /// Draw items in back-to-front order.
    pub items: Vec<ExportItem>,
}

impl ExportPlan {
    /// Builds the plan for the scene's current state.
    ///
    /// Fails with [`ExportError::EmptyScene`] when there is nothing to
    /// export.
    pub fn build(scene: &Scene) -> Result<Self, ExportError> {
        if scene.is_empty() {
            return Err(ExportError::EmptyScene);
        }

        let config = scene.config();
        let (width, height) = surface_dimensions(config);
        let container_aspect = config.aspect_ratio();

        let mut ordered: Vec<_> = scene.items().iter().collect();
        // Stable: insertion order breaks z ties.
        ordered.sort_by_key(|item| item.z_index);

        let items = ordered
            .into_iter()
            .map(|item| ExportItem {
                id: item.id,
                name: item.name.clone(),
                source: item.source.clone(),
                rect: layer_pixel_rect(item, container_aspect, f64::from(width), f64::from(height)),
            })
            .collect();

        Ok(Self {
            width,
            height,
            background: config.background,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use montage_core::scene::{NewImage, Scene};

    use super::*;

    fn new_image(tag: u8, aspect_ratio: f64) -> NewImage {
        NewImage {
            source: ImageSource::new(&[tag]),
            name: tag.to_string(),
            aspect_ratio,
        }
    }

    #[test]
    fn landscape_exports_at_3840_by_2160() {
        let config = CanvasConfig::default();
        assert_eq!(surface_dimensions(&config), (3840, 2160));
    }

    #[test]
    fn portrait_exports_at_2160_by_3840() {
        let mut config = CanvasConfig::default();
        config.format = SheetFormat::Portrait;
        assert_eq!(surface_dimensions(&config), (2160, 3840));
    }

    #[test]
    fn square_exports_at_3840_square() {
        let mut config = CanvasConfig::default();
        config.format = SheetFormat::Square;
        assert_eq!(surface_dimensions(&config), (3840, 3840));
    }

    #[test]
    fn custom_exports_at_stored_dimensions() {
        let mut config = CanvasConfig::default();
        config.format = SheetFormat::Custom;
        config.set_custom_dimensions(1280, 720);
        assert_eq!(surface_dimensions(&config), (1280, 720));
    }

    #[test]
    fn empty_scene_has_no_plan() {
        let scene = Scene::new();
        assert!(matches!(
            ExportPlan::build(&scene),
            Err(ExportError::EmptyScene)
        ));
    }

    #[test]
    fn plan_sorts_ascending_by_z() {
        let mut scene = Scene::new();
        let ids = scene
            .add_images(vec![new_image(1, 1.0), new_image(2, 1.0), new_image(3, 1.0)])
            .added;
        // Raise the first item above the others.
        scene.bring_to_front(ids[0]);

        let plan = ExportPlan::build(&scene).unwrap();
        let order: Vec<LayerId> = plan.items.iter().map(|item| item.id).collect();
        assert_eq!(order, vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn plan_rects_scale_percentages_to_pixels() {
        use montage_core::scene::LayerPatch;

        let mut scene = Scene::new();
        scene.set_format(SheetFormat::Square);
        let id = scene.add_images(vec![new_image(1, 2.0)]).added[0];
        scene.update_item(
            id,
            LayerPatch {
                x: Some(25.0),
                y: Some(50.0),
                width: Some(50.0),
                ..LayerPatch::default()
            },
        );

        let plan = ExportPlan::build(&scene).unwrap();
        let rect = plan.items[0].rect;
        assert_eq!((plan.width, plan.height), (3840, 3840));
        assert_eq!(rect.x0, 960.0);
        assert_eq!(rect.y0, 1920.0);
        assert_eq!(rect.width(), 1920.0);
        // Pixel height follows the derived-height formula: width / aspect.
        assert_eq!(rect.height(), 960.0);
    }

    #[test]
    fn plan_keeps_background() {
        let mut scene = Scene::new();
        scene.set_background(Color::from_rgb8(10, 20, 30));
        scene.add_images(vec![new_image(1, 1.0)]);
        let plan = ExportPlan::build(&scene).unwrap();
        assert_eq!(plan.background, Color::from_rgb8(10, 20, 30));
    }
}
