// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU raster backend.
//!
//! Implements [`Rasterizer`] on top of the `image` crate: sources are
//! decoded with [`image::load_from_memory`] (so any format the `image`
//! feature set covers is accepted), layers are scaled with
//! [`imageops::resize`] and alpha-composited with [`imageops::overlay`],
//! and the finished surface is serialized as PNG.
//!
//! Decode and encode are synchronous on the CPU; the async trait methods
//! complete immediately. The concurrency in the exporter's decode fan-out
//! costs nothing here and pays off on backends where decoding genuinely
//! suspends.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use kurbo::Rect;

use montage_core::backend::{RasterCaps, RasterError, Rasterizer};
use montage_core::config::Color;
use montage_core::scene::ImageSource;

/// A [`Rasterizer`] that composites in memory with the `image` crate.
#[derive(Clone, Debug)]
pub struct CpuRasterizer {
    filter: FilterType,
}

impl CpuRasterizer {
    /// Creates a rasterizer with the default (Lanczos3) scaling filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    /// Creates a rasterizer with a specific scaling filter, e.g.
    /// [`FilterType::Triangle`] to trade quality for speed in previews.
    #[must_use]
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for CpuRasterizer {
    type Bitmap = RgbaImage;
    type Surface = RgbaImage;

    fn capabilities(&self) -> RasterCaps {
        RasterCaps { encode_png: true }
    }

    async fn decode(&self, source: &ImageSource) -> Result<RgbaImage, RasterError> {
        image::load_from_memory(source.bytes())
            .map(|decoded| decoded.to_rgba8())
            .map_err(|err| RasterError::decode(err.to_string()))
    }

    fn begin(&self, width: u32, height: u32, background: Color) -> RgbaImage {
        RgbaImage::from_pixel(
            width.max(1),
            height.max(1),
            Rgba([background.r, background.g, background.b, background.a]),
        )
    }

    fn paint(&self, surface: &mut RgbaImage, bitmap: &RgbaImage, rect: Rect) {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "layer rects are bounded by percent-of-surface math"
        )]
        let (width, height) = (rect.width().round() as i64, rect.height().round() as i64);
        if width < 1 || height < 1 {
            // Sub-pixel layers have no visual contribution.
            log::trace!("skipping sub-pixel paint rect {rect:?}");
            return;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "checked >= 1 above; u32::MAX-sized layers are unreachable"
        )]
        let scaled = imageops::resize(bitmap, width as u32, height as u32, self.filter);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "overlay clips against the surface bounds"
        )]
        imageops::overlay(surface, &scaled, rect.x0.round() as i64, rect.y0.round() as i64);
    }

    async fn encode_png(&self, surface: RgbaImage) -> Result<Vec<u8>, RasterError> {
        let mut cursor = Cursor::new(Vec::new());
        surface
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| RasterError::encode(err.to_string()))?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use montage_core::scene::{NewImage, Scene};
    use montage_render::export_raster;

    use super::*;

    /// Encodes a solid-color PNG for use as a layer source.
    fn png_source(width: u32, height: u32, rgba: [u8; 4]) -> ImageSource {
        let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png).unwrap();
        ImageSource::from_vec(cursor.into_inner())
    }

    #[test]
    fn reports_png_capability() {
        assert!(CpuRasterizer::new().capabilities().encode_png);
    }

    #[test]
    fn decodes_png_bytes() {
        let rasterizer = CpuRasterizer::new();
        let source = png_source(4, 2, [255, 0, 0, 255]);
        let bitmap = block_on(rasterizer.decode(&source)).unwrap();
        assert_eq!(bitmap.dimensions(), (4, 2));
        assert_eq!(bitmap.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn decode_garbage_is_an_error() {
        let rasterizer = CpuRasterizer::new();
        let err = block_on(rasterizer.decode(&ImageSource::new(b"not an image"))).unwrap_err();
        assert_eq!(err.kind(), montage_core::backend::RasterErrorKind::Decode);
    }

    #[test]
    fn begin_fills_background() {
        let rasterizer = CpuRasterizer::new();
        let surface = rasterizer.begin(3, 3, Color::from_rgb8(1, 2, 3));
        assert_eq!(surface.get_pixel(2, 2).0, [1, 2, 3, 255]);
    }

    #[test]
    fn paint_scales_into_rect() {
        let rasterizer = CpuRasterizer::new();
        let mut surface = rasterizer.begin(10, 10, Color::WHITE);
        let bitmap = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));

        rasterizer.paint(&mut surface, &bitmap, Rect::new(2.0, 2.0, 6.0, 6.0));

        assert_eq!(surface.get_pixel(3, 3).0, [0, 0, 255, 255]);
        assert_eq!(surface.get_pixel(0, 0).0, [255, 255, 255, 255], "outside rect untouched");
        assert_eq!(surface.get_pixel(7, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn paint_clips_at_surface_edges() {
        let rasterizer = CpuRasterizer::new();
        let mut surface = rasterizer.begin(8, 8, Color::WHITE);
        let bitmap = RgbaImage::from_pixel(4, 4, Rgba([0, 255, 0, 255]));

        // Mostly off-canvas to the top-left.
        rasterizer.paint(&mut surface, &bitmap, Rect::new(-3.0, -3.0, 1.0, 1.0));
        assert_eq!(surface.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(surface.get_pixel(1, 1).0, [255, 255, 255, 255]);

        // Entirely off-canvas: no effect, no panic.
        rasterizer.paint(&mut surface, &bitmap, Rect::new(20.0, 20.0, 24.0, 24.0));
    }

    #[test]
    fn subpixel_rect_is_skipped() {
        let rasterizer = CpuRasterizer::new();
        let mut surface = rasterizer.begin(4, 4, Color::WHITE);
        let bitmap = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        rasterizer.paint(&mut surface, &bitmap, Rect::new(1.0, 1.0, 1.2, 1.2));
        assert_eq!(surface.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn encode_round_trips_through_png() {
        let rasterizer = CpuRasterizer::new();
        let surface = rasterizer.begin(5, 4, Color::from_rgb8(9, 8, 7));
        let bytes = block_on(rasterizer.encode_png(surface)).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (5, 4));
        assert_eq!(decoded.get_pixel(4, 3).0, [9, 8, 7, 255]);
    }

    #[test]
    fn full_pipeline_composites_a_scene() {
        let mut scene = Scene::new();
        scene.set_format(montage_core::config::SheetFormat::Custom);
        scene.set_custom_dimensions(200, 100);
        scene.set_background(Color::BLACK);
        scene.add_images(vec![
            NewImage {
                source: png_source(16, 16, [255, 0, 0, 255]),
                name: "red".into(),
                aspect_ratio: 1.0,
            },
            NewImage {
                source: png_source(16, 8, [0, 0, 255, 255]),
                name: "blue".into(),
                aspect_ratio: 2.0,
            },
        ]);
        scene.auto_arrange();

        let rasterizer = CpuRasterizer::new();
        let bytes = block_on(export_raster(&rasterizer, &scene)).unwrap();

        let sheet = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(sheet.dimensions(), (200, 100));
        // Background shows in the top-left corner (cell padding keeps the
        // arranged layers off the edges).
        assert_eq!(sheet.get_pixel(0, 0).0, [0, 0, 0, 255]);
        // Both layers are present somewhere on the sheet.
        let has_red = sheet.pixels().any(|p| p.0 == [255, 0, 0, 255]);
        let has_blue = sheet.pixels().any(|p| p.0 == [0, 0, 255, 255]);
        assert!(has_red, "left cell should contain the red layer");
        assert!(has_blue, "right cell should contain the blue layer");
    }
}
