// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end pipeline demo.
//!
//! Synthesizes a handful of PNG sources, builds a [`Scene`], arranges it
//! into a grid, simulates a drag gesture on one layer, and exports the
//! sheet to `montage_sheet.png` through the CPU backend.

use std::fs;

use futures::executor::block_on;
use image::{ImageFormat, Rgba, RgbaImage};

use montage_core::config::{Color, SheetFormat};
use montage_core::geometry::layer_pixel_rect;
use montage_core::gesture::GestureController;
use montage_core::scene::{ImageSource, NewImage, Scene};

use montage_backend_cpu::CpuRasterizer;
use montage_render::export_raster;

/// On-screen container size used for the simulated gesture.
const VIEW_WIDTH: f64 = 1280.0;
const VIEW_HEIGHT: f64 = 720.0;

fn main() {
    // -- synthesize sources ------------------------------------------------
    let sources = [
        ("sunset", 320, 180, [235, 110, 40, 255]),
        ("portrait", 180, 320, [60, 120, 200, 255]),
        ("square", 256, 256, [90, 180, 90, 255]),
        ("banner", 512, 128, [200, 60, 140, 255]),
    ];

    let images: Vec<NewImage> = sources
        .iter()
        .map(|&(name, width, height, rgba)| NewImage {
            source: gradient_png(width, height, rgba),
            name: name.into(),
            aspect_ratio: f64::from(width) / f64::from(height),
        })
        .collect();

    // -- build the scene ---------------------------------------------------
    let mut scene = Scene::new();
    scene.set_format(SheetFormat::Landscape);
    scene.set_background(Color::from_hex("#f4f1ea").expect("valid hex color"));

    let outcome = scene.add_images(images);
    println!(
        "added {} layers ({} duplicates, {} over capacity)",
        outcome.added.len(),
        outcome.duplicates,
        outcome.over_capacity
    );

    scene.auto_arrange();

    // -- simulate a drag on the first layer --------------------------------
    let id = outcome.added[0];
    let container = kurbo::Rect::new(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT);
    let item_rect = {
        let item = scene.get(id).expect("layer just added");
        let aspect = scene.config().aspect_ratio();
        layer_pixel_rect(item, aspect, VIEW_WIDTH, VIEW_HEIGHT)
    };

    let mut gestures = GestureController::new();
    gestures.begin_drag(&mut scene, id, item_rect, container, item_rect.center());
    gestures.pointer_move(
        &mut scene,
        item_rect.center() + kurbo::Vec2::new(40.0, -25.0),
    );
    let committed = gestures.pointer_up();
    println!("drag committed on {committed:?}");

    let changes = scene.take_changes();
    println!(
        "frame changes: {} added, {} placed, {} restacked",
        changes.added.len(),
        changes.placed.len(),
        changes.restacked.len()
    );

    // -- export ------------------------------------------------------------
    let rasterizer = CpuRasterizer::new();
    let bytes = block_on(export_raster(&rasterizer, &scene)).expect("export failed");

    let path = "montage_sheet.png";
    fs::write(path, &bytes).expect("failed to write sheet");
    println!("Wrote {path} ({} bytes)", bytes.len());
}

/// Encodes a small PNG with a vertical brightness gradient over `rgba`.
fn gradient_png(width: u32, height: u32, rgba: [u8; 4]) -> ImageSource {
    let img = RgbaImage::from_fn(width, height, |_, y| {
        let t = f64::from(y) / f64::from(height.max(1));
        let shade = |channel: u8| {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "blend of two u8 values stays within u8 range"
            )]
            let blended = (f64::from(channel) * (1.0 - t * 0.5)) as u8;
            blended
        };
        Rgba([shade(rgba[0]), shade(rgba[1]), shade(rgba[2]), rgba[3]])
    });
    let mut cursor = std::io::Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)
        .expect("in-memory PNG encode");
    ImageSource::from_vec(cursor.into_inner())
}
