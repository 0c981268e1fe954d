// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Percentage-coordinate geometry.
//!
//! Layer placement is stored in percentages of the container: `x` and
//! `width` relative to container width, `y` relative to container height.
//! A layer's height is *never* stored — it is always derived from its width,
//! the container's aspect ratio, and the layer's own immutable aspect ratio.
//! Storing height separately could drift from `aspect_ratio` after resizes,
//! so every consumer (renderer, hit-tester, exporter) must go through
//! [`height_percent`].

use kurbo::Rect;

use crate::scene::LayerItem;

/// Derived height of a layer, in percent of container height.
///
/// `container_aspect` is container width over height in true pixel units;
/// `item_aspect` is the image's intrinsic width over height.
#[inline]
#[must_use]
pub fn height_percent(width_pct: f64, container_aspect: f64, item_aspect: f64) -> f64 {
    width_pct * container_aspect / item_aspect
}

/// Resolves a layer's percentage placement to a pixel rectangle on a surface
/// of the given dimensions.
///
/// The surface is assumed to have the container's aspect ratio
/// (`container_aspect`); height is derived via [`height_percent`] so that
/// on-screen and exported geometry agree.
#[must_use]
pub fn layer_pixel_rect(
    item: &LayerItem,
    container_aspect: f64,
    surface_width: f64,
    surface_height: f64,
) -> Rect {
    let x = item.x / 100.0 * surface_width;
    let y = item.y / 100.0 * surface_height;
    let width = item.width / 100.0 * surface_width;
    let height =
        height_percent(item.width, container_aspect, item.aspect_ratio) / 100.0 * surface_height;
    Rect::new(x, y, x + width, y + height)
}
