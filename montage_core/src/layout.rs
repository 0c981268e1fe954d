// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout algorithms: initial placement and the auto-arrange grid repack.
//!
//! Both algorithms are pure functions from aspect ratios to [`Placement`]
//! values; the [`Scene`](crate::scene::Scene) commits the results. Callers
//! outside the scene can therefore preview a layout without mutating
//! anything.
//!
//! # Placement on add
//!
//! A new image starts at [`LayoutParams::default_width_pct`] of the
//! container width. If the derived height would exceed
//! [`LayoutParams::max_dimension_pct`] of the container height, the width
//! shrinks until the height fits exactly; the width is then capped at the
//! same maximum and floored at [`LayoutParams::min_width_pct`] so extremely
//! tall images keep a usable handle. Each image in a batch is staggered
//! diagonally from the top-left corner so simultaneous additions do not
//! stack perfectly.
//!
//! # Auto-arrange
//!
//! All N items are repacked into `ceil(sqrt(N))` columns (and however many
//! rows that requires), assigned to cells in insertion order. Each image is
//! fit to its cell — width-limited when proportionally wider than the cell,
//! height-limited otherwise — scaled by [`LayoutParams::cell_padding`], and
//! centered. The repack touches only `x`, `y`, and `width`.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::geometry::height_percent;

/// Tuning constants for the layout algorithms.
///
/// The defaults are visual-tuning product decisions, not derived invariants,
/// so they are parameters rather than hard-coded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Starting width for a newly added image, percent of container width.
    pub default_width_pct: f64,
    /// Largest width or derived height a new image may occupy, percent.
    pub max_dimension_pct: f64,
    /// Smallest width a new image may shrink to, percent.
    pub min_width_pct: f64,
    /// Offset of the first image in a batch from the top-left corner,
    /// percent in both axes.
    pub stagger_base_pct: f64,
    /// Additional diagonal offset per image in a batch, percent.
    pub stagger_step_pct: f64,
    /// Fraction of a grid cell an auto-arranged image may fill.
    pub cell_padding: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            default_width_pct: 25.0,
            max_dimension_pct: 90.0,
            min_width_pct: 10.0,
            stagger_base_pct: 2.0,
            stagger_step_pct: 2.0,
            cell_padding: 0.9,
        }
    }
}

/// A computed position and size for one layer, in container percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Left edge, percent of container width.
    pub x: f64,
    /// Top edge, percent of container height.
    pub y: f64,
    /// Width, percent of container width.
    pub width: f64,
}

/// Computes the placement for the `index`-th image of a batch being added.
///
/// `container_aspect` is the container's width over height; `item_aspect`
/// the image's intrinsic width over height (already sanitized to be positive
/// and finite).
#[must_use]
pub fn place_new(
    index: usize,
    container_aspect: f64,
    item_aspect: f64,
    params: &LayoutParams,
) -> Placement {
    let mut width = params.default_width_pct;

    // Too tall at the default width: shrink until the derived height sits
    // exactly at the maximum.
    if height_percent(width, container_aspect, item_aspect) > params.max_dimension_pct {
        width = params.max_dimension_pct * item_aspect / container_aspect;
    }
    if width > params.max_dimension_pct {
        width = params.max_dimension_pct;
    }
    width = width.max(params.min_width_pct);

    let offset = params.stagger_base_pct + index as f64 * params.stagger_step_pct;
    Placement {
        x: offset,
        y: offset,
        width,
    }
}

/// Repacks `aspects.len()` items into a grid, returning one placement per
/// item in the same order.
///
/// Returns an empty vector for an empty slice. Deterministic: equal inputs
/// produce bit-identical output.
#[must_use]
pub fn arrange_grid(
    aspects: &[f64],
    container_aspect: f64,
    params: &LayoutParams,
) -> alloc::vec::Vec<Placement> {
    let n = aspects.len();
    if n == 0 {
        return alloc::vec::Vec::new();
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "ceil(sqrt(n)) of a small item count is a small positive integer"
    )]
    let cols = (n as f64).sqrt().ceil() as usize;
    let rows = n.div_ceil(cols);

    let cell_width = 100.0 / cols as f64;
    let cell_height = 100.0 / rows as f64;
    // Aspect ratio a cell-sized rectangle has in true pixel units.
    let cell_aspect = (cell_width / cell_height) * container_aspect;

    aspects
        .iter()
        .enumerate()
        .map(|(index, &aspect)| {
            let col = index % cols;
            let row = index / cols;

            let (width, height) = if aspect > cell_aspect {
                // Proportionally wider than the cell: fill its width.
                let width = cell_width * params.cell_padding;
                (width, height_percent(width, container_aspect, aspect))
            } else {
                // Proportionally taller (or equal): fill its height.
                let height = cell_height * params.cell_padding;
                (height * aspect / container_aspect, height)
            };

            Placement {
                x: col as f64 * cell_width + (cell_width - width) / 2.0,
                y: row as f64 * cell_height + (cell_height - height) / 2.0,
                width,
            }
        })
        .collect()
}
