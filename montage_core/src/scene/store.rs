// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene storage and mutation.

use alloc::vec::Vec;
use core::mem;

use crate::config::{CanvasConfig, Color, SheetFormat};
use crate::layout::{self, LayoutParams};

use super::changes::SceneChanges;
use super::id::LayerId;
use super::item::{LayerItem, NewImage};

/// Hard cap on the number of layers in one scene.
pub const MAX_ITEMS: usize = 10;

/// The result of an [`add_images`](Scene::add_images) call.
///
/// Adds are partial, never all-or-nothing: as many images as fit are
/// accepted and the rest are reported here so the shell can tell the user
/// how many made it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Ids of the layers that were created, in input order.
    pub added: Vec<LayerId>,
    /// Inputs dropped because their source already exists in the scene.
    pub duplicates: usize,
    /// Inputs dropped because the scene was at capacity.
    pub over_capacity: usize,
}

impl AddOutcome {
    /// Number of images actually added.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.added.len()
    }
}

/// A partial update to one layer's placement, applied verbatim.
///
/// No field is validated or clamped; callers (the gesture controller, undo
/// machinery, tests) own correctness. Height has no field here because it is
/// always derived.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerPatch {
    /// New left edge, percent of container width.
    pub x: Option<f64>,
    /// New top edge, percent of container height.
    pub y: Option<f64>,
    /// New width, percent of container width.
    pub width: Option<f64>,
    /// New stacking order.
    pub z_index: Option<i32>,
}

/// An ordered collection of image layers plus the canvas configuration.
///
/// The scene is a plain value owned by exactly one controller; renderers and
/// exporters receive `&Scene`. All mutation goes through the methods here,
/// each of which records what changed for
/// [`take_changes`](Self::take_changes).
#[derive(Clone, Debug, Default)]
pub struct Scene {
    items: Vec<LayerItem>,
    config: CanvasConfig,
    params: LayoutParams,
    next_id: u64,
    changes: SceneChanges,
}

impl Scene {
    /// Creates an empty scene with default config and layout parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scene with custom layout tuning.
    #[must_use]
    pub fn with_params(params: LayoutParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    // -- Read access --

    /// Returns all layers in insertion order. Paint order is governed by
    /// `z_index`, not by this order.
    #[must_use]
    pub fn items(&self) -> &[LayerItem] {
        &self.items
    }

    /// Returns the layer with the given id, if it exists.
    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&LayerItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the canvas configuration.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Returns the layout tuning parameters.
    #[must_use]
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the scene has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -- Item lifecycle --

    /// Adds a batch of images, applying the placement algorithm, the
    /// duplicate-source filter, and the [`MAX_ITEMS`] cap.
    ///
    /// Images whose source byte-equals an existing layer's source (including
    /// one accepted earlier in the same batch) are dropped silently; images
    /// beyond the capacity are dropped and counted. Later images in a batch
    /// stack above earlier ones.
    pub fn add_images(&mut self, images: Vec<NewImage>) -> AddOutcome {
        let container_aspect = self.config.aspect_ratio();
        let mut next_z = 1 + self.items.iter().map(|item| item.z_index).max().unwrap_or(0);
        let mut outcome = AddOutcome::default();

        for image in images {
            if self.items.iter().any(|item| item.source == image.source) {
                outcome.duplicates += 1;
                continue;
            }
            if self.items.len() >= MAX_ITEMS {
                outcome.over_capacity += 1;
                continue;
            }

            let index = outcome.added.len();
            let aspect_ratio = sanitize_aspect(image.aspect_ratio);
            let placement = layout::place_new(index, container_aspect, aspect_ratio, &self.params);

            let id = LayerId::from_raw(self.next_id);
            self.next_id += 1;

            self.items.push(LayerItem {
                id,
                source: image.source,
                name: image.name,
                x: placement.x,
                y: placement.y,
                width: placement.width,
                aspect_ratio,
                z_index: next_z,
            });
            next_z += 1;
            SceneChanges::note(&mut self.changes.added, id);
            outcome.added.push(id);
        }

        if outcome.duplicates > 0 || outcome.over_capacity > 0 {
            log::debug!(
                "add_images: accepted {}, dropped {} duplicate(s), {} over capacity",
                outcome.accepted(),
                outcome.duplicates,
                outcome.over_capacity
            );
        }
        outcome
    }

    /// Removes the layer with the given id. Returns whether it existed.
    pub fn remove_item(&mut self, id: LayerId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() < before;
        if removed {
            SceneChanges::note(&mut self.changes.removed, id);
        }
        removed
    }

    /// Removes every layer. The config is untouched.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        // A full clear supersedes any accumulated per-id changes.
        self.changes.added.clear();
        self.changes.removed.clear();
        self.changes.placed.clear();
        self.changes.restacked.clear();
        self.changes.cleared = true;
    }

    // -- Placement mutation --

    /// Applies a patch to one layer, verbatim. Returns whether the id
    /// resolved.
    pub fn update_item(&mut self, id: LayerId, patch: LayerPatch) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        let mut placed = false;
        if let Some(x) = patch.x {
            item.x = x;
            placed = true;
        }
        if let Some(y) = patch.y {
            item.y = y;
            placed = true;
        }
        if let Some(width) = patch.width {
            item.width = width;
            placed = true;
        }
        if let Some(z_index) = patch.z_index {
            item.z_index = z_index;
            SceneChanges::note(&mut self.changes.restacked, id);
        }
        if placed {
            SceneChanges::note(&mut self.changes.placed, id);
        }
        true
    }

    /// Raises the layer to the top of the stack (`1 + max(z_index)`).
    ///
    /// No-op when the layer is already frontmost, so calling this twice in a
    /// row changes nothing. Returns whether the id resolved.
    pub fn bring_to_front(&mut self, id: LayerId) -> bool {
        let Some(max_z) = self.items.iter().map(|item| item.z_index).max() else {
            return false;
        };
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        if item.z_index == max_z {
            return true;
        }
        item.z_index = max_z + 1;
        SceneChanges::note(&mut self.changes.restacked, id);
        true
    }

    /// Repacks every layer into a grid (see
    /// [`layout::arrange_grid`]). Only `x`, `y`, and `width` change;
    /// aspect ratios, z-order, ids, sources, and names are untouched.
    /// No-op on an empty scene.
    pub fn auto_arrange(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let aspects: Vec<f64> = self.items.iter().map(|item| item.aspect_ratio).collect();
        let placements =
            layout::arrange_grid(&aspects, self.config.aspect_ratio(), &self.params);
        for (item, placement) in self.items.iter_mut().zip(placements) {
            item.x = placement.x;
            item.y = placement.y;
            item.width = placement.width;
            SceneChanges::note(&mut self.changes.placed, item.id);
        }
    }

    // -- Config mutation --

    /// Switches the sheet format.
    pub fn set_format(&mut self, format: SheetFormat) {
        if self.config.format != format {
            self.config.format = format;
            self.changes.config_changed = true;
        }
    }

    /// Sets the custom pixel dimensions, clamped to the valid range. The
    /// values are retained even while a preset format is active.
    pub fn set_custom_dimensions(&mut self, width: u32, height: u32) {
        let before = self.config.custom;
        self.config.set_custom_dimensions(width, height);
        if self.config.custom != before {
            self.changes.config_changed = true;
        }
    }

    /// Sets the background fill color.
    pub fn set_background(&mut self, background: Color) {
        if self.config.background != background {
            self.config.background = background;
            self.changes.config_changed = true;
        }
    }

    // -- Change tracking --

    /// Drains and returns the changes accumulated since the previous call.
    pub fn take_changes(&mut self) -> SceneChanges {
        mem::take(&mut self.changes)
    }
}

/// Coerces a reported aspect ratio into the valid range.
///
/// Ingestion layers occasionally fail to measure an image and report zero or
/// NaN; those fall back to square rather than poisoning later derivations.
fn sanitize_aspect(aspect_ratio: f64) -> f64 {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    }
}
