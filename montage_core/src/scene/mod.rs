// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene data model.
//!
//! A *scene* is the full state of one sheet: up to [`MAX_ITEMS`] image
//! layers plus a [`CanvasConfig`](crate::config::CanvasConfig). Each layer
//! has:
//!
//! - An **identity** ([`LayerId`]): a handle that stays stable for the
//!   layer's whole lifetime and is never reused within a scene.
//! - **Placement** set by the caller or by layout: `x`, `y`, `width` in
//!   percent of the container, and an integer `z_index` (higher paints on
//!   top).
//! - **Immutable properties** fixed at creation: the encoded image bytes
//!   ([`ImageSource`]), a display name, and the intrinsic aspect ratio.
//!
//! Height is deliberately absent; see [`geometry`](crate::geometry).
//!
//! # Change tracking
//!
//! Every mutation records the affected layer ids in a [`SceneChanges`]
//! accumulator. A UI shell drains it with
//! [`Scene::take_changes`](Scene::take_changes) each frame and applies
//! incremental updates instead of re-rendering the whole sheet.

mod changes;
mod id;
mod item;
mod store;

pub use changes::SceneChanges;
pub use id::LayerId;
pub use item::{ImageSource, LayerItem, NewImage};
pub use store::{AddOutcome, LayerPatch, MAX_ITEMS, Scene};
