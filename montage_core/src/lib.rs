// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene model and layout engine for the montage layer canvas.
//!
//! `montage_core` provides the data structures and algorithms behind a
//! free-form image sheet: a fixed-aspect-ratio container holding up to ten
//! rectangular image layers that can be placed, dragged, resized, restacked,
//! and repacked into a grid. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! The crate is organized around a single [`Scene`](scene::Scene) value that
//! one controller owns and mutates:
//!
//! ```text
//!   ingestion (external) ──► Scene::add_images ──► layout::place_new
//!                                │
//!   pointer events ──► GestureController ──► Scene::update_item
//!                                │
//!   Scene::auto_arrange ──► layout::arrange_grid
//!                                │
//!                                ▼
//!   Scene::take_changes ──► SceneChanges ──► UI shell applies updates
//! ```
//!
//! **[`scene`]** — Layer items, the scene store, and per-mutation change
//! tracking. Items hold percentage coordinates plus an immutable aspect
//! ratio; height is never stored, only derived.
//!
//! **[`config`]** — Sheet format (landscape, portrait, square, or custom
//! pixel dimensions), background color, and export sizing limits.
//!
//! **[`geometry`]** — The one height-derivation formula shared by every
//! consumer, and percentage-to-pixel rect resolution.
//!
//! **[`layout`]** — Placement of newly added images under a size cap, and
//! the grid repack used by auto-arrange. Both are pure; the scene commits
//! their results.
//!
//! **[`gesture`]** — A pointer-gesture state machine for drag and resize,
//! snapshot-based so container scrolling mid-gesture is ignored.
//!
//! **[`backend`]** — The [`Rasterizer`](backend::Rasterizer) trait that
//! raster backends implement to decode, paint, and encode images.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod scene;
