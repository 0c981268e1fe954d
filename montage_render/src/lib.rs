// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Export-plan definitions and the compositing exporter for montage.
//!
//! This crate turns a [`Scene`](montage_core::scene::Scene) into a single
//! flat PNG. It defines:
//!
//! - [`ExportPlan`] — the resolved pixel dimensions, background, and
//!   z-sorted draw list for one export
//! - [`export_raster`] — the async exporter, generic over any
//!   [`Rasterizer`](montage_core::backend::Rasterizer)
//! - [`ExportError`] — the export failure taxonomy
//!
//! The exporter is a pure function of the scene at call time: exporting the
//! same unchanged scene twice paints identical geometry in identical order.
//! Both the download and the clipboard paths of a shell call this one
//! routine and differ only in what they do with the returned bytes.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod compose;
mod plan;

pub use compose::{ExportError, export_raster};
pub use plan::{EXPORT_BASE_PX, ExportItem, ExportPlan, surface_dimensions};
