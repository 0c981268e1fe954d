// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compositing exporter.
//!
//! [`export_raster`] flattens a scene to PNG bytes in five steps:
//! capability check, plan build, concurrent decode of every source, paint
//! in plan order, encode. A layer whose source fails to decode is logged
//! and skipped — the export still succeeds with the remaining layers —
//! whereas a missing encode capability or an encode failure fails the whole
//! export.

use alloc::vec::Vec;
use core::fmt;

use futures::future::join_all;

use montage_core::backend::{RasterError, Rasterizer};
use montage_core::scene::Scene;

use crate::plan::ExportPlan;

/// Why an export did not produce bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportError {
    /// The scene has no layers; there is nothing to export.
    EmptyScene,
    /// The rasterizer cannot encode PNG on this host. Raised before any
    /// decode work starts.
    EncodeUnsupported,
    /// The raster backend failed to encode the finished surface.
    Raster(RasterError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyScene => f.write_str("nothing to export: the scene is empty"),
            Self::EncodeUnsupported => f.write_str("PNG encoding is not supported on this host"),
            Self::Raster(err) => write!(f, "raster backend error: {err}"),
        }
    }
}

impl core::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Raster(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RasterError> for ExportError {
    fn from(err: RasterError) -> Self {
        Self::Raster(err)
    }
}

/// Rasterizes the scene to a single PNG.
///
/// Pure with respect to the scene: no hidden state, and an unchanged scene
/// yields visually identical output on every call (encoded bytes need not
/// be bit-identical across encoder versions). All sources are decoded
/// concurrently; paint order is the plan's z-sorted order regardless of
/// which decode finishes first.
pub async fn export_raster<R: Rasterizer>(
    rasterizer: &R,
    scene: &Scene,
) -> Result<Vec<u8>, ExportError> {
    if !rasterizer.capabilities().encode_png {
        return Err(ExportError::EncodeUnsupported);
    }

    let plan = ExportPlan::build(scene)?;

    let decoded = join_all(
        plan.items
            .iter()
            .map(|item| rasterizer.decode(&item.source)),
    )
    .await;

    let mut surface = rasterizer.begin(plan.width, plan.height, plan.background);
    for (item, bitmap) in plan.items.iter().zip(decoded) {
        match bitmap {
            Ok(bitmap) => rasterizer.paint(&mut surface, &bitmap, item.rect),
            Err(err) => {
                log::warn!("skipping layer {:?} ({:?}): {err}", item.id, item.name);
            }
        }
    }

    Ok(rasterizer.encode_png(surface).await?)
}
