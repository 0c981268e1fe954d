// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for raster integrations.
//!
//! Montage splits pixel work into *backend* crates. The exporter in
//! `montage_render` is written against the [`Rasterizer`] trait, so the
//! compositing algorithm is independent of any particular 2D drawing API —
//! a CPU implementation, a GPU surface, and a test double all satisfy the
//! same contract.
//!
//! A backend provides three capabilities:
//!
//! - **Decode** — turn an [`ImageSource`]'s encoded bytes into a backend
//!   bitmap. Decoding may suspend (on the web it genuinely does); the
//!   exporter starts all decodes of an export together and awaits them as a
//!   group, since decode completion order does not affect paint order.
//! - **Paint** — fill a fresh surface with a background color, then draw
//!   bitmaps scaled into pixel rectangles. Rectangles may extend past the
//!   surface edges; backends clip.
//! - **Encode** — serialize the finished surface to PNG bytes.
//!
//! # Crate boundaries
//!
//! `montage_core` owns the data model and this contract; `montage_render`
//! owns the export algorithm; backend crates own the pixels.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::config::Color;
use crate::scene::ImageSource;

/// What a [`Rasterizer`] can do on the host it runs on.
///
/// The exporter checks this *before* doing any decode work, so missing
/// support surfaces as an up-front error instead of a mid-export failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterCaps {
    /// Whether [`encode_png`](Rasterizer::encode_png) is supported.
    pub encode_png: bool,
}

/// Decodes, paints, and encodes pixels on behalf of the exporter.
///
/// All methods take `&self`: the exporter runs decodes concurrently against
/// one shared rasterizer.
#[allow(
    async_fn_in_trait,
    reason = "the engine is single-threaded by design; implementors and callers do not need Send futures"
)]
pub trait Rasterizer {
    /// A decoded image, ready to paint.
    type Bitmap;
    /// An in-progress output surface.
    type Surface;

    /// Reports what this rasterizer supports on the current host.
    fn capabilities(&self) -> RasterCaps;

    /// Decodes an image source into a bitmap.
    async fn decode(&self, source: &ImageSource) -> Result<Self::Bitmap, RasterError>;

    /// Creates a surface of the given pixel dimensions, filled with
    /// `background`.
    fn begin(&self, width: u32, height: u32, background: Color) -> Self::Surface;

    /// Draws `bitmap` scaled into `rect` (surface pixel coordinates),
    /// clipping at the surface edges.
    fn paint(&self, surface: &mut Self::Surface, bitmap: &Self::Bitmap, rect: Rect);

    /// Serializes the surface to PNG bytes.
    async fn encode_png(&self, surface: Self::Surface) -> Result<Vec<u8>, RasterError>;
}

/// Category of a [`RasterError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterErrorKind {
    /// An image source could not be decoded.
    Decode,
    /// The finished surface could not be encoded.
    Encode,
    /// The operation is not supported on this host.
    Unsupported,
}

/// A failure inside a raster backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterError {
    kind: RasterErrorKind,
    message: String,
}

impl RasterError {
    /// Creates a decode failure.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: RasterErrorKind::Decode,
            message: message.into(),
        }
    }

    /// Creates an encode failure.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self {
            kind: RasterErrorKind::Encode,
            message: message.into(),
        }
    }

    /// Creates an unsupported-operation failure.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            kind: RasterErrorKind::Unsupported,
            message: message.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub fn kind(&self) -> RasterErrorKind {
        self.kind
    }
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            RasterErrorKind::Decode => "decode failed",
            RasterErrorKind::Encode => "encode failed",
            RasterErrorKind::Unsupported => "unsupported",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

impl core::error::Error for RasterError {}
