// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer items and their image sources.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use super::id::LayerId;

/// Reference-counted encoded image bytes.
///
/// Sources are created by an ingestion layer (file drop, paste, generation
/// output) and treated as opaque by the scene; only raster backends decode
/// them. Cloning is cheap. Equality is byte equality, which is what the
/// scene's duplicate filter relies on.
#[derive(Clone)]
pub struct ImageSource(Arc<[u8]>);

impl ImageSource {
    /// Creates a source from a byte slice.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }

    /// Creates a source from an owned byte buffer without copying.
    #[must_use]
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }

    /// Returns the encoded bytes.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for ImageSource {
    fn eq(&self, other: &Self) -> bool {
        // Pointer equality catches the common clone-of-same-source case
        // before falling back to a byte compare.
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for ImageSource {}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageSource({} bytes)", self.0.len())
    }
}

/// One placed image layer.
///
/// `x`, `y`, and `width` are percentages of the container (see
/// [`geometry`](crate::geometry)); `x` and `y` may leave `[0, 100]` while an
/// item is dragged off-canvas but are always finite. `aspect_ratio` is fixed
/// at creation and never recomputed.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerItem {
    /// Stable handle.
    pub id: LayerId,
    /// Encoded image bytes.
    pub source: ImageSource,
    /// Display label; not unique.
    pub name: String,
    /// Left edge, percent of container width.
    pub x: f64,
    /// Top edge, percent of container height.
    pub y: f64,
    /// Width, percent of container width. Always positive.
    pub width: f64,
    /// Intrinsic image width over height. Always positive and finite.
    pub aspect_ratio: f64,
    /// Stacking order; higher paints on top.
    pub z_index: i32,
}

/// An image to be added to a scene.
///
/// Produced by the ingestion layer, which decodes enough of the image to
/// measure its intrinsic aspect ratio before handing it over.
#[derive(Clone, Debug)]
pub struct NewImage {
    /// Encoded image bytes.
    pub source: ImageSource,
    /// Display label.
    pub name: String,
    /// Intrinsic width over height. Non-finite or non-positive values are
    /// coerced to `1.0` on insertion.
    pub aspect_ratio: f64,
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn source_equality_is_byte_equality() {
        let a = ImageSource::new(&[1, 2, 3]);
        let b = ImageSource::from_vec(vec![1, 2, 3]);
        let c = ImageSource::new(&[1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn source_clone_is_equal_and_shares_bytes() {
        let a = ImageSource::new(&[9; 64]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.bytes().len(), 64);
    }
}
