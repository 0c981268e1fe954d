// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-mutation change accumulation.

use alloc::vec::Vec;

use super::id::LayerId;

/// The set of changes accumulated since the last
/// [`Scene::take_changes`](super::Scene::take_changes) call.
///
/// Each list holds the ids of layers that changed in the corresponding
/// category, deduplicated (a layer dragged across many pointer-move events
/// appears once in `placed`). A UI shell uses these to apply incremental
/// updates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneChanges {
    /// Layers added since the last drain.
    pub added: Vec<LayerId>,
    /// Layers removed since the last drain.
    pub removed: Vec<LayerId>,
    /// Layers whose `x`, `y`, or `width` changed.
    pub placed: Vec<LayerId>,
    /// Layers whose `z_index` changed.
    pub restacked: Vec<LayerId>,
    /// Whether the canvas config (format, custom size, background) changed.
    pub config_changed: bool,
    /// Whether the whole scene was cleared. When set, the per-id lists are
    /// empty; shells should drop all presented layers.
    pub cleared: bool,
}

impl SceneChanges {
    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.placed.is_empty()
            && self.restacked.is_empty()
            && !self.config_changed
            && !self.cleared
    }

    pub(crate) fn note(list: &mut Vec<LayerId>, id: LayerId) {
        if !list.contains(&id) {
            list.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(SceneChanges::default().is_empty());
    }

    #[test]
    fn note_deduplicates() {
        let mut changes = SceneChanges::default();
        let id = LayerId::from_raw(5);
        SceneChanges::note(&mut changes.placed, id);
        SceneChanges::note(&mut changes.placed, id);
        assert_eq!(changes.placed.len(), 1);
        assert!(!changes.is_empty());
    }
}
