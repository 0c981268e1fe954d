// Copyright 2026 the Montage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-gesture state machine for drag and resize.
//!
//! One gesture is active at a time: `Idle → Dragging → Idle` or
//! `Idle → Resizing → Idle`. A gesture begins on pointer-down over a layer
//! (drag) or its resize handle (resize) and ends on pointer-up anywhere —
//! there is no cancel path; releasing always commits whatever placement the
//! last move produced, with no snapping or validation.
//!
//! On gesture start the controller snapshots the item's and the container's
//! on-screen pixel rectangles. All subsequent pointer math runs against
//! those snapshots; the container is intentionally not re-queried, so
//! scrolling or resizing it mid-gesture does not disturb the drag. Starting
//! a gesture also raises the item to the front, once, before any movement.
//!
//! The controller does not own the scene. Each method borrows it, keeping
//! the scene a plain value owned by the surrounding shell.

use kurbo::{Point, Rect};

use crate::scene::{LayerId, LayerPatch, Scene};

/// Snapshot taken at pointer-down, fixed for the whole gesture.
#[derive(Clone, Copy, Debug)]
struct Anchor {
    id: LayerId,
    /// The item's on-screen rect at pointer-down.
    item: Rect,
    /// The container's on-screen rect at pointer-down.
    container: Rect,
    /// Pointer position at pointer-down.
    origin: Point,
}

#[derive(Clone, Copy, Debug)]
enum State {
    Idle,
    Dragging(Anchor),
    Resizing(Anchor),
}

/// Drives drag and resize gestures against a [`Scene`].
#[derive(Clone, Copy, Debug)]
pub struct GestureController {
    state: State,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    /// Creates a controller in the idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Returns whether a gesture is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Begins a drag gesture over `id`.
    ///
    /// `item_rect` and `container_rect` are the on-screen pixel rectangles
    /// at this instant; `pointer` the pointer-down position. Returns `false`
    /// without side effects when a gesture is already active, the id does
    /// not resolve, or the container rect is degenerate (pointer deltas
    /// could not be converted to finite percentages). On success the item
    /// is raised to the front.
    pub fn begin_drag(
        &mut self,
        scene: &mut Scene,
        id: LayerId,
        item_rect: Rect,
        container_rect: Rect,
        pointer: Point,
    ) -> bool {
        self.begin(scene, id, item_rect, container_rect, pointer, false)
    }

    /// Begins a resize gesture over `id`'s resize handle.
    ///
    /// Same contract as [`begin_drag`](Self::begin_drag).
    pub fn begin_resize(
        &mut self,
        scene: &mut Scene,
        id: LayerId,
        item_rect: Rect,
        container_rect: Rect,
        pointer: Point,
    ) -> bool {
        self.begin(scene, id, item_rect, container_rect, pointer, true)
    }

    fn begin(
        &mut self,
        scene: &mut Scene,
        id: LayerId,
        item_rect: Rect,
        container_rect: Rect,
        pointer: Point,
        resize: bool,
    ) -> bool {
        if self.is_active() || scene.get(id).is_none() {
            return false;
        }
        // A zero-size or non-finite container would turn pointer deltas
        // into non-finite percentages; items must stay finite.
        if !(container_rect.width() > 0.0 && container_rect.height() > 0.0)
            || !container_rect.width().is_finite()
            || !container_rect.height().is_finite()
        {
            return false;
        }
        scene.bring_to_front(id);
        let anchor = Anchor {
            id,
            item: item_rect,
            container: container_rect,
            origin: pointer,
        };
        self.state = if resize {
            State::Resizing(anchor)
        } else {
            State::Dragging(anchor)
        };
        true
    }

    /// Feeds a pointer-move event into the active gesture.
    ///
    /// During a drag the item's `x`/`y` follow the pointer delta, converted
    /// to percent of the snapshotted container size, unclamped — items may
    /// leave the container. During a resize only `width` changes; height is
    /// derived elsewhere. Idle state, or a gesture whose item has been
    /// removed mid-gesture, makes this a no-op.
    pub fn pointer_move(&mut self, scene: &mut Scene, pointer: Point) {
        match self.state {
            State::Idle => {}
            State::Dragging(anchor) => {
                let delta = pointer - anchor.origin;
                let x_px = anchor.item.x0 + delta.x - anchor.container.x0;
                let y_px = anchor.item.y0 + delta.y - anchor.container.y0;
                scene.update_item(
                    anchor.id,
                    LayerPatch {
                        x: Some(x_px / anchor.container.width() * 100.0),
                        y: Some(y_px / anchor.container.height() * 100.0),
                        ..LayerPatch::default()
                    },
                );
            }
            State::Resizing(anchor) => {
                let delta = pointer - anchor.origin;
                let width_px = anchor.item.width() + delta.x;
                scene.update_item(
                    anchor.id,
                    LayerPatch {
                        width: Some(width_px / anchor.container.width() * 100.0),
                        ..LayerPatch::default()
                    },
                );
            }
        }
    }

    /// Ends the active gesture, committing the current placement as-is.
    ///
    /// Returns the id of the gesture's item, or `None` when idle.
    pub fn pointer_up(&mut self) -> Option<LayerId> {
        let id = match self.state {
            State::Idle => None,
            State::Dragging(anchor) | State::Resizing(anchor) => Some(anchor.id),
        };
        self.state = State::Idle;
        id
    }
}
