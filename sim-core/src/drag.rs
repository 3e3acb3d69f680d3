//! Manual repositioning of a single body with the pointer.
//!
//! The input layer translates raw pointer events into arena coordinates and
//! forwards them here. A drag writes positions directly and never touches
//! velocities.

use glam::Vec2;

use crate::{types::BodyId, world::World};

/// The body currently held by the pointer, if any.
///
/// `target.is_some()` is the drag-active flag. At most one body can be
/// held at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    target: Option<BodyId>,
}

impl DragState {
    #[inline]
    pub fn target(&self) -> Option<BodyId> {
        self.target
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Grabs the first body in sequence order whose disc contains `p`.
    ///
    /// A miss leaves the current state untouched.
    ///
    /// ### Returns
    /// The id of the grabbed body, or `None` on a miss.
    pub fn pointer_down(&mut self, world: &World, p: Vec2) -> Option<BodyId> {
        let hit = world.bodies.iter().position(|b| b.contains(p))?;
        self.target = Some(hit);
        log::debug!("grabbed body {hit} at ({:.1}, {:.1})", p.x, p.y);
        Some(hit)
    }

    /// Moves the held body to `p`, clamped so it stays inside the arena.
    ///
    /// Does nothing when no drag is active or the held id no longer exists.
    pub fn pointer_move(&self, world: &mut World, p: Vec2) {
        let Some(id) = self.target else {
            return;
        };
        let bounds = world.bounds;
        if let Some(body) = world.bodies.get_mut(id) {
            body.pos = bounds.clamp(p, body.radius);
        }
    }

    /// Releases the held body, wherever the pointer is.
    pub fn pointer_up(&mut self) {
        if let Some(id) = self.target.take() {
            log::debug!("released body {id}");
        }
    }

    /// Forgets the held body without logging a release.
    pub fn clear(&mut self) {
        self.target = None;
    }
}
