use crate::types::BodyId;
use glam::Vec2;

/// A scratch buffer that accumulates gravitational acceleration per body.
///
/// The gravity phase fills this buffer from a single, read-only view of
/// the body positions and only afterwards applies it to the velocities.
/// That keeps every body's sum computed from the same configuration.
///
/// Internally, `acc[i]` corresponds to body `i`.
#[derive(Debug, Default)]
pub struct AccelBuffer {
    acc: Vec<Vec2>,
}

impl AccelBuffer {
    /// Creates a new [`AccelBuffer`] with `len` zeroed entries.
    pub fn with_len(len: usize) -> Self {
        Self {
            acc: vec![Vec2::ZERO; len],
        }
    }

    /// Ensures that the internal storage has exactly the given length.
    ///
    /// All entries are cleared afterwards, even if the length was
    /// already correct.
    ///
    /// ### Parameters
    /// - `len` - Desired number of bodies.
    pub fn ensure_len(&mut self, len: usize) {
        if self.acc.len() != len {
            self.acc.resize(len, Vec2::ZERO);
        }
        self.clear();
    }

    /// Resets all entries to `Vec2::ZERO` without changing the length.
    pub fn clear(&mut self) {
        for a in &mut self.acc {
            *a = Vec2::ZERO;
        }
    }

    /// Adds one acceleration contribution for the given body.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn add(&mut self, id: BodyId, a: Vec2) {
        self.acc[id] += a;
    }

    /// Returns the accumulated acceleration for a body.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn get(&self, id: BodyId) -> Vec2 {
        self.acc[id]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.acc.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.acc.is_empty()
    }
}
