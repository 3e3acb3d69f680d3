use glam::Vec2;
use rand::Rng;

use crate::{
    body::{Body, BodyColor},
    config::Config,
};

/// Rectangular arena `[0, width] × [0, height]`, y pointing down as on a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Per-axis boundary violation for a disc centered at `pos`.
    ///
    /// The low edge is violated when the disc pokes below zero; the high
    /// edge is violated as soon as the disc touches it.
    ///
    /// ### Returns
    /// `(x_violated, y_violated)`. Non-finite positions never violate.
    #[inline]
    pub fn violation(&self, pos: Vec2, radius: f32) -> (bool, bool) {
        let x = pos.x - radius < 0.0 || pos.x + radius >= self.width;
        let y = pos.y - radius < 0.0 || pos.y + radius >= self.height;
        (x, y)
    }

    /// Clamps `pos` into `[radius, width - radius] × [radius, height - radius]`.
    ///
    /// Written as `max` then `min` so an arena narrower than the body
    /// resolves to the high edge instead of panicking like `f32::clamp`.
    #[inline]
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.max(radius).min(self.width - radius),
            pos.y.max(radius).min(self.height - radius),
        )
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub bodies: Vec<Body>,
    pub bounds: Bounds,
}

/// `min + (max - min) * u` with `u` in `[0, 1)`.
///
/// Unlike `Rng::random_range` this accepts `min >= max`.
#[inline]
fn sample(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    (max - min) * rng.random::<f32>() + min
}

impl World {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bodies: Vec::new(),
            bounds,
        }
    }

    pub fn from_bodies(bounds: Bounds, bodies: Vec<Body>) -> Self {
        Self { bodies, bounds }
    }

    /// Populates a fresh world with `count` randomized bodies.
    ///
    /// Each body draws its radius first, then a position inside the arena
    /// shrunk by that radius, a velocity in `[-max_speed, max_speed]` per
    /// axis, a mass in `cfg.mass_range` and a random hue. Spawns are not
    /// checked against each other, so bodies may start overlapping.
    pub fn random(count: usize, bounds: Bounds, cfg: &Config, rng: &mut impl Rng) -> Self {
        let bodies = (0..count)
            .map(|_| {
                let r = sample(rng, cfg.radius_range.x, cfg.radius_range.y);
                let x = sample(rng, r, bounds.width - r);
                let y = sample(rng, r, bounds.height - r);
                let vx = sample(rng, -cfg.max_speed, cfg.max_speed);
                let vy = sample(rng, -cfg.max_speed, cfg.max_speed);
                let mass = sample(rng, cfg.mass_range.x, cfg.mass_range.y);
                let hue = sample(rng, 0.0, 360.0);

                Body::new(Vec2::new(x, y), Vec2::new(vx, vy), mass, r)
                    .with_color(BodyColor { hue })
            })
            .collect();

        Self { bodies, bounds }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
