//! Per-frame physics phases over the body sequence.
//!
//! A frame is built from three phases:
//! 1. [`gravity_phase`]: every body accumulates Newtonian acceleration
//!    from every other body into an [`AccelBuffer`], then all velocities
//!    are kicked by `a * dt`.
//! 2. [`boundary_phase`]: positions advance by `v * dt`; bodies that
//!    leave the arena have the offending velocity component inverted and
//!    are integrated again.
//! 3. [`collision_phase`]: overlapping pairs reflect their velocities
//!    along the line of centers.
//!
//! The order in which they run is decided by
//! [`crate::simulation::Simulation::step`].

use crate::{
    accel_buffer::AccelBuffer,
    body::Body,
    config::Config,
    types::BodyId,
    world::{Bounds, World},
};

/// Applies one synchronized gravity kick to all bodies.
///
/// For every ordered pair `(i, j)`, `i != j`, adds
/// `G * m_j / dist² * (p_j - p_i) / dist` to the buffer entry of `i`.
/// Velocities are only touched once all sums are complete, so no body
/// sees another one's updated state.
///
/// Coincident centers give `dist == 0` and a non-finite acceleration. It is
/// written into the velocity as is.
///
/// ### Parameters
/// - `world` - Bodies to update.
/// - `cfg` - Provides `g` and `dt`.
/// - `acc` - Scratch buffer; resized and cleared to `world.len()` first.
/// - `frozen` - Body whose velocity must not change. It still attracts
///   the others.
pub fn gravity_phase(
    world: &mut World,
    cfg: &Config,
    acc: &mut AccelBuffer,
    frozen: Option<BodyId>,
) {
    let bodies = &mut world.bodies;
    acc.ensure_len(bodies.len());

    for (i, bi) in bodies.iter().enumerate() {
        for (j, bj) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }

            // Vector from body i towards body j.
            let d = bj.pos - bi.pos;
            let dist = d.length();
            let force = cfg.g * bj.mass / (dist * dist);
            acc.add(i, force * d / dist);
        }
    }

    for (i, b) in bodies.iter_mut().enumerate() {
        if frozen == Some(i) {
            continue;
        }
        b.vel += acc.get(i) * cfg.dt;
    }
}

/// Advances every body by `v * dt` and keeps it inside the arena.
///
/// See [`reflect_into_bounds`] for the per-body rule.
///
/// ### Returns
/// Ids of bodies that ran out of passes and were clamped into bounds.
pub fn boundary_phase(world: &mut World, cfg: &Config, frozen: Option<BodyId>) -> Vec<BodyId> {
    let bounds = world.bounds;
    let mut clamped = Vec::new();

    for (id, body) in world.bodies.iter_mut().enumerate() {
        if frozen == Some(id) {
            continue;
        }
        if !reflect_into_bounds(body, bounds, cfg.dt, cfg.max_boundary_passes) {
            clamped.push(id);
        }
    }
    clamped
}

/// Integrates one body and bounces it off the arena walls.
///
/// Each pass moves the body by `v * dt`, then checks both axes
/// independently. Every violated axis has its velocity component negated.
/// If anything was violated the pass repeats with the new velocity. After
/// `max_passes` integrations without settling, the position is clamped to
/// `[r, w - r] × [r, h - r]` and the velocity is left as is.
///
/// ### Returns
/// `true` if the body settled inside the arena, `false` if it was clamped.
pub fn reflect_into_bounds(body: &mut Body, bounds: Bounds, dt: f32, max_passes: usize) -> bool {
    for _ in 0..max_passes {
        body.pos += body.vel * dt;

        let (x_out, y_out) = bounds.violation(body.pos, body.radius);
        if x_out {
            body.vel.x = -body.vel.x;
        }
        if y_out {
            body.vel.y = -body.vel.y;
        }
        if !x_out && !y_out {
            return true;
        }
    }

    body.pos = bounds.clamp(body.pos, body.radius);
    false
}

/// Reflects the velocities of every overlapping pair.
///
/// Pairs `(i, j)` with `i < j` are visited in sequence order. A pair
/// collides when its center distance is strictly below the sum of radii.
/// Reflections are applied immediately, so a body overlapping several
/// neighbors is reflected once per neighbor against its current velocity.
/// Positions are never corrected.
///
/// ### Returns
/// The colliding pairs in the order they were resolved.
pub fn collision_phase(world: &mut World) -> Vec<(BodyId, BodyId)> {
    let bodies = &mut world.bodies;
    let n = bodies.len();
    let mut pairs = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let dist = (b.pos - a.pos).length();
            if dist < a.radius + b.radius {
                reflect_pair(a, b);
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Mirrors both velocities across the tangent of contact.
///
/// With `n` the unit vector from `a` to `b`, each body gets
/// `v' = v - 2 (v · n) n`. Masses are ignored.
pub fn reflect_pair(a: &mut Body, b: &mut Body) {
    let d = b.pos - a.pos;
    let n = d / d.length();

    a.vel -= 2.0 * a.vel.dot(n) * n;
    b.vel -= 2.0 * b.vel.dot(n) * n;
}
