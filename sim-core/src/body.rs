use glam::Vec2;

/// Display color of a body, stored as a hue in degrees.
///
/// The core never interprets this value; renderers map it to
/// HSL(hue, 100%, 50%).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyColor {
    pub hue: f32,
}

impl Default for BodyColor {
    fn default() -> Self {
        Self { hue: 0.0 }
    }
}

/// A circular point mass.
///
/// Plain data: every behavior lives in [`crate::phases`] and
/// [`crate::drag`], which operate over the whole body sequence.
#[derive(Clone, Copy, Debug)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: f32,
    pub radius: f32,
    pub color: BodyColor,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, mass: f32, radius: f32) -> Self {
        Self {
            pos,
            vel,
            mass,
            radius,
            color: BodyColor::default(),
        }
    }

    pub fn with_color(mut self, color: BodyColor) -> Self {
        self.color = color;
        self
    }

    /// Returns `true` if `point` lies strictly inside the body's disc.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        (self.pos - point).length() < self.radius
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }
}
