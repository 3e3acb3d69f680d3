//! Simulation configuration, loadable from YAML.
//!
//! Every field has a default, so a YAML file only needs the keys it
//! overrides:
//!
//! ```yaml
//! g: 1.0                     # gravitational constant
//! dt: 1.0                    # time step per frame tick
//! width: 800                 # arena size
//! height: 600
//! radius_range: [10.0, 20.0] # min, max
//! mass_range: [50.0, 60.0]   # min, max
//! max_speed: 0.7             # spawn velocity in [-max_speed, max_speed] per axis
//! max_boundary_passes: 64    # integrations per body before clamping
//! integration: double_pass   # or single_pass
//! drag_mode: contested       # or frozen
//! seed: 42                   # omit for a random seed
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use glam::Vec2;
use serde::Deserialize;

use crate::world::Bounds;

/// How many times per frame positions are integrated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMode {
    /// force → boundary → collision → boundary. Every body moves twice per
    /// frame, including the ones that did not collide.
    #[default]
    DoublePass,
    /// force → collision → boundary. One position update per frame.
    SinglePass,
}

/// What the physics step does with a body held by the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// The dragged body keeps receiving gravity and integration, so its
    /// drawn position is whatever the step makes of the last pointer write.
    #[default]
    Contested,
    /// The dragged body is skipped by the gravity and boundary phases while
    /// held. It still attracts and collides with the others.
    Frozen,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub g: f32,
    pub dt: f32,
    pub width: f32,
    pub height: f32,
    pub radius_range: Vec2, // min, max
    pub mass_range: Vec2,   // min, max
    pub max_speed: f32,
    pub max_boundary_passes: usize,
    pub integration: IntegrationMode,
    pub drag_mode: DragMode,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            g: 1.0,
            dt: 1.0,
            width: 800.0,
            height: 600.0,
            radius_range: Vec2::new(10.0, 20.0),
            mass_range: Vec2::new(50.0, 60.0),
            max_speed: 0.7,
            max_boundary_passes: 64,
            integration: IntegrationMode::default(),
            drag_mode: DragMode::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(src: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(src).context("failed to parse config YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&src).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.g.is_finite(), "g must be finite, got {}", self.g);
        ensure!(self.dt > 0.0 && self.dt.is_finite(), "dt must be positive, got {}", self.dt);
        ensure!(
            self.width > 0.0 && self.height > 0.0,
            "arena must have a positive size, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.radius_range.x > 0.0 && self.radius_range.x <= self.radius_range.y,
            "radius_range must be positive and ordered, got {:?}",
            self.radius_range
        );
        ensure!(
            self.mass_range.x > 0.0 && self.mass_range.x <= self.mass_range.y,
            "mass_range must be positive and ordered, got {:?}",
            self.mass_range
        );
        ensure!(self.max_speed >= 0.0, "max_speed must not be negative, got {}", self.max_speed);
        ensure!(self.max_boundary_passes > 0, "max_boundary_passes must be at least 1");
        Ok(())
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}
