//! Headless 2-D gravity and collision simulation library.
//!
//! Main components:
//! - [`body`]: the body record (position, velocity, mass, radius, color).
//! - [`world`]: the arena bounds, the body sequence and random spawning.
//! - [`config`]: physical constants, spawn ranges and step options.
//! - [`accel_buffer`]: scratch buffer for per-body accelerations.
//! - [`phases`]: gravity, boundary and collision phases of a frame.
//! - [`drag`]: pointer-driven repositioning of a single body.
//! - [`simulation`]: the owned context tying it all to frame ticks.
//! - [`types`]: shared type aliases and IDs.

pub mod accel_buffer;
pub mod body;
pub mod config;
pub mod drag;
pub mod phases;
pub mod simulation;
pub mod types;
pub mod world;
