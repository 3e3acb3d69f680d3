//! The owned simulation context driven by the host's frame ticks and
//! pointer callbacks.

use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    accel_buffer::AccelBuffer,
    body::Body,
    config::{Config, DragMode, IntegrationMode},
    drag::DragState,
    phases,
    types::BodyId,
    world::World,
};

/// Upper bound on the number of bodies a start may spawn.
///
/// Larger requests are spawned at this size instead of allocating
/// without limit.
pub const MAX_BODIES: usize = 100_000;

/// Parses the leading integer of `input`, the way a form field is read.
///
/// Leading whitespace and a single sign are accepted, and parsing stops
/// at the first non-digit: `" 12abc"` gives `12`.
///
/// ### Returns
/// `None` when there is no leading digit or the number overflows.
pub fn parse_count(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let n: i64 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

/// Bodies, arena, drag state and the per-frame step sequence.
///
/// All mutation happens through [`Simulation::step`], the `pointer_*`
/// callbacks and the (re)initialization entry points. The host calls them
/// one at a time from a single thread.
pub struct Simulation {
    cfg: Config,
    world: World,
    drag: DragState,
    acc: AccelBuffer,
    rng: StdRng,
    frame: u64,
    last_collisions: Vec<(BodyId, BodyId)>,
}

impl Simulation {
    /// Creates a simulation with an empty world.
    ///
    /// The spawn generator is seeded from `cfg.seed` when present, and from
    /// the thread-local generator otherwise.
    pub fn new(cfg: Config) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Self {
            world: World::new(cfg.bounds()),
            drag: DragState::default(),
            acc: AccelBuffer::default(),
            rng,
            frame: 0,
            last_collisions: Vec::new(),
            cfg,
        }
    }

    /// Creates a simulation around a prepared world.
    pub fn with_world(cfg: Config, world: World) -> Self {
        let mut sim = Self::new(cfg);
        sim.acc = AccelBuffer::with_len(world.len());
        sim.world = world;
        sim
    }

    /// Discards the current world and spawns `count` random bodies.
    ///
    /// The arena is taken from the current config. Any held body is
    /// released, since its id refers to the old world. Counts above
    /// [`MAX_BODIES`] are capped.
    pub fn start(&mut self, count: usize) {
        let count = if count > MAX_BODIES {
            log::warn!("body count {count} exceeds the limit, spawning {MAX_BODIES}");
            MAX_BODIES
        } else {
            count
        };
        self.world = World::random(count, self.cfg.bounds(), &self.cfg, &mut self.rng);
        self.drag.clear();
        self.acc.ensure_len(count);
        self.frame = 0;
        self.last_collisions.clear();

        log::info!(
            "started simulation with {count} bodies in a {}x{} arena",
            self.cfg.width,
            self.cfg.height
        );
    }

    /// Starts from raw user input such as a text field.
    ///
    /// Input without a leading integer, or a negative count, is not an
    /// error: it produces an empty world. Counts above [`MAX_BODIES`] spawn
    /// [`MAX_BODIES`] bodies.
    ///
    /// ### Returns
    /// The number of bodies spawned.
    pub fn start_from_input(&mut self, input: &str) -> usize {
        let count = match parse_count(input) {
            Some(n) if n >= 0 => usize::try_from(n).unwrap_or(usize::MAX),
            Some(n) => {
                log::warn!("negative body count {n}, starting with an empty world");
                0
            }
            None => {
                log::warn!("body count {input:?} is not a number, starting with an empty world");
                0
            }
        };
        self.start(count);
        self.world.len()
    }

    /// Empties the world and releases any held body.
    pub fn reset(&mut self) {
        self.world = World::new(self.cfg.bounds());
        self.drag.clear();
        self.acc.ensure_len(0);
        self.frame = 0;
        self.last_collisions.clear();
        log::info!("simulation reset");
    }

    /// Reseeds the spawn generator used by the next [`Simulation::start`].
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Advances the world by one frame tick.
    ///
    /// With [`IntegrationMode::DoublePass`] the order is gravity, boundary,
    /// collision, boundary. [`IntegrationMode::SinglePass`] runs gravity,
    /// collision, boundary. Under [`DragMode::Frozen`] the held body is left
    /// out of the gravity and boundary phases.
    pub fn step(&mut self) {
        let frozen = match self.cfg.drag_mode {
            DragMode::Frozen => self.drag.target(),
            DragMode::Contested => None,
        };

        phases::gravity_phase(&mut self.world, &self.cfg, &mut self.acc, frozen);

        let mut clamped = Vec::new();
        match self.cfg.integration {
            IntegrationMode::DoublePass => {
                clamped.extend(phases::boundary_phase(&mut self.world, &self.cfg, frozen));
                self.last_collisions = phases::collision_phase(&mut self.world);
                clamped.extend(phases::boundary_phase(&mut self.world, &self.cfg, frozen));
            }
            IntegrationMode::SinglePass => {
                self.last_collisions = phases::collision_phase(&mut self.world);
                clamped.extend(phases::boundary_phase(&mut self.world, &self.cfg, frozen));
            }
        }

        if !clamped.is_empty() {
            log::debug!(
                "frame {}: clamped {} bodies after {} boundary passes: {clamped:?}",
                self.frame,
                clamped.len(),
                self.cfg.max_boundary_passes
            );
        }
        self.frame += 1;
    }

    /// Pointer pressed at `p` (arena coordinates).
    pub fn pointer_down(&mut self, p: Vec2) -> Option<BodyId> {
        self.drag.pointer_down(&self.world, p)
    }

    /// Pointer moved to `p` (arena coordinates).
    pub fn pointer_move(&mut self, p: Vec2) {
        self.drag.pointer_move(&mut self.world, p);
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn bodies(&self) -> &[Body] {
        &self.world.bodies
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Mutable access to the config.
    ///
    /// Physics parameters apply on the next step; arena size and spawn
    /// ranges apply on the next start.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.cfg
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Number of steps since the last start or reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Pairs that collided during the last step.
    pub fn last_collisions(&self) -> &[(BodyId, BodyId)] {
        &self.last_collisions
    }
}
