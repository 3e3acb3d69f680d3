/// Identifier for a body in a [`crate::world::World`].
///
/// This is an index into `World::bodies`, and is only meaningful within
/// the lifetime of a given `World` instance. Restarting the simulation
/// invalidates every id handed out before.
pub type BodyId = usize;
