/// Identifier for a [`crate::body::Body`].
///
/// Ids are handed out by [`crate::state::SimulationState`] and are never
/// reused within the lifetime of a given state, so they stay valid across
/// ticks even though bodies are removed from the live collection.
pub type BodyId = u64;

/// Rectangular world extent `[0, width] x [0, height]`.
///
/// Used for random placement and for border reflection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
