use crate::{force::GRAVITATIONAL_CONSTANT, types::Bounds};

/// Tunables a [`crate::state::SimulationState`] starts from.
///
/// `object_count` and `base_mass` only matter when bodies are
/// (re)created; `base_mass` is in units of [`crate::body::MASS_UNIT`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub bounds: Bounds,
    pub object_count: u32,
    pub base_mass: u32,
    pub gravitational_constant: f64,
    pub speed_multiplier: u32,
    pub border_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(1280.0, 720.0),
            object_count: 15,
            base_mass: 50,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            speed_multiplier: 1,
            border_enabled: false,
        }
    }
}
