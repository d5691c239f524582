//! Pairwise Newtonian gravity between two bodies.

use crate::{
    body::Body,
    error::{Result, SimError},
};
use glam::DVec2;

/// Gravitational constant in SI units (m^3 kg^-1 s^-2).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11;

/// Magnitude and direction of the pull one body feels from another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interaction {
    /// `G * m_a * m_b / d^2`. Negative when `G` is negative (repulsion).
    pub force: f64,
    /// Direction from `a` towards `b`, in radians.
    pub angle: f64,
}

impl Interaction {
    /// Force vector acting on `a`.
    #[inline]
    pub fn components(&self) -> DVec2 {
        DVec2::from_angle(self.angle) * self.force
    }
}

/// Computes the force `a` feels from `b` and the angle of the line from
/// `a` to `b`.
///
/// ### Parameters
/// - `a` - Body the force acts on.
/// - `b` - Body exerting the force.
/// - `g` - Gravitational constant; its sign is not restricted.
///
/// ### Returns
/// - `Ok(Interaction)` for separated bodies.
/// - `Err(SimError::DegenerateGeometry)` when both positions coincide.
pub fn force_and_angle(a: &Body, b: &Body, g: f64) -> Result<Interaction> {
    let delta = b.position - a.position;
    let distance = delta.length();
    if distance == 0.0 {
        return Err(SimError::DegenerateGeometry);
    }

    let angle = delta.y.atan2(delta.x);
    let force = g * a.mass() * b.mass() / (distance * distance);

    Ok(Interaction { force, angle })
}
