//! Unit-time-step Euler integration with optional wall reflection.
//!
//! One tick is one time unit, so an acceleration is added to the velocity
//! directly and the velocity to the position.

use crate::{body::Body, types::Bounds};
use glam::DVec2;

/// Applies one force contribution to `body`'s velocity.
///
/// The contribution is also added to the body's diagnostic
/// `accumulated_force` and `acceleration`.
#[inline]
pub fn apply_force(body: &mut Body, force: DVec2) {
    let acceleration = force / body.mass();
    body.accumulated_force += force;
    body.acceleration += acceleration;
    body.velocity += acceleration;
}

/// Moves `body` by its current velocity and reflects it off the walls.
///
/// With `border_enabled`, an axis whose extent (`position ± radius`) ends
/// up outside `bounds` is clamped back inside and its velocity component
/// is negated. Clamping uses the already updated position.
pub fn advance_position(body: &mut Body, bounds: Bounds, border_enabled: bool) {
    body.position += body.velocity;

    if !border_enabled {
        return;
    }

    let r = body.radius();
    let (x, vx) = reflect_axis(body.position.x, body.velocity.x, r, bounds.width);
    let (y, vy) = reflect_axis(body.position.y, body.velocity.y, r, bounds.height);
    body.position = DVec2::new(x, y);
    body.velocity = DVec2::new(vx, vy);
}

fn reflect_axis(mut pos: f64, mut vel: f64, radius: f64, upper: f64) -> (f64, f64) {
    if pos + radius > upper {
        pos = upper - radius;
        vel = -vel;
    }
    if pos - radius < 0.0 {
        pos = radius;
        vel = -vel;
    }
    (pos, vel)
}

/// Applies `force` and then advances the position, as a single body
/// would be integrated over one tick.
pub fn integrate(body: &mut Body, force: DVec2, bounds: Bounds, border_enabled: bool) {
    apply_force(body, force);
    advance_position(body, bounds, border_enabled);
}
