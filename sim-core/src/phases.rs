//! The five phases of one simulation tick.
//!
//! A tick always runs, in order:
//! 1. [`collision_phase`] — overlapping pairs merge into the heavier body.
//! 2. [`force_reset_phase`] — per-tick force/acceleration scratch is zeroed.
//! 3. [`force_accumulation_phase`] — every body is pulled by every other
//!    body and its velocity updated.
//! 4. [`integration_phase`] — positions advance by the new velocities,
//!    with optional wall reflection.
//! 5. [`prune_phase`] — absorbed bodies are removed from the collection.
//!
//! Merged bodies are skipped by phases 1-4 and only physically removed in
//! phase 5, so indices stay valid for the whole tick.

use crate::{
    body::Body,
    collision::{self, Merge},
    error::SimError,
    force::force_and_angle,
    integrator,
    types::Bounds,
};
use glam::DVec2;

/// Global parameters a tick reads but never changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    pub gravitational_constant: f64,
    pub bounds: Bounds,
    pub border_enabled: bool,
}

/// Summary of what happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Merges in the order they happened.
    pub merges: Vec<Merge>,
    /// Number of bodies removed by [`prune_phase`].
    pub removed: usize,
}

/// Runs [`collision::resolve`] on every unordered pair `(i, j)`, `i < j`.
///
/// Pairs are visited in index order; a body absorbed earlier in the pass
/// takes no further part in it.
///
/// ### Returns
/// All merges in the order they happened.
pub fn collision_phase(bodies: &mut [Body]) -> Vec<Merge> {
    let mut merges = Vec::new();

    for j in 1..bodies.len() {
        let (head, tail) = bodies.split_at_mut(j);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            if b.is_merged() {
                break;
            }
            if let Some(m) = collision::resolve(a, b) {
                merges.push(m);
            }
        }
    }

    merges
}

/// Zeroes the force and acceleration scratch of every live body.
pub fn force_reset_phase(bodies: &mut [Body]) {
    for b in bodies.iter_mut().filter(|b| !b.is_merged()) {
        b.accumulated_force = DVec2::ZERO;
        b.acceleration = DVec2::ZERO;
    }
}

/// Accumulates gravity over every ordered pair `(x, y)`, `x != y`.
///
/// Each body's velocity is updated from each other body in turn.
/// Coincident pairs contribute nothing.
pub fn force_accumulation_phase(bodies: &mut [Body], g: f64) {
    let n = bodies.len();
    for x in 0..n {
        if bodies[x].is_merged() {
            continue;
        }
        for y in 0..n {
            if x == y || bodies[y].is_merged() {
                continue;
            }

            match force_and_angle(&bodies[x], &bodies[y], g) {
                Ok(interaction) => integrator::apply_force(&mut bodies[x], interaction.components()),
                Err(SimError::DegenerateGeometry) => {
                    log::trace!(
                        "bodies {} and {} coincide, skipping",
                        bodies[x].id(),
                        bodies[y].id()
                    );
                }
                Err(e) => log::warn!("unexpected force error: {e}"),
            }
        }
    }
}

/// Moves every live body by its velocity.
pub fn integration_phase(bodies: &mut [Body], bounds: Bounds, border_enabled: bool) {
    for b in bodies.iter_mut().filter(|b| !b.is_merged()) {
        integrator::advance_position(b, bounds, border_enabled);
    }
}

/// Drops merged bodies, keeping the order of the survivors.
///
/// ### Returns
/// The number of removed bodies.
pub fn prune_phase(bodies: &mut Vec<Body>) -> usize {
    let before = bodies.len();
    bodies.retain(|b| !b.is_merged());
    before - bodies.len()
}

/// Runs one full tick over `bodies`.
pub fn run_step(bodies: &mut Vec<Body>, params: &StepParams) -> StepReport {
    let merges = collision_phase(bodies);
    force_reset_phase(bodies);
    force_accumulation_phase(bodies, params.gravitational_constant);
    integration_phase(bodies, params.bounds, params.border_enabled);
    let removed = prune_phase(bodies);

    StepReport { merges, removed }
}
