//! Overlap detection and perfectly inelastic merging.

use crate::body::Body;
use crate::types::BodyId;

/// Outcome of a merge: which body survived and which one was absorbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merge {
    pub absorber: BodyId,
    pub absorbed: BodyId,
}

/// `true` if the discs of `a` and `b` touch or overlap.
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.position.distance(b.position) <= a.radius() + b.radius()
}

/// Merges `a` and `b` if they overlap.
///
/// The heavier body absorbs the lighter one. On equal masses `a` absorbs
/// `b`. The absorber takes the combined mass and the velocity that
/// conserves total momentum, its radius is recomputed, and the absorbed
/// body is flagged as merged and left otherwise untouched.
///
/// Bodies that are already merged are never merged again.
///
/// ### Returns
/// `Some(Merge)` describing the merge, or `None` if nothing happened.
pub fn resolve(a: &mut Body, b: &mut Body) -> Option<Merge> {
    if a.is_merged() || b.is_merged() || !overlaps(a, b) {
        return None;
    }

    let momentum = a.momentum() + b.momentum();
    let (absorber, absorbed) = if b.mass() > a.mass() { (b, a) } else { (a, b) };

    absorber.set_mass(absorber.mass() + absorbed.mass());
    absorber.velocity = momentum / absorber.mass();
    absorbed.merged = true;

    log::debug!(
        "body {} absorbed body {} (mass now {:.3e})",
        absorber.id(),
        absorbed.id(),
        absorber.mass()
    );

    Some(Merge {
        absorber: absorber.id(),
        absorbed: absorbed.id(),
    })
}
