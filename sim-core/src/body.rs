use crate::types::BodyId;
use glam::DVec2;
use std::f64::consts::PI;

/// One unit of mass in the simulation (kg). A body of mass `MASS_UNIT`
/// covers one square world unit.
pub const MASS_UNIT: f64 = 1e11;

/// Radius of a disc whose area (in world units) equals `mass / MASS_UNIT`.
#[inline]
pub fn radius_for_mass(mass: f64) -> f64 {
    ((mass / MASS_UNIT) / PI).sqrt()
}

/// A single gravitating body.
///
/// `mass`, `radius` and `merged` are only changed through the collision
/// code so that the radius always matches the current mass and an
/// absorbed body is never written to again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) mass: f64,
    pub(crate) radius: f64,
    pub(crate) merged: bool,

    pub position: DVec2,
    pub velocity: DVec2,
    /// Total acceleration applied during the last force accumulation.
    pub acceleration: DVec2,
    /// Total gravitational force felt during the last force accumulation.
    pub accumulated_force: DVec2,

    pub selected: bool,
    pub color: [u8; 3],
}

impl Body {
    pub fn new(id: BodyId, mass: f64, position: DVec2, color: [u8; 3]) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive");
        Self {
            id,
            mass,
            radius: radius_for_mass(mass),
            merged: false,
            position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            accumulated_force: DVec2::ZERO,
            selected: false,
            color,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `true` once this body has been absorbed by another one.
    #[inline]
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Replaces the mass and recomputes the radius from it.
    pub(crate) fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.radius = radius_for_mass(mass);
    }

    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    /// Strict containment: a point exactly on the rim is outside.
    #[inline]
    pub fn contains_point(&self, point: DVec2) -> bool {
        self.position.distance(point) < self.radius
    }
}
