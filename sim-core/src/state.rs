//! The simulation aggregate: the body collection plus global tunables.

use crate::{
    body::{Body, MASS_UNIT},
    config::Config,
    error::{Result, SimError},
    phases::{self, StepParams, StepReport},
    preset::Preset,
    types::{BodyId, Bounds},
};
use glam::DVec2;
use rand::Rng;

/// Where newly created bodies are put.
#[derive(Clone, Debug, PartialEq)]
pub enum Placement {
    /// Uniformly random inside the world bounds.
    Random,
    /// Exactly these positions, one per body, in order.
    Fixed(Vec<DVec2>),
}

/// Owns every body and the parameters that drive a tick.
///
/// The driver alternates between [`SimulationState::step`] and read-only
/// queries such as [`SimulationState::live_bodies`]; nothing else mutates
/// the collection.
#[derive(Debug)]
pub struct SimulationState {
    bodies: Vec<Body>,

    pub gravitational_constant: f64,
    pub bounds: Bounds,
    speed_multiplier: u32,
    border_enabled: bool,
    object_count: u32,
    base_mass: u32,
    paused: bool,

    next_id: BodyId,
    tick_count: u64,
    /// Parameters and positions of the last successful initialization.
    seed_preset: Preset,
}

impl SimulationState {
    /// Creates an empty state; call [`SimulationState::initialize`] to
    /// create bodies.
    pub fn new(cfg: &Config) -> Self {
        Self {
            bodies: Vec::new(),
            gravitational_constant: cfg.gravitational_constant,
            bounds: cfg.bounds,
            speed_multiplier: cfg.speed_multiplier.max(1),
            border_enabled: cfg.border_enabled,
            object_count: cfg.object_count.max(1),
            base_mass: cfg.base_mass.max(1),
            paused: false,
            next_id: 0,
            tick_count: 0,
            seed_preset: Preset {
                base_mass: cfg.base_mass.max(1),
                object_count: 0,
                positions: Vec::new(),
            },
        }
    }

    /// Creates a state that starts from an explicit body list.
    pub fn from_bodies(cfg: &Config, bodies: Vec<Body>) -> Self {
        let mut state = Self::new(cfg);
        state.next_id = bodies.iter().map(|b| b.id() + 1).max().unwrap_or(0);
        state.object_count = bodies.len() as u32;
        state.seed_preset.object_count = state.object_count;
        state.seed_preset.positions = bodies.iter().map(|b| b.position).collect();
        state.bodies = bodies;
        state
    }

    /// Replaces all bodies with `count` fresh ones of mass
    /// `base_mass * MASS_UNIT`.
    ///
    /// Positions come from `placement`; colours are drawn from `rng`, as
    /// are positions for [`Placement::Random`]. `base_mass` is clamped to
    /// at least 1.
    ///
    /// ### Errors
    /// [`SimError::InvalidPlacementData`] when a fixed placement does not
    /// hold exactly `count` positions. The current bodies and parameters
    /// are left untouched in that case.
    pub fn initialize(
        &mut self,
        count: u32,
        base_mass: u32,
        placement: Placement,
        rng: &mut impl Rng,
    ) -> Result<()> {
        let base_mass = base_mass.max(1);
        let bounds = self.bounds;

        let positions = match placement {
            Placement::Fixed(positions) => {
                if positions.len() != count as usize {
                    log::warn!(
                        "rejecting placement: {} positions for {} bodies",
                        positions.len(),
                        count
                    );
                    return Err(SimError::InvalidPlacementData {
                        expected: count as usize,
                        found: positions.len(),
                    });
                }
                log::info!("initializing {count} bodies of mass {base_mass} from fixed positions");
                positions
            }
            Placement::Random => {
                log::info!("initializing {count} bodies of mass {base_mass} at random positions");
                (0..count)
                    .map(|_| {
                        let x = rng.random_range(0.0..=bounds.width);
                        let y = rng.random_range(0.0..=bounds.height);
                        DVec2::new(x, y)
                    })
                    .collect()
            }
        };

        let mass = f64::from(base_mass) * MASS_UNIT;
        self.bodies.clear();
        for &pos in &positions {
            let color = [rng.random(), rng.random(), rng.random()];
            self.bodies.push(Body::new(self.next_id, mass, pos, color));
            self.next_id += 1;
        }

        self.object_count = count;
        self.base_mass = base_mass;
        self.seed_preset = Preset {
            base_mass,
            object_count: count,
            positions,
        };
        Ok(())
    }

    /// Re-creates bodies at random positions from the current
    /// `object_count` and `base_mass`.
    pub fn restart(&mut self, rng: &mut impl Rng) {
        let (count, mass) = (self.object_count, self.base_mass);
        if let Err(e) = self.initialize(count, mass, Placement::Random, rng) {
            log::error!("restart failed: {e}");
        }
    }

    /// Initializes from a loaded preset.
    pub fn load_preset(&mut self, preset: &Preset, rng: &mut impl Rng) -> Result<()> {
        self.initialize(
            preset.object_count,
            preset.base_mass,
            Placement::Fixed(preset.positions.clone()),
            rng,
        )
    }

    /// Preset that reproduces the last initialization.
    pub fn to_preset(&self) -> Preset {
        self.seed_preset.clone()
    }

    fn step_params(&self) -> StepParams {
        StepParams {
            gravitational_constant: self.gravitational_constant,
            bounds: self.bounds,
            border_enabled: self.border_enabled,
        }
    }

    /// Runs exactly one sub-step, regardless of pause.
    pub fn tick(&mut self) -> StepReport {
        let params = self.step_params();
        let report = phases::run_step(&mut self.bodies, &params);
        self.tick_count += 1;
        report
    }

    /// Runs `speed_multiplier` sub-steps unless paused.
    ///
    /// ### Returns
    /// The merges and removals of all sub-steps combined.
    pub fn step(&mut self) -> StepReport {
        let mut total = StepReport::default();
        if self.paused {
            return total;
        }

        for _ in 0..self.speed_multiplier {
            let report = self.tick();
            total.merges.extend(report.merges);
            total.removed += report.removed;
        }
        total
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_border(&mut self) {
        self.border_enabled = !self.border_enabled;
    }

    pub fn border_enabled(&self) -> bool {
        self.border_enabled
    }

    /// Flips gravity into repulsion and back.
    pub fn toggle_gravity_sign(&mut self) {
        self.gravitational_constant = -self.gravitational_constant;
    }

    pub fn adjust_speed(&mut self, delta: i32) {
        self.speed_multiplier = clamped_add(self.speed_multiplier, delta);
    }

    pub fn adjust_base_mass(&mut self, delta: i32) {
        self.base_mass = clamped_add(self.base_mass, delta);
    }

    pub fn adjust_object_count(&mut self, delta: i32) {
        self.object_count = clamped_add(self.object_count, delta);
    }

    pub fn speed_multiplier(&self) -> u32 {
        self.speed_multiplier
    }

    pub fn base_mass(&self) -> u32 {
        self.base_mass
    }

    pub fn object_count(&self) -> u32 {
        self.object_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Every body currently held, in creation order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Bodies that have not been absorbed.
    pub fn live_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| !b.is_merged())
    }

    /// First live body whose disc strictly contains `point`.
    pub fn body_at(&self, point: DVec2) -> Option<&Body> {
        self.live_bodies().find(|b| b.contains_point(point))
    }

    /// Deselects everything, then selects the body at `point`, if any.
    pub fn select_at(&mut self, point: DVec2) -> Option<BodyId> {
        for b in &mut self.bodies {
            b.selected = false;
        }

        let hit = self
            .bodies
            .iter_mut()
            .find(|b| !b.is_merged() && b.contains_point(point))?;
        hit.selected = true;
        Some(hit.id())
    }

    pub fn selected_body(&self) -> Option<&Body> {
        self.live_bodies().find(|b| b.selected)
    }

    pub fn total_mass(&self) -> f64 {
        self.live_bodies().map(|b| b.mass()).sum()
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.live_bodies().map(|b| b.momentum()).sum()
    }
}

fn clamped_add(value: u32, delta: i32) -> u32 {
    value.saturating_add_signed(delta).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn state() -> SimulationState {
        SimulationState::new(&Config::default())
    }

    #[test]
    fn random_initialize_creates_bodies_inside_bounds() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(1);

        s.initialize(20, 7, Placement::Random, &mut rng).unwrap();

        assert_eq!(s.bodies().len(), 20);
        assert_eq!(s.object_count(), 20);
        assert_eq!(s.base_mass(), 7);
        for b in s.bodies() {
            assert_eq!(b.mass(), 7.0 * MASS_UNIT);
            assert!((0.0..=s.bounds.width).contains(&b.position.x));
            assert!((0.0..=s.bounds.height).contains(&b.position.y));
        }
    }

    #[test]
    fn reinitialize_discards_old_bodies_and_keeps_ids_unique() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(2);
        s.initialize(3, 1, Placement::Random, &mut rng).unwrap();
        let first: Vec<BodyId> = s.bodies().iter().map(|b| b.id()).collect();

        s.initialize(2, 1, Placement::Random, &mut rng).unwrap();
        let second: Vec<BodyId> = s.bodies().iter().map(|b| b.id()).collect();

        assert_eq!(second.len(), 2);
        assert!(second.iter().all(|id| !first.contains(id)));
    }

    #[test]
    fn fixed_placement_uses_given_positions() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(3);
        let positions = vec![DVec2::new(10.0, 20.0), DVec2::new(30.0, 40.0)];

        s.initialize(2, 5, Placement::Fixed(positions.clone()), &mut rng)
            .unwrap();

        let got: Vec<DVec2> = s.bodies().iter().map(|b| b.position).collect();
        assert_eq!(got, positions);
        assert_eq!(s.to_preset().positions, positions);
    }

    #[test]
    fn mismatched_placement_is_rejected_without_touching_state() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(4);
        s.initialize(3, 2, Placement::Random, &mut rng).unwrap();
        let before: Vec<Body> = s.bodies().to_vec();

        let err = s
            .initialize(3, 9, Placement::Fixed(vec![DVec2::ZERO]), &mut rng)
            .unwrap_err();

        assert_eq!(
            err,
            SimError::InvalidPlacementData {
                expected: 3,
                found: 1
            }
        );
        assert_eq!(s.bodies(), before.as_slice());
        assert_eq!(s.base_mass(), 2);
    }

    #[test]
    fn mutators_clamp_to_one() {
        let mut s = state();

        s.adjust_speed(-10);
        s.adjust_base_mass(-1000);
        s.adjust_object_count(-20);
        assert_eq!(s.speed_multiplier(), 1);
        assert_eq!(s.base_mass(), 1);
        assert_eq!(s.object_count(), 1);

        s.adjust_speed(2);
        s.adjust_base_mass(1);
        s.adjust_object_count(4);
        assert_eq!(s.speed_multiplier(), 3);
        assert_eq!(s.base_mass(), 2);
        assert_eq!(s.object_count(), 5);
    }

    #[test]
    fn gravity_sign_toggles_back_and_forth() {
        let mut s = state();
        let g = s.gravitational_constant;

        s.toggle_gravity_sign();
        assert_eq!(s.gravitational_constant, -g);
        s.toggle_gravity_sign();
        assert_eq!(s.gravitational_constant, g);
    }

    #[test]
    fn paused_step_does_nothing() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(5);
        s.initialize(5, 50, Placement::Random, &mut rng).unwrap();
        let before: Vec<Body> = s.bodies().to_vec();

        s.toggle_pause();
        let report = s.step();

        assert!(s.is_paused());
        assert_eq!(report, StepReport::default());
        assert_eq!(s.bodies(), before.as_slice());
        assert_eq!(s.tick_count(), 0);
    }

    #[test]
    fn step_runs_speed_multiplier_sub_steps() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(6);
        s.initialize(4, 10, Placement::Random, &mut rng).unwrap();
        s.adjust_speed(2);

        s.step();
        assert_eq!(s.tick_count(), 3);

        s.toggle_pause();
        s.tick();
        assert_eq!(s.tick_count(), 4);
    }

    #[test]
    fn select_at_picks_first_containing_body_and_clears_others() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(7);
        let positions = vec![DVec2::new(100.0, 100.0), DVec2::new(300.0, 100.0)];
        s.initialize(2, 50, Placement::Fixed(positions), &mut rng)
            .unwrap();
        let (first, second) = (s.bodies()[0].id(), s.bodies()[1].id());

        assert_eq!(s.select_at(DVec2::new(301.0, 100.0)), Some(second));
        assert_eq!(s.selected_body().map(|b| b.id()), Some(second));

        assert_eq!(s.select_at(DVec2::new(100.0, 101.0)), Some(first));
        assert!(!s.bodies()[1].selected);

        assert_eq!(s.select_at(DVec2::new(200.0, 100.0)), None);
        assert!(s.selected_body().is_none());
    }

    #[test]
    fn body_at_is_a_pure_query() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(8);
        s.initialize(1, 50, Placement::Fixed(vec![DVec2::new(50.0, 50.0)]), &mut rng)
            .unwrap();

        assert!(s.body_at(DVec2::new(51.0, 50.0)).is_some());
        assert!(s.body_at(DVec2::new(80.0, 50.0)).is_none());
        assert!(!s.bodies()[0].selected);
    }

    #[test]
    fn restart_uses_adjusted_parameters() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(9);
        s.adjust_object_count(5);
        s.adjust_base_mass(-10);

        s.restart(&mut rng);

        assert_eq!(s.bodies().len(), 20);
        assert!(s.bodies().iter().all(|b| b.mass() == 40.0 * MASS_UNIT));
    }
}
