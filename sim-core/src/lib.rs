//! Core 2-D N-body gravity simulation library.
//!
//! Main components:
//! - [`body`] — bodies and the mass/radius relation.
//! - [`force`] — pairwise gravitational force and direction.
//! - [`integrator`] — velocity/position update and wall reflection.
//! - [`collision`] — overlap detection and inelastic merging.
//! - [`phases`] — the five phases of a simulation tick.
//! - [`state`] — the simulation aggregate and its parameter controls.
//! - [`config`] — starting tunables.
//! - [`preset`] — four-line text presets of initial layouts.
//! - [`error`] — error types.
//! - [`types`] — shared ids and world bounds.

pub mod body;
pub mod collision;
pub mod config;
pub mod error;
pub mod force;
pub mod integrator;
pub mod phases;
pub mod preset;
pub mod state;
pub mod types;
