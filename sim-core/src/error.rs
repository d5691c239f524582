//! Error types for the simulation core.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Two bodies share the same position, so no direction or inverse
    /// square distance exists between them.
    #[error("coincident bodies: distance between them is zero")]
    DegenerateGeometry,

    #[error("placement data holds {found} positions but {expected} bodies were requested")]
    InvalidPlacementData { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, SimError>;
