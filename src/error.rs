//! Error types for the simulation core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot divide a vector by zero")]
    DivisionByZero,

    #[error("unsupported speed multiplier: {0} (expected one of 0.5, 1, 4, 16)")]
    InvalidSpeedMultiplier(f64),

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("gravitational constant must be finite, got {0}")]
    InvalidGravitationalConstant(f64),

    #[error("minimum pair distance must be finite and non-negative, got {0}")]
    InvalidMinDistance(f64),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
