//! Runtime settings for a [`crate::Simulation`].
//!
//! `SimulationConfig` holds:
//! - the base time step (in days) and the initial speed multiplier,
//! - the gravitational constant and the minimum pair distance used by
//!   [`crate::NewtonianGravity`].
//!
//! Embedders may build it in code or deserialize it (YAML helper below).

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::integrator::NewtonianGravity;

/// Discrete playback speeds offered to the control surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum SpeedMultiplier {
    Half,
    #[default]
    Normal,
    Fast,
    Fastest,
}

impl SpeedMultiplier {
    /// All speeds, slowest first. Index equals the control level.
    pub const ALL: [SpeedMultiplier; 4] = [
        SpeedMultiplier::Half,
        SpeedMultiplier::Normal,
        SpeedMultiplier::Fast,
        SpeedMultiplier::Fastest,
    ];

    /// Factor applied to the base time step.
    pub fn value(self) -> f64 {
        match self {
            SpeedMultiplier::Half => 0.5,
            SpeedMultiplier::Normal => 1.0,
            SpeedMultiplier::Fast => 4.0,
            SpeedMultiplier::Fastest => 16.0,
        }
    }

    /// Maps a slider notch (0 = slowest) to a speed. Levels past the top
    /// notch saturate at [`SpeedMultiplier::Fastest`].
    pub fn from_level(level: usize) -> Self {
        Self::ALL[level.min(Self::ALL.len() - 1)]
    }
}

impl TryFrom<f64> for SpeedMultiplier {
    type Error = SimError;

    fn try_from(value: f64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.value() == value)
            .ok_or(SimError::InvalidSpeedMultiplier(value))
    }
}

impl From<SpeedMultiplier> for f64 {
    fn from(speed: SpeedMultiplier) -> Self {
        speed.value()
    }
}

impl std::fmt::Display for SpeedMultiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}x", self.value())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Base step in days; 0.001 days is about 2.4 minutes.
    pub time_step: f64,
    /// Initial speed multiplier.
    pub speed: SpeedMultiplier,
    /// G in AU³ / (reference mass · day²).
    pub gravitational_constant: f64,
    /// Squared distance below which a pair exerts no force.
    pub min_distance_sq: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: Self::DEFAULT_TIME_STEP,
            speed: SpeedMultiplier::Normal,
            gravitational_constant: NewtonianGravity::G,
            min_distance_sq: NewtonianGravity::MIN_DISTANCE_SQ,
        }
    }
}

impl SimulationConfig {
    pub const DEFAULT_TIME_STEP: f64 = 0.001;

    /// Parses a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(src: &str) -> Result<Self> {
        let config: SimulationConfig = serde_yaml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the time step is positive and finite, the gravitational
    /// constant is finite and the minimum pair distance is finite and
    /// non-negative.
    pub fn validate(&self) -> Result<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimError::InvalidTimeStep(self.time_step));
        }
        if !self.gravitational_constant.is_finite() {
            return Err(SimError::InvalidGravitationalConstant(
                self.gravitational_constant,
            ));
        }
        if !(self.min_distance_sq.is_finite() && self.min_distance_sq >= 0.0) {
            return Err(SimError::InvalidMinDistance(self.min_distance_sq));
        }
        Ok(())
    }
}
