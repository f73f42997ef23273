use serde::{Deserialize, Serialize};

use crate::{body::KinematicState, config::SpeedMultiplier};

/// Deep copy of every body's kinematic state plus the speed multiplier.
///
/// Entries are aligned by index with the body list at capture time. The
/// snapshot carries no body identity: restoring it onto a simulation whose
/// body list was reordered or resized applies states by position only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    bodies: Vec<KinematicState>,
    speed: SpeedMultiplier,
}

impl Snapshot {
    /// Wraps already captured states; entry `i` belongs to body `i`.
    pub fn new(bodies: Vec<KinematicState>, speed: SpeedMultiplier) -> Self {
        Self { bodies, speed }
    }

    /// Per-body states in capture order.
    pub fn bodies(&self) -> &[KinematicState] {
        &self.bodies
    }

    /// Speed multiplier at capture time.
    pub fn speed(&self) -> SpeedMultiplier {
        self.speed
    }

    /// Number of captured bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
