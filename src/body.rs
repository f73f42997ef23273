use serde::{Deserialize, Serialize};

use crate::vector::Vector2D;

/// Whether a body is the fixed central star or free to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Pinned at the origin. Pulls on others, is never accelerated itself.
    Sun,
    Orbiting,
}

/// Kinematic state of a single body at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
}

/// Represents a celestial body in the simulation.
///
/// Identity (name, mass, radius, kind) is fixed at construction. The
/// kinematic state is only written by the integrator and by snapshot restore.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    name: String,
    /// Mass relative to the reference body.
    mass: f64,
    radius: f64,
    kind: BodyKind,
    pub(crate) pos: Vector2D,
    pub(crate) vel: Vector2D,
    pub(crate) acc: Vector2D,
}

impl Body {
    /// Creates the central star. Its position, velocity and acceleration
    /// are the zero vector and stay that way.
    pub fn sun(name: impl Into<String>, mass: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            kind: BodyKind::Sun,
            pos: Vector2D::zero(),
            vel: Vector2D::zero(),
            acc: Vector2D::zero(),
        }
    }

    /// Creates a free body. Initial acceleration is zero.
    pub fn orbiting(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        pos: Vector2D,
        vel: Vector2D,
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            kind: BodyKind::Orbiting,
            pos,
            vel,
            acc: Vector2D::zero(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn is_sun(&self) -> bool {
        self.kind == BodyKind::Sun
    }

    pub fn position(&self) -> Vector2D {
        self.pos
    }

    pub fn velocity(&self) -> Vector2D {
        self.vel
    }

    pub fn acceleration(&self) -> Vector2D {
        self.acc
    }

    /// Copies out the current kinematic state.
    pub fn state(&self) -> KinematicState {
        KinematicState {
            position: self.pos,
            velocity: self.vel,
            acceleration: self.acc,
        }
    }

    /// Overwrites the whole kinematic state at once.
    /// A sun keeps its zero state regardless of `state`.
    pub(crate) fn restore(&mut self, state: &KinematicState) {
        if self.is_sun() {
            return;
        }
        let KinematicState {
            position,
            velocity,
            acceleration,
        } = *state;
        self.pos = position;
        self.vel = velocity;
        self.acc = acceleration;
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: pos={}, vel={}", self.name, self.pos, self.vel)
    }
}
