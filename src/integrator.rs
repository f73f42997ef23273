//! Gravitational acceleration and per-body time stepping.
//!
//! The [`Integrator`] trait is the strategy seam of the simulation: the
//! orchestrator only asks for an acceleration and then for a step, so an
//! alternative scheme can be swapped in without touching [`crate::Simulation`].

use crate::{body::Body, config::SimulationConfig, vector::Vector2D};

/// Strategy used by the simulation to move bodies.
///
/// Implementations must be stateless with respect to the bodies: they only
/// read the slice they are given and return values.
pub trait Integrator {
    /// Net acceleration on `bodies[index]` from every other body in `bodies`.
    fn acceleration_of(&self, index: usize, bodies: &[Body]) -> Vector2D;

    /// Advances `body` by `dt` using its already stored acceleration.
    fn advance(&self, body: &mut Body, dt: f64);
}

/// Direct O(n²) Newtonian gravity with a position update driven by the
/// pre-step velocity.
///
/// Velocity and position are both advanced from the state at the start of
/// the step:
///
/// ```text
/// v' = v + a·dt
/// x' = x + v·dt + ½·a·dt²
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonianGravity {
    /// Gravitational constant in AU³ / (reference mass · day²).
    pub gravitational_constant: f64,
    /// Pairs closer than this (squared distance) contribute nothing.
    pub min_distance_sq: f64,
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self::new(Self::G, Self::MIN_DISTANCE_SQ)
    }
}

impl NewtonianGravity {
    pub const G: f64 = 2.959_122_082_86e-4;
    pub const MIN_DISTANCE_SQ: f64 = 1e-10;

    pub fn new(gravitational_constant: f64, min_distance_sq: f64) -> Self {
        Self {
            gravitational_constant,
            min_distance_sq,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.gravitational_constant, config.min_distance_sq)
    }
}

impl Integrator for NewtonianGravity {
    fn acceleration_of(&self, index: usize, bodies: &[Body]) -> Vector2D {
        let Some(body) = bodies.get(index) else {
            return Vector2D::zero();
        };
        let pos = body.position();

        let mut acc = Vector2D::zero();
        for (j, other) in bodies.iter().enumerate() {
            if j == index {
                continue;
            }

            let d = other.position() - pos;
            let d_sq = d.magnitude_squared();
            // Coincident pairs would blow up; drop them instead.
            if d_sq < self.min_distance_sq {
                continue;
            }

            // a = G * m / r² along the unit direction toward `other`
            let magnitude = self.gravitational_constant * other.mass() / d_sq;
            acc += d.normalize() * magnitude;
        }

        acc
    }

    fn advance(&self, body: &mut Body, dt: f64) {
        let (x, v, a) = (body.pos, body.vel, body.acc);

        body.vel = v + a * dt;
        body.pos = x + (v * dt + a * (0.5 * dt * dt));
    }
}
