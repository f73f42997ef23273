pub mod body;
pub mod c_api;
pub mod config;
pub mod error;
pub mod integrator;
pub mod observer;
pub mod simulation;
pub mod snapshot;
pub mod utils;
pub mod vector;

pub use body::{Body, BodyKind, KinematicState};
pub use config::{SimulationConfig, SpeedMultiplier};
pub use error::{Result, SimError};
pub use integrator::{Integrator, NewtonianGravity};
pub use observer::{ObserverId, ObserverRegistry, SimulationEvent, SimulationObserver};
pub use simulation::{LifecycleState, Simulation};
pub use snapshot::Snapshot;
pub use vector::Vector2D;
