use crate::{
    body::Body,
    config::{SimulationConfig, SpeedMultiplier},
    error::Result,
    integrator::{Integrator, NewtonianGravity},
    observer::{ObserverId, ObserverRegistry, SimulationEvent, SimulationObserver},
    snapshot::Snapshot,
    utils,
    vector::Vector2D,
};

use log::{debug, trace, warn};

/// Run state of a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    #[default]
    Stopped,
    Running,
}

/// Requests from the control surface, fed through the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Start,
    Stop,
    Reset,
    Update,
}

/// What the simulation must do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    Nothing,
    Notify(SimulationEvent),
    Tick,
}

impl LifecycleState {
    /// The lifecycle transition table.
    pub(crate) fn transition(self, command: Command) -> (LifecycleState, Effect) {
        use LifecycleState::*;

        match (self, command) {
            (Stopped, Command::Start) => (Running, Effect::Notify(SimulationEvent::Started)),
            (Stopped, Command::Stop) => (Stopped, Effect::Nothing),
            (Stopped, Command::Reset) => (Stopped, Effect::Notify(SimulationEvent::Reset)),
            (Stopped, Command::Update) => (Stopped, Effect::Nothing),
            (Running, Command::Start) => (Running, Effect::Nothing),
            (Running, Command::Stop) => (Stopped, Effect::Notify(SimulationEvent::Stopped)),
            (Running, Command::Reset) => (Stopped, Effect::Notify(SimulationEvent::Reset)),
            (Running, Command::Update) => (Running, Effect::Tick),
        }
    }
}

/// Owns the bodies and drives them through time.
///
/// There is no internal clock: an external loop calls [`Simulation::update`]
/// on its own cadence, and each call advances one tick while running.
pub struct Simulation {
    /// Base time step in days.
    dt: f64,
    /// Scales `dt` for every tick.
    speed: SpeedMultiplier,
    /// Number of ticks executed so far.
    frame: usize,
    state: LifecycleState,
    /// Fixed, caller-ordered collection of bodies.
    bodies: Vec<Body>,
    integrator: Box<dyn Integrator>,
    observers: ObserverRegistry,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("dt", &self.dt)
            .field("speed", &self.speed)
            .field("frame", &self.frame)
            .field("state", &self.state)
            .field("bodies", &self.bodies)
            .field("integrator", &"Integrator")
            .field("observers", &self.observers)
            .finish()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(utils::solar_system())
    }
}

impl Simulation {
    /// Creates a stopped simulation with Newtonian gravity and default settings.
    ///
    /// `bodies` must be non-empty; the order given is kept for the whole run.
    pub fn new(bodies: Vec<Body>) -> Self {
        Self::with_integrator(bodies, NewtonianGravity::default())
    }

    /// Same as [`Simulation::new`] with a caller-supplied integrator.
    pub fn with_integrator(bodies: Vec<Body>, integrator: impl Integrator + 'static) -> Self {
        Self::from_parts(bodies, Box::new(integrator), &SimulationConfig::default())
    }

    /// Creates a stopped simulation from explicit settings.
    ///
    /// Fails with [`crate::SimError::InvalidTimeStep`] (or another
    /// validation error) if `config` does not pass
    /// [`SimulationConfig::validate`].
    pub fn with_config(
        bodies: Vec<Body>,
        integrator: impl Integrator + 'static,
        config: &SimulationConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(bodies, Box::new(integrator), config))
    }

    fn from_parts(
        bodies: Vec<Body>,
        integrator: Box<dyn Integrator>,
        config: &SimulationConfig,
    ) -> Self {
        debug!(
            "creating simulation with {} bodies, dt = {}, speed = {}",
            bodies.len(),
            config.time_step,
            config.speed
        );

        Self {
            dt: config.time_step,
            speed: config.speed,
            frame: 0,
            state: LifecycleState::Stopped,
            bodies,
            integrator,
            observers: ObserverRegistry::new(),
        }
    }

    /// Starts ticking on the next [`Simulation::update`]. Notifies `started`
    /// only when coming from `Stopped`.
    pub fn start(&mut self) {
        self.apply(Command::Start);
    }

    /// Stops ticking. Notifies `stopped` only when coming from `Running`.
    pub fn stop(&mut self) {
        self.apply(Command::Stop);
    }

    /// Stops the simulation and announces a reset. Body state is left as is;
    /// pair this with [`Simulation::restore`] to rewind.
    pub fn reset(&mut self) {
        self.apply(Command::Reset);
    }

    /// Runs one tick if running, otherwise does nothing.
    pub fn update(&mut self) {
        self.apply(Command::Update);
    }

    fn apply(&mut self, command: Command) {
        let (next, effect) = self.state.transition(command);
        if next != self.state {
            debug!("simulation {:?} -> {:?}", self.state, next);
        }
        self.state = next;

        match effect {
            Effect::Nothing => {}
            Effect::Notify(event) => self.observers.notify(event, &self.bodies),
            Effect::Tick => self.update_physics(),
        }
    }

    /// Advances every non-sun body by one effective step.
    ///
    /// All accelerations are computed from the pre-tick positions before any
    /// body moves, so the result does not depend on body order.
    fn update_physics(&mut self) {
        let accelerations: Vec<(usize, Vector2D)> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| !body.is_sun())
            .map(|(i, _)| (i, self.integrator.acceleration_of(i, &self.bodies)))
            .collect();

        for (i, acc) in accelerations {
            self.bodies[i].acc = acc;
        }

        let dt = self.effective_time_step();
        for body in self.bodies.iter_mut().filter(|body| !body.is_sun()) {
            self.integrator.advance(body, dt);
        }

        self.frame += 1;
        trace!("tick {} (dt = {})", self.frame, dt);

        self.observers.notify(SimulationEvent::Update, &self.bodies);
    }

    /// Captures the kinematic state of every body and the current speed.
    pub fn capture(&self) -> Snapshot {
        Snapshot::new(self.bodies.iter().map(Body::state).collect(), self.speed)
    }

    /// Applies `snapshot` by position: body `i` takes entry `i`.
    ///
    /// Only the first `min(bodies, entries)` bodies are written. Extra bodies
    /// on either side are silently left alone, so the caller must make sure
    /// the body list has not changed since capture. The speed is always
    /// restored.
    ///
    /// A sun keeps its zero state and ignores its entry, see [`Body::sun`].
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.len() != self.bodies.len() {
            warn!(
                "restoring snapshot of {} bodies onto {} bodies; extra entries are ignored",
                snapshot.len(),
                self.bodies.len()
            );
        }

        for (body, state) in self.bodies.iter_mut().zip(snapshot.bodies()) {
            body.restore(state);
        }
        self.speed = snapshot.speed();
        debug!("restored snapshot (speed = {})", self.speed);
    }

    /// Registers `observer` after all existing ones. The returned id is the
    /// only way to unregister it.
    pub fn add_observer(&mut self, observer: impl SimulationObserver + 'static) -> ObserverId {
        let id = self.observers.add(Box::new(observer));
        debug!("registered observer {:?}", id);
        id
    }

    /// Unregisters `id` and hands the observer back, or `None` if unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> Option<Box<dyn SimulationObserver>> {
        let removed = self.observers.remove(id);
        if removed.is_some() {
            debug!("removed observer {:?}", id);
        }
        removed
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Takes effect from the next tick.
    pub fn set_speed_multiplier(&mut self, speed: SpeedMultiplier) {
        self.speed = speed;
    }

    /// Current speed multiplier.
    pub fn speed_multiplier(&self) -> SpeedMultiplier {
        self.speed
    }

    /// Base time step in days.
    pub fn time_step(&self) -> f64 {
        self.dt
    }

    /// Step actually used per tick: base step × speed multiplier.
    pub fn effective_time_step(&self) -> f64 {
        self.dt * self.speed.value()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    /// Ticks executed since construction. Restore does not rewind it.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Read-only view of the live bodies.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Independent copy of the bodies, for readers that outlive the borrow.
    pub fn clone_bodies(&self) -> Vec<Body> {
        self.bodies.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn transition_table() {
        use LifecycleState::*;

        let cases = [
            (Stopped, Command::Start, Running, Effect::Notify(SimulationEvent::Started)),
            (Stopped, Command::Stop, Stopped, Effect::Nothing),
            (Stopped, Command::Reset, Stopped, Effect::Notify(SimulationEvent::Reset)),
            (Stopped, Command::Update, Stopped, Effect::Nothing),
            (Running, Command::Start, Running, Effect::Nothing),
            (Running, Command::Stop, Stopped, Effect::Notify(SimulationEvent::Stopped)),
            (Running, Command::Reset, Stopped, Effect::Notify(SimulationEvent::Reset)),
            (Running, Command::Update, Running, Effect::Tick),
        ];

        for (from, command, to, effect) in cases {
            assert_eq!(from.transition(command), (to, effect), "{from:?} + {command:?}");
        }
    }

    #[test]
    fn effective_step_scales_with_speed() {
        let mut sim = Simulation::default();
        assert_eq!(sim.effective_time_step(), 0.001);

        sim.set_speed_multiplier(SpeedMultiplier::Fastest);
        assert_eq!(sim.effective_time_step(), 0.016);

        sim.set_speed_multiplier(SpeedMultiplier::Half);
        assert_eq!(sim.effective_time_step(), 0.0005);
    }

    #[test]
    fn with_config_rejects_invalid_settings() {
        let invalid = [
            SimulationConfig { time_step: 0.0, ..SimulationConfig::default() },
            SimulationConfig { time_step: -1.0, ..SimulationConfig::default() },
            SimulationConfig { time_step: f64::NAN, ..SimulationConfig::default() },
            SimulationConfig { min_distance_sq: -1e-10, ..SimulationConfig::default() },
            SimulationConfig { gravitational_constant: f64::INFINITY, ..SimulationConfig::default() },
        ];

        for config in &invalid {
            let result = Simulation::with_config(
                utils::solar_system(),
                NewtonianGravity::from_config(config),
                config,
            );
            assert!(result.is_err(), "{config:?} was accepted");
        }

        let zero_step = SimulationConfig { time_step: 0.0, ..SimulationConfig::default() };
        assert!(matches!(
            Simulation::with_config(utils::solar_system(), NewtonianGravity::default(), &zero_step),
            Err(SimError::InvalidTimeStep(step)) if step == 0.0
        ));
    }

    #[test]
    fn with_config_keeps_valid_settings() {
        let config = SimulationConfig {
            time_step: 0.002,
            speed: SpeedMultiplier::Half,
            ..SimulationConfig::default()
        };
        let sim = Simulation::with_config(utils::solar_system(), NewtonianGravity::default(), &config)
            .unwrap();

        assert_eq!(sim.time_step(), 0.002);
        assert_eq!(sim.speed_multiplier(), SpeedMultiplier::Half);
        assert_eq!(sim.effective_time_step(), 0.001);
    }

    #[test]
    fn frame_counts_ticks_only() {
        let mut sim = Simulation::default();
        sim.update();
        assert_eq!(sim.frame(), 0);

        sim.start();
        sim.update();
        sim.update();
        sim.stop();
        sim.update();

        assert_eq!(sim.frame(), 2);
    }
}
