use crate::{
    body::Body,
    config::SpeedMultiplier,
    observer::{SimulationEvent, SimulationObserver},
    simulation::Simulation,
    snapshot::Snapshot,
    utils,
};
use std::ffi::c_void;

/// Flat copy of a body for C callers.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyRecord {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub ax: f64,
    pub ay: f64,
    pub mass: f64,
    pub radius: f64,
    pub is_sun: bool,
}

impl From<&Body> for BodyRecord {
    fn from(body: &Body) -> Self {
        let (pos, vel, acc) = (body.position(), body.velocity(), body.acceleration());
        Self {
            x: pos.x(),
            y: pos.y(),
            vx: vel.x(),
            vy: vel.y(),
            ax: acc.x(),
            ay: acc.y(),
            mass: body.mass(),
            radius: body.radius(),
            is_sun: body.is_sun(),
        }
    }
}

pub type EventCallback = extern "C" fn(event: SimulationEvent, user_data: *mut c_void);

/// Forwards every notification to a C function pointer.
struct CallbackObserver {
    callback: EventCallback,
    user_data: *mut c_void,
}

impl CallbackObserver {
    fn emit(&self, event: SimulationEvent) {
        (self.callback)(event, self.user_data);
    }
}

impl SimulationObserver for CallbackObserver {
    fn on_update(&mut self, _bodies: &[Body]) {
        self.emit(SimulationEvent::Update);
    }

    fn on_started(&mut self) {
        self.emit(SimulationEvent::Started);
    }

    fn on_stopped(&mut self) {
        self.emit(SimulationEvent::Stopped);
    }

    fn on_reset(&mut self) {
        self.emit(SimulationEvent::Reset);
    }
}

/// Creates a stopped simulation of the solar system preset.
#[unsafe(no_mangle)]
pub extern "C" fn Simulation_Create() -> *mut Simulation {
    Box::into_raw(Box::new(Simulation::new(utils::solar_system())))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Start(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.start();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Stop(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.stop();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Reset(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.reset();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Update(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.update();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_IsRunning(handle: *const Simulation) -> bool {
    unsafe { handle.as_ref() }.is_some_and(Simulation::is_running)
}

/// Sets the speed by slider level: 0 = 0.5x, 1 = 1x, 2 = 4x, 3 (or more) = 16x.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetSpeedLevel(handle: *mut Simulation, level: usize) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.set_speed_multiplier(SpeedMultiplier::from_level(level));
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetSpeedMultiplier(handle: *const Simulation) -> f64 {
    unsafe { handle.as_ref() }.map_or(0.0, |sim| sim.speed_multiplier().value())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.bodies().len())
}

/// Copies up to `capacity` bodies into `out`. Returns how many were written.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CopyBodies(
    handle: *const Simulation,
    out: *mut BodyRecord,
    capacity: usize,
) -> usize {
    let Some(sim) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    if out.is_null() {
        return 0;
    }

    let count = sim.bodies().len().min(capacity);
    // SAFETY: the caller guarantees `out` points to `capacity` writable records.
    let out = unsafe { std::slice::from_raw_parts_mut(out, count) };
    for (slot, body) in out.iter_mut().zip(sim.bodies()) {
        *slot = BodyRecord::from(body);
    }
    count
}

/// Returns an owned snapshot; release it with `Snapshot_Destroy`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Capture(handle: *const Simulation) -> *mut Snapshot {
    unsafe { handle.as_ref() }.map_or(std::ptr::null_mut(), |sim| {
        Box::into_raw(Box::new(sim.capture()))
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Restore(handle: *mut Simulation, snapshot: *const Snapshot) {
    if let (Some(sim), Some(snapshot)) = unsafe { (handle.as_mut(), snapshot.as_ref()) } {
        sim.restore(snapshot);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Snapshot_Destroy(snapshot: *mut Snapshot) {
    if !snapshot.is_null() {
        unsafe { drop(Box::from_raw(snapshot)) };
    }
}

/// Registers `callback` for every event. `user_data` is passed back untouched.
/// Returns `false` if the handle is null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AddCallback(
    handle: *mut Simulation,
    callback: EventCallback,
    user_data: *mut c_void,
) -> bool {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return false;
    };
    sim.add_observer(CallbackObserver {
        callback,
        user_data,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    extern "C" fn count_events(event: SimulationEvent, user_data: *mut c_void) {
        let log = unsafe { &mut *(user_data as *mut Vec<SimulationEvent>) };
        log.push(event);
    }

    #[test]
    fn drives_simulation_through_handle() {
        let mut log: Vec<SimulationEvent> = Vec::new();

        unsafe {
            let sim = Simulation_Create();
            assert!(Simulation_AddCallback(
                sim,
                count_events,
                &mut log as *mut Vec<SimulationEvent> as *mut c_void,
            ));

            let snapshot = Simulation_Capture(sim);
            Simulation_Start(sim);
            Simulation_SetSpeedLevel(sim, 2);
            Simulation_Update(sim);
            assert!(Simulation_IsRunning(sim));
            assert_eq!(Simulation_GetSpeedMultiplier(sim), 4.0);

            let n = Simulation_GetBodyCount(sim);
            let mut records = vec![BodyRecord::default(); n + 2];
            assert_eq!(Simulation_CopyBodies(sim, records.as_mut_ptr(), records.len()), n);
            assert!(records[0].is_sun);
            assert_eq!((records[0].x, records[0].y), (0.0, 0.0));

            Simulation_Reset(sim);
            Simulation_Restore(sim, snapshot);
            assert_eq!(Simulation_GetSpeedMultiplier(sim), 1.0);

            Snapshot_Destroy(snapshot);
            Simulation_Destroy(sim);
        }

        assert_eq!(
            log,
            [
                SimulationEvent::Started,
                SimulationEvent::Update,
                SimulationEvent::Reset,
            ]
        );
    }

    #[test]
    fn null_handles_are_ignored() {
        unsafe {
            Simulation_Start(std::ptr::null_mut());
            Simulation_Update(std::ptr::null_mut());
            assert!(!Simulation_IsRunning(std::ptr::null()));
            assert_eq!(Simulation_GetBodyCount(std::ptr::null()), 0);
            assert!(Simulation_Capture(std::ptr::null()).is_null());
            Simulation_Destroy(std::ptr::null_mut());
            Snapshot_Destroy(std::ptr::null_mut());
        }
    }
}
