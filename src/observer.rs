//! Listener registry for lifecycle and tick notifications.

use crate::body::Body;

/// The four kinds of notification a simulation emits.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimulationEvent {
    Update,
    Started,
    Stopped,
    Reset,
}

/// Receives simulation notifications. All methods default to doing nothing.
///
/// Callbacks only get read access to the bodies, so a listener cannot
/// touch the registry while it is being notified.
pub trait SimulationObserver {
    /// Called after every tick with the post-tick bodies.
    fn on_update(&mut self, _bodies: &[Body]) {}
    fn on_started(&mut self) {}
    fn on_stopped(&mut self) {}
    fn on_reset(&mut self) {}
}

/// Handle returned by registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Observers in registration order. The same observer may be registered
/// more than once; each registration is notified separately.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn SimulationObserver>)>,
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("next_id", &self.next_id)
            .field("observers", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

impl ObserverRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `observer` after all existing ones and returns its handle.
    pub fn add(&mut self, observer: Box<dyn SimulationObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Unregisters `id`, handing the observer back. `None` if unknown.
    pub fn remove(&mut self, id: ObserverId) -> Option<Box<dyn SimulationObserver>> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ObserverId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Delivers `event` to every observer, synchronously, in registration order.
    pub fn notify(&mut self, event: SimulationEvent, bodies: &[Body]) {
        for (_, observer) in self.entries.iter_mut() {
            match event {
                SimulationEvent::Update => observer.on_update(bodies),
                SimulationEvent::Started => observer.on_started(),
                SimulationEvent::Stopped => observer.on_stopped(),
                SimulationEvent::Reset => observer.on_reset(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    type Log = Rc<RefCell<Vec<(u8, SimulationEvent)>>>;

    struct Tagged(u8, Log);

    impl SimulationObserver for Tagged {
        fn on_update(&mut self, _bodies: &[Body]) {
            self.1.borrow_mut().push((self.0, SimulationEvent::Update));
        }
        fn on_started(&mut self) {
            self.1.borrow_mut().push((self.0, SimulationEvent::Started));
        }
        fn on_stopped(&mut self) {
            self.1.borrow_mut().push((self.0, SimulationEvent::Stopped));
        }
        fn on_reset(&mut self) {
            self.1.borrow_mut().push((self.0, SimulationEvent::Reset));
        }
    }

    #[test]
    fn notifies_in_registration_order() {
        let log = Log::default();
        let mut registry = ObserverRegistry::new();
        for tag in [3, 1, 2] {
            registry.add(Box::new(Tagged(tag, log.clone())));
        }

        registry.notify(SimulationEvent::Stopped, &[]);

        assert_eq!(
            *log.borrow(),
            [
                (3, SimulationEvent::Stopped),
                (1, SimulationEvent::Stopped),
                (2, SimulationEvent::Stopped),
            ]
        );
    }

    #[test]
    fn removed_observer_is_not_notified() {
        let log = Log::default();
        let mut registry = ObserverRegistry::new();
        let first = registry.add(Box::new(Tagged(0, log.clone())));
        registry.add(Box::new(Tagged(1, log.clone())));

        assert!(registry.remove(first).is_some());
        assert!(registry.remove(first).is_none());
        registry.notify(SimulationEvent::Reset, &[]);

        assert_eq!(registry.len(), 1);
        assert_eq!(*log.borrow(), [(1, SimulationEvent::Reset)]);
    }

    #[test]
    fn default_methods_are_no_ops() {
        struct Silent;
        impl SimulationObserver for Silent {}

        let mut registry = ObserverRegistry::new();
        registry.add(Box::new(Silent));
        registry.notify(SimulationEvent::Update, &[]);
        registry.notify(SimulationEvent::Started, &[]);
    }
}
