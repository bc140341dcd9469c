//! Synchronous publish/subscribe channel for game events.
//!
//! Listeners are plain closures registered before the run starts; every
//! event emitted during a tick is delivered to all of them, in
//! subscription order, before that tick's snapshot is returned. No
//! guarantees beyond synchronous same-tick delivery.

use shadowline_core::events::GameEvent;

type Listener = Box<dyn FnMut(&GameEvent) + Send>;

/// Event bus owned by the engine.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for all future events.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver a batch of events to every listener.
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
