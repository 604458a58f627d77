use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::event::{EventHandler, ModelEvent, ModelStatus};

type SharedHandler = Rc<RefCell<dyn EventHandler>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, SharedHandler)>,
}

/// Broadcasts model events to registered handlers.
///
/// Handlers may subscribe or unsubscribe while an event is being delivered;
/// the change applies from the next `emit`.
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::default())),
        }
    }

    /// Registers `handler`. It stays registered until the returned
    /// [`Subscription`] is dropped or explicitly unsubscribed.
    pub fn subscribe(&self, handler: impl EventHandler + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let handler: SharedHandler = Rc::new(RefCell::new(handler));
        registry.handlers.push((id, handler));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every handler registered at the time of the call.
    pub fn emit(&self, event: ModelEvent, status: ModelStatus) {
        let handlers: Vec<SharedHandler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => handler.handle_event(&event, &status),
                Err(_) => log::warn!("skipping re-entrant delivery of {event:?}"),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the handler immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// True while the handler is still registered on a live bus.
    pub fn is_active(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            registry
                .borrow()
                .handlers
                .iter()
                .any(|(id, _)| *id == self.id)
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.handlers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
