mod bus;
mod events;

pub use bus::{EventBus, Subscription};
pub use events::{ModelEvent, ModelStatus};

pub trait EventHandler {
    fn handle_event(&mut self, event: &ModelEvent, status: &ModelStatus);
}

impl<F> EventHandler for F
where
    F: FnMut(&ModelEvent, &ModelStatus),
{
    fn handle_event(&mut self, event: &ModelEvent, status: &ModelStatus) {
        self(event, status)
    }
}
