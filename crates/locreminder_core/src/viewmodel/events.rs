//! Transient UI events shared by every controller.

use log::trace;
use tokio::sync::broadcast;

/// Per-subscriber buffer for UI events. Slow subscribers see `Lagged`.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Screens a controller may ask the UI to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    RemindersList,
    SaveReminder,
    SelectLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    To(Destination),
    Back,
}

/// One-shot messages the UI renders once and forgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ShowSnackBar(String),
    ShowToast(String),
    Navigate(NavigationCommand),
}

/// Ordered fan-out of `UiEvent`s to every subscribed UI surface.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event; dropped silently when no UI is listening.
    pub fn emit(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            trace!("event=ui_event module=viewmodel status=dropped reason=no_subscribers");
        }
    }
}
