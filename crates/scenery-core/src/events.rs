//! Editor change-broadcast channel.
//!
//! Nodes publish named events after mutating themselves; the UI and any other
//! subscriber re-render from the updated node state.

use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

/// Events published on the editor channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// One or more scene objects changed and should be redrawn.
    ObjectsChanged(Vec<Uuid>),
    /// The selection (or the state of selected objects) changed.
    SelectionChanged,
}

impl EditorEvent {
    /// Stable event name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ObjectsChanged(_) => "objectsChanged",
            Self::SelectionChanged => "selectionChanged",
        }
    }
}

/// Cloneable handle to the broadcast channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
}

impl EventBus {
    /// Create a bus that buffers up to `capacity` events per lagging receiver.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to every current subscriber.
    pub fn publish(&self, event: EditorEvent) {
        let name = event.name();
        if self.sender.send(event).is_err() {
            trace!(event = name, "No subscribers for editor event");
        }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
