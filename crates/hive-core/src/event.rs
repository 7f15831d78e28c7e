//! Events flowing out of bees and actions flowing into them.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{BeeError, BeeResult};
use crate::value::Placeholders;

/// An event emitted by a bee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Name of the emitting bee instance.
    pub bee: String,
    /// Namespace of the matching [`EventDescriptor`](crate::EventDescriptor).
    pub namespace: String,
    pub name: String,
    /// Payload, matching the descriptor's placeholders.
    #[serde(default)]
    pub options: Placeholders,
}

impl Event {
    pub fn new(
        bee: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        options: Placeholders,
    ) -> Self {
        Self {
            bee: bee.into(),
            namespace: namespace.into(),
            name: name.into(),
            options,
        }
    }
}

/// An action dispatched by the hive to one bee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Name of the target bee instance.
    pub bee: String,
    /// Namespace of the matching [`ActionDescriptor`](crate::ActionDescriptor).
    pub namespace: String,
    pub name: String,
    /// Parameters, matching the descriptor's placeholders.
    #[serde(default)]
    pub options: Placeholders,
}

impl Action {
    pub fn new(
        bee: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        options: Placeholders,
    ) -> Self {
        Self {
            bee: bee.into(),
            namespace: namespace.into(),
            name: name.into(),
            options,
        }
    }
}

/// Sending half of the hive's event channel, handed to each running bee.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<Event>,
}

impl EventSink {
    /// Creates a connected sink / receiver pair.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Hands `event` to the hive.
    pub fn emit(&self, event: Event) -> BeeResult<()> {
        self.tx
            .send(event)
            .map_err(|_| BeeError::EventChannelClosed)
    }

    /// Returns `true` once the hive has dropped the receiver.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
