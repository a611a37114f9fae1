//! Event channel between the engine and the presentation layer.
//!
//! The engine publishes one event per grant; a single consumer owned by
//! the presentation layer drains the channel on whatever execution context
//! its rendering API requires. The engine never calls into presentation
//! code directly.

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::progress::PlayerProgress;

/// Outcome of a grant, handed to the presentation consumer.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Player the grant applied to.
    pub id: Uuid,
    /// Record as written by the grant.
    pub progress: PlayerProgress,
    /// Whether the grant crossed a level boundary upward.
    pub leveled_up: bool,
}

/// Producer half held by the engine.
pub type EventSender = mpsc::Sender<ProgressEvent>;

/// Consumer half drained by the presentation layer.
pub type EventReceiver = mpsc::Receiver<ProgressEvent>;

/// Default bound for the event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Bounded event channel. Per-player ordering is guaranteed by the
/// engine's per-id grant serialization plus channel FIFO.
pub fn channel(capacity: usize) -> (EventSender, EventReceiver) {
    mpsc::channel(capacity)
}
