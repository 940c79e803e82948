use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use waveoff_frame::PlanarFrame;

use crate::{FrameSource, SourceError};

/// Bounded single-slot channel with keep-latest semantics.
///
/// A push while the slot is full replaces the unconsumed value, so the
/// consumer always wakes to the newest one. This is the in-process model of
/// the platform's drop-if-busy frame callback: at most one unit of work is
/// ever pending, nothing queues.
pub struct LatestSlot<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    slot: Mutex<Option<T>>,
    notify: Notify,
}

impl<T> Clone for LatestSlot<T> {
    fn clone(&self) -> Self {
        LatestSlot {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        LatestSlot {
            shared: Arc::new(Shared {
                slot: Mutex::new(None),
                notify: Notify::new(),
            }),
        }
    }

    /// Store a value, superseding any unconsumed one.
    ///
    /// Returns true if an unconsumed value was dropped.
    pub fn push(&self, value: T) -> bool {
        let superseded = {
            let mut slot = self.lock();
            slot.replace(value).is_some()
        };
        self.shared.notify.notify_one();
        superseded
    }

    /// Take the pending value, if any.
    pub fn try_pop(&self) -> Option<T> {
        self.lock().take()
    }

    /// Wait for a value and take it.
    pub async fn pop(&self) -> T {
        loop {
            // Register for a wakeup before checking, so a push between the
            // check and the await is not lost.
            let notified = self.shared.notify.notified();
            if let Some(value) = self.try_pop() {
                return value;
            }
            notified.await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<T>> {
        self.shared.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Frame source backed by a [`LatestSlot`].
///
/// The producer side (the platform's frame callback) pushes into the slot
/// handle; the pipeline pulls the newest frame out of the source.
pub struct SlotSource {
    slot: LatestSlot<PlanarFrame>,
}

impl SlotSource {
    /// Create a source and the producer handle that feeds it.
    pub fn new() -> (Self, LatestSlot<PlanarFrame>) {
        let slot = LatestSlot::new();
        (
            SlotSource { slot: slot.clone() },
            slot,
        )
    }
}

impl FrameSource for SlotSource {
    async fn recv(&mut self) -> Result<PlanarFrame, SourceError> {
        Ok(self.slot.pop().await)
    }
}
