//! Bounded dispatch queue between the input hook and the dispatcher
//!
//! The producer side never blocks: a full queue rejects the event. The
//! consumer side blocks until an event arrives or the queue is closed.

use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::input_listener::InputEvent;

pub struct DispatchQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
    capacity: usize,
    closed: AtomicBool,
    /// Dropped on close, which disconnects `close_wait` and wakes consumers
    close_signal: Mutex<Option<Sender<()>>>,
    close_wait: Receiver<()>,
    dropped: AtomicU64,
}

impl DispatchQueue {
    /// Create a queue holding at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        let (close_signal, close_wait) = bounded(0);
        Self {
            sender,
            receiver,
            capacity,
            closed: AtomicBool::new(false),
            close_signal: Mutex::new(Some(close_signal)),
            close_wait,
            dropped: AtomicU64::new(0),
        }
    }

    /// Enqueue without blocking; false if the queue is full or closed
    pub fn try_enqueue(&self, event: InputEvent) -> bool {
        if self.is_closed() {
            return false;
        }
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Block until an event is available; None once the queue is closed
    pub fn dequeue(&self) -> Option<InputEvent> {
        if self.is_closed() {
            return None;
        }
        select! {
            recv(self.receiver) -> event => event.ok(),
            recv(self.close_wait) -> _ => None,
        }
    }

    /// Close the queue and wake any blocked consumer. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.close_signal
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Maximum number of buffered events
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of events currently buffered
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no events are buffered
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Number of events rejected because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
