//! Dispatch loop and delayed click scheduling

use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

use crate::classifier::{classify, Classification};
use crate::config::Settings;
use crate::gate::AdmissionGate;
use crate::input_simulator::ActionExecutor;
use crate::queue::DispatchQueue;
use crate::state::ActiveState;

/// Result of handing a trigger press to the scheduler
#[derive(Debug)]
pub enum Dispatch {
    /// Feature inactive or disabled; nothing scheduled
    Inactive,
    /// Admission gate full; the press was dropped
    Saturated,
    /// The pending click thread could not be started; the press was dropped
    Failed,
    /// A pending click was started on its own thread
    Scheduled(thread::JoinHandle<()>),
}

/// Turns trigger presses into delayed, concurrency-limited clicks
#[derive(Clone)]
pub struct ActionScheduler {
    settings: Settings,
    state: Arc<ActiveState>,
    gate: Arc<AdmissionGate>,
    executor: Arc<ActionExecutor>,
}

impl ActionScheduler {
    pub fn new(
        settings: Settings,
        state: Arc<ActiveState>,
        gate: Arc<AdmissionGate>,
        executor: Arc<ActionExecutor>,
    ) -> Self {
        Self {
            settings,
            state,
            gate,
            executor,
        }
    }

    fn should_fire(&self) -> bool {
        self.settings.enabled && self.state.is_active()
    }

    /// Schedule one click of the target button after the configured delay
    ///
    /// The active state is checked now and again when the delay has
    /// elapsed; a toggle-off in between suppresses the click. The admission
    /// permit travels with the pending action and is released when it ends,
    /// whatever the outcome.
    pub fn schedule(&self) -> Dispatch {
        if !self.should_fire() {
            return Dispatch::Inactive;
        }

        let Some(permit) = self.gate.try_acquire() else {
            debug!(
                "Admission gate full ({} pending), dropping trigger press",
                self.gate.capacity()
            );
            return Dispatch::Saturated;
        };

        let action = self.clone();
        let spawned = thread::Builder::new()
            .name("pending-click".into())
            .spawn(move || {
                let _permit = permit;
                thread::sleep(action.settings.delay);

                if !action.should_fire() {
                    debug!("Feature turned off during delay, click suppressed");
                    return;
                }

                let target = action.settings.target;
                match action.executor.click(target) {
                    Ok(()) => debug!("Auto-click sent ({})", target),
                    Err(e) => error!("Failed to send auto-click: {}", e),
                }
            });

        match spawned {
            Ok(handle) => Dispatch::Scheduled(handle),
            Err(e) => {
                // The closure, and the permit inside it, was dropped with the error
                error!("Failed to start pending click: {}", e);
                Dispatch::Failed
            }
        }
    }
}

/// Drains the dispatch queue, classifying events in arrival order
pub struct Dispatcher {
    settings: Settings,
    state: Arc<ActiveState>,
    queue: Arc<DispatchQueue>,
    scheduler: ActionScheduler,
}

impl Dispatcher {
    pub fn new(
        settings: Settings,
        state: Arc<ActiveState>,
        queue: Arc<DispatchQueue>,
        scheduler: ActionScheduler,
    ) -> Self {
        Self {
            settings,
            state,
            queue,
            scheduler,
        }
    }

    /// Classify one event and act on it
    pub fn handle(&self, event: &crate::InputEvent) -> Classification {
        let class = classify(event, &self.settings);
        match class {
            Classification::HotkeyToggle => {
                let active = self.state.toggle();
                info!("Feature {}", if active { "ON" } else { "OFF" });
            }
            Classification::TriggerPress => {
                // Pending clicks run detached
                let _ = self.scheduler.schedule();
            }
            Classification::Ignored => {}
        }
        class
    }

    /// Process events until the queue is closed
    pub fn run(&self) {
        info!("Dispatcher started");
        while let Some(event) = self.queue.dequeue() {
            self.handle(&event);
        }
        info!("Dispatcher stopped");
    }

    /// Run the dispatch loop on a dedicated thread
    pub fn start(self) -> std::io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name("dispatcher".into())
            .spawn(move || self.run())
    }
}
