//! Wiring of the dispatch pipeline

use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

use crate::config::Settings;
use crate::gate::AdmissionGate;
use crate::input_listener::{self, InputEvent};
use crate::input_simulator::{ActionExecutor, ClickInjector};
use crate::queue::DispatchQueue;
use crate::scheduler::{ActionScheduler, Dispatcher};
use crate::state::ActiveState;
use crate::EchoClickError;

/// Running pipeline: dispatch queue, dispatcher thread and shared state
pub struct Engine {
    state: Arc<ActiveState>,
    queue: Arc<DispatchQueue>,
    gate: Arc<AdmissionGate>,
    dispatcher: Option<thread::JoinHandle<()>>,
}

impl Engine {
    /// Build the pipeline and start the dispatcher thread
    pub fn start(
        settings: Settings,
        injector: Box<dyn ClickInjector>,
    ) -> Result<Self, EchoClickError> {
        let state = Arc::new(ActiveState::new());
        let queue = Arc::new(DispatchQueue::new(settings.queue_capacity));
        let gate = AdmissionGate::new(settings.max_in_flight);
        let executor = Arc::new(ActionExecutor::new(injector));

        let scheduler = ActionScheduler::new(settings, state.clone(), gate.clone(), executor);
        let dispatcher = Dispatcher::new(settings, state.clone(), queue.clone(), scheduler)
            .start()
            .map_err(EchoClickError::Spawn)?;

        Ok(Self {
            state,
            queue,
            gate,
            dispatcher: Some(dispatcher),
        })
    }

    /// Queue shared with the input listener
    pub fn queue(&self) -> Arc<DispatchQueue> {
        self.queue.clone()
    }

    pub fn state(&self) -> &ActiveState {
        &self.state
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Feed one event as the input hook would
    pub fn ingest(&self, event: InputEvent) -> bool {
        input_listener::forward(&self.queue, event)
    }

    /// Close the queue and wait for the dispatcher to exit
    ///
    /// Pending clicks are not waited for.
    pub fn shutdown(&mut self) {
        self.queue.close();
        if let Some(handle) = self.dispatcher.take() {
            if handle.join().is_err() {
                warn!("Dispatcher thread panicked");
            }
        }
        info!(
            "Pipeline stopped ({} events dropped, {} clicks pending)",
            self.queue.dropped(),
            self.gate.in_flight()
        );
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.dispatcher.is_some() {
            self.shutdown();
        }
    }
}
