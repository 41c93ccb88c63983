//! Global input listening using rdev

use crossbeam_channel::Sender;
use rdev::{listen, Button, Event, EventType, Key};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

use crate::keymap;
use crate::queue::DispatchQueue;

/// Mouse button as reported by the input hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u8),
}

/// Input event delivered by the global hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown { code: u32 },
    KeyUp { code: u32 },
    MouseDown { button: PointerButton },
    MouseUp { button: PointerButton },
    Other,
}

impl From<Button> for PointerButton {
    fn from(button: Button) -> Self {
        match button {
            Button::Left => PointerButton::Primary,
            Button::Right => PointerButton::Secondary,
            Button::Middle => PointerButton::Middle,
            Button::Unknown(n) => PointerButton::Other(n),
        }
    }
}

impl From<&EventType> for InputEvent {
    fn from(event_type: &EventType) -> Self {
        match *event_type {
            EventType::KeyPress(key) => match keymap::code_for_key(key) {
                Some(code) => InputEvent::KeyDown { code },
                None => InputEvent::Other,
            },
            EventType::KeyRelease(key) => match keymap::code_for_key(key) {
                Some(code) => InputEvent::KeyUp { code },
                None => InputEvent::Other,
            },
            EventType::ButtonPress(button) => InputEvent::MouseDown {
                button: button.into(),
            },
            EventType::ButtonRelease(button) => InputEvent::MouseUp {
                button: button.into(),
            },
            _ => InputEvent::Other,
        }
    }
}

/// Hand one event to the dispatch queue without ever blocking the hook
///
/// Returns whether the event was queued.
pub fn forward(queue: &DispatchQueue, event: InputEvent) -> bool {
    if queue.try_enqueue(event) {
        return true;
    }
    if !queue.is_closed() {
        warn!(
            "Dispatch queue full ({} events), dropping {:?}",
            queue.capacity(),
            event
        );
    }
    false
}

/// Input listener that feeds global input events into the dispatch queue
pub struct InputListener {
    queue: Arc<DispatchQueue>,
    running: Arc<AtomicBool>,
}

impl InputListener {
    /// Create a new InputListener feeding the given queue
    pub fn new(queue: Arc<DispatchQueue>) -> Self {
        Self {
            queue,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flag that stops forwarding once cleared
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Start listening for input events in a background thread
    ///
    /// The hook itself cannot be unregistered, so after the running flag is
    /// cleared the callback discards everything and the thread lives until
    /// the process exits. If the hook fails, the error is reported through
    /// `failure` and the thread ends.
    pub fn start(self, failure: Sender<String>) -> std::io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name("input-listener".into())
            .spawn(move || {
                info!("Input listener started");

                let queue = self.queue;
                let running = self.running;

                let callback = move |event: Event| {
                    if !running.load(Ordering::Acquire) {
                        return;
                    }
                    forward(&queue, InputEvent::from(&event.event_type));
                };

                if let Err(e) = listen(callback) {
                    error!("Error in input listener: {:?}", e);
                    let _ = failure.send(format!("{:?}", e));
                }
            })
    }
}

/// Print the code of every key press until `exit_key` is pressed
///
/// Runs the hook on a background thread and blocks the caller until the
/// exit key is seen or `interrupt` fires.
pub fn print_key_codes(
    exit_key: Key,
    interrupt: crossbeam_channel::Receiver<()>,
) -> Result<(), crate::EchoClickError> {
    let (exit_tx, exit_rx) = crossbeam_channel::bounded::<Result<(), String>>(1);

    thread::Builder::new()
        .name("key-printer".into())
        .spawn(move || {
            let done = exit_tx.clone();
            let callback = move |event: Event| {
                if let EventType::KeyPress(key) = event.event_type {
                    if key == exit_key {
                        let _ = done.try_send(Ok(()));
                        return;
                    }
                    match (keymap::code_for_key(key), key) {
                        (Some(code), Key::Unknown(raw)) => {
                            println!("Unknown key (raw {}): code {}", raw, code)
                        }
                        (Some(code), _) => match keymap::name_for_code(code) {
                            Some(name) => println!("{:?}: code {} ({})", key, code, name),
                            None => println!("{:?}: code {}", key, code),
                        },
                        (None, _) => println!("{:?}: no code", key),
                    }
                }
            };
            if let Err(e) = listen(callback) {
                error!("Error in input listener: {:?}", e);
                let _ = exit_tx.try_send(Err(format!("{:?}", e)));
            }
        })
        .map_err(crate::EchoClickError::Spawn)?;

    info!("Press keys to see their codes, {:?} to exit", exit_key);

    crossbeam_channel::select! {
        recv(exit_rx) -> msg => match msg {
            Ok(Err(e)) => Err(crate::EchoClickError::InputAccess(e)),
            _ => Ok(()),
        },
        recv(interrupt) -> _ => Ok(()),
    }
}
