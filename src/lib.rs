//! EchoClick - Hotkey-toggled auto-clicker
//!
//! This library provides components for:
//! - Global input listening (hotkey and trigger button detection)
//! - A bounded dispatch pipeline (queue, admission gate, delayed actions)
//! - Input simulation (sending synthetic clicks)

pub mod classifier;
pub mod config;
pub mod engine;
pub mod gate;
pub mod input_listener;
pub mod input_simulator;
pub mod keymap;
pub mod queue;
pub mod scheduler;
pub mod state;

pub use classifier::{classify, Classification};
pub use config::{Backend, ClickButton, Config, Hotkey, Settings};
pub use engine::Engine;
pub use gate::{AdmissionGate, Permit};
pub use input_listener::{InputEvent, InputListener, PointerButton};
pub use input_simulator::{ActionExecutor, ClickInjector, MockInjector};
pub use queue::DispatchQueue;
pub use scheduler::{ActionScheduler, Dispatch, Dispatcher};
pub use state::ActiveState;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for EchoClick
#[derive(Error, Debug)]
pub enum EchoClickError {
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write default config {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Failed to access input devices: {0}")]
    InputAccess(String),

    #[error("Failed to send input event: {0}")]
    SendEvent(String),

    #[error("Permission denied - add user to 'input' group")]
    PermissionDenied,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(std::io::Error),

    #[error("Failed to install shutdown handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
