//! Configuration management for EchoClick

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::keymap;
use crate::EchoClickError;

/// File name looked up next to the executable
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Mouse button named in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickButton {
    Left,
    Right,
}

impl fmt::Display for ClickButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickButton::Left => f.write_str("left"),
            ClickButton::Right => f.write_str("right"),
        }
    }
}

/// Hotkey as written by the user: a raw code or a name from the key table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Hotkey {
    Code(u32),
    Name(String),
}

impl Hotkey {
    /// Resolve to the numeric code carried by key events
    pub fn code(&self) -> Result<u32, EchoClickError> {
        match self {
            Hotkey::Code(code) => Ok(*code),
            Hotkey::Name(name) => {
                keymap::code_for_name(name).ok_or_else(|| EchoClickError::UnknownKey(name.clone()))
            }
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hotkey::Code(code) => write!(f, "{}", code),
            Hotkey::Name(name) => f.write_str(&name.to_uppercase()),
        }
    }
}

/// Input injection backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// ydotool via uinput, works on Wayland
    #[default]
    Ydotool,
    /// X11 XTest extension
    Xtest,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Ydotool => f.write_str("ydotool"),
            Backend::Xtest => f.write_str("xtest"),
        }
    }
}

/// Configuration file contents
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Key that toggles the feature on and off
    pub hotkey: Hotkey,

    /// Master switch; when false no click is ever sent
    pub enabled: bool,

    /// Delay in milliseconds between the trigger press and the synthetic click
    pub delay_ms: u64,

    /// Button whose press schedules a click
    pub check: ClickButton,

    /// Button that gets clicked
    pub target: ClickButton,

    /// Maximum number of delayed clicks waiting at once
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Capacity of the event queue between the hook and the dispatcher
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default)]
    pub backend: Backend,
}

fn default_max_in_flight() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    256
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey: Hotkey::Name(String::from("alt")),
            enabled: true,
            delay_ms: 150,
            check: ClickButton::Left,
            target: ClickButton::Right,
            max_in_flight: default_max_in_flight(),
            queue_capacity: default_queue_capacity(),
            backend: Backend::default(),
        }
    }
}

impl Config {
    /// Path of the config file next to the running executable
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load config from file, or write and use the default if it does not exist
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, EchoClickError> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Self::default();
            config.save_to_file(path)?;
            info!("No {} found. Created default config", path.display());
            return Ok(config);
        }
        Self::load_from_file(path)
    }

    /// Read and parse an existing config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, EchoClickError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EchoClickError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            toml::from_str(&content).map_err(|source| EchoClickError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.max_in_flight = config.max_in_flight.max(1);
        config.queue_capacity = config.queue_capacity.max(1);

        Ok(config)
    }

    /// Write the config as a commented TOML document
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), EchoClickError> {
        let path = path.as_ref();
        fs::write(path, self.to_commented_toml()).map_err(|source| EchoClickError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    fn to_commented_toml(&self) -> String {
        let hotkey = match &self.hotkey {
            Hotkey::Code(code) => code.to_string(),
            Hotkey::Name(name) => format!("\"{}\"", name),
        };
        format!(
            "hotkey = {}            # Key name (e.g. \"alt\", \"f8\") or numeric key code\n\
             enabled = {}          # Master switch\n\
             delay_ms = {}          # Delay before the synthetic click (ms)\n\
             check = \"{}\"          # Button that triggers a click: \"left\" or \"right\"\n\
             target = \"{}\"        # Button that gets clicked: \"left\" or \"right\"\n\
             max_in_flight = {}       # Maximum delayed clicks pending at once\n\
             queue_capacity = {}    # Events buffered between the input hook and the dispatcher\n\
             backend = \"{}\"     # Click injection: \"ydotool\" or \"xtest\"\n",
            hotkey,
            self.enabled,
            self.delay_ms,
            self.check,
            self.target,
            self.max_in_flight,
            self.queue_capacity,
            self.backend,
        )
    }

    /// Resolve into the immutable snapshot the pipeline runs on
    pub fn resolve(&self) -> Result<Settings, EchoClickError> {
        Ok(Settings {
            hotkey_code: self.hotkey.code()?,
            enabled: self.enabled,
            delay: Duration::from_millis(self.delay_ms),
            check: self.check,
            target: self.target,
            max_in_flight: self.max_in_flight.max(1),
            queue_capacity: self.queue_capacity.max(1),
        })
    }
}

/// Resolved runtime settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub hotkey_code: u32,
    pub enabled: bool,
    pub delay: Duration,
    pub check: ClickButton,
    pub target: ClickButton,
    pub max_in_flight: usize,
    pub queue_capacity: usize,
}

impl Settings {
    /// Settings toggled by `hotkey_code` with the default click behavior
    pub fn new(hotkey_code: u32) -> Self {
        let defaults = Config::default();
        Self {
            hotkey_code,
            enabled: defaults.enabled,
            delay: Duration::from_millis(defaults.delay_ms),
            check: defaults.check,
            target: defaults.target,
            max_in_flight: defaults.max_in_flight,
            queue_capacity: defaults.queue_capacity,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn with_check(mut self, check: ClickButton) -> Self {
        self.check = check;
        self
    }

    pub fn with_target(mut self, target: ClickButton) -> Self {
        self.target = target;
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity.max(1);
        self
    }
}
