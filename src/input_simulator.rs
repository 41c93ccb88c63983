//! Input simulation
//!
//! Two injection backends are available:
//! - ydotool, which sends events via uinput at the kernel level and works on
//!   Wayland. Requires the ydotoold daemon: sudo systemctl enable --now ydotoold
//! - XTest, which fakes button events through the X server (X11/XWayland).
//!
//! Clicks from concurrent pending actions are serialized by [`ActionExecutor`].

use std::ffi::CString;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Window, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT};
use x11rb::protocol::xtest::ConnectionExt as _;
use x11rb::rust_connection::RustConnection;

use crate::config::{Backend, ClickButton};
use crate::EchoClickError;

/// Platform capability that performs one full click (press and release)
///
/// Implementations are not required to be reentrant.
pub trait ClickInjector: Send {
    fn click(&mut self, button: ClickButton) -> Result<(), EchoClickError>;
}

/// Create the injector for the configured backend
pub fn create_injector(backend: Backend) -> Result<Box<dyn ClickInjector>, EchoClickError> {
    Ok(match backend {
        Backend::Ydotool => Box::new(YdotoolInjector::new()?),
        Backend::Xtest => Box::new(XTestInjector::new()?),
    })
}

/// Executes synthetic clicks one at a time
pub struct ActionExecutor {
    injector: Mutex<Box<dyn ClickInjector>>,
}

impl ActionExecutor {
    pub fn new(injector: Box<dyn ClickInjector>) -> Self {
        Self {
            injector: Mutex::new(injector),
        }
    }

    /// Click `target`, holding the executor lock for the whole injection
    pub fn click(&self, target: ClickButton) -> Result<(), EchoClickError> {
        let mut injector = self
            .injector
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        injector.click(target)
    }
}

/// Get the ydotool socket path
fn get_socket_path() -> String {
    let uid = unsafe { libc::getuid() };
    format!("/run/user/{}/.ydotool_socket", uid)
}

/// ydotool click code: press and release of the given button
fn ydotool_button_code(button: ClickButton) -> &'static str {
    match button {
        ClickButton::Left => "0xC0",
        ClickButton::Right => "0xC1",
    }
}

/// Injector that sends clicks via ydotool
pub struct YdotoolInjector {
    socket_path: String,
}

impl YdotoolInjector {
    /// Requires ydotool to be installed and ydotoold daemon running.
    pub fn new() -> Result<Self, EchoClickError> {
        info!("Connecting to ydotool...");

        let output = Command::new("which")
            .arg("ydotool")
            .output()
            .map_err(|e| EchoClickError::InputAccess(format!("Failed to check for ydotool: {}", e)))?;

        if !output.status.success() {
            return Err(EchoClickError::InputAccess(
                "ydotool not found. Install it: sudo pacman -S ydotool".to_string(),
            ));
        }

        let socket_path = get_socket_path();
        if !Path::new(&socket_path).exists() {
            return Err(EchoClickError::InputAccess(format!(
                "ydotoold socket {} missing. Start it: sudo systemctl enable --now ydotoold",
                socket_path
            )));
        }

        let c_path = CString::new(socket_path.as_str())
            .map_err(|e| EchoClickError::InputAccess(format!("Invalid socket path: {}", e)))?;
        if unsafe { libc::access(c_path.as_ptr(), libc::W_OK) } != 0 {
            return Err(EchoClickError::PermissionDenied);
        }

        info!("ydotool ready at {}", socket_path);
        Ok(Self { socket_path })
    }

    /// Run a ydotool command with the socket path set
    fn run_ydotool(&self, args: &[&str]) -> Result<(), EchoClickError> {
        let output = Command::new("ydotool")
            .env("YDOTOOL_SOCKET", &self.socket_path)
            .args(args)
            .output()
            .map_err(|e| EchoClickError::SendEvent(format!("Failed to run ydotool: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Permission denied") {
                return Err(EchoClickError::PermissionDenied);
            }
            return Err(EchoClickError::SendEvent(format!(
                "ydotool failed: {}",
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl ClickInjector for YdotoolInjector {
    fn click(&mut self, button: ClickButton) -> Result<(), EchoClickError> {
        debug!("Sending {}-click via ydotool", button);
        self.run_ydotool(&["click", ydotool_button_code(button)])
    }
}

/// Injector that fakes button events with the X11 XTest extension
pub struct XTestInjector {
    conn: RustConnection,
    root: Window,
}

impl XTestInjector {
    pub fn new() -> Result<Self, EchoClickError> {
        let (conn, screen_num) = x11rb::connect(None).map_err(|e| {
            EchoClickError::InputAccess(format!("Failed to connect to X11: {}", e))
        })?;
        let root = conn.setup().roots[screen_num].root;

        let version = conn
            .xtest_get_version(2, 2)
            .map_err(|e| EchoClickError::InputAccess(format!("XTest unavailable: {}", e)))?
            .reply()
            .map_err(|e| EchoClickError::InputAccess(format!("XTest unavailable: {}", e)))?;
        info!(
            "XTest {}.{} ready",
            version.major_version, version.minor_version
        );

        Ok(Self { conn, root })
    }
}

impl ClickInjector for XTestInjector {
    fn click(&mut self, button: ClickButton) -> Result<(), EchoClickError> {
        // X11 core button numbers
        let detail = match button {
            ClickButton::Left => 1,
            ClickButton::Right => 3,
        };
        debug!("Sending {}-click via XTest", button);

        for event_type in [BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT] {
            self.conn
                .xtest_fake_input(event_type, detail, x11rb::CURRENT_TIME, self.root, 0, 0, 0)
                .map_err(|e| EchoClickError::SendEvent(format!("XTest fake input: {}", e)))?;
        }
        self.conn
            .flush()
            .map_err(|e| EchoClickError::SendEvent(format!("X11 flush: {}", e)))
    }
}

/// In-memory injector that records clicks instead of performing them
///
/// Clones share their records, so a test can keep one clone as a probe and
/// hand the other to an [`ActionExecutor`].
#[derive(Clone, Default)]
pub struct MockInjector {
    clicks: Arc<Mutex<Vec<ClickButton>>>,
    inside: Arc<AtomicUsize>,
    max_inside: Arc<AtomicUsize>,
    hold: Duration,
    should_fail: bool,
}

impl MockInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spend `hold` inside every click, widening the window for overlap
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    /// Fail every click with a send error
    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Buttons clicked so far, in order
    pub fn clicks(&self) -> Vec<ClickButton> {
        self.clicks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Highest number of clicks observed in progress at once
    pub fn max_concurrent(&self) -> usize {
        self.max_inside.load(Ordering::SeqCst)
    }
}

impl ClickInjector for MockInjector {
    fn click(&mut self, button: ClickButton) -> Result<(), EchoClickError> {
        let now_inside = self.inside.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_inside.fetch_max(now_inside, Ordering::SeqCst);
        if !self.hold.is_zero() {
            thread::sleep(self.hold);
        }
        self.inside.fetch_sub(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(EchoClickError::SendEvent("mock failure".into()));
        }
        self.clicks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(button);
        Ok(())
    }
}
