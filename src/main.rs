//! EchoClick - Hotkey-toggled auto-clicker
//!
//! While active, every press of the check button is answered with a click of
//! the target button after a configurable delay. The hotkey toggles the
//! feature on and off.

use clap::Parser;
use echoclick::{
    input_listener::{self, InputListener},
    input_simulator, Config, EchoClickError, Engine,
};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "echoclick", version, about)]
struct Cli {
    /// Config file (default: config.toml next to the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the code of each key press until Escape is pressed
    #[arg(long)]
    print_keys: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Why the main loop stopped
enum Stop {
    Interrupt,
    ListenerFailed(String),
}

fn main() -> Result<(), EchoClickError> {
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .compact()
        .init();

    // Set up Ctrl+C handler for graceful shutdown
    let (interrupt_tx, interrupt_rx) = crossbeam_channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Shutdown signal received");
        let _ = interrupt_tx.try_send(());
    })?;

    if cli.print_keys {
        return input_listener::print_key_codes(rdev::Key::Escape, interrupt_rx);
    }

    info!("EchoClick starting...");

    let path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load_or_create(&path)?;
    let settings = config.resolve()?;
    info!(
        "Config: hotkey={}, enabled={}, delay={}ms, check={}, target={}, backend={}",
        config.hotkey, config.enabled, config.delay_ms, config.check, config.target, config.backend
    );

    let injector = match input_simulator::create_injector(config.backend) {
        Ok(injector) => injector,
        Err(EchoClickError::PermissionDenied) => {
            error!("Permission denied. Please add your user to the 'input' group:");
            error!("  sudo usermod -aG input $USER");
            error!("Then logout and login again.");
            return Err(EchoClickError::PermissionDenied);
        }
        Err(e) => return Err(e),
    };

    let mut engine = Engine::start(settings, injector)?;

    // Start input listener in background thread
    let (failure_tx, failure_rx) = crossbeam_channel::bounded::<String>(1);
    let listener = InputListener::new(engine.queue());
    let listener_running = listener.running_flag();
    let _listener_handle = listener.start(failure_tx).map_err(EchoClickError::Spawn)?;

    info!("Press {} to toggle feature ON/OFF", config.hotkey);
    info!("Press Ctrl+C to exit");

    let stop = crossbeam_channel::select! {
        recv(interrupt_rx) -> _ => Stop::Interrupt,
        recv(failure_rx) -> msg => match msg {
            Ok(reason) => Stop::ListenerFailed(reason),
            Err(_) => Stop::ListenerFailed("listener thread exited".into()),
        },
    };

    info!("EchoClick shutting down...");

    // The hook cannot be unregistered; it stops forwarding and dies with the process
    listener_running.store(false, Ordering::Release);
    engine.shutdown();

    match stop {
        Stop::Interrupt => Ok(()),
        Stop::ListenerFailed(reason) => Err(EchoClickError::InputAccess(reason)),
    }
}
