//! Table OS host entry point.
//!
//! Wires together the component loader, registry, event router, and shell,
//! then pumps commands from stdin until `quit` or Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- TOML config, defaults on first run
//!  └─ register_builtins()    -- factory table for builtin.* apps
//!  └─ manifests::discover()  -- file-system scan → registry
//!  └─ EventRouter            -- button ids → NavigationAction
//!       └─ ShellController   -- action → registry launch/stop
//! ```
//!
//! Manifest locations come from the command line
//! (`tableos <file-or-dir>...`), falling back to the config file's
//! `manifest_locations`.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tableos_host::application::loader::ComponentLoader;
use tableos_host::application::registry::AppRegistry;
use tableos_host::application::shell::{render_menu, ShellController, ShellOutcome};
use tableos_host::apps::register_builtins;
use tableos_host::infrastructure::input::EventRouter;
use tableos_host::infrastructure::manifests;
use tableos_host::infrastructure::storage::{load_config, HostConfig};

/// Registry and shell share one lock: every navigation action is a single
/// atomic state transition across both.
struct ShellState {
    registry: AppRegistry,
    shell: ShellController,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("failed to load config, using defaults: {error}");
            HostConfig::default()
        }
    };

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.host.log_level.clone())),
        )
        .init();

    info!("Table OS host starting");

    // ── Component loader and registry ─────────────────────────────────────────
    let mut loader = ComponentLoader::new();
    register_builtins(&mut loader);
    let mut registry = AppRegistry::new(loader);

    // ── Manifest discovery ────────────────────────────────────────────────────
    let argv_locations: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    let locations = if argv_locations.is_empty() {
        config.host.manifest_locations.clone()
    } else {
        argv_locations
    };

    let report = manifests::discover(&mut registry, &locations);
    for failure in &report.failures {
        warn!("{failure}");
    }
    info!(
        "discovered {} app(s) from {} location(s)",
        report.registered.len(),
        locations.len()
    );

    let shell = ShellController::new(&registry);
    let state = Arc::new(Mutex::new(ShellState { registry, shell }));

    // ── Event router ──────────────────────────────────────────────────────────
    let mut router = EventRouter::new();
    for binding in &config.bindings {
        router.bind(binding.button.clone(), binding.action);
    }

    let listener_state = Arc::clone(&state);
    router.register_listener(move |action| {
        let mut state = listener_state
            .lock()
            .map_err(|_| "shell state poisoned".to_string())?;
        let ShellState { registry, shell } = &mut *state;
        match shell.handle(registry, *action) {
            Ok(ShellOutcome::Launched(name)) => {
                println!("\nLaunched {name}\n");
                Ok(())
            }
            Ok(ShellOutcome::Stopped(name)) => {
                println!("\nStopped {name}\n");
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(error) => Err(error.to_string()),
        }
    });

    // ── Command pump ──────────────────────────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        {
            let state = state.lock().expect("shell state poisoned");
            print!(
                "{}",
                render_menu(&state.registry.list_apps(), state.shell.selected())
            );
        }

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        };

        let command = match line {
            Some(line) => line.trim().to_ascii_lowercase(),
            None => break, // stdin closed
        };

        match command.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            button => {
                router.dispatch(button);
            }
        }
    }

    // Stop every running app on the way out.
    state
        .lock()
        .expect("shell state poisoned")
        .registry
        .stop_all();

    info!("Table OS host stopped");
    Ok(())
}
