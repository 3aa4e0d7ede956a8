//! Integration tests for the input-to-navigation pipeline.
//!
//! These tests wire the full button path the way the binary does:
//! `EventRouter::dispatch` → listener → `ShellController::handle` →
//! `AppRegistry`, with the registry/shell pair behind a shared lock.

use std::sync::{Arc, Mutex};

use tableos_core::{AppDescriptor, Application, NavigationAction};
use tableos_host::application::loader::ComponentLoader;
use tableos_host::application::registry::AppRegistry;
use tableos_host::application::shell::ShellController;
use tableos_host::infrastructure::input::EventRouter;

// ── Fixtures ──────────────────────────────────────────────────────────────────

struct StubApp {
    descriptor: AppDescriptor,
}

impl Application for StubApp {
    fn descriptor(&self) -> &AppDescriptor {
        &self.descriptor
    }
    fn start(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn stop(&mut self) -> Result<(), String> {
        Ok(())
    }
}

fn descriptor(name: &str) -> AppDescriptor {
    AppDescriptor {
        name: name.to_string(),
        module_ref: "stub".to_string(),
        class_name: "StubApp".to_string(),
        description: None,
        icon: None,
        extra: serde_json::Map::new(),
    }
}

/// Registry + shell behind one lock, mirroring the binary's `ShellState`.
struct ShellState {
    registry: AppRegistry,
    shell: ShellController,
}

/// Builds the full pipeline over apps `alpha` and `beta`.
fn wired_pipeline() -> (EventRouter, Arc<Mutex<ShellState>>) {
    let mut loader = ComponentLoader::new();
    loader.register(
        "stub",
        "StubApp",
        Box::new(|descriptor, _args| {
            Ok(Box::new(StubApp {
                descriptor: descriptor.clone(),
            }) as Box<dyn Application>)
        }),
    );
    let mut registry = AppRegistry::new(loader);
    registry.register(descriptor("alpha"), None);
    registry.register(descriptor("beta"), None);

    let shell = ShellController::new(&registry);
    let state = Arc::new(Mutex::new(ShellState { registry, shell }));

    let mut router = EventRouter::new();
    router.default_bindings();
    let listener_state = Arc::clone(&state);
    router.register_listener(move |action| {
        let mut state = listener_state
            .lock()
            .map_err(|_| "shell state poisoned".to_string())?;
        let ShellState { registry, shell } = &mut *state;
        shell
            .handle(registry, *action)
            .map(|_| ())
            .map_err(|error| error.to_string())
    });

    (router, state)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_enter_button_launches_the_selected_app() {
    // Arrange
    let (router, state) = wired_pipeline();

    // Act: press enter with the cursor on the first entry.
    let action = router.dispatch("enter");

    // Assert
    assert_eq!(action, Some(NavigationAction::Select));
    let state = state.lock().unwrap();
    assert!(state.registry.is_running("alpha"));
    assert_eq!(state.shell.active(), Some("alpha"));
}

#[test]
fn test_down_then_enter_switches_the_running_app() {
    // Arrange: alpha is running.
    let (router, state) = wired_pipeline();
    router.dispatch("enter");

    // Act: move to beta and select it.
    router.dispatch("down");
    router.dispatch("enter");

    // Assert: beta replaced alpha.
    let state = state.lock().unwrap();
    assert!(!state.registry.is_running("alpha"));
    assert!(state.registry.is_running("beta"));
    assert_eq!(state.shell.active(), Some("beta"));
}

#[test]
fn test_back_button_stops_the_active_app() {
    // Arrange
    let (router, state) = wired_pipeline();
    router.dispatch("enter");

    // Act
    router.dispatch("back");

    // Assert
    let state = state.lock().unwrap();
    assert!(state.registry.running_apps().is_empty());
    assert_eq!(state.shell.active(), None);
}

#[test]
fn test_up_wraps_the_cursor_to_the_last_entry() {
    // Arrange
    let (router, state) = wired_pipeline();

    // Act: up from the first entry wraps to the last, then enter.
    router.dispatch("up");
    router.dispatch("enter");

    // Assert
    let state = state.lock().unwrap();
    assert!(state.registry.is_running("beta"));
}

#[test]
fn test_unbound_button_changes_nothing() {
    // Arrange
    let (router, state) = wired_pipeline();

    // Act
    let action = router.dispatch("volume-knob");

    // Assert
    assert_eq!(action, None);
    let state = state.lock().unwrap();
    assert!(state.registry.running_apps().is_empty());
    assert_eq!(state.shell.selected(), 0);
}

#[test]
fn test_repeated_enter_is_idempotent() {
    // Arrange
    let (router, state) = wired_pipeline();

    // Act: pressing enter twice must not restart the app.
    router.dispatch("enter");
    router.dispatch("enter");

    // Assert
    let state = state.lock().unwrap();
    assert_eq!(state.registry.running_apps(), vec!["alpha"]);
}
