//! Menu navigation driver for the interactive shell.
//!
//! [`ShellController`] is the glue between resolved navigation actions and
//! the registry: it owns the menu cursor and the name of the active app,
//! and translates each [`NavigationAction`] into registry calls.  It holds
//! no terminal state at all — rendering is a pure function over the menu
//! snapshot, and the actual printing lives in the binary.

use tracing::info;

use tableos_core::{AppDescriptor, NavigationAction};

use crate::application::registry::{AppRegistry, RegistryError};

/// What a handled navigation action amounted to, for the binary to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// The menu cursor moved.
    Moved,
    /// The selected app was launched.
    Launched(String),
    /// Select hit an app that was already running.
    AlreadyRunning(String),
    /// The active app was stopped.
    Stopped(String),
    /// Nothing to do (empty menu, or Back without an active app).
    Idle,
}

/// Drives the app menu: cursor movement, launch-on-select, stop-on-back.
///
/// The menu is a snapshot of app names taken at construction; rescanning
/// manifests means building a fresh controller.
pub struct ShellController {
    names: Vec<String>,
    selected: usize,
    active: Option<String>,
}

impl ShellController {
    /// Builds a controller over the registry's current catalog, cursor on
    /// the first entry.
    pub fn new(registry: &AppRegistry) -> Self {
        Self {
            names: registry
                .list_apps()
                .into_iter()
                .map(|descriptor| descriptor.name)
                .collect(),
            selected: 0,
            active: None,
        }
    }

    /// Index of the menu entry under the cursor.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Name under the cursor, `None` for an empty menu.
    pub fn selected_name(&self) -> Option<&str> {
        self.names.get(self.selected).map(String::as_str)
    }

    /// Name of the currently active app, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Applies one navigation action to the registry.
    ///
    /// - `MoveUp` / `MoveDown` wrap around the menu.
    /// - `Select` stops the previously active app when it differs from the
    ///   target, then launches the target unless it is already running.
    /// - `Back` stops the active app.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError`] from launch and stop.  A failed stop
    /// has already removed the app from the running set (registry
    /// contract), so the shell stays consistent.
    pub fn handle(
        &mut self,
        registry: &mut AppRegistry,
        action: NavigationAction,
    ) -> Result<ShellOutcome, RegistryError> {
        if self.names.is_empty() {
            return Ok(ShellOutcome::Idle);
        }

        match action {
            NavigationAction::MoveUp => {
                self.selected = (self.selected + self.names.len() - 1) % self.names.len();
                Ok(ShellOutcome::Moved)
            }
            NavigationAction::MoveDown => {
                self.selected = (self.selected + 1) % self.names.len();
                Ok(ShellOutcome::Moved)
            }
            NavigationAction::Select => {
                let target = self.names[self.selected].clone();
                if let Some(previous) = self.active.clone() {
                    if previous != target {
                        registry.stop(&previous)?;
                    }
                }
                if registry.is_running(&target) {
                    self.active = Some(target.clone());
                    return Ok(ShellOutcome::AlreadyRunning(target));
                }
                registry.launch(&target)?;
                info!("launched '{target}'");
                self.active = Some(target.clone());
                Ok(ShellOutcome::Launched(target))
            }
            NavigationAction::Back => {
                let active = match self.active.clone() {
                    Some(active) => active,
                    None => return Ok(ShellOutcome::Idle),
                };
                registry.stop(&active)?;
                info!("stopped '{active}'");
                self.active = None;
                Ok(ShellOutcome::Stopped(active))
            }
        }
    }
}

/// Renders the text menu for the given catalog snapshot.
///
/// Pure string building so it can be unit-tested; the binary does the
/// printing.
pub fn render_menu(apps: &[AppDescriptor], selected: usize) -> String {
    let mut out = String::from("\n=== Table OS ===\n");
    if apps.is_empty() {
        out.push_str("No applications available. Add manifest files to get started.\n");
        return out;
    }

    for (index, descriptor) in apps.iter().enumerate() {
        let prefix = if index == selected { "->" } else { "  " };
        match descriptor.description.as_deref() {
            Some(description) if !description.is_empty() => {
                out.push_str(&format!("{prefix} {} - {description}\n", descriptor.name));
            }
            _ => out.push_str(&format!("{prefix} {}\n", descriptor.name)),
        }
    }
    out.push_str("\nType one of: up, down, enter, back, quit\n");
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::loader::ComponentLoader;
    use tableos_core::Application;

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

    /// Registry with "alpha" and "beta" registered against a stub factory.
    fn two_app_registry() -> AppRegistry {
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
        registry
    }

    #[test]
    fn test_cursor_wraps_in_both_directions() {
        // Arrange
        let mut registry = two_app_registry();
        let mut shell = ShellController::new(&registry);
        assert_eq!(shell.selected_name(), Some("alpha"));

        // Act / Assert – up from the first entry wraps to the last
        shell.handle(&mut registry, NavigationAction::MoveUp).unwrap();
        assert_eq!(shell.selected_name(), Some("beta"));

        // ...and down from the last wraps back to the first.
        shell.handle(&mut registry, NavigationAction::MoveDown).unwrap();
        assert_eq!(shell.selected_name(), Some("alpha"));
    }

    #[test]
    fn test_select_launches_the_app_under_the_cursor() {
        // Arrange
        let mut registry = two_app_registry();
        let mut shell = ShellController::new(&registry);

        // Act
        let outcome = shell.handle(&mut registry, NavigationAction::Select).unwrap();

        // Assert
        assert_eq!(outcome, ShellOutcome::Launched("alpha".to_string()));
        assert!(registry.is_running("alpha"));
        assert_eq!(shell.active(), Some("alpha"));
    }

    #[test]
    fn test_select_on_running_app_does_not_relaunch() {
        // Arrange
        let mut registry = two_app_registry();
        let mut shell = ShellController::new(&registry);
        shell.handle(&mut registry, NavigationAction::Select).unwrap();

        // Act
        let outcome = shell.handle(&mut registry, NavigationAction::Select).unwrap();

        // Assert
        assert_eq!(outcome, ShellOutcome::AlreadyRunning("alpha".to_string()));
        assert!(registry.is_running("alpha"));
    }

    #[test]
    fn test_select_switches_apps_and_stops_the_previous_one() {
        // Arrange – launch alpha, then move the cursor to beta
        let mut registry = two_app_registry();
        let mut shell = ShellController::new(&registry);
        shell.handle(&mut registry, NavigationAction::Select).unwrap();
        shell.handle(&mut registry, NavigationAction::MoveDown).unwrap();

        // Act
        let outcome = shell.handle(&mut registry, NavigationAction::Select).unwrap();

        // Assert
        assert_eq!(outcome, ShellOutcome::Launched("beta".to_string()));
        assert!(!registry.is_running("alpha"));
        assert!(registry.is_running("beta"));
        assert_eq!(shell.active(), Some("beta"));
    }

    #[test]
    fn test_back_stops_the_active_app() {
        // Arrange
        let mut registry = two_app_registry();
        let mut shell = ShellController::new(&registry);
        shell.handle(&mut registry, NavigationAction::Select).unwrap();

        // Act
        let outcome = shell.handle(&mut registry, NavigationAction::Back).unwrap();

        // Assert
        assert_eq!(outcome, ShellOutcome::Stopped("alpha".to_string()));
        assert!(!registry.is_running("alpha"));
        assert_eq!(shell.active(), None);
    }

    #[test]
    fn test_back_without_active_app_is_idle() {
        let mut registry = two_app_registry();
        let mut shell = ShellController::new(&registry);

        let outcome = shell.handle(&mut registry, NavigationAction::Back).unwrap();

        assert_eq!(outcome, ShellOutcome::Idle);
    }

    #[test]
    fn test_empty_menu_makes_every_action_idle() {
        // Arrange – registry with no apps registered
        let mut registry = AppRegistry::new(ComponentLoader::new());
        let mut shell = ShellController::new(&registry);

        // Act / Assert
        for action in [
            NavigationAction::MoveUp,
            NavigationAction::MoveDown,
            NavigationAction::Select,
            NavigationAction::Back,
        ] {
            assert_eq!(shell.handle(&mut registry, action).unwrap(), ShellOutcome::Idle);
        }
    }

    // ── render_menu ───────────────────────────────────────────────────────────

    #[test]
    fn test_render_menu_marks_the_selected_entry() {
        // Arrange
        let mut beta = descriptor("beta");
        beta.description = Some("Second app".to_string());
        let apps = vec![descriptor("alpha"), beta];

        // Act
        let menu = render_menu(&apps, 1);

        // Assert
        assert!(menu.contains("   alpha\n"));
        assert!(menu.contains("-> beta - Second app\n"));
    }

    #[test]
    fn test_render_menu_for_empty_catalog_explains_how_to_start() {
        let menu = render_menu(&[], 0);
        assert!(menu.contains("No applications available"));
    }
}
