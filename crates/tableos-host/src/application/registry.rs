//! AppRegistry: the catalog of known applications and their lifecycle.
//!
//! Every catalog name moves through this state machine:
//!
//! ```text
//! Unregistered ──register──► Registered ──launch──► Running
//!                                ▲                     │
//!                                └────────stop─────────┘
//! ```
//!
//! - `Registered`: a validated descriptor is in the catalog.
//! - `Running`: a component instance has been constructed, its declared
//!   connectivity hooks have run, and `start` succeeded.
//!
//! A name is in the running set **iff** it has been started and not yet
//! stopped; no operation may leave a torn state between those two facts.
//!
//! # Concurrency
//!
//! The registry is a plain single-writer struct.  Callers that share it
//! across tasks wrap it in a `Mutex` and hold the lock for the whole state
//! transition (including the instantiate/start or stop call), so `launch`
//! and `stop` on the same name never interleave.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use tableos_core::{Application, AppDescriptor};

use crate::application::loader::{ComponentLoader, LoadError};

/// Error type for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The named application is not in the catalog.
    #[error("application '{0}' is not registered")]
    NotRegistered(String),

    /// Component resolution or construction failed; catalog unchanged.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A connectivity setup hook failed before `start`.
    #[error("{hook} setup failed for app '{name}': {reason}")]
    Setup {
        name: String,
        hook: &'static str,
        reason: String,
    },

    /// The component's `start` failed; the app is not recorded as running.
    #[error("failed to start app '{name}': {reason}")]
    Start { name: String, reason: String },

    /// The component's `stop` failed.  The name has already been removed
    /// from the running set when this is returned.
    #[error("app '{name}' reported a stop failure: {reason}")]
    Stop { name: String, reason: String },
}

/// Catalog entry: a descriptor plus where it was discovered.
///
/// `source_path` is diagnostics only — nothing in the lifecycle reads it.
#[derive(Debug, Clone)]
pub struct RegisteredEntry {
    pub descriptor: AppDescriptor,
    pub source_path: Option<PathBuf>,
}

/// Registry that tracks, launches, and stops Table OS applications.
pub struct AppRegistry {
    loader: ComponentLoader,
    registered: HashMap<String, RegisteredEntry>,
    running: HashMap<String, Box<dyn Application>>,
}

impl AppRegistry {
    /// Creates a registry around a configured component loader.
    pub fn new(loader: ComponentLoader) -> Self {
        Self {
            loader,
            registered: HashMap::new(),
            running: HashMap::new(),
        }
    }

    /// Mutable access to the factory table, for registering constructors
    /// after the registry has been built.
    pub fn loader_mut(&mut self) -> &mut ComponentLoader {
        &mut self.loader
    }

    /// Registers `descriptor` in the catalog (state Unregistered → Registered).
    ///
    /// Re-registering an existing name overwrites its catalog entry; a
    /// running instance of that name is not affected.
    pub fn register(&mut self, descriptor: AppDescriptor, source_path: Option<PathBuf>) {
        let name = descriptor.name.clone();
        self.registered.insert(
            name,
            RegisteredEntry {
                descriptor,
                source_path,
            },
        );
    }

    /// Returns descriptors for all registered applications, sorted by name.
    ///
    /// The sort gives every consumer (menu, diagnostics) a deterministic
    /// order regardless of registration order.
    pub fn list_apps(&self) -> Vec<AppDescriptor> {
        let mut apps: Vec<AppDescriptor> = self
            .registered
            .values()
            .map(|entry| entry.descriptor.clone())
            .collect();
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        apps
    }

    /// Returns the descriptor for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] when the name is unknown.
    pub fn get_descriptor(&self, name: &str) -> Result<&AppDescriptor, RegistryError> {
        self.registered
            .get(name)
            .map(|entry| &entry.descriptor)
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))
    }

    /// Returns the catalog entry for `name`, including its source path.
    pub fn entry(&self, name: &str) -> Option<&RegisteredEntry> {
        self.registered.get(name)
    }

    /// Returns `true` if the application named `name` is running.
    pub fn is_running(&self, name: &str) -> bool {
        self.running.contains_key(name)
    }

    /// Returns the names of all running applications, sorted.
    pub fn running_apps(&self) -> Vec<String> {
        let mut names: Vec<String> = self.running.keys().cloned().collect();
        names.sort();
        names
    }

    /// Launches the application named `name` (state Registered → Running).
    ///
    /// Idempotent: launching an already-running name returns the existing
    /// instance without re-instantiating and without re-running hooks or
    /// `start`.
    ///
    /// On a fresh launch the order is fixed: instantiate, then the
    /// Bluetooth hook (iff `requires_bluetooth`), then the Wi-Fi hook
    /// (iff `requires_wifi`), then `start`.  If any step fails the name is
    /// not recorded as running and the error propagates.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotRegistered`], [`RegistryError::Load`],
    /// [`RegistryError::Setup`], or [`RegistryError::Start`].
    pub fn launch(&mut self, name: &str) -> Result<&mut dyn Application, RegistryError> {
        if !self.registered.contains_key(name) {
            return Err(RegistryError::NotRegistered(name.to_string()));
        }

        if !self.running.contains_key(name) {
            // Clone so the loader borrow does not pin the catalog entry.
            let descriptor = self.registered[name].descriptor.clone();
            let mut app = self.loader.instantiate(&descriptor)?;

            if descriptor.requires_bluetooth() {
                if let Some(bluetooth) = app.as_bluetooth_aware() {
                    bluetooth
                        .setup_bluetooth()
                        .map_err(|reason| RegistryError::Setup {
                            name: name.to_string(),
                            hook: "bluetooth",
                            reason,
                        })?;
                }
            }
            if descriptor.requires_wifi() {
                if let Some(wifi) = app.as_wifi_aware() {
                    wifi.setup_wifi().map_err(|reason| RegistryError::Setup {
                        name: name.to_string(),
                        hook: "wifi",
                        reason,
                    })?;
                }
            }

            app.start().map_err(|reason| RegistryError::Start {
                name: name.to_string(),
                reason,
            })?;

            info!("launched app '{name}'");
            self.running.insert(name.to_string(), app);
        }

        let app = self
            .running
            .get_mut(name)
            .expect("running entry present: inserted or checked above");
        Ok(app.as_mut())
    }

    /// Stops the application named `name` (state Running → Registered).
    ///
    /// A no-op when the name is not running.  The name is removed from the
    /// running set *before* the component's `stop` runs, so a stop failure
    /// is surfaced as an error but can never leave the name stuck in the
    /// running set.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Stop`] when the component's `stop` fails.
    pub fn stop(&mut self, name: &str) -> Result<(), RegistryError> {
        match self.running.remove(name) {
            None => Ok(()),
            Some(mut app) => {
                info!("stopping app '{name}'");
                app.stop().map_err(|reason| RegistryError::Stop {
                    name: name.to_string(),
                    reason,
                })
            }
        }
    }

    /// Stops every running application.
    ///
    /// Individual stop failures are logged and do not abort the sweep; the
    /// running set is empty when this returns.
    pub fn stop_all(&mut self) {
        for name in self.running_apps() {
            if let Err(e) = self.stop(&name) {
                warn!("stop failure during shutdown sweep: {e}");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
