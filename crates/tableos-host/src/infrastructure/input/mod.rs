//! Hardware input event routing for the Table OS host.
//!
//! Physical controls (bezel buttons, a rotary encoder, a keyboard during
//! development) produce opaque button identifiers.  The [`EventRouter`]
//! translates those identifiers into [`NavigationAction`]s through a
//! binding table and fans each resolved action out to registered listeners.
//!
//! # Unbound buttons are not errors
//!
//! Hardware ships with more buttons than the shell uses.  An identifier
//! without a binding is silently dropped (debug-logged only), the same way
//! the host ignores input it has no meaning for.
//!
//! # Testability
//!
//! The router has no hardware dependency at all: whatever reads the real
//! GPIO lines (or stdin, in the CLI shell) calls [`EventRouter::dispatch`]
//! with the identifier it saw.

use std::collections::HashMap;

use tracing::debug;

use tableos_core::NavigationAction;

use crate::infrastructure::fanout::{ListenerId, ListenerSet};

/// The reference binding table installed by [`EventRouter::default_bindings`].
pub const DEFAULT_BINDINGS: [(&str, NavigationAction); 4] = [
    ("up", NavigationAction::MoveUp),
    ("down", NavigationAction::MoveDown),
    ("enter", NavigationAction::Select),
    ("back", NavigationAction::Back),
];

/// Routes opaque button identifiers to navigation-action listeners.
///
/// Bindings are many-to-one: several buttons may map to the same action,
/// but one button maps to at most one action (binding again overwrites).
#[derive(Default)]
pub struct EventRouter {
    bindings: HashMap<String, NavigationAction>,
    listeners: ListenerSet<NavigationAction>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `button_id` to `action`, overwriting any prior binding.
    pub fn bind(&mut self, button_id: impl Into<String>, action: NavigationAction) {
        self.bindings.insert(button_id.into(), action);
    }

    /// Installs the reference binding table
    /// (`up`/`down`/`enter`/`back` → the four navigation actions).
    pub fn default_bindings(&mut self) {
        for (button, action) in DEFAULT_BINDINGS {
            self.bind(button, action);
        }
    }

    /// Returns a snapshot of the current binding table.
    pub fn bindings(&self) -> HashMap<String, NavigationAction> {
        self.bindings.clone()
    }

    /// Registers a listener invoked for every resolved action, after all
    /// earlier listeners.
    pub fn register_listener(
        &self,
        listener: impl Fn(&NavigationAction) -> Result<(), String> + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.register(listener)
    }

    /// Removes a previously registered listener.
    pub fn unregister_listener(&self, id: ListenerId) -> bool {
        self.listeners.unregister(id)
    }

    /// Dispatches a raw button event.
    ///
    /// Returns the resolved action, or `None` when the button is unbound
    /// (the event is dropped without notifying anyone).  Listener failures
    /// are isolated per listener and never reach this caller.
    pub fn dispatch(&self, button_id: &str) -> Option<NavigationAction> {
        let action = match self.bindings.get(button_id) {
            Some(action) => *action,
            None => {
                debug!("dropping event for unbound button '{button_id}'");
                return None;
            }
        };

        self.listeners.notify("dispatch", &action);
        Some(action)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
