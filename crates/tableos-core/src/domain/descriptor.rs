//! Application descriptor domain entity.
//!
//! An [`AppDescriptor`] is the validated, structured description of a
//! loadable application: its unique name, where to load the implementation
//! from, and optional presentation metadata.  Descriptors are produced by
//! manifest resolution (see [`crate::manifest::resolver`]) and consumed by
//! the host's catalog and component loader.

use serde::Serialize;
use serde_json::{Map, Value};

/// Well-known `extra` key: the application needs the Bluetooth setup hook.
pub const EXTRA_REQUIRES_BLUETOOTH: &str = "requires_bluetooth";

/// Well-known `extra` key: the application needs the Wi-Fi setup hook.
pub const EXTRA_REQUIRES_WIFI: &str = "requires_wifi";

/// Well-known `extra` key: constructor keyword arguments.
pub const EXTRA_INIT_KWARGS: &str = "init_kwargs";

/// Validated description of a loadable application.
///
/// # Invariants
///
/// `name`, `module_ref`, and `class_name` are never empty or whitespace-only.
/// Manifest resolution trims and validates them before a descriptor is ever
/// constructed, so consumers (catalog, loader) never re-check.
///
/// # The `extra` bag
///
/// Manifest keys the host does not recognise are carried verbatim in
/// `extra`, so individual applications can define their own options without
/// schema changes.  The host itself only interprets the three well-known
/// keys exposed through [`requires_bluetooth`](Self::requires_bluetooth),
/// [`requires_wifi`](Self::requires_wifi), and
/// [`init_args`](Self::init_args).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppDescriptor {
    /// Unique catalog key, e.g. `"clock"`.
    pub name: String,
    /// Identifies the factory module providing the implementation,
    /// e.g. `"builtin.clock"`.
    pub module_ref: String,
    /// Identifies the component within the module, e.g. `"ClockApp"`.
    pub class_name: String,
    /// Optional human-readable description shown in the menu.
    pub description: Option<String>,
    /// Optional icon reference for graphical shells.
    pub icon: Option<String>,
    /// Unrecognised manifest keys, copied verbatim.
    pub extra: Map<String, Value>,
}

impl AppDescriptor {
    /// Returns `true` if the descriptor requests the Bluetooth setup hook.
    ///
    /// Only a literal boolean `true` counts; absent or non-boolean values
    /// mean "not required".
    pub fn requires_bluetooth(&self) -> bool {
        matches!(
            self.extra.get(EXTRA_REQUIRES_BLUETOOTH),
            Some(Value::Bool(true))
        )
    }

    /// Returns `true` if the descriptor requests the Wi-Fi setup hook.
    pub fn requires_wifi(&self) -> bool {
        matches!(self.extra.get(EXTRA_REQUIRES_WIFI), Some(Value::Bool(true)))
    }

    /// Returns the constructor arguments declared under `init_kwargs`.
    ///
    /// A present but non-mapping `init_kwargs` value is treated as absent
    /// rather than an error; the manifest author gets an empty argument set.
    pub fn init_args(&self) -> Option<&Map<String, Value>> {
        match self.extra.get(EXTRA_INIT_KWARGS) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
