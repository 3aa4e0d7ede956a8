//! Built-in applications shipped with the host.
//!
//! These are real, loadable components registered against the factory
//! table at startup; manifests refer to them by their
//! `module_ref`/`class_name` pair (e.g. `builtin.clock:ClockApp`).  They
//! double as the reference implementations for third-party apps: `ClockApp`
//! shows `init_kwargs` handling, `RemotePanelApp` shows the connectivity
//! capability hooks.

pub mod clock;
pub mod remote;

use crate::application::loader::ComponentLoader;

/// Registers every built-in application into the factory table.
pub fn register_builtins(loader: &mut ComponentLoader) {
    clock::register(loader);
    remote::register(loader);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtins_covers_both_modules() {
        // Arrange
        let mut loader = ComponentLoader::new();

        // Act
        register_builtins(&mut loader);

        // Assert
        assert!(loader.has_module("builtin.clock"));
        assert!(loader.has_module("builtin.remote"));
    }
}
