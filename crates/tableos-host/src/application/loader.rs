//! ComponentLoader: descriptor-to-instance resolution via registered factories.
//!
//! # Why a factory table instead of dynamic symbol lookup? (for beginners)
//!
//! The descriptor's `module_ref`/`class_name` pair names *which* component to
//! load, not *how*.  A reflective design would resolve those strings against
//! live code at runtime; Rust has no such reflection, and even where it
//! exists it trades type safety for convenience.  Instead, components
//! register a named constructor against the loader at startup
//! (see [`crate::apps::register_builtins`]) and `instantiate` is a plain
//! table lookup.  Manifest-driven selection is preserved; string-addressed
//! symbol resolution is not needed.
//!
//! Construction is the one impure step of the load path (it runs
//! third-party component code), so failures are caught per-descriptor and
//! surfaced as [`LoadError`] values rather than crashing the registry.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use tableos_core::{Application, AppDescriptor};

/// A registered component constructor.
///
/// Receives the descriptor and the flattened `init_kwargs` mapping (empty
/// when the manifest declares none).
pub type ComponentCtor =
    Box<dyn Fn(&AppDescriptor, &Map<String, Value>) -> Result<Box<dyn Application>, String> + Send + Sync>;

/// Error type for component loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No factory module is registered under the descriptor's `module_ref`.
    #[error("no factory module registered for '{0}'")]
    ModuleNotFound(String),

    /// The module is registered but does not provide the named component.
    #[error("module '{module}' does not provide component '{class}'")]
    ComponentNotFound { module: String, class: String },

    /// The constructor rejected the descriptor or its `init_kwargs`.
    #[error("failed to construct '{class}': {reason}")]
    Construct { class: String, reason: String },

    /// The built component lacks a capability its descriptor demands.
    #[error("app '{name}' requires the {capability} capability but the component does not implement it")]
    Capability { name: String, capability: &'static str },
}

/// Registry of component constructors, keyed by module then class.
///
/// The loader owns no lifecycle state; it is a pure lookup-and-construct
/// service the [`crate::application::registry::AppRegistry`] delegates to.
#[derive(Default)]
pub struct ComponentLoader {
    factories: HashMap<String, HashMap<String, ComponentCtor>>,
}

impl ComponentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor for `module_ref`/`class_name`.
    ///
    /// Re-registering the same pair overwrites the previous constructor.
    pub fn register(
        &mut self,
        module_ref: impl Into<String>,
        class_name: impl Into<String>,
        ctor: ComponentCtor,
    ) {
        self.factories
            .entry(module_ref.into())
            .or_default()
            .insert(class_name.into(), ctor);
    }

    /// Returns `true` when a factory module is registered under `module_ref`.
    pub fn has_module(&self, module_ref: &str) -> bool {
        self.factories.contains_key(module_ref)
    }

    /// Resolves `descriptor` to a constructed, capability-checked component.
    ///
    /// # Errors
    ///
    /// - [`LoadError::ModuleNotFound`] – unknown `module_ref`.
    /// - [`LoadError::ComponentNotFound`] – module known, class not registered.
    /// - [`LoadError::Construct`] – the constructor failed.
    /// - [`LoadError::Capability`] – the descriptor flags a connectivity
    ///   requirement the component does not implement.
    pub fn instantiate(&self, descriptor: &AppDescriptor) -> Result<Box<dyn Application>, LoadError> {
        let module = self
            .factories
            .get(&descriptor.module_ref)
            .ok_or_else(|| LoadError::ModuleNotFound(descriptor.module_ref.clone()))?;

        let ctor = module
            .get(&descriptor.class_name)
            .ok_or_else(|| LoadError::ComponentNotFound {
                module: descriptor.module_ref.clone(),
                class: descriptor.class_name.clone(),
            })?;

        let empty_args = Map::new();
        let init_args = descriptor.init_args().unwrap_or(&empty_args);

        let mut app = ctor(descriptor, init_args).map_err(|reason| LoadError::Construct {
            class: descriptor.class_name.clone(),
            reason,
        })?;

        // Capability check at the load boundary: a descriptor may only flag
        // hooks the component actually implements.
        if descriptor.requires_bluetooth() && app.as_bluetooth_aware().is_none() {
            return Err(LoadError::Capability {
                name: descriptor.name.clone(),
                capability: "bluetooth",
            });
        }
        if descriptor.requires_wifi() && app.as_wifi_aware().is_none() {
            return Err(LoadError::Capability {
                name: descriptor.name.clone(),
                capability: "wifi",
            });
        }

        Ok(app)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal component with no optional capabilities.
    struct ProbeApp {
        descriptor: AppDescriptor,
    }

    impl Application for ProbeApp {
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

    fn probe_ctor() -> ComponentCtor {
        Box::new(|descriptor, _init_args| {
            Ok(Box::new(ProbeApp {
                descriptor: descriptor.clone(),
            }))
        })
    }

    fn descriptor(module: &str, class: &str) -> AppDescriptor {
        AppDescriptor {
            name: "probe".to_string(),
            module_ref: module.to_string(),
            class_name: class.to_string(),
            description: None,
            icon: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_instantiate_constructs_registered_component() {
        // Arrange
        let mut loader = ComponentLoader::new();
        loader.register("test.mod", "ProbeApp", probe_ctor());

        // Act
        let app = loader
            .instantiate(&descriptor("test.mod", "ProbeApp"))
            .expect("registered component must instantiate");

        // Assert
        assert_eq!(app.descriptor().name, "probe");
    }

    #[test]
    fn test_instantiate_unknown_module_fails_with_module_not_found() {
        let loader = ComponentLoader::new();

        let err = loader
            .instantiate(&descriptor("missing.mod", "ProbeApp"))
            .unwrap_err();

        assert!(matches!(err, LoadError::ModuleNotFound(m) if m == "missing.mod"));
    }

    #[test]
    fn test_instantiate_unknown_class_fails_with_component_not_found() {
        let mut loader = ComponentLoader::new();
        loader.register("test.mod", "ProbeApp", probe_ctor());

        let err = loader
            .instantiate(&descriptor("test.mod", "OtherApp"))
            .unwrap_err();

        assert!(matches!(err, LoadError::ComponentNotFound { .. }));
    }

    #[test]
    fn test_instantiate_passes_init_kwargs_to_constructor() {
        use std::sync::{Arc, Mutex};

        // Arrange – a recording constructor captures the args it was given
        let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let seen_clone = Arc::clone(&seen);
        let mut loader = ComponentLoader::new();
        loader.register(
            "test.mod",
            "ProbeApp",
            Box::new(move |descriptor, init_args| {
                *seen_clone.lock().unwrap() = init_args
                    .get("greeting")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Ok(Box::new(ProbeApp {
                    descriptor: descriptor.clone(),
                }))
            }),
        );
        let mut desc = descriptor("test.mod", "ProbeApp");
        desc.extra
            .insert("init_kwargs".to_string(), json!({ "greeting": "hello" }));

        // Act
        loader.instantiate(&desc).unwrap();

        // Assert
        assert_eq!(*seen.lock().unwrap(), Some("hello".to_string()));
    }

    #[test]
    fn test_constructor_failure_surfaces_as_construct_error() {
        // Arrange
        let mut loader = ComponentLoader::new();
        loader.register(
            "test.mod",
            "FailingApp",
            Box::new(|_, _| Err("boom".to_string())),
        );

        // Act
        let err = loader
            .instantiate(&descriptor("test.mod", "FailingApp"))
            .unwrap_err();

        // Assert
        assert!(matches!(err, LoadError::Construct { reason, .. } if reason == "boom"));
    }

    #[test]
    fn test_missing_bluetooth_capability_is_rejected() {
        // Arrange – ProbeApp implements no capability traits
        let mut loader = ComponentLoader::new();
        loader.register("test.mod", "ProbeApp", probe_ctor());
        let mut desc = descriptor("test.mod", "ProbeApp");
        desc.extra
            .insert("requires_bluetooth".to_string(), json!(true));

        // Act
        let err = loader.instantiate(&desc).unwrap_err();

        // Assert
        assert!(
            matches!(err, LoadError::Capability { capability: "bluetooth", .. }),
            "flagging an unimplemented capability must be a load error"
        );
    }
}
