//! # tableos-core
//!
//! Shared library for Table OS containing the application descriptor model,
//! manifest resolution, navigation actions, and the component capability
//! contract.
//!
//! This crate is used by the host application and by every loadable
//! application.  It has zero dependencies on OS APIs, file systems, or
//! network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! Table OS is a small application host: a shell that discovers declarative
//! descriptions of pluggable applications ("manifests"), turns them into
//! running components, and routes abstracted hardware input (buttons on the
//! table's bezel) to whichever application is active.
//!
//! This crate (`tableos-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure data types and contracts: the [`AppDescriptor`]
//!   value every catalog entry is built from, the [`Application`] lifecycle
//!   trait every loadable component implements, and the [`NavigationAction`]
//!   enum that abstracts hardware buttons into logical movements.
//!
//! - **`manifest`** – The pure resolution step from untyped, already-decoded
//!   manifest data (JSON or TOML, decoded elsewhere) into validated
//!   [`AppDescriptor`] values.

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/domain/mod.rs).
pub mod domain;
pub mod manifest;

// Re-export the most-used types at the crate root so callers can write
// `tableos_core::AppDescriptor` instead of the full module path.
pub use domain::component::{Application, BluetoothAware, WifiAware};
pub use domain::descriptor::AppDescriptor;
pub use domain::navigation::NavigationAction;
pub use manifest::resolver::{resolve, resolve_catalog, CatalogEntry, ManifestError};
