//! Manifest resolution for Table OS.
//!
//! A manifest is a small declarative document describing one loadable
//! application (or, in aggregate form, several).  Text decoding (JSON or
//! TOML) happens in the host's infrastructure layer; this module only sees
//! the already-decoded, untyped value and performs the pure
//! validation/normalisation step into [`crate::AppDescriptor`].

pub mod resolver;

pub use resolver::{find_by_id, resolve, resolve_catalog, CatalogEntry, ManifestError};
