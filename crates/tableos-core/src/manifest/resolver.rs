//! Pure resolution from untyped manifest data to validated descriptors.
//!
//! The resolver accepts two descriptor shapes:
//!
//! 1. **Direct fields** – `module` plus `class` (or its alias `class_name`).
//! 2. **Entry point** – a combined `entry_point` string in `"module:Class"`
//!    form, used to fill whichever of the two slots is absent.  Explicit
//!    fields always take precedence over entry-point-derived values.
//!
//! All recognised string fields are trimmed before validation and storage.
//! Every key the resolver does not recognise is copied verbatim into the
//! descriptor's `extra` bag.
//!
//! Resolution is pure: no I/O, no side effects, and resolving the same
//! input twice yields equal descriptors.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::descriptor::AppDescriptor;

/// Keys the resolver consumes; everything else lands in `extra`.
const RECOGNIZED_KEYS: [&str; 7] = [
    "name",
    "module",
    "class",
    "class_name",
    "description",
    "icon",
    "entry_point",
];

/// Error type for manifest resolution.
///
/// Every variant is a user/configuration error: surfaced to the operator,
/// never retried (a malformed manifest does not fix itself).
#[derive(Debug, Error, PartialEq)]
pub enum ManifestError {
    /// The top-level manifest value is not a mapping.
    #[error("manifest must define a mapping at the top level")]
    NotAMapping,

    /// A required field is absent.
    #[error("manifest field '{0}' is required")]
    MissingField(&'static str),

    /// A field is present but not a string, or blank after trimming.
    #[error("manifest field '{field}' must be a non-empty string")]
    InvalidString { field: &'static str },

    /// `entry_point` is not `"module:Class"` with exactly one separator
    /// splitting two non-blank parts.
    #[error("manifest entry_point must be in 'module:Class' form, got '{0}'")]
    MalformedEntryPoint(String),

    /// The aggregate form's `apps` key is not a sequence of mappings.
    #[error("manifest 'apps' must be a sequence of mappings")]
    InvalidCatalog,

    /// Catalog lookup by id found no matching entry.
    #[error("no app with id '{0}' found in manifest")]
    UnknownId(String),
}

/// One entry of an aggregate (`apps`-keyed) manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Lookup key for callers that index by id rather than name.
    pub id: Option<String>,
    /// The resolved descriptor.
    pub descriptor: AppDescriptor,
}

/// Resolves a single decoded manifest mapping into an [`AppDescriptor`].
///
/// # Errors
///
/// Returns [`ManifestError`] when the input is not a mapping, `name` is
/// missing or blank, neither (`module` + `class`) nor a well-formed
/// `entry_point` is present, or any recognised string field carries a
/// non-string or blank value.
pub fn resolve(raw: &Value) -> Result<AppDescriptor, ManifestError> {
    let map = raw.as_object().ok_or(ManifestError::NotAMapping)?;

    let name = required_string(map, "name")?;

    // Explicit fields first.  A present-but-blank explicit field is an
    // error even when an entry_point could have filled the slot: the
    // manifest author wrote something, and it is wrong.
    let mut module_ref = optional_string(map, "module")?;
    let mut class_name = match optional_string(map, "class")? {
        Some(value) => Some(value),
        None => optional_string(map, "class_name")?,
    };

    if module_ref.is_none() || class_name.is_none() {
        if let Some(entry_point) = optional_string(map, "entry_point")? {
            let (module_part, class_part) = split_entry_point(&entry_point)?;
            if module_ref.is_none() {
                module_ref = Some(module_part);
            }
            if class_name.is_none() {
                class_name = Some(class_part);
            }
        }
    }

    let module_ref = module_ref.ok_or(ManifestError::MissingField("module"))?;
    let class_name = class_name.ok_or(ManifestError::MissingField("class"))?;

    let description = optional_string(map, "description")?;
    let icon = optional_string(map, "icon")?;

    let extra: Map<String, Value> = map
        .iter()
        .filter(|(key, _)| !RECOGNIZED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(AppDescriptor {
        name,
        module_ref,
        class_name,
        description,
        icon,
        extra,
    })
}

/// Resolves an aggregate manifest: a top-level `apps` sequence of descriptor
/// mappings, each optionally carrying an `id` lookup key.
///
/// Entries are returned in document order.
///
/// # Errors
///
/// Returns [`ManifestError::MissingField`] when `apps` is absent,
/// [`ManifestError::InvalidCatalog`] when it is not a sequence of mappings,
/// and any per-entry resolution error from [`resolve`].
pub fn resolve_catalog(raw: &Value) -> Result<Vec<CatalogEntry>, ManifestError> {
    let map = raw.as_object().ok_or(ManifestError::NotAMapping)?;
    let apps = map
        .get("apps")
        .ok_or(ManifestError::MissingField("apps"))?
        .as_array()
        .ok_or(ManifestError::InvalidCatalog)?;

    let mut entries = Vec::with_capacity(apps.len());
    for app in apps {
        let entry_map = app.as_object().ok_or(ManifestError::InvalidCatalog)?;

        let id = optional_string(entry_map, "id")?;

        // `id` is recognised only in aggregate form; strip it before the
        // per-entry resolve so it never leaks into `extra`.
        let mut stripped = entry_map.clone();
        stripped.remove("id");

        let descriptor = resolve(&Value::Object(stripped))?;
        entries.push(CatalogEntry { id, descriptor });
    }
    Ok(entries)
}

/// Looks up a catalog entry by its `id` key.
///
/// # Errors
///
/// Returns [`ManifestError::UnknownId`] when no entry carries the id.
pub fn find_by_id<'a>(
    entries: &'a [CatalogEntry],
    id: &str,
) -> Result<&'a CatalogEntry, ManifestError> {
    entries
        .iter()
        .find(|entry| entry.id.as_deref() == Some(id))
        .ok_or_else(|| ManifestError::UnknownId(id.to_string()))
}

// ── Field helpers ─────────────────────────────────────────────────────────────

/// Extracts a required, trimmed, non-blank string field.
fn required_string(map: &Map<String, Value>, field: &'static str) -> Result<String, ManifestError> {
    optional_string(map, field)?.ok_or(ManifestError::MissingField(field))
}

/// Extracts an optional string field: absent is `None`; present must be a
/// string and non-blank after trimming.
fn optional_string(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ManifestError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::String(value)) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ManifestError::InvalidString { field })
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Some(_) => Err(ManifestError::InvalidString { field }),
    }
}

/// Splits an entry point on its single `:` separator into two trimmed,
/// non-blank parts.
fn split_entry_point(entry_point: &str) -> Result<(String, String), ManifestError> {
    if entry_point.matches(':').count() != 1 {
        return Err(ManifestError::MalformedEntryPoint(entry_point.to_string()));
    }
    // Exactly one separator, so split_once always succeeds here.
    let (module_part, class_part) = entry_point
        .split_once(':')
        .ok_or_else(|| ManifestError::MalformedEntryPoint(entry_point.to_string()))?;
    let module_part = module_part.trim();
    let class_part = class_part.trim();
    if module_part.is_empty() || class_part.is_empty() {
        return Err(ManifestError::MalformedEntryPoint(entry_point.to_string()));
    }
    Ok((module_part.to_string(), class_part.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
