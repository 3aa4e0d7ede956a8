//! File-system manifest discovery.
//!
//! Applications announce themselves through declarative manifest files
//! (`.json` or `.toml`).  This module walks the configured locations,
//! decodes each file to an untyped `serde_json::Value`, hands it to the
//! pure resolver in `tableos_core`, and registers every resolved
//! descriptor — together with its source path — into the [`AppRegistry`].
//!
//! Both manifest shapes are accepted: a single top-level descriptor
//! mapping, and the aggregate catalog form (a top-level `apps` array).
//!
//! # Failure isolation
//!
//! One broken manifest must not take down the boot scan.  `discover`
//! records each per-file failure as a [`ScanError`] carrying the
//! offending path, logs it, and keeps scanning; the caller receives the
//! full report and decides what to surface.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use tableos_core::manifest::{resolve, resolve_catalog, ManifestError};
use tableos_core::AppDescriptor;

use crate::application::registry::AppRegistry;

/// Manifest file extensions the scanner picks up (lower-cased).
const SUPPORTED_EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Error type for one manifest file that could not be processed.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file or directory could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `.json` manifest was not valid JSON.
    #[error("failed to parse JSON manifest {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A `.toml` manifest was not valid TOML.
    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file parsed but did not resolve to a valid descriptor.
    #[error("invalid manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },
}

/// Result of a discovery sweep over one or more locations.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Names of the descriptors registered, in registration order.
    pub registered: Vec<String>,
    /// Per-file failures encountered while scanning.
    pub failures: Vec<ScanError>,
}

/// Scans `locations` for manifests and registers every resolved
/// descriptor into `registry`.
///
/// Each location may be a single manifest file or a directory searched
/// recursively.  Files with unsupported extensions are skipped silently.
/// Per-file failures are collected into the report, never propagated.
pub fn discover(
    registry: &mut AppRegistry,
    locations: &[PathBuf],
) -> ScanReport {
    let mut report = ScanReport::default();
    let mut files = Vec::new();

    for location in locations {
        if let Err(error) = collect_manifest_files(location, &mut files) {
            warn!("manifest scan failed for {}: {error}", location.display());
            report.failures.push(error);
        }
    }

    // Deterministic registration order regardless of directory iteration.
    files.sort();

    for path in files {
        match resolve_file(&path) {
            Ok(descriptors) => {
                for descriptor in descriptors {
                    debug!(
                        "registering '{}' from {}",
                        descriptor.name,
                        path.display()
                    );
                    report.registered.push(descriptor.name.clone());
                    registry.register(descriptor, Some(path.clone()));
                }
            }
            Err(error) => {
                warn!("skipping manifest: {error}");
                report.failures.push(error);
            }
        }
    }

    report
}

/// Resolves a single manifest file to its descriptors.
///
/// A file in the aggregate catalog form yields one descriptor per catalog
/// entry (in file order); a plain manifest yields exactly one.
///
/// # Errors
///
/// Returns the [`ScanError`] variant matching the failing stage: I/O,
/// JSON/TOML parse, or descriptor resolution.
pub fn resolve_file(path: &Path) -> Result<Vec<AppDescriptor>, ScanError> {
    let raw = load_manifest_value(path)?;

    let descriptors = if is_catalog(&raw) {
        resolve_catalog(&raw)
            .map_err(|source| ScanError::Manifest {
                path: path.to_path_buf(),
                source,
            })?
            .into_iter()
            .map(|entry| entry.descriptor)
            .collect()
    } else {
        vec![resolve(&raw).map_err(|source| ScanError::Manifest {
            path: path.to_path_buf(),
            source,
        })?]
    };

    Ok(descriptors)
}

/// Reads and decodes one manifest file to an untyped JSON value.
///
/// TOML manifests are converted through serde so the resolver only ever
/// sees `serde_json::Value`.
fn load_manifest_value(path: &Path) -> Result<Value, ScanError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match extension(path).as_deref() {
        Some("json") => serde_json::from_str(&content).map_err(|source| ScanError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Some("toml") => {
            let value: toml::Value =
                toml::from_str(&content).map_err(|source| ScanError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?;
            serde_json::to_value(value).map_err(|source| ScanError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        // collect_manifest_files only yields supported extensions; a direct
        // caller passing something else gets the resolver's mapping error.
        _ => Ok(Value::Null),
    }
}

/// Recursively collects supported manifest files under `location`.
///
/// A file location with an unsupported extension is skipped without an
/// error; a missing location surfaces as `ScanError::Io`.
fn collect_manifest_files(location: &Path, files: &mut Vec<PathBuf>) -> Result<(), ScanError> {
    let metadata = std::fs::metadata(location).map_err(|source| ScanError::Io {
        path: location.to_path_buf(),
        source,
    })?;

    if metadata.is_file() {
        if has_supported_extension(location) {
            files.push(location.to_path_buf());
        }
        return Ok(());
    }

    let entries = std::fs::read_dir(location).map_err(|source| ScanError::Io {
        path: location.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ScanError::Io {
            path: location.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_manifest_files(&path, files)?;
        } else if has_supported_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn has_supported_extension(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext))
}

/// A manifest is in catalog form when its top level carries an `apps` key.
fn is_catalog(raw: &Value) -> bool {
    raw.as_object()
        .is_some_and(|map| map.contains_key("apps"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
