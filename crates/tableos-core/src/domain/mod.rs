//! Domain types for Table OS.
//!
//! This module contains pure data types and contracts with no infrastructure
//! dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core concepts of the application.
//! - Has **no** imports from OS APIs, file-system libraries, or UI frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! For Table OS the domain is: what an application *is* (its descriptor and
//! its lifecycle contract) and what a navigation input *means*.  How
//! manifests reach the host (file scanning) and how buttons are wired
//! (hardware) live in outer layers that depend on these types, never the
//! other way around.

/// Application descriptor — the validated catalog entry.
pub mod descriptor;

/// Component lifecycle and optional capability traits.
pub mod component;

/// Logical navigation actions decoded from hardware buttons.
pub mod navigation;
