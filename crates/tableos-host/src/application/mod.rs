//! Application layer use cases for the Table OS host.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure data types and contracts, here in `tableos-core`) and the
//! infrastructure (file system, hardware, configuration).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "launch the
//!   selected application, running its connectivity hooks first").
//! - **Depend on abstractions** – the [`tableos_core::Application`] trait and
//!   registered factories – rather than concrete app implementations.
//! - **Contain no file-system access and no hardware plumbing.**
//!
//! # Sub-modules
//!
//! - **`loader`** – Resolves a descriptor to an instantiated component via
//!   the registered factory table and checks declared capabilities.
//!
//! - **`registry`** – The catalog of known descriptors plus the running-set
//!   state machine.  This is the heart of the host.
//!
//! - **`shell`** – Translates navigation actions into registry launch/stop
//!   calls and renders the text menu.

pub mod loader;
pub mod registry;
pub mod shell;
