//! Infrastructure layer for the Table OS host.
//!
//! Contains the outward-facing adapters: the hardware input event router,
//! the companion-device connection broker, file-system manifest discovery,
//! and configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `tableos_core`, but MUST NOT be imported by the `application` layer or
//! the core domain.

pub mod companion;
pub mod fanout;
pub mod input;
pub mod manifests;
pub mod storage;
