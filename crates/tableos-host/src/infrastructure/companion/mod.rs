//! Companion-device connection broker.
//!
//! The table pairs with a single companion device (a phone app used as a
//! remote).  Real radio hardware is still under development, so the broker
//! models the connection lifecycle — advertise, connect, disconnect — with
//! enough surface area for applications to build and test companion flows
//! today and swap in a real transport later.
//!
//! # Single-slot connection model
//!
//! The broker holds at most one active connection.  A `connect` while a
//! connection is active **replaces it without a disconnect notification**;
//! this is a deliberate single-slot simplification (the companion app owns
//! reconnect behavior) and tests assert it explicitly so a future change is
//! a conscious one.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::infrastructure::fanout::{ListenerId, ListenerSet};

/// Error type for broker operations.
#[derive(Debug, Error, PartialEq)]
pub enum BrokerError {
    /// `connect` was attempted while no service is advertised — a real
    /// device could not have discovered the host.
    #[error("cannot connect without advertising at least one service")]
    NotAdvertising,
}

/// A connection to a companion device.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanionConnection {
    /// Identifier the companion presented when connecting.
    pub device_id: String,
    /// Optional descriptive metadata (app version, platform, …).
    pub metadata: Option<HashMap<String, String>>,
}

/// Connection lifecycle broker with listener fan-out.
///
/// Like the registry, the broker is a single-writer struct: callers that
/// share it across tasks serialize mutating calls behind a `Mutex`, so
/// "at most one active connection" holds atomically.
#[derive(Default)]
pub struct DeviceConnectionBroker {
    advertised: HashMap<String, HashMap<String, String>>,
    active: Option<CompanionConnection>,
    connect_listeners: ListenerSet<CompanionConnection>,
    disconnect_listeners: ListenerSet<CompanionConnection>,
}

impl DeviceConnectionBroker {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Service advertisement ─────────────────────────────────────────────────

    /// Adds or overwrites an advertised service.
    pub fn advertise(
        &mut self,
        service_name: impl Into<String>,
        metadata: Option<HashMap<String, String>>,
    ) {
        let service_name = service_name.into();
        debug!("advertising service '{service_name}'");
        self.advertised
            .insert(service_name, metadata.unwrap_or_default());
    }

    /// Stops advertising one service, or all services when `None`.
    pub fn stop_advertising(&mut self, service_name: Option<&str>) {
        match service_name {
            Some(name) => {
                debug!("stopping advertisement for service '{name}'");
                self.advertised.remove(name);
            }
            None => {
                debug!("clearing all advertised services");
                self.advertised.clear();
            }
        }
    }

    // ── Listener registration ─────────────────────────────────────────────────

    /// Registers a callback invoked when a companion connects.
    pub fn on_connect(
        &self,
        listener: impl Fn(&CompanionConnection) -> Result<(), String> + Send + Sync + 'static,
    ) -> ListenerId {
        self.connect_listeners.register(listener)
    }

    /// Registers a callback invoked when the companion disconnects.
    pub fn on_disconnect(
        &self,
        listener: impl Fn(&CompanionConnection) -> Result<(), String> + Send + Sync + 'static,
    ) -> ListenerId {
        self.disconnect_listeners.register(listener)
    }

    /// Removes a connect listener.
    pub fn remove_connect_listener(&self, id: ListenerId) -> bool {
        self.connect_listeners.unregister(id)
    }

    /// Removes a disconnect listener.
    pub fn remove_disconnect_listener(&self, id: ListenerId) -> bool {
        self.disconnect_listeners.unregister(id)
    }

    // ── Connection lifecycle ──────────────────────────────────────────────────

    /// Handles an incoming companion connection.
    ///
    /// The new connection becomes the sole active one, replacing any prior
    /// connection without a disconnect notification (see module docs).
    /// Connect-listeners are notified in registration order with
    /// per-listener failure isolation.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::NotAdvertising`] when no service is
    /// advertised.
    pub fn connect(
        &mut self,
        device_id: impl Into<String>,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<CompanionConnection, BrokerError> {
        if self.advertised.is_empty() {
            return Err(BrokerError::NotAdvertising);
        }

        let connection = CompanionConnection {
            device_id: device_id.into(),
            metadata,
        };
        info!("companion '{}' connected", connection.device_id);

        self.active = Some(connection.clone());
        self.connect_listeners.notify("connect", &connection);
        Ok(connection)
    }

    /// Handles the active companion disconnecting.
    ///
    /// A no-op when no connection is active.  Disconnect-listeners receive
    /// the connection that was active, in registration order, with the same
    /// failure isolation as `connect`.
    pub fn disconnect(&mut self) {
        let connection = match self.active.take() {
            Some(connection) => connection,
            None => {
                debug!("disconnect() called without an active connection");
                return;
            }
        };

        info!("companion '{}' disconnected", connection.device_id);
        self.disconnect_listeners.notify("disconnect", &connection);
    }

    // ── Diagnostics ───────────────────────────────────────────────────────────

    /// Snapshot of the advertised services and their metadata.
    pub fn advertised_services(&self) -> HashMap<String, HashMap<String, String>> {
        self.advertised.clone()
    }

    /// Snapshot of the active connection, if any.
    pub fn active_connection(&self) -> Option<CompanionConnection> {
        self.active.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
