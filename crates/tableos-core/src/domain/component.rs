//! Component lifecycle contract and optional capability traits.
//!
//! Every loadable Table OS application implements [`Application`].  The two
//! extension traits, [`BluetoothAware`] and [`WifiAware`], are *optional
//! capabilities*: the host asks for them through the `as_*_aware()` query
//! methods and invokes the setup hooks only on components that actually
//! implement them.
//!
//! # Why query methods instead of default no-op hooks? (for beginners)
//!
//! An earlier design gave the base application type empty default
//! `setup_bluetooth()` / `setup_wifi()` methods that subclasses could
//! override.  The problem: the host cannot tell an application that
//! implements the hook apart from one that inherited the no-op, so a
//! manifest flagging `requires_bluetooth` on an app without Bluetooth
//! support silently does nothing.
//!
//! With explicit capability queries the host checks, at load time, whether
//! the component really provides the capability its descriptor demands and
//! rejects the combination as a configuration defect otherwise.

use crate::domain::descriptor::AppDescriptor;

/// Lifecycle contract every loadable application component implements.
///
/// Implementations are constructed by a registered factory (see the host's
/// component loader) with their descriptor and any `init_kwargs`
/// configuration.  `start` and `stop` take no further arguments.
///
/// Errors are plain strings: lifecycle failures are reported to the
/// operator, not pattern-matched, and the host wraps them into its own
/// typed errors at the registry boundary.
pub trait Application: Send {
    /// Returns the descriptor this component was constructed from.
    fn descriptor(&self) -> &AppDescriptor;

    /// Starts the application.  Invoked exactly once per launch.
    fn start(&mut self) -> Result<(), String>;

    /// Stops the application and releases its resources.
    fn stop(&mut self) -> Result<(), String>;

    /// Returns the Bluetooth capability interface, if implemented.
    fn as_bluetooth_aware(&mut self) -> Option<&mut dyn BluetoothAware> {
        None
    }

    /// Returns the Wi-Fi capability interface, if implemented.
    fn as_wifi_aware(&mut self) -> Option<&mut dyn WifiAware> {
        None
    }
}

impl core::fmt::Debug for dyn Application + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Application")
            .field("descriptor", self.descriptor())
            .finish_non_exhaustive()
    }
}

/// Optional capability: the component prepares Bluetooth connectivity
/// before `start`.
pub trait BluetoothAware {
    /// Invoked at most once per launch, before the Wi-Fi hook and `start`.
    fn setup_bluetooth(&mut self) -> Result<(), String>;
}

/// Optional capability: the component prepares Wi-Fi connectivity before
/// `start`.
pub trait WifiAware {
    /// Invoked at most once per launch, after the Bluetooth hook and
    /// before `start`.
    fn setup_wifi(&mut self) -> Result<(), String>;
}
