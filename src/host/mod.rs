//! Host environment abstraction.
//!
//! Everything the detector knows about the page it runs in comes through
//! the [`HostEnvironment`] trait: the raw device signature (user agent),
//! the presence of bridge globals injected by a native wrapper, and the
//! optional device descriptor such a wrapper exposes.
//!
//! # Structure
//!
//! - `static_host` - value-backed implementation used by the CLI and tests

mod static_host;

use serde::{Deserialize, Serialize};

pub use static_host::StaticHost;

/// Globals whose presence means the page runs inside a native wrapper.
/// Two naming conventions exist for the same bridge.
pub const BRIDGE_GLOBALS: [&str; 3] = ["cordova", "PhoneGap", "phonegap"];

/// Raw platform strings reported by a host bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Platform name as the bridge reports it (e.g., "Android", "iOS")
    #[serde(default)]
    pub platform: Option<String>,
    /// Dotted version string (e.g., "4.4.2")
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
pub trait HostEnvironment: Send + Sync {
    /// The raw device/browser signature string.
    fn user_agent(&self) -> String;

    /// Whether a global with this exact name is defined.
    fn has_global(&self, name: &str) -> bool;

    /// Device descriptor exposed by the bridge, if any.
    fn device_descriptor(&self) -> Option<DeviceDescriptor>;
}
