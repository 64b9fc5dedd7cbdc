pub mod host;
pub mod platform;
pub mod presentation;

pub use host::{DeviceDescriptor, HostEnvironment, StaticHost};
pub use platform::{Grade, PlatformDetector, PlatformReadyEvent};
