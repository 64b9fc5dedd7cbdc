//! Value-backed host environment.

use std::collections::BTreeSet;

use super::{DeviceDescriptor, HostEnvironment};

/// A host whose signature, globals and descriptor are fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    user_agent: String,
    globals: BTreeSet<String>,
    descriptor: Option<DeviceDescriptor>,
}

impl StaticHost {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    /// Define a global on the host (e.g., "cordova").
    pub fn with_global(mut self, name: impl Into<String>) -> Self {
        self.globals.insert(name.into());
        self
    }

    pub fn with_descriptor(mut self, descriptor: DeviceDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }
}

impl HostEnvironment for StaticHost {
    #[tracing::instrument(skip(self))]
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    #[tracing::instrument(skip(self))]
    fn has_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    #[tracing::instrument(skip(self))]
    fn device_descriptor(&self) -> Option<DeviceDescriptor> {
        self.descriptor.clone()
    }
}
