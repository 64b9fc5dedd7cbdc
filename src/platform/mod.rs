//! Platform detection for the hosting page.
//!
//! [`PlatformDetector`] answers "where am I running?" for code living in a
//! web page: plain browser or native-wrapped webview, which OS family and
//! version, and how capable the engine is likely to be. It also gates
//! callbacks behind the host's one-time ready signal (see `ready`).
//!
//! The detector is single-threaded. Share it with `Rc` so callbacks can
//! capture it and query tags once they run.
//!
//! # Structure
//!
//! - `grade` - capability tiers
//! - `version` - version string parsing
//! - `ready` - readiness gate, observers and host lifecycle signals

mod grade;
mod ready;
pub mod version;

use std::cell::{Cell, OnceCell, RefCell};

use log::{debug, error};

use crate::host::{BRIDGE_GLOBALS, DeviceDescriptor, HostEnvironment};
use crate::presentation::{NoopSink, PresentationSink, body_classes};

pub use grade::Grade;
pub use ready::{PlatformReadyEvent, READY_EVENT_TARGET};

use ready::ReadyState;
use version::{parse_descriptor_version, parse_signature_version, version_suffixes};

pub struct PlatformDetector {
    host: Box<dyn HostEnvironment>,
    sink: Box<dyn PresentationSink>,
    platforms: RefCell<Option<Vec<String>>>,
    grade: Cell<Option<Grade>>,
    is_full_screen: Cell<bool>,
    platform_name: OnceCell<String>,
    platform_version: OnceCell<f64>,
    ready: ReadyState,
}

impl PlatformDetector {
    /// Create a detector that discards presentation output.
    pub fn new(host: impl HostEnvironment + 'static) -> Self {
        Self::with_sink(host, NoopSink)
    }

    pub fn with_sink(
        host: impl HostEnvironment + 'static,
        sink: impl PresentationSink + 'static,
    ) -> Self {
        Self {
            host: Box::new(host),
            sink: Box::new(sink),
            platforms: RefCell::new(None),
            grade: Cell::new(None),
            is_full_screen: Cell::new(false),
            platform_name: OnceCell::new(),
            platform_version: OnceCell::new(),
            ready: ReadyState::default(),
        }
    }

    /// Tags found by the last detection pass, `None` before detection.
    pub fn platforms(&self) -> Option<Vec<String>> {
        self.platforms.borrow().clone()
    }

    /// Grade computed by the last detection pass, `None` before detection.
    pub fn grade(&self) -> Option<Grade> {
        self.grade.get()
    }

    /// Recompute tags and grade from scratch.
    ///
    /// Tag order is fixed: `webview`, `cordova`, `ipad`, `<name>`,
    /// `<name><major>`, `<name><major>_<minor>`.
    pub fn detect_platforms(&self) {
        let mut platforms = Vec::new();
        let mut grade = Grade::A;

        if self.is_webview() {
            push_tag(&mut platforms, "webview".to_string());
            push_tag(&mut platforms, "cordova".to_string());
        }
        if self.is_ipad() {
            push_tag(&mut platforms, "ipad".to_string());
        }

        let name = self.platform();
        if !name.is_empty() {
            push_tag(&mut platforms, name.to_string());

            let version = self.version();
            if version != 0.0 {
                let (major, full) = version_suffixes(version);
                push_tag(&mut platforms, format!("{}{}", name, major));
                push_tag(&mut platforms, format!("{}{}", name, full));
                grade = Grade::for_platform(name, version);
            }
        }

        debug!("Detected platforms {:?} with grade {}", platforms, grade);
        *self.platforms.borrow_mut() = Some(platforms);
        self.grade.set(Some(grade));
    }

    /// Run detection and schedule the resulting classes on the sink.
    pub fn detect(&self) {
        self.detect_platforms();
        let classes = body_classes(
            self.platforms.borrow().as_deref().unwrap_or_default(),
            self.grade.get().unwrap_or_default(),
        );
        self.sink.schedule_classes(&classes);
    }

    /// Descriptor exposed by the host bridge.
    ///
    /// Inside a webview the descriptor is expected; its absence is logged
    /// and an empty descriptor is returned instead.
    pub fn device(&self) -> DeviceDescriptor {
        if let Some(descriptor) = self.host.device_descriptor() {
            return descriptor;
        }
        if self.is_webview() {
            error!("device plugin required");
        }
        DeviceDescriptor::default()
    }

    /// Whether the page runs inside a native wrapper.
    pub fn is_webview(&self) -> bool {
        BRIDGE_GLOBALS.iter().any(|name| self.host.has_global(name))
    }

    pub fn is_ipad(&self) -> bool {
        self.host.user_agent().to_lowercase().contains("ipad")
    }

    pub fn is_ios(&self) -> bool {
        self.is("ios")
    }

    pub fn is_android(&self) -> bool {
        self.is("android")
    }

    /// Lowercase platform name, `""` when unknown. Resolved once.
    pub fn platform(&self) -> &str {
        self.platform_name.get_or_init(|| self.resolve_platform())
    }

    fn resolve_platform(&self) -> String {
        if let Some(name) = self.device().platform.filter(|n| !n.is_empty()) {
            return name.to_lowercase();
        }

        let ua = self.host.user_agent();
        if ua.contains("Android") {
            "android".to_string()
        } else if ["iPhone", "iPad", "iPod"].iter().any(|d| ua.contains(d)) {
            "ios".to_string()
        } else {
            String::new()
        }
    }

    /// Major and minor platform version as one float, `0.0` when unknown.
    /// Resolved once.
    pub fn version(&self) -> f64 {
        *self
            .platform_version
            .get_or_init(|| self.resolve_version())
    }

    fn resolve_version(&self) -> f64 {
        if let Some(version) = self
            .device()
            .version
            .as_deref()
            .and_then(parse_descriptor_version)
        {
            return version;
        }

        parse_signature_version(self.platform(), &self.host.user_agent()).unwrap_or(0.0)
    }

    /// Case-insensitive platform check.
    ///
    /// Looks at detected tags first, then the resolved platform name. Only
    /// when no name could be resolved does it fall back to a raw substring
    /// search of the signature.
    pub fn is(&self, name: &str) -> bool {
        let name = name.to_lowercase();

        if let Some(platforms) = self.platforms.borrow().as_ref()
            && platforms.contains(&name)
        {
            return true;
        }

        let resolved = self.platform();
        if !resolved.is_empty() {
            return resolved == name;
        }

        self.host.user_agent().to_lowercase().contains(&name)
    }

    pub fn is_full_screen(&self) -> bool {
        self.is_full_screen.get()
    }

    /// Record the fullscreen preference; `None` means fullscreen.
    pub fn set_full_screen(&self, show_full_screen: Option<bool>) {
        self.is_full_screen.set(show_full_screen != Some(false));
    }
}

// A bridge may report a platform name that is already a tag ("iPad").
fn push_tag(platforms: &mut Vec<String>, tag: String) {
    if !platforms.contains(&tag) {
        platforms.push(tag);
    }
}
