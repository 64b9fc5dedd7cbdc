//! Readiness gate and host lifecycle.
//!
//! The host signals readiness once: a plain browser is ready as soon as the
//! window has loaded, a native wrapper additionally has to report that its
//! device layer is up. At that point detection runs, queued callbacks fire
//! in registration order and `platformready` observers are notified.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};
use serde::Serialize;

use super::{Grade, PlatformDetector};
use crate::presentation::READY_CLASS;

/// Target carried by every [`PlatformReadyEvent`].
pub const READY_EVENT_TARGET: &str = "document";

type ReadyCallback = Box<dyn FnOnce()>;
type ReadyObserver = Box<dyn Fn(&PlatformReadyEvent)>;

/// Payload of the one-time `platformready` notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformReadyEvent {
    pub target: &'static str,
    pub platforms: Vec<String>,
    pub grade: Grade,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LoadState {
    #[default]
    Loading,
    AwaitingDevice,
    Ready,
}

#[derive(Default)]
pub(super) struct ReadyState {
    load: Cell<LoadState>,
    device_ready_seen: Cell<bool>,
    pending: RefCell<Vec<ReadyCallback>>,
    observers: RefCell<Vec<ReadyObserver>>,
}

impl PlatformDetector {
    pub fn is_ready(&self) -> bool {
        self.ready.load.get() == LoadState::Ready
    }

    /// Run `callback` once the platform is ready.
    ///
    /// After the ready transition the callback runs right away, before
    /// this returns. Before it, the callback is queued and runs after
    /// detection, in registration order.
    pub fn ready(&self, callback: impl FnOnce() + 'static) {
        if self.is_ready() {
            callback();
        } else {
            self.ready.pending.borrow_mut().push(Box::new(callback));
        }
    }

    /// Listen for the `platformready` notification.
    ///
    /// The notification is sent once; observers added afterwards are never
    /// called.
    pub fn on_platform_ready(&self, observer: impl Fn(&PlatformReadyEvent) + 'static) {
        if self.is_ready() {
            debug!("platformready already sent, observer will not be called");
            return;
        }
        self.ready.observers.borrow_mut().push(Box::new(observer));
    }

    /// The window and its scripts finished loading.
    pub fn window_loaded(&self) {
        if self.ready.load.get() != LoadState::Loading {
            return;
        }

        if !self.is_webview() {
            self.platform_ready();
        } else if self.ready.device_ready_seen.get() {
            debug!("Window loaded after deviceready, platform is ready");
            self.platform_ready();
        } else {
            debug!("Window loaded inside a webview, waiting for deviceready");
            self.ready.load.set(LoadState::AwaitingDevice);
        }
    }

    /// The host bridge reported that its device layer is ready.
    pub fn device_ready(&self) {
        self.ready.device_ready_seen.set(true);
        if self.ready.load.get() == LoadState::AwaitingDevice {
            self.platform_ready();
        }
    }

    fn platform_ready(&self) {
        self.ready.load.set(LoadState::Ready);
        self.detect();

        let callbacks = std::mem::take(&mut *self.ready.pending.borrow_mut());
        debug!("Platform ready, running {} queued callbacks", callbacks.len());
        for (index, callback) in callbacks.into_iter().enumerate() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
                error!(
                    "Ready callback #{} panicked: {}",
                    index,
                    panic_message(payload.as_ref())
                );
            }
        }

        let event = PlatformReadyEvent {
            target: READY_EVENT_TARGET,
            platforms: self.platforms().unwrap_or_default(),
            grade: self.grade().unwrap_or_default(),
        };
        let observers = std::mem::take(&mut *self.ready.observers.borrow_mut());
        for observer in &observers {
            observer(&event);
        }

        self.sink.schedule_classes(&[READY_CLASS.to_string()]);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
