//! Presentation side channel.
//!
//! Detection results are mirrored onto a shared UI root as class names
//! (`platform-android`, `grade-b`, `platform-ready`). Applying them is the
//! sink's business: the detector only schedules and never waits.

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::Grade;

/// Class marking that the ready transition happened.
pub const READY_CLASS: &str = "platform-ready";

#[cfg_attr(test, mockall::automock)]
pub trait PresentationSink {
    /// Schedule class names to be added on the next rendering opportunity.
    fn schedule_classes(&self, classes: &[String]);
}

impl<S: PresentationSink + ?Sized> PresentationSink for Rc<S> {
    fn schedule_classes(&self, classes: &[String]) {
        (**self).schedule_classes(classes)
    }
}

/// Class names for a tag list and grade, in tag order with the grade last.
pub fn body_classes(platforms: &[String], grade: Grade) -> Vec<String> {
    platforms
        .iter()
        .map(|tag| format!("platform-{}", tag))
        .chain(std::iter::once(format!("grade-{}", grade)))
        .collect()
}

/// Sink that discards everything.
pub struct NoopSink;

impl PresentationSink for NoopSink {
    fn schedule_classes(&self, _classes: &[String]) {}
}

/// Sink that keeps every scheduled class, in order, without duplicates.
#[derive(Debug, Default)]
pub struct ClassListSink {
    classes: RefCell<Vec<String>>,
}

impl ClassListSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }
}

impl PresentationSink for ClassListSink {
    fn schedule_classes(&self, classes: &[String]) {
        let mut list = self.classes.borrow_mut();
        for class in classes {
            if !list.contains(class) {
                list.push(class.clone());
            }
        }
    }
}
