//! This module provides the notification channel: an `Observer` trait for the view
//! layer, a `Notifier` that fans events out synchronously in registration order,
//! and a `Recorder` observer that keeps the delivered events for inspection.

use crate::types::Event;
use std::cell::RefCell;
use std::rc::Rc;

/// A consumer of run events.
///
/// Observers are notified synchronously, strictly after the state mutation an
/// event reports, in the order they were registered.
pub trait Observer {
    /// Called once per event occurrence.
    fn notify(&mut self, event: &Event);
}

/// Fans events out to the registered observers.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Box<dyn Observer>>,
}

impl Notifier {
    /// Creates a notifier with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Registration order is delivery order.
    pub fn register(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Returns the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Delivers `event` to every observer, in registration order.
    pub fn emit(&mut self, event: &Event) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }
}

/// An observer that records every event it receives.
///
/// The recorder is cheap to clone; clones share the same buffer, so one clone
/// can be registered with a machine while another is kept for assertions or
/// replay.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Returns the most recent event, if any.
    pub fn last(&self) -> Option<Event> {
        self.events.borrow().last().cloned()
    }

    /// Discards the recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Observer for Recorder {
    fn notify(&mut self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tags every delivery so interleavings across observers become visible.
    struct Tagged {
        tag: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Observer for Tagged {
        fn notify(&mut self, event: &Event) {
            let name = match event {
                Event::PointerAt { .. } => "POINTER_AT",
                Event::SelectNode { .. } => "SELECT_NODE",
                Event::FlashInvalid => "FLASH_INVALID",
                Event::MultipleChoices { .. } => "MULTIPLE_CHOICES",
                Event::Done { .. } => "DONE",
            };
            self.log.borrow_mut().push(format!("{}:{}", self.tag, name));
        }
    }

    #[test]
    fn test_emit_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        notifier.register(Box::new(Tagged {
            tag: "first",
            log: Rc::clone(&log),
        }));
        notifier.register(Box::new(Tagged {
            tag: "second",
            log: Rc::clone(&log),
        }));

        notifier.emit(&Event::FlashInvalid);
        notifier.emit(&Event::Done { accepted: false });

        assert_eq!(
            *log.borrow(),
            vec![
                "first:FLASH_INVALID".to_string(),
                "second:FLASH_INVALID".to_string(),
                "first:DONE".to_string(),
                "second:DONE".to_string(),
            ]
        );
        assert_eq!(notifier.observer_count(), 2);
    }

    #[test]
    fn test_recorder_shares_its_buffer() {
        let recorder = Recorder::new();
        let mut notifier = Notifier::new();
        notifier.register(Box::new(recorder.clone()));

        notifier.emit(&Event::PointerAt { index: 0 });
        notifier.emit(&Event::SelectNode {
            node: "q0".to_string(),
        });

        assert_eq!(
            recorder.events(),
            vec![
                Event::PointerAt { index: 0 },
                Event::SelectNode {
                    node: "q0".to_string()
                },
            ]
        );
        assert_eq!(
            recorder.last(),
            Some(Event::SelectNode {
                node: "q0".to_string()
            })
        );

        recorder.clear();
        assert!(recorder.events().is_empty());
    }
}
