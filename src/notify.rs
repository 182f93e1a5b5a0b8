//! Outbound notifications.
//!
//! Lifecycle transitions announce themselves to the affected parties after
//! the transition has committed. Delivery is strictly fire-and-forget: a
//! notifier that fails must never unwind a committed transition, so the
//! dispatch path swallows errors and logs them instead.

use uuid::Uuid;

/// A delivery backend for workflow notifications.
pub trait Notifier: Send + Sync {
    /// Attempts to deliver one notification to one recipient.
    fn deliver(&self, recipient: Uuid, subject: &str, message: &str) -> Result<(), String>;
}

/// Sends a notification, logging the outcome. Delivery failures are logged
/// at warn level and discarded.
pub fn dispatch(notifier: &dyn Notifier, recipient: Uuid, subject: &str, message: &str) {
    match notifier.deliver(recipient, subject, message) {
        Ok(()) => {
            tracing::info!(%recipient, subject, "notification delivered");
        }
        Err(reason) => {
            tracing::warn!(%recipient, subject, reason, "notification delivery failed");
        }
    }
}

/// Default backend: writes each notification to the log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn deliver(&self, recipient: Uuid, subject: &str, message: &str) -> Result<(), String> {
        tracing::info!(%recipient, subject, message, "notification");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn deliver(&self, _recipient: Uuid, _subject: &str, _message: &str) -> Result<(), String> {
            Err("smtp unreachable".to_string())
        }
    }

    struct RecordingNotifier {
        sent: Mutex<Vec<(Uuid, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn deliver(&self, recipient: Uuid, subject: &str, _message: &str) -> Result<(), String> {
            self.sent
                .lock()
                .unwrap()
                .push((recipient, subject.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_swallows_delivery_failure() {
        // Must not panic or propagate.
        dispatch(&FailingNotifier, Uuid::new_v4(), "subject", "body");
    }

    #[test]
    fn test_dispatch_reaches_backend() {
        let notifier = RecordingNotifier {
            sent: Mutex::new(Vec::new()),
        };
        let recipient = Uuid::new_v4();
        dispatch(&notifier, recipient, "Leave request approved", "body");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, recipient);
        assert_eq!(sent[0].1, "Leave request approved");
    }
}
