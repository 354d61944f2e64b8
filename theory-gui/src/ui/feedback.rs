//! Transient feedback surface: toasts, dialog cards, and the stand-in
//! for the device haptic. Every call is fire-and-forget; callers never
//! consume a result and nothing here can fail.

use std::time::{Duration, Instant};

/// A short informational message with an expiry time.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    expires: Instant,
}

/// A dismissible dialog card.
#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub body: String,
}

/// Holds the currently visible toast and dialog, if any.
#[derive(Debug, Default)]
pub struct Feedback {
    toast: Option<Toast>,
    modal: Option<Modal>,
}

impl Feedback {
    /// Shows a toast for `duration`, replacing any visible one.
    pub fn toast(&mut self, message: String, duration: Duration) {
        self.toast = Some(Toast {
            message,
            expires: Instant::now() + duration,
        });
    }

    /// Shows a dialog card, replacing any visible one.
    pub fn modal(&mut self, title: String, body: String) {
        self.modal = Some(Modal { title, body });
    }

    pub fn dismiss_modal(&mut self) {
        self.modal = None;
    }

    /// Stand-in for the device haptic pulse. Fire-and-forget.
    pub fn pulse(&self) {
        eprintln!("[FEEDBACK] pulse");
    }

    /// Clears the toast once its duration has elapsed. Driven by the
    /// application's timer tick.
    pub fn expire_toast(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| Instant::now() >= t.expires)
        {
            self.toast = None;
        }
    }

    pub fn active_toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|t| t.message.as_str())
    }

    pub fn active_modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires_after_its_duration() {
        let mut feedback = Feedback::default();
        feedback.toast("hello".to_string(), Duration::from_millis(0));
        assert_eq!(feedback.active_toast(), Some("hello"));
        feedback.expire_toast();
        assert_eq!(feedback.active_toast(), None);
    }

    #[test]
    fn unexpired_toast_survives_a_tick() {
        let mut feedback = Feedback::default();
        feedback.toast("hold".to_string(), Duration::from_secs(60));
        feedback.expire_toast();
        assert_eq!(feedback.active_toast(), Some("hold"));
    }

    #[test]
    fn modal_stays_until_dismissed() {
        let mut feedback = Feedback::default();
        feedback.modal("标题".to_string(), "正文".to_string());
        feedback.expire_toast();
        assert!(feedback.active_modal().is_some());
        feedback.dismiss_modal();
        assert!(feedback.active_modal().is_none());
    }
}
