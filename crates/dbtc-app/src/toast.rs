//! Transient notifications

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A notification shown in the corner until it expires.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }

    fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant, lifetime: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expiry() {
        let toast = Toast::success("Source updated successfully");
        let lifetime = Duration::from_secs(6);
        assert!(!toast.is_expired(toast.shown_at, lifetime));
        assert!(!toast.is_expired(toast.shown_at + Duration::from_secs(5), lifetime));
        assert!(toast.is_expired(toast.shown_at + lifetime, lifetime));
    }

    #[test]
    fn test_toast_levels() {
        assert_eq!(Toast::error("boom").level, ToastLevel::Error);
        assert_eq!(Toast::success("ok").level, ToastLevel::Success);
    }
}
