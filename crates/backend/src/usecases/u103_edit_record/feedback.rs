use chrono::{DateTime, Duration, Utc};

/// Short-lived confirmation shown after a link
///
/// The message carries its own timestamp, so a reader asking after the
/// lifetime is over simply gets nothing back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    message: String,
    shown_at: DateTime<Utc>,
    ttl: Duration,
}

impl Feedback {
    pub fn new(message: impl Into<String>, shown_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at,
            ttl,
        }
    }

    /// Message as seen at `now`
    pub fn message_at(&self, now: DateTime<Utc>) -> Option<&str> {
        (!self.is_expired(now)).then_some(self.message.as_str())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.shown_at + self.ttl
    }
}
