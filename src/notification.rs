//! Read diagnostics.
//!
//! Non-fatal issues found while decoding a `.MAP` file (an inconsistent
//! section offset, a missing drawing tool chain, an object with no geometry)
//! are collected as [`Notification`] items on the owning
//! [`MapFile`](crate::io::map::MapFile) instead of being dropped.
//! Fatal problems are always returned as [`MitabError`](crate::MitabError).

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Structure the reader knows about but does not decode.
    NotSupported,
    /// Suspicious but usable data.
    Warning,
    /// A failure that was contained (e.g. tool table could not be loaded).
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single notification produced during reading.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The severity / category.
    pub notification_type: NotificationType,
    /// Feature the notification relates to, if any.
    pub feature_id: Option<i32>,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            feature_id: None,
            message: message.into(),
        }
    }

    /// Attach the feature id.
    pub fn with_feature(mut self, id: i32) -> Self {
        self.feature_id = Some(id);
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.feature_id {
            Some(id) => write!(f, "[{}] feature {}: {}", self.notification_type, id, self.message),
            None => write!(f, "[{}] {}", self.notification_type, self.message),
        }
    }
}

/// Collects notifications for the lifetime of a file handle.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(%notification, "read notification");
        self.items.push(notification);
    }

    /// Record a notification without feature context.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.push(Notification::new(notification_type, message));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// All notifications raised for one feature.
    pub fn for_feature(&self, id: i32) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.feature_id == Some(id)).collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::Warning, "w1");
        c.push(Notification::new(NotificationType::Error, "e1").with_feature(3));

        assert_eq!(c.len(), 2);
        assert!(c.has_type(NotificationType::Error));
        assert!(!c.has_type(NotificationType::NotSupported));
        assert_eq!(c.for_feature(3).len(), 1);
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::Warning, "section offset mismatch").with_feature(12);
        assert_eq!(format!("{}", n), "[Warning] feature 12: section offset mismatch");
    }
}
