//! Outbound notification purposes.
//!
//! Each purpose maps to at most one configured webhook endpoint; the
//! stable names below are the `webhook_endpoints.purpose` column values.

use serde::{Deserialize, Serialize};

/// What an outbound notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum NotificationPurpose {
    /// A new version is ready for the client to preview.
    PreviewReady,
    /// An order was confirmed as paid.
    Payment,
    /// A new briefing arrived.
    Briefing,
    /// The chatbot relay handled an intent.
    Chatbot,
    /// A client submitted feedback or approved.
    Feedback,
}

impl NotificationPurpose {
    /// All purposes, in a stable order (used when listing configuration).
    pub const ALL: [NotificationPurpose; 5] = [
        NotificationPurpose::PreviewReady,
        NotificationPurpose::Payment,
        NotificationPurpose::Briefing,
        NotificationPurpose::Chatbot,
        NotificationPurpose::Feedback,
    ];

    /// Stable snake_case name matching the stored column value.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationPurpose::PreviewReady => "preview_ready",
            NotificationPurpose::Payment => "payment",
            NotificationPurpose::Briefing => "briefing",
            NotificationPurpose::Chatbot => "chatbot",
            NotificationPurpose::Feedback => "feedback",
        }
    }

    /// Parse a stored purpose name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for NotificationPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_all_purposes() {
        for purpose in NotificationPurpose::ALL {
            assert_eq!(NotificationPurpose::parse(purpose.as_str()), Some(purpose));
        }
        assert_eq!(NotificationPurpose::parse("smoke_signal"), None);
    }

    #[test]
    fn test_serde_names_match_as_str() {
        let json = serde_json::to_string(&NotificationPurpose::PreviewReady).unwrap();
        assert_eq!(json, "\"preview_ready\"");
    }
}
