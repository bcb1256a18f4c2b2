use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Business type of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ExchangeRequest,
    ExchangeAccepted,
    ExchangeDeclined,
    MeetingReminder,
    MeetingConfirmed,
    NewMessage,
    MangaAvailable,
    LevelUp,
    RewardUnlocked,
    System,
    Marketing,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExchangeRequest => "exchange_request",
            Self::ExchangeAccepted => "exchange_accepted",
            Self::ExchangeDeclined => "exchange_declined",
            Self::MeetingReminder => "meeting_reminder",
            Self::MeetingConfirmed => "meeting_confirmed",
            Self::NewMessage => "new_message",
            Self::MangaAvailable => "manga_available",
            Self::LevelUp => "level_up",
            Self::RewardUnlocked => "reward_unlocked",
            Self::System => "system",
            Self::Marketing => "marketing",
        }
    }

    /// Unknown labels fall back to `System` rather than failing.
    pub fn from_label(s: &str) -> Self {
        match s {
            "exchange_request" => Self::ExchangeRequest,
            "exchange_accepted" => Self::ExchangeAccepted,
            "exchange_declined" => Self::ExchangeDeclined,
            "meeting_reminder" => Self::MeetingReminder,
            "meeting_confirmed" => Self::MeetingConfirmed,
            "new_message" => Self::NewMessage,
            "manga_available" => Self::MangaAvailable,
            "level_up" => Self::LevelUp,
            "reward_unlocked" => Self::RewardUnlocked,
            "marketing" => Self::Marketing,
            _ => Self::System,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::ExchangeRequest => "🔄",
            Self::ExchangeAccepted => "✅",
            Self::ExchangeDeclined => "❌",
            Self::MeetingReminder => "📅",
            Self::MeetingConfirmed => "🤝",
            Self::NewMessage => "💬",
            Self::MangaAvailable => "📚",
            Self::LevelUp => "🎉",
            Self::RewardUnlocked => "🏆",
            Self::System => "ℹ️",
            Self::Marketing => "📣",
        }
    }

    /// Emoji-prefixed human label used for display titles.
    pub fn label(&self) -> String {
        let name = match self {
            Self::ExchangeRequest => "Exchange request",
            Self::ExchangeAccepted => "Exchange accepted",
            Self::ExchangeDeclined => "Exchange declined",
            Self::MeetingReminder => "Meeting reminder",
            Self::MeetingConfirmed => "Meeting confirmed",
            Self::NewMessage => "New message",
            Self::MangaAvailable => "Manga available",
            Self::LevelUp => "Level up",
            Self::RewardUnlocked => "Reward unlocked",
            Self::System => "Mangatroc",
            Self::Marketing => "Mangatroc news",
        };
        format!("{} {}", self.emoji(), name)
    }
}

/// Delivery priority for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn from_label(s: &str) -> Self {
        match s {
            "low" => Self::Low,
            "high" => Self::High,
            "urgent" => Self::Urgent,
            _ => Self::Normal,
        }
    }
}

/// Discrete user response to a delivered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Accept,
    Decline,
    Reply,
    View,
    Open,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
            Self::Reply => "reply",
            Self::View => "view",
            Self::Open => "open",
        }
    }

    /// Unrecognized identifiers are treated as `Open`, never rejected.
    pub fn from_label(s: &str) -> Self {
        match s {
            "accept" => Self::Accept,
            "decline" => Self::Decline,
            "reply" => Self::Reply,
            "view" => Self::View,
            _ => Self::Open,
        }
    }
}

/// An action button attached to a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub id: String,
    pub label: String,
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ActionDescriptor {
    pub fn new(kind: ActionKind, label: impl Into<String>) -> Self {
        Self {
            id: kind.as_str().to_string(),
            label: label.into(),
            kind,
            payload: None,
        }
    }
}

/// A single entry in the notification history.
///
/// Only `is_read` mutates after creation; everything else is fixed at the
/// moment the record enters the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub kind: NotificationKind,
    pub created_at: u64,
    pub is_read: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_label_round_trips() {
        for kind in [
            NotificationKind::ExchangeRequest,
            NotificationKind::NewMessage,
            NotificationKind::Marketing,
        ] {
            assert_eq!(NotificationKind::from_label(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_kind_falls_back_to_system() {
        assert_eq!(
            NotificationKind::from_label("totally_new"),
            NotificationKind::System
        );
        assert_eq!(NotificationKind::from_label(""), NotificationKind::System);
    }

    #[test]
    fn unknown_action_falls_back_to_open() {
        assert_eq!(ActionKind::from_label("foo"), ActionKind::Open);
        assert_eq!(ActionKind::from_label("decline"), ActionKind::Decline);
    }

    #[test]
    fn label_is_emoji_prefixed() {
        let label = NotificationKind::ExchangeRequest.label();
        assert!(label.starts_with(NotificationKind::ExchangeRequest.emoji()));
    }

    #[test]
    fn record_serde_round_trip() {
        let record = NotificationRecord {
            id: "exchange_request-1".into(),
            title: "🔄 Exchange request".into(),
            body: "One Piece vol.1".into(),
            payload: Some(serde_json::json!({ "exchangeId": 42 })),
            kind: NotificationKind::ExchangeRequest,
            created_at: 1_700_000_000,
            is_read: false,
            priority: Priority::Urgent,
            category: Some("exchange".into()),
            image: None,
            actions: vec![ActionDescriptor::new(ActionKind::Accept, "Accept")],
        };
        let blob = serde_json::to_string(&record).unwrap();
        let parsed: NotificationRecord = serde_json::from_str(&blob).unwrap();
        assert_eq!(parsed, record);
    }
}
