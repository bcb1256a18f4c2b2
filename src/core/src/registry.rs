use std::collections::HashMap;

use crate::types::{ActionDescriptor, ActionKind, NotificationKind, Priority};

/// Presentation and behavior settings for one notification kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeConfig {
    pub sound: String,
    /// Vibration pattern as millisecond durations.
    pub vibration: Vec<u64>,
    pub priority: Priority,
    pub category: Option<String>,
    pub actions: Vec<ActionDescriptor>,
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            sound: "default".to_string(),
            vibration: Vec::new(),
            priority: Priority::Normal,
            category: None,
            actions: Vec::new(),
        }
    }
}

/// Immutable kind → config table, built once at startup.
///
/// `resolve` is total: kinds without an entry get the default config.
pub struct TypeConfigRegistry {
    table: HashMap<NotificationKind, TypeConfig>,
}

impl TypeConfigRegistry {
    pub fn new() -> Self {
        let mut table = HashMap::new();

        table.insert(
            NotificationKind::ExchangeRequest,
            TypeConfig {
                sound: "exchange".to_string(),
                vibration: vec![0, 250, 250, 250],
                priority: Priority::Urgent,
                category: Some("exchange".to_string()),
                actions: vec![
                    ActionDescriptor::new(ActionKind::Accept, "Accept"),
                    ActionDescriptor::new(ActionKind::Decline, "Decline"),
                ],
            },
        );
        table.insert(
            NotificationKind::ExchangeAccepted,
            TypeConfig {
                sound: "exchange".to_string(),
                vibration: vec![0, 150],
                priority: Priority::High,
                category: Some("exchange".to_string()),
                actions: vec![ActionDescriptor::new(ActionKind::View, "View")],
            },
        );
        table.insert(
            NotificationKind::ExchangeDeclined,
            TypeConfig {
                sound: "default".to_string(),
                vibration: vec![0, 150],
                priority: Priority::Normal,
                category: Some("exchange".to_string()),
                actions: vec![ActionDescriptor::new(ActionKind::View, "View")],
            },
        );
        table.insert(
            NotificationKind::MeetingReminder,
            TypeConfig {
                sound: "reminder".to_string(),
                vibration: vec![0, 250, 100, 250],
                priority: Priority::High,
                category: Some("meeting".to_string()),
                actions: vec![ActionDescriptor::new(ActionKind::View, "View")],
            },
        );
        table.insert(
            NotificationKind::MeetingConfirmed,
            TypeConfig {
                sound: "default".to_string(),
                vibration: vec![0, 150],
                priority: Priority::Normal,
                category: Some("meeting".to_string()),
                actions: Vec::new(),
            },
        );
        table.insert(
            NotificationKind::NewMessage,
            TypeConfig {
                sound: "message".to_string(),
                vibration: vec![0, 200],
                priority: Priority::High,
                category: Some("chat".to_string()),
                actions: vec![ActionDescriptor::new(ActionKind::Reply, "Reply")],
            },
        );
        table.insert(
            NotificationKind::MangaAvailable,
            TypeConfig {
                sound: "default".to_string(),
                vibration: vec![0, 150],
                priority: Priority::Normal,
                category: Some("catalog".to_string()),
                actions: vec![ActionDescriptor::new(ActionKind::View, "View")],
            },
        );
        table.insert(
            NotificationKind::LevelUp,
            TypeConfig {
                sound: "reward".to_string(),
                vibration: vec![0, 100, 100, 100],
                priority: Priority::Normal,
                category: Some("progress".to_string()),
                actions: Vec::new(),
            },
        );
        table.insert(
            NotificationKind::RewardUnlocked,
            TypeConfig {
                sound: "reward".to_string(),
                vibration: vec![0, 100, 100, 100],
                priority: Priority::Normal,
                category: Some("progress".to_string()),
                actions: vec![ActionDescriptor::new(ActionKind::View, "View")],
            },
        );
        table.insert(
            NotificationKind::Marketing,
            TypeConfig {
                sound: "default".to_string(),
                vibration: Vec::new(),
                priority: Priority::Low,
                category: Some("news".to_string()),
                actions: Vec::new(),
            },
        );

        Self { table }
    }

    /// Resolve the config for a kind, falling back to the default.
    pub fn resolve(&self, kind: NotificationKind) -> TypeConfig {
        self.table.get(&kind).cloned().unwrap_or_default()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&NotificationKind, &TypeConfig)> {
        self.table.iter()
    }
}

impl Default for TypeConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_kind_resolves_to_default() {
        let registry = TypeConfigRegistry::new();
        let config = registry.resolve(NotificationKind::System);
        assert_eq!(config, TypeConfig::default());
        assert_eq!(config.priority, Priority::Normal);
        assert!(config.actions.is_empty());
    }

    #[test]
    fn exchange_request_is_urgent_with_accept_decline() {
        let registry = TypeConfigRegistry::new();
        let config = registry.resolve(NotificationKind::ExchangeRequest);
        assert_eq!(config.priority, Priority::Urgent);
        let kinds: Vec<ActionKind> = config.actions.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ActionKind::Accept, ActionKind::Decline]);
    }

    #[test]
    fn resolve_never_mutates_the_table() {
        let registry = TypeConfigRegistry::new();
        let first = registry.resolve(NotificationKind::NewMessage);
        let second = registry.resolve(NotificationKind::NewMessage);
        assert_eq!(first, second);
    }
}
