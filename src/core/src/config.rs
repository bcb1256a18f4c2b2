/// When the app badge count resets.
///
/// The platform increments the badge on every delivery; which moment clears
/// it again is a product decision, so both policies are expressible here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeReset {
    /// Badge mirrors the unread count; it drops as records are marked read.
    OnMarkRead,
    /// Badge counts deliveries since the app was last foregrounded.
    OnForeground,
}

/// Lifecycle manager configuration.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Maximum number of records kept in history (default: 100).
    pub history_cap: usize,
    /// Storage key the serialized history lives under.
    pub history_key: String,
    /// Storage key the delivery token lives under.
    pub token_key: String,
    /// Buffer size of the domain event bus.
    pub event_capacity: usize,
    /// Badge reset policy (default: on mark-read).
    pub badge_reset: BadgeReset,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            history_cap: 100,
            history_key: "notifications.history".to_string(),
            token_key: "notifications.token".to_string(),
            event_capacity: 64,
            badge_reset: BadgeReset::OnMarkRead,
        }
    }
}
