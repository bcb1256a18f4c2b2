use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::{BadgeReset, ManagerConfig};
use crate::events::{DomainEvent, EventBus};
use crate::gateway::{
    ActionResponse, CategorySpec, DeliveryGateway, ReceivedPush, SendOptions, Transport,
    TransportEvent,
};
use crate::history::{HistoryFilter, NotificationStore};
use crate::registry::TypeConfigRegistry;
use crate::router::ActionRouter;
use crate::storage::Store;
use crate::types::{NotificationKind, NotificationRecord};

/// Failure surfaced by the manager's public API.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The platform transport rejected or failed the operation.
    #[error("transport: {0}")]
    Transport(String),
    /// Durable storage failed; in-memory state is still committed.
    #[error("persistence: {0}")]
    Persistence(String),
    /// The notification was submitted and recorded in memory, but the
    /// snapshot write failed. Carries the correlation id so the caller
    /// can still track the scheduled notification.
    #[error("notification {id} not persisted: {error}")]
    NotPersisted { id: String, error: String },
}

/// Orchestrates the notification lifecycle: scheduling through the platform
/// transport, the persistent history, read-state accounting and action
/// routing.
///
/// One instance owns the history for the whole application. It is built
/// explicitly and shared via `Arc`; direct API calls and transport events
/// both funnel through the same internal mutex, so mutations never
/// interleave.
pub struct LifecycleManager {
    config: ManagerConfig,
    history: tokio::sync::Mutex<NotificationStore>,
    gateway: DeliveryGateway,
    router: ActionRouter,
    bus: EventBus,
    registry: Arc<TypeConfigRegistry>,
    store: Arc<dyn Store>,
    token: std::sync::Mutex<Option<String>>,
    initialized: AtomicBool,
    delivered_since_foreground: AtomicU64,
}

impl LifecycleManager {
    pub fn new(
        config: ManagerConfig,
        store: Arc<dyn Store>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let registry = Arc::new(TypeConfigRegistry::new());
        let bus = EventBus::new(config.event_capacity);
        let history = NotificationStore::new(
            store.clone(),
            config.history_cap,
            config.history_key.clone(),
        );
        Self {
            gateway: DeliveryGateway::new(transport, registry.clone()),
            router: ActionRouter::new(bus.clone()),
            history: tokio::sync::Mutex::new(history),
            bus,
            registry,
            store,
            token: std::sync::Mutex::new(None),
            initialized: AtomicBool::new(false),
            delivered_since_foreground: AtomicU64::new(0),
            config,
        }
    }

    /// Register categories, obtain the delivery token and restore history.
    ///
    /// Idempotent: a second call is a no-op. Transport failures leave the
    /// manager in a degraded mode (no token) rather than aborting.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }

        let categories: Vec<CategorySpec> = self
            .registry
            .entries()
            .filter(|(_, config)| !config.actions.is_empty())
            .map(|(kind, config)| CategorySpec {
                id: config
                    .category
                    .clone()
                    .unwrap_or_else(|| kind.as_str().to_string()),
                actions: config.actions.clone(),
            })
            .collect();
        if let Err(e) = self.gateway.register_categories(categories).await {
            warn!("failed to register notification categories: {e}");
        }

        match self.gateway.request_token().await {
            Ok(token) => {
                if let Err(e) = self.store.set(&self.config.token_key, &token) {
                    warn!("failed to persist delivery token: {e}");
                }
                if let Ok(mut slot) = self.token.lock() {
                    *slot = Some(token);
                }
            }
            Err(e) => {
                warn!("no delivery token, continuing degraded: {e}");
            }
        }

        self.history.lock().await.load();
        debug!("notification manager initialized");
    }

    /// Send a notification for immediate display and record it in history.
    ///
    /// The display title is derived from the kind's emoji-prefixed label.
    /// Resolves with the correlation id once submission and the persistence
    /// attempt have both completed; a persistence failure is reported even
    /// though the in-memory record is committed.
    pub async fn send(
        &self,
        kind: NotificationKind,
        title: &str,
        body: &str,
        payload: Option<Value>,
        options: SendOptions,
    ) -> Result<String, ManagerError> {
        let title = display_title(kind, title);
        let id = self
            .gateway
            .schedule_immediate(kind, &title, body, payload.clone(), &options)
            .await
            .map_err(ManagerError::Transport)?;

        let config = self.registry.resolve(kind);
        let record = NotificationRecord {
            id: id.clone(),
            title,
            body: body.to_string(),
            payload,
            kind,
            created_at: now_unix(),
            is_read: false,
            priority: config.priority,
            category: options.category.or(config.category),
            image: options.image,
            actions: config.actions,
        };

        let mut history = self.history.lock().await;
        let persisted = history.add(record);
        drop(history);
        self.delivered_since_foreground
            .fetch_add(1, Ordering::Relaxed);
        if let Err(e) = persisted {
            warn!("notification recorded in memory but not persisted: {e}");
            return Err(ManagerError::NotPersisted { id, error: e });
        }
        Ok(id)
    }

    /// Schedule a notification for a future absolute time.
    ///
    /// No history record is created now; one is added when the platform
    /// delivers it and the received event comes back.
    pub async fn schedule(
        &self,
        kind: NotificationKind,
        title: &str,
        body: &str,
        payload: Option<Value>,
        when: DateTime<Utc>,
    ) -> Result<String, ManagerError> {
        let title = display_title(kind, title);
        self.gateway
            .schedule_at(kind, &title, body, payload, when)
            .await
            .map_err(ManagerError::Transport)
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<(), ManagerError> {
        self.history
            .lock()
            .await
            .mark_read(id)
            .map(|_| ())
            .map_err(ManagerError::Persistence)
    }

    pub async fn mark_all_as_read(&self) -> Result<(), ManagerError> {
        self.history
            .lock()
            .await
            .mark_all_read()
            .map_err(ManagerError::Persistence)
    }

    pub async fn clear_history(&self) -> Result<(), ManagerError> {
        self.history
            .lock()
            .await
            .clear()
            .map_err(ManagerError::Persistence)
    }

    /// Best-effort cancel of a pending notification. The corresponding
    /// history record, if any, is deliberately left in place.
    pub async fn cancel(&self, id: &str) -> Result<(), ManagerError> {
        self.gateway
            .cancel(id.to_string())
            .await
            .map_err(ManagerError::Transport)
    }

    pub async fn cancel_all(&self) -> Result<(), ManagerError> {
        self.gateway
            .cancel_all()
            .await
            .map_err(ManagerError::Transport)
    }

    pub async fn get_history(&self, filter: HistoryFilter) -> Vec<NotificationRecord> {
        self.history.lock().await.list(&filter)
    }

    pub async fn get_unread_count(&self) -> usize {
        self.history.lock().await.unread_count()
    }

    pub fn get_delivery_token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<DomainEvent> {
        self.bus.subscribe()
    }

    /// Current badge value under the configured reset policy.
    pub async fn badge_count(&self) -> u64 {
        match self.config.badge_reset {
            BadgeReset::OnMarkRead => self.get_unread_count().await as u64,
            BadgeReset::OnForeground => self.delivered_since_foreground.load(Ordering::Relaxed),
        }
    }

    /// Tell the manager the app came to the foreground, resetting the
    /// delivery counter used by the `OnForeground` badge policy.
    pub fn note_foregrounded(&self) {
        self.delivered_since_foreground.store(0, Ordering::Relaxed);
    }

    /// Handle a notification presented while the app is active.
    ///
    /// Locally-sent notifications are echoed back by the platform under the
    /// same id; the id guard keeps them from being recorded twice.
    pub async fn handle_received(&self, push: ReceivedPush) {
        let record = self.gateway.synthesize_record(push);
        let mut history = self.history.lock().await;
        if history.contains(&record.id) {
            debug!(id = %record.id, "ignoring echoed notification");
            return;
        }
        if let Err(e) = history.add(record) {
            warn!("received notification not persisted: {e}");
        }
        drop(history);
        self.delivered_since_foreground
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Handle a user interaction: mark the record read, then fan the action
    /// out as a domain event.
    pub async fn handle_response(&self, response: ActionResponse) {
        let mut history = self.history.lock().await;
        if let Err(e) = history.mark_read(&response.notification_id) {
            warn!("read-state not persisted: {e}");
        }
        drop(history);
        self.router
            .route(&response.action, response.payload, response.reply_text);
    }

    /// Consume the transport event feed on a background task.
    pub fn spawn_event_pump(
        self: Arc<Self>,
        mut rx: mpsc::Receiver<TransportEvent>,
    ) -> tokio::task::JoinHandle<()> {
        let manager = self;
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    TransportEvent::Received(push) => manager.handle_received(push).await,
                    TransportEvent::Responded(response) => {
                        manager.handle_response(response).await
                    }
                }
            }
        })
    }
}

fn display_title(kind: NotificationKind, title: &str) -> String {
    if title.is_empty() {
        kind.label()
    } else {
        format!("{} {}", kind.emoji(), title)
    }
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
