use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::registry::TypeConfigRegistry;
use crate::types::{ActionDescriptor, NotificationKind, NotificationRecord, Priority};

pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Platform notification transport.
///
/// The manager depends only on this shape, not on any specific transport's
/// wire format. Inbound events arrive separately on an mpsc feed of
/// [`TransportEvent`]s owned by whoever constructs the transport.
pub trait Transport: Send + Sync + 'static {
    /// Submit a notification for display, immediate or dated.
    /// Returns the id the platform will report events under.
    fn submit(&self, request: DeliveryRequest) -> TransportFuture<'_, Result<String, String>>;

    /// Best-effort withdrawal of a not-yet-fired notification.
    fn cancel(&self, id: String) -> TransportFuture<'_, Result<(), String>>;

    /// Best-effort withdrawal of every pending notification.
    fn cancel_all(&self) -> TransportFuture<'_, Result<(), String>>;

    /// Register the action categories the platform should render buttons for.
    fn register_categories(
        &self,
        categories: Vec<CategorySpec>,
    ) -> TransportFuture<'_, Result<(), String>>;

    /// Obtain the delivery token identifying this installation.
    fn request_token(&self) -> TransportFuture<'_, Result<String, String>>;
}

/// Foreground display decision, made once per notification at delivery time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
    /// Platform's highest tier; only for urgent-priority notifications.
    pub elevated: bool,
}

impl Presentation {
    pub fn for_priority(priority: Priority) -> Self {
        Self {
            alert: true,
            sound: true,
            badge: true,
            elevated: priority == Priority::Urgent,
        }
    }
}

/// A fully resolved platform notification request.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub payload: Option<Value>,
    pub sound: String,
    pub vibration: Vec<u64>,
    pub priority: Priority,
    pub category: Option<String>,
    pub image: Option<String>,
    pub actions: Vec<ActionDescriptor>,
    /// Absolute fire time; `None` means display immediately.
    pub fire_at: Option<DateTime<Utc>>,
    pub presentation: Presentation,
}

/// Action category the platform renders buttons from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub id: String,
    pub actions: Vec<ActionDescriptor>,
}

/// Raw inbound notification payload as the platform hands it over.
///
/// Every field may be missing; synthesis fills safe defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceivedPush {
    pub id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub kind: Option<String>,
    pub payload: Option<Value>,
}

/// A user interaction with a delivered notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub notification_id: String,
    /// Action identifier; unrecognized values route as "open".
    pub action: String,
    pub payload: Option<Value>,
    /// Free-text input, present for reply actions only.
    pub reply_text: Option<String>,
}

/// Inbound event feed from the platform transport.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    Received(ReceivedPush),
    Responded(ActionResponse),
}

/// Caller-supplied extras for an outgoing notification.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub category: Option<String>,
    pub image: Option<String>,
}

/// Schedules notifications through the platform transport, resolving
/// per-kind presentation config and generating correlation ids.
pub struct DeliveryGateway {
    transport: Arc<dyn Transport>,
    registry: Arc<TypeConfigRegistry>,
    seq: AtomicU64,
}

impl DeliveryGateway {
    pub fn new(transport: Arc<dyn Transport>, registry: Arc<TypeConfigRegistry>) -> Self {
        Self {
            transport,
            registry,
            seq: AtomicU64::new(0),
        }
    }

    /// Ids embed the kind plus a timestamp and a process-wide counter, so
    /// later events can be correlated back to the originating notification.
    fn next_id(&self, kind: NotificationKind) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", kind.as_str(), now_unix_millis(), seq)
    }

    fn build_request(
        &self,
        kind: NotificationKind,
        title: &str,
        body: &str,
        payload: Option<Value>,
        options: &SendOptions,
        fire_at: Option<DateTime<Utc>>,
    ) -> DeliveryRequest {
        let config = self.registry.resolve(kind);
        DeliveryRequest {
            id: self.next_id(kind),
            kind,
            title: title.to_string(),
            body: body.to_string(),
            payload,
            sound: config.sound,
            vibration: config.vibration,
            priority: config.priority,
            category: options.category.clone().or(config.category),
            image: options.image.clone(),
            actions: config.actions,
            fire_at,
            presentation: Presentation::for_priority(config.priority),
        }
    }

    /// Submit for immediate display; resolves with the correlation id.
    pub async fn schedule_immediate(
        &self,
        kind: NotificationKind,
        title: &str,
        body: &str,
        payload: Option<Value>,
        options: &SendOptions,
    ) -> Result<String, String> {
        let request = self.build_request(kind, title, body, payload, options, None);
        self.transport.submit(request).await
    }

    /// Submit deferred until the given absolute time. The platform owns the
    /// timer after submission.
    pub async fn schedule_at(
        &self,
        kind: NotificationKind,
        title: &str,
        body: &str,
        payload: Option<Value>,
        when: DateTime<Utc>,
    ) -> Result<String, String> {
        let request = self.build_request(
            kind,
            title,
            body,
            payload,
            &SendOptions::default(),
            Some(when),
        );
        self.transport.submit(request).await
    }

    pub async fn cancel(&self, id: String) -> Result<(), String> {
        self.transport.cancel(id).await
    }

    pub async fn cancel_all(&self) -> Result<(), String> {
        self.transport.cancel_all().await
    }

    pub async fn register_categories(&self, categories: Vec<CategorySpec>) -> Result<(), String> {
        self.transport.register_categories(categories).await
    }

    pub async fn request_token(&self) -> Result<String, String> {
        self.transport.request_token().await
    }

    /// Turn a raw platform payload into a history record, filling safe
    /// defaults for anything missing (unknown kind becomes `system`).
    pub fn synthesize_record(&self, push: ReceivedPush) -> NotificationRecord {
        let kind = push
            .kind
            .as_deref()
            .map(NotificationKind::from_label)
            .unwrap_or(NotificationKind::System);
        let config = self.registry.resolve(kind);
        NotificationRecord {
            id: push.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: push.title.unwrap_or_default(),
            body: push.body.unwrap_or_default(),
            payload: push.payload,
            kind,
            created_at: now_unix(),
            is_read: false,
            priority: config.priority,
            category: config.category,
            image: None,
            actions: config.actions,
        }
    }
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn now_unix_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
