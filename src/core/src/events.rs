use serde_json::Value;
use tokio::sync::broadcast;

/// Typed domain effect fanned out when a user acts on a notification.
///
/// `payload` is the opaque payload the notification was created with
/// (`Value::Null` when it had none).
#[derive(Debug, Clone)]
pub enum DomainEvent {
    Accepted { payload: Value },
    Declined { payload: Value },
    Reply { payload: Value, text: String },
    Opened { payload: Value },
}

/// Broadcast bus collaborators subscribe to for domain events.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    /// Publish an event; having no subscribers is not an error.
    pub fn publish(&self, event: DomainEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        bus.publish(DomainEvent::Opened {
            payload: Value::Null,
        });
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();
        bus.publish(DomainEvent::Accepted {
            payload: serde_json::json!({ "exchangeId": 7 }),
        });
        match rx.recv().await.unwrap() {
            DomainEvent::Accepted { payload } => assert_eq!(payload["exchangeId"], 7),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
