use serde_json::Value;

use crate::events::{DomainEvent, EventBus};
use crate::types::ActionKind;

/// Maps an inbound user action to a domain event on the bus.
///
/// Stateless fan-out: `view`, `open` and any unrecognized identifier all
/// resolve to `Opened`, so routing cannot fail.
pub struct ActionRouter {
    bus: EventBus,
}

impl ActionRouter {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    pub fn route(&self, action: &str, payload: Option<Value>, reply_text: Option<String>) {
        let payload = payload.unwrap_or(Value::Null);
        let event = match ActionKind::from_label(action) {
            ActionKind::Accept => DomainEvent::Accepted { payload },
            ActionKind::Decline => DomainEvent::Declined { payload },
            ActionKind::Reply => DomainEvent::Reply {
                payload,
                text: reply_text.unwrap_or_default(),
            },
            ActionKind::View | ActionKind::Open => DomainEvent::Opened { payload },
        };
        self.bus.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn make_router() -> (ActionRouter, tokio::sync::broadcast::Receiver<DomainEvent>) {
        let bus = EventBus::new(8);
        let rx = bus.subscribe();
        (ActionRouter::new(bus), rx)
    }

    #[test]
    fn decline_routes_with_payload() {
        let (router, mut rx) = make_router();
        router.route(
            "decline",
            Some(serde_json::json!({ "exchangeId": 42 })),
            None,
        );
        match rx.try_recv().unwrap() {
            DomainEvent::Declined { payload } => assert_eq!(payload["exchangeId"], 42),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn reply_carries_free_text() {
        let (router, mut rx) = make_router();
        router.route("reply", None, Some("see you at 6".to_string()));
        match rx.try_recv().unwrap() {
            DomainEvent::Reply { payload, text } => {
                assert_eq!(payload, Value::Null);
                assert_eq!(text, "see you at 6");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn unknown_action_falls_back_to_opened() {
        let (router, mut rx) = make_router();
        router.route("foo", Some(serde_json::json!({ "x": 1 })), None);
        match rx.try_recv().unwrap() {
            DomainEvent::Opened { payload } => assert_eq!(payload["x"], 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn view_routes_as_opened() {
        let (router, mut rx) = make_router();
        router.route("view", None, None);
        assert!(matches!(
            rx.try_recv().unwrap(),
            DomainEvent::Opened { .. }
        ));
    }
}
