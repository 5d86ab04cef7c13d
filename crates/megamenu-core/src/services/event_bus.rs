use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum MenuEvent {
    ItemsReplaced { count: usize },
    ItemAdded { parent_id: Option<String>, id: String },
    ItemUpdated { id: String },
    ItemDeleted { id: String },
    MenuReset,
    ThemeChanged { theme: Theme },
    UserChanged { user_id: Option<String> },
}

#[derive(Debug, Clone, Serialize)]
pub struct StateEvent {
    pub at: DateTime<Utc>,
    pub event: MenuEvent,
}

/// Change notifications for collaborators rendering the state.
pub struct EventBus {
    tx: broadcast::Sender<StateEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: MenuEvent) {
        let state_event = StateEvent {
            at: Utc::now(),
            event,
        };
        if let Err(e) = self.tx.send(state_event) {
            debug!("Menu event dropped (no subscribers): {:?}", e.0.event);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_published_events() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(MenuEvent::ItemDeleted { id: "1".into() });
        let received = rx.try_recv().unwrap();
        assert_eq!(received.event, MenuEvent::ItemDeleted { id: "1".into() });
    }

    #[test]
    fn test_publish_without_subscribers_is_harmless() {
        EventBus::new(8).publish(MenuEvent::MenuReset);
    }

    #[test]
    fn test_event_serialization_shape() {
        let json = serde_json::to_value(MenuEvent::ThemeChanged { theme: Theme::Dark }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "theme_changed", "payload": {"theme": "dark"}}));
    }
}
