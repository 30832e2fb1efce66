//! Domain events published after catalog writes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope carried by every published event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub id: Uuid,
    pub occurred_on: DateTime<Utc>,
    pub correlation_id: Option<String>,
    pub payload: EventPayload,
}

impl DomainEvent {
    /// Wrap a payload with a fresh id, timestamp and correlation id.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_on: Utc::now(),
            correlation_id: Some(Uuid::new_v4().to_string()),
            payload,
        }
    }

    /// Name of the event type, e.g. `ProductCreated`
    pub fn event_type(&self) -> &'static str {
        match self.payload {
            EventPayload::ProductCreated(_) => "ProductCreated",
        }
    }
}

/// Event payloads, tagged by type on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum EventPayload {
    ProductCreated(ProductCreated),
}

/// A catalog entry was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: Uuid,
    pub product_name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub created_by_user_id: Uuid,
}
