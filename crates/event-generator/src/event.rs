//! The ecommerce event record.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::generator::GeneratorError;

/// Kind of shopper action an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    View,
    AddToCart,
    Purchase,
}

impl EventType {
    /// All event types, in the order used by `EventMix` weights.
    pub const ALL: [EventType; 3] = [EventType::View, EventType::AddToCart, EventType::Purchase];

    /// Wire name of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::View => "view",
            EventType::AddToCart => "add_to_cart",
            EventType::Purchase => "purchase",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            EventType::View => 0,
            EventType::AddToCart => 1,
            EventType::Purchase => 2,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GeneratorError::UnknownEventType(s.to_string()))
    }
}

/// One synthetic ecommerce event.
///
/// Events are immutable once built: the fields are only readable through
/// accessors, and an event never refers to another one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    user_id: Uuid,
    event_type: EventType,
    product: String,
    timestamp: DateTime<Local>,
    amount: f64,
}

impl Event {
    pub fn new(
        user_id: Uuid,
        event_type: EventType,
        product: impl Into<String>,
        timestamp: DateTime<Local>,
        amount: f64,
    ) -> Self {
        Self {
            user_id,
            event_type,
            product: product.into(),
            timestamp,
            amount,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Encode the event as a JSON document.
    pub fn to_json(&self) -> Result<Vec<u8>, GeneratorError> {
        serde_json::to_vec(self).map_err(GeneratorError::Encoding)
    }

    /// First eight characters of the user id, used in log lines.
    pub fn short_user_id(&self) -> String {
        self.user_id.simple().to_string()[..8].to_string()
    }
}
