use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Events - Facts recorded by order management
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    CancellationRequested(OrderCancellationRequested),
    Cancelled(OrderCancelled),
}

impl OrderEvent {
    pub fn order_id(&self) -> i64 {
        match self {
            OrderEvent::CancellationRequested(e) => e.order_id,
            OrderEvent::Cancelled(e) => e.order_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::CancellationRequested(_) => "OrderCancellationRequested",
            OrderEvent::Cancelled(_) => "OrderCancelled",
        }
    }
}

/// A guest asked to cancel and must confirm with the issued key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancellationRequested {
    pub order_id: i64,
    pub reason: String,
    pub requested_at: DateTime<Utc>,
}

/// Order moved to the canceled state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub order_id: i64,
    pub reason: String,
    pub cancelled_by: Option<i64>,
    pub cancelled_at: DateTime<Utc>,
}
