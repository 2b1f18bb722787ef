use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::Order;

// ============================================================================
// Response Shapes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub value: f64,
    pub currency: String,
}

/// Customer-facing view of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    /// Opaque uid, base64 of the entity id
    pub id: String,
    pub number: String,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub state: String,
    pub email: String,
    pub grand_total: Money,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: STANDARD.encode(order.id.to_string()),
            number: order.increment_id.clone(),
            order_date: order.created_at,
            status: order.status.clone(),
            state: order.state.as_str().to_string(),
            email: order.billing_address.email.clone(),
            grand_total: Money {
                value: order.grand_total_cents as f64 / 100.0,
                currency: order.currency_code.clone(),
            },
        }
    }
}

/// Payload returned by the guest request and confirmation actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCancellation {
    pub order: OrderView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_sent_to: Option<String>,
}

/// Result of a cancellation resolver that did not fail outright
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CancellationResponse {
    Cancelled { order: OrderView },
    Guest(GuestCancellation),
    /// Eligibility reasons, returned as-is
    Rejected(Vec<String>),
    Error { error: String },
}

impl CancellationResponse {
    pub fn error(message: impl Into<String>) -> Self {
        CancellationResponse::Error {
            error: message.into(),
        }
    }

    /// Short label used for logs and metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            CancellationResponse::Cancelled { .. } => "cancelled",
            CancellationResponse::Guest(_) => "guest_confirmation",
            CancellationResponse::Rejected(_) => "rejected",
            CancellationResponse::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::fixtures::sample_order;
    use serde_json::json;

    #[test]
    fn test_order_view_formatting() {
        let order = sample_order(5, Some(5));
        let view = OrderView::from(&order);

        assert_eq!(view.id, "NQ==");
        assert_eq!(view.number, "100000005");
        assert_eq!(view.status, "processing");
        assert_eq!(view.grand_total.value, 45.0);
        assert_eq!(view.grand_total.currency, "USD");
    }

    #[test]
    fn test_response_shapes() {
        let rejected = CancellationResponse::Rejected(vec!["no".to_string()]);
        assert_eq!(serde_json::to_value(&rejected).unwrap(), json!(["no"]));

        let error = CancellationResponse::error("boom");
        assert_eq!(serde_json::to_value(&error).unwrap(), json!({"error": "boom"}));

        let order = sample_order(5, Some(5));
        let cancelled = CancellationResponse::Cancelled {
            order: OrderView::from(&order),
        };
        let value = serde_json::to_value(&cancelled).unwrap();
        assert_eq!(value["order"]["number"], "100000005");
        assert_eq!(cancelled.outcome(), "cancelled");
    }
}
