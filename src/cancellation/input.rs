use serde::{Deserialize, Serialize};

// ============================================================================
// Request Inputs - Typed after validation
// ============================================================================

/// Who is calling and from which store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    pub customer_id: Option<i64>,
    pub is_customer: bool,
    pub store_id: i64,
}

impl RequestContext {
    pub fn customer(customer_id: i64, store_id: i64) -> Self {
        Self {
            customer_id: Some(customer_id),
            is_customer: true,
            store_id,
        }
    }

    pub fn guest(store_id: i64) -> Self {
        Self {
            customer_id: None,
            is_customer: false,
            store_id,
        }
    }
}

/// `cancelOrder` input of an authenticated customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderInput {
    pub order_id: i64,
    pub reason: String,
}

/// `requestGuestOrderCancel` input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestOrderCancelInput {
    pub token: String,
    pub reason: String,
}

/// `confirmCancelOrder` input of a guest following the emailed link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmCancelOrderInput {
    pub order_id: i64,
    pub confirmation_key: String,
}
