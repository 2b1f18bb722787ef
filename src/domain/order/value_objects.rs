use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Lifecycle state of an order as reported by order management
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    New,
    PendingPayment,
    Processing,
    Complete,
    Closed,
    Canceled,
    Holded,
    PaymentReview,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::New => "new",
            OrderState::PendingPayment => "pending_payment",
            OrderState::Processing => "processing",
            OrderState::Complete => "complete",
            OrderState::Closed => "closed",
            OrderState::Canceled => "canceled",
            OrderState::Holded => "holded",
            OrderState::PaymentReview => "payment_review",
        }
    }

    /// Terminal or frozen states that no longer accept a cancellation
    pub fn is_final_or_held(&self) -> bool {
        matches!(
            self,
            OrderState::Complete | OrderState::Closed | OrderState::Canceled | OrderState::Holded
        )
    }
}

/// Billing address captured at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub postcode: String,
    pub city: String,
    pub country_id: String,
}

// ============================================================================
// Unit Tests
// ============================================================================
