use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::*;
use super::value_objects::{BillingAddress, OrderState};
use crate::domain::search::{FieldValue, Searchable};

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // Identity
    pub id: i64,
    pub increment_id: String,
    pub store_id: i64,

    // Ownership (no customer id means a guest checkout)
    pub customer_id: Option<i64>,
    pub customer_is_guest: bool,

    // Current State
    pub state: OrderState,
    pub status: String,
    pub billing_address: BillingAddress,
    pub shipped_item_count: u32,
    pub grand_total_cents: i64,
    pub currency_code: String,

    // Audit Trail
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub cancellation_reason: Option<String>,
}

impl Order {
    pub fn is_guest(&self) -> bool {
        self.customer_is_guest && self.customer_id.is_none()
    }

    /// Validate that the order may still leave its current state
    fn validate_cancelable(&self) -> Result<(), OrderError> {
        match self.state {
            OrderState::Canceled => return Err(OrderError::AlreadyCancelled),
            state if state.is_final_or_held() => {
                return Err(OrderError::InvalidStateTransition(state))
            }
            _ => {}
        }

        if self.shipped_item_count > 0 {
            return Err(OrderError::ItemsShipped);
        }

        Ok(())
    }

    fn validate_reason(reason: &str) -> Result<(), OrderError> {
        if reason.trim().is_empty() {
            return Err(OrderError::EmptyReason);
        }
        Ok(())
    }

    /// Handle command and emit events (business logic)
    pub fn handle_command(&self, command: &OrderCommand) -> Result<Vec<OrderEvent>, OrderError> {
        match command {
            OrderCommand::RequestCancellation { reason } => {
                Self::validate_reason(reason)?;
                self.validate_cancelable()?;

                Ok(vec![OrderEvent::CancellationRequested(OrderCancellationRequested {
                    order_id: self.id,
                    reason: reason.clone(),
                    requested_at: Utc::now(),
                })])
            }

            OrderCommand::CancelOrder { reason, cancelled_by } => {
                Self::validate_reason(reason)?;
                self.validate_cancelable()?;

                Ok(vec![OrderEvent::Cancelled(OrderCancelled {
                    order_id: self.id,
                    reason: reason.clone(),
                    cancelled_by: *cancelled_by,
                    cancelled_at: Utc::now(),
                })])
            }
        }
    }

    /// Apply an event to update state
    pub fn apply_event(&mut self, event: &OrderEvent) {
        match event {
            OrderEvent::CancellationRequested(e) => {
                self.updated_at = e.requested_at;
            }
            OrderEvent::Cancelled(e) => {
                self.state = OrderState::Canceled;
                self.status = OrderState::Canceled.as_str().to_string();
                self.cancellation_reason = Some(e.reason.clone());
                self.updated_at = e.cancelled_at;
            }
        }
    }
}

impl Searchable for Order {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "entity_id" => Some(FieldValue::Int(self.id)),
            "increment_id" => Some(FieldValue::Text(self.increment_id.clone())),
            "store_id" => Some(FieldValue::Int(self.store_id)),
            "customer_id" => self.customer_id.map(FieldValue::Int),
            "customer_email" => Some(FieldValue::Text(self.billing_address.email.clone())),
            "state" => Some(FieldValue::Text(self.state.as_str().to_string())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "created_at" => Some(FieldValue::Text(self.created_at.to_rfc3339())),
            _ => None,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
