use std::sync::Arc;

use serde::Serialize;

use super::ports::StoreResolver;
use crate::domain::order::Order;

pub const CANCELLATION_DISABLED: &str = "Order cancellation is not enabled for requested store.";
pub const ORDER_CLOSED: &str = "Order already closed, complete, cancelled or on hold";
pub const ITEMS_SHIPPED: &str = "Order with one or more items shipped cannot be cancelled";

/// Reasons blocking a cancellation; empty means the order may be canceled
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EligibilityResult(Vec<String>);

impl EligibilityResult {
    pub fn is_eligible(&self) -> bool {
        self.0.is_empty()
    }

    pub fn reasons(&self) -> &[String] {
        &self.0
    }

    pub fn into_reasons(self) -> Vec<String> {
        self.0
    }
}

/// Decides whether an order's current state allows a cancellation
#[derive(Clone)]
pub struct EligibilityPolicy {
    stores: Arc<dyn StoreResolver>,
}

impl EligibilityPolicy {
    pub fn new(stores: Arc<dyn StoreResolver>) -> Self {
        Self { stores }
    }

    /// Collect every blocking reason, in rule order
    pub fn check(&self, order: &Order) -> EligibilityResult {
        let mut reasons = Vec::new();

        if !self.stores.is_cancellation_enabled(order.store_id) {
            reasons.push(CANCELLATION_DISABLED.to_string());
        }

        if order.state.is_final_or_held() {
            reasons.push(ORDER_CLOSED.to_string());
        }

        if order.shipped_item_count > 0 {
            reasons.push(ITEMS_SHIPPED.to_string());
        }

        EligibilityResult(reasons)
    }
}
