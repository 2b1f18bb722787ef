use super::value_objects::OrderState;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order is already cancelled")]
    AlreadyCancelled,

    #[error("Cannot cancel order in state: {}", .0.as_str())]
    InvalidStateTransition(OrderState),

    #[error("Order with one or more items shipped cannot be cancelled")]
    ItemsShipped,

    #[error("A cancellation reason is required")]
    EmptyReason,
}
