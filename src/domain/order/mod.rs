// ============================================================================
// Order Domain - Business Logic for Orders
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderState, BillingAddress)
// - Events (OrderCancellationRequested, OrderCancelled)
// - Commands (RequestCancellation, CancelOrder)
// - Errors (OrderError enum)
// - Aggregate (Order with its cancellation transition rules)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
