// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Order aggregate and the search criteria used to look orders up.
// Nothing in here knows about HTTP, tokens or the request context.
//
// ============================================================================

pub mod order;
pub mod search;
