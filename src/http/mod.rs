// ============================================================================
// HTTP Transport - GraphQL-style endpoints over actix-web
// ============================================================================
//
// POST /graphql/cancelOrder
// POST /graphql/requestGuestOrderCancel
// POST /graphql/confirmCancelOrder
// GET  /health
// GET  /metrics
//
// ============================================================================

mod handlers;
mod state;

pub use handlers::{configure, CUSTOMER_ID_HEADER, STORE_HEADER};
pub use state::AppState;
