// ============================================================================
// Order Cancellation - Request handling for customers and guests
// ============================================================================
//
// Flow: raw input -> validator -> locator -> eligibility -> action -> response
//
// ============================================================================

pub mod eligibility;
pub mod input;
pub mod locator;
pub mod ports;
pub mod response;
pub mod resolver;
pub mod validator;

pub use eligibility::{EligibilityPolicy, EligibilityResult};
pub use input::{CancelOrderInput, ConfirmCancelOrderInput, GuestOrderCancelInput, RequestContext};
pub use locator::OrderLocator;
pub use ports::{
    CancelOrderAction, GuestCancellationAction, OrderRepository, StoreResolver, TokenCodec,
    TokenError,
};
pub use resolver::CancellationResolver;
pub use response::{CancellationResponse, GuestCancellation, OrderView};
