use async_trait::async_trait;

use super::input::{ConfirmCancelOrderInput, GuestOrderCancelInput};
use super::response::GuestCancellation;
use crate::domain::order::Order;
use crate::domain::search::{SearchCriteria, SearchResults};
use crate::error::{ActionError, RepositoryError};

// ============================================================================
// Ports - Collaborators owned by the host platform
// ============================================================================
//
// The cancellation logic only reads orders and asks for transitions.
// Storage, token issuance, order management and store configuration all
// live behind these traits.
//
// ============================================================================

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get(&self, id: i64) -> Result<Order, RepositoryError>;

    async fn get_list(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<SearchResults<Order>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token is not valid base64")]
    Encoding,

    #[error("Token is too short to carry a nonce")]
    Truncated,

    #[error("Token could not be decrypted")]
    Decryption,

    #[error("Token could not be encrypted")]
    Encryption,

    #[error("Token payload is not UTF-8")]
    Payload,
}

/// Guest order token: order number, email and postcode bound together
pub trait TokenCodec: Send + Sync {
    fn encrypt(&self, number: &str, email: &str, postcode: &str) -> Result<String, TokenError>;

    /// Recover the token's fields; callers decide whether the count is usable
    fn decrypt(&self, token: &str) -> Result<Vec<String>, TokenError>;
}

/// Moves an order to the canceled state
#[async_trait]
pub trait CancelOrderAction: Send + Sync {
    async fn execute(&self, order: Order, reason: &str) -> Result<Order, ActionError>;
}

/// Two-step guest cancellation: request issues a confirmation, confirm cancels
#[async_trait]
pub trait GuestCancellationAction: Send + Sync {
    async fn request(
        &self,
        order: Order,
        input: &GuestOrderCancelInput,
    ) -> Result<GuestCancellation, ActionError>;

    async fn confirm(
        &self,
        order: Order,
        input: &ConfirmCancelOrderInput,
    ) -> Result<GuestCancellation, ActionError>;
}

pub trait StoreResolver: Send + Sync {
    /// Resolve a store code to its id; `None` selects the default store
    fn resolve_store_id(&self, code: Option<&str>) -> Option<i64>;

    fn is_cancellation_enabled(&self, store_id: i64) -> bool;
}
