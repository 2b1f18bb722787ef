use std::sync::Arc;

use super::ports::{OrderRepository, TokenCodec};
use super::validator::{cannot_locate_order, validate_order_details, ORDER_NOT_AUTHORIZED};
use crate::domain::order::Order;
use crate::domain::search::{Filter, SearchCriteria};
use crate::error::{CancellationError, DomainError, RepositoryError};

// ============================================================================
// Order Locator
// ============================================================================
//
// Id lookups return a nested result: the outer error aborts the call, the
// inner `DomainError` is a user-facing failure the resolver reports as
// `{error}`. Token lookups never report partial matches.
//
// ============================================================================

pub type Lookup = Result<Order, DomainError>;

#[derive(Clone)]
pub struct OrderLocator {
    orders: Arc<dyn OrderRepository>,
    tokens: Arc<dyn TokenCodec>,
}

impl OrderLocator {
    pub fn new(orders: Arc<dyn OrderRepository>, tokens: Arc<dyn TokenCodec>) -> Self {
        Self { orders, tokens }
    }

    async fn get(&self, order_id: i64) -> Result<Lookup, CancellationError> {
        match self.orders.get(order_id).await {
            Ok(order) => Ok(Ok(order)),
            Err(err @ RepositoryError::NoSuchEntity { .. }) => {
                Ok(Err(DomainError::new(err.to_string())))
            }
            Err(RepositoryError::Backend(err)) => Err(CancellationError::Internal(err)),
        }
    }

    /// Load an order the authenticated customer owns
    pub async fn locate_for_customer(
        &self,
        customer_id: i64,
        order_id: i64,
    ) -> Result<Lookup, CancellationError> {
        let order = match self.get(order_id).await? {
            Ok(order) => order,
            Err(err) => return Ok(Err(err)),
        };

        if order.customer_id != Some(customer_id) {
            tracing::warn!(
                order_id,
                customer_id,
                "Customer attempted to cancel an order they do not own"
            );
            return Err(CancellationError::Authorization(
                ORDER_NOT_AUTHORIZED.to_string(),
            ));
        }

        Ok(Ok(order))
    }

    /// Load a guest order for the confirmation step
    pub async fn locate_for_guest_confirmation(
        &self,
        order_id: i64,
    ) -> Result<Lookup, CancellationError> {
        let order = match self.get(order_id).await? {
            Ok(order) => order,
            Err(err) => return Ok(Err(err)),
        };

        if !order.is_guest() {
            return Ok(Err(DomainError::new(ORDER_NOT_AUTHORIZED)));
        }

        Ok(Ok(order))
    }

    /// Resolve a guest token to its order in the given store
    pub async fn locate_guest_by_token(
        &self,
        token: &str,
        store_id: i64,
    ) -> Result<Order, CancellationError> {
        let parts = match self.tokens.decrypt(token) {
            Ok(parts) if parts.len() == 3 => parts,
            Ok(parts) => {
                tracing::debug!(part_count = parts.len(), "Guest token has wrong shape");
                return Err(cannot_locate_order());
            }
            Err(err) => {
                tracing::debug!(error = %err, "Guest token rejected");
                return Err(cannot_locate_order());
            }
        };
        let (number, email, postcode) = (&parts[0], &parts[1], &parts[2]);

        let criteria = SearchCriteria::builder()
            .add_filter(Filter::eq("increment_id", number.as_str()))
            .add_filter(Filter::eq("store_id", store_id))
            .build();

        let results = match self.orders.get_list(&criteria).await {
            Ok(results) => results,
            Err(RepositoryError::NoSuchEntity { .. }) => return Err(cannot_locate_order()),
            Err(RepositoryError::Backend(err)) => return Err(CancellationError::Internal(err)),
        };

        let order = results
            .items
            .into_iter()
            .next()
            .ok_or_else(cannot_locate_order)?;

        validate_order_details(&order, postcode, email)?;

        Ok(order)
    }
}
