use std::sync::Arc;

use serde_json::Value;

use super::eligibility::EligibilityPolicy;
use super::input::RequestContext;
use super::locator::OrderLocator;
use super::ports::{CancelOrderAction, GuestCancellationAction};
use super::response::{CancellationResponse, GuestCancellation, OrderView};
use super::validator::{
    validate_confirm_request, validate_customer_request, validate_guest_request,
    CUSTOMER_NOT_AUTHORIZED,
};
use crate::error::{ActionError, CancellationError};

// ============================================================================
// Cancellation Resolvers
// ============================================================================
//
// Requested -> Validated -> Located -> EligibilityChecked
//           -> Canceled | Rejected(reasons) | Errored(message)
//
// Validation, authorization and not-found failures abort with an error.
// Eligibility reasons and domain failures come back as response data.
// One attempt per call, no retries.
//
// ============================================================================

pub struct CancellationResolver {
    locator: OrderLocator,
    eligibility: EligibilityPolicy,
    cancel_action: Arc<dyn CancelOrderAction>,
    guest_action: Arc<dyn GuestCancellationAction>,
}

impl CancellationResolver {
    pub fn new(
        locator: OrderLocator,
        eligibility: EligibilityPolicy,
        cancel_action: Arc<dyn CancelOrderAction>,
        guest_action: Arc<dyn GuestCancellationAction>,
    ) -> Self {
        Self {
            locator,
            eligibility,
            cancel_action,
            guest_action,
        }
    }

    /// `cancelOrder`: an authenticated customer cancels one of their orders
    pub async fn cancel_order(
        &self,
        context: &RequestContext,
        input: Option<&Value>,
    ) -> Result<CancellationResponse, CancellationError> {
        let input = validate_customer_request(context, input)?;
        let customer_id = context
            .customer_id
            .ok_or_else(|| CancellationError::Authorization(CUSTOMER_NOT_AUTHORIZED.to_string()))?;

        tracing::debug!(order_id = input.order_id, customer_id, "Cancel order requested");

        let order = match self
            .locator
            .locate_for_customer(customer_id, input.order_id)
            .await?
        {
            Ok(order) => order,
            Err(err) => return Ok(CancellationResponse::error(err.message)),
        };

        let eligibility = self.eligibility.check(&order);
        if !eligibility.is_eligible() {
            tracing::info!(
                order_id = order.id,
                reasons = ?eligibility.reasons(),
                "Order is not eligible for cancellation"
            );
            return Ok(CancellationResponse::Rejected(eligibility.into_reasons()));
        }

        match self.cancel_action.execute(order, &input.reason).await {
            Ok(order) => Ok(CancellationResponse::Cancelled {
                order: OrderView::from(&order),
            }),
            Err(err) => Self::recover(err),
        }
    }

    /// `requestGuestOrderCancel`: a guest asks to cancel using their order token
    pub async fn request_guest_order_cancel(
        &self,
        context: &RequestContext,
        input: Option<&Value>,
    ) -> Result<CancellationResponse, CancellationError> {
        let input = validate_guest_request(input)?;

        let order = self
            .locator
            .locate_guest_by_token(&input.token, context.store_id)
            .await?;

        tracing::debug!(order_id = order.id, store_id = context.store_id, "Guest cancellation requested");

        let eligibility = self.eligibility.check(&order);
        if !eligibility.is_eligible() {
            return Ok(CancellationResponse::Rejected(eligibility.into_reasons()));
        }

        Self::guest_outcome(self.guest_action.request(order, &input).await)
    }

    /// `confirmCancelOrder`: a guest confirms with the key they were sent
    pub async fn confirm_cancel_order(
        &self,
        _context: &RequestContext,
        input: Option<&Value>,
    ) -> Result<CancellationResponse, CancellationError> {
        let input = validate_confirm_request(input)?;

        let order = match self
            .locator
            .locate_for_guest_confirmation(input.order_id)
            .await?
        {
            Ok(order) => order,
            Err(err) => return Ok(CancellationResponse::error(err.message)),
        };

        let eligibility = self.eligibility.check(&order);
        if !eligibility.is_eligible() {
            return Ok(CancellationResponse::Rejected(eligibility.into_reasons()));
        }

        Self::guest_outcome(self.guest_action.confirm(order, &input).await)
    }

    fn guest_outcome(
        result: Result<GuestCancellation, ActionError>,
    ) -> Result<CancellationResponse, CancellationError> {
        match result {
            Ok(payload) => Ok(CancellationResponse::Guest(payload)),
            Err(err) => Self::recover(err),
        }
    }

    /// Domain failures become `{error}`; anything else is a fault
    fn recover(err: ActionError) -> Result<CancellationResponse, CancellationError> {
        match err {
            ActionError::Domain(err) => {
                tracing::info!(error = %err, "Cancellation refused by order management");
                Ok(CancellationResponse::error(err.message))
            }
            ActionError::Internal(err) => {
                tracing::error!(error = %err, "Cancellation action failed");
                Err(CancellationError::Internal(err))
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
