use serde_json::{Map, Value};

use super::input::{CancelOrderInput, ConfirmCancelOrderInput, GuestOrderCancelInput, RequestContext};
use crate::domain::order::Order;
use crate::error::CancellationError;

// ============================================================================
// Request Validator
// ============================================================================
//
// Fails fast on the first missing or malformed field, in declaration order.
// Runs before any repository access.
//
// ============================================================================

pub const CUSTOMER_NOT_AUTHORIZED: &str = "The current customer isn't authorized.";
pub const ORDER_NOT_AUTHORIZED: &str = "Current user is not authorized to cancel this order";
pub const LOGIN_REQUIRED: &str = "Please login to view the order.";
pub const CANNOT_LOCATE_ORDER: &str = "We couldn't locate an order with the information provided.";

fn missing_parameter(field: &str) -> CancellationError {
    CancellationError::Input(format!(
        "Required parameter \"{}\" is missing or incorrect.",
        field
    ))
}

fn input_object<'a>(
    input: Option<&'a Value>,
    input_type: &str,
) -> Result<&'a Map<String, Value>, CancellationError> {
    match input {
        Some(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(CancellationError::Input(format!("{} is missing.", input_type))),
    }
}

/// Non-zero integer id; numeric strings are accepted as GraphQL `ID`s
fn required_id(map: &Map<String, Value>, field: &str) -> Result<i64, CancellationError> {
    let id = match map.get(field) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match id {
        Some(id) if id != 0 => Ok(id),
        _ => Err(missing_parameter(field)),
    }
}

fn required_string(map: &Map<String, Value>, field: &str) -> Result<String, CancellationError> {
    match map.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(missing_parameter(field)),
    }
}

/// Ensure the customer is authorized and the cancel input is populated
pub fn validate_customer_request(
    context: &RequestContext,
    input: Option<&Value>,
) -> Result<CancelOrderInput, CancellationError> {
    if !context.is_customer || context.customer_id.is_none() {
        return Err(CancellationError::Authorization(
            CUSTOMER_NOT_AUTHORIZED.to_string(),
        ));
    }

    let map = input_object(input, "CancelOrderInput")?;

    Ok(CancelOrderInput {
        order_id: required_id(map, "order_id")?,
        reason: required_string(map, "reason")?,
    })
}

/// Ensure the input to cancel a guest order is valid
pub fn validate_guest_request(
    input: Option<&Value>,
) -> Result<GuestOrderCancelInput, CancellationError> {
    let map = input_object(input, "GuestOrderCancelInput")?;

    Ok(GuestOrderCancelInput {
        token: required_string(map, "token")?,
        reason: required_string(map, "reason")?,
    })
}

/// Ensure the guest confirmation input is valid
pub fn validate_confirm_request(
    input: Option<&Value>,
) -> Result<ConfirmCancelOrderInput, CancellationError> {
    let map = input_object(input, "ConfirmCancelOrderInput")?;

    Ok(ConfirmCancelOrderInput {
        order_id: required_id(map, "order_id")?,
        confirmation_key: required_string(map, "confirmation_key")?,
    })
}

/// Ensure a guest order matches the details carried by the token.
///
/// A wrong postcode and a wrong email produce the same error as an unknown
/// order number.
pub fn validate_order_details(
    order: &Order,
    postcode: &str,
    email: &str,
) -> Result<(), CancellationError> {
    let billing = &order.billing_address;
    if billing.postcode != postcode || billing.email != email {
        return Err(cannot_locate_order());
    }

    if order.customer_id.is_some() {
        return Err(CancellationError::Authorization(LOGIN_REQUIRED.to_string()));
    }

    Ok(())
}

pub fn cannot_locate_order() -> CancellationError {
    CancellationError::NotFound(CANNOT_LOCATE_ORDER.to_string())
}

// ============================================================================
// Unit Tests
// ============================================================================
