use std::time::Instant;

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::{json, Value};

use super::state::AppState;
use crate::cancellation::RequestContext;
use crate::error::CancellationError;

pub const CUSTOMER_ID_HEADER: &str = "X-Customer-Id";
pub const STORE_HEADER: &str = "Store";

#[derive(Debug, Clone, Copy)]
enum Operation {
    CancelOrder,
    RequestGuestOrderCancel,
    ConfirmCancelOrder,
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::CancelOrder => "cancelOrder",
            Operation::RequestGuestOrderCancel => "requestGuestOrderCancel",
            Operation::ConfirmCancelOrder => "confirmCancelOrder",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct OperationRequest {
    #[serde(default)]
    input: Option<Value>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/graphql/cancelOrder", web::post().to(cancel_order))
        .route(
            "/graphql/requestGuestOrderCancel",
            web::post().to(request_guest_order_cancel),
        )
        .route("/graphql/confirmCancelOrder", web::post().to(confirm_cancel_order))
        .route("/health", web::get().to(health_handler))
        .route("/metrics", web::get().to(metrics_handler));
}

async fn cancel_order(state: web::Data<AppState>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    dispatch(&state, &req, Operation::CancelOrder, &body).await
}

async fn request_guest_order_cancel(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    dispatch(&state, &req, Operation::RequestGuestOrderCancel, &body).await
}

async fn confirm_cancel_order(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    dispatch(&state, &req, Operation::ConfirmCancelOrder, &body).await
}

/// Build the caller's context from request headers
fn request_context(state: &AppState, req: &HttpRequest) -> Result<RequestContext, CancellationError> {
    let store_code = req
        .headers()
        .get(STORE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let store_id = state
        .stores
        .resolve_store_id(store_code)
        .ok_or_else(|| CancellationError::Input("Requested store is not found".to_string()))?;

    let customer_id = req
        .headers()
        .get(CUSTOMER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|id| *id > 0);

    Ok(match customer_id {
        Some(id) => RequestContext::customer(id, store_id),
        None => RequestContext::guest(store_id),
    })
}

async fn dispatch(state: &AppState, req: &HttpRequest, operation: Operation, body: &[u8]) -> HttpResponse {
    let started = Instant::now();

    // A missing or unreadable body is reported by the validator as missing input
    let input = serde_json::from_slice::<OperationRequest>(body)
        .unwrap_or_default()
        .input;

    let result = match request_context(state, req) {
        Ok(context) => {
            let resolver = &state.resolver;
            match operation {
                Operation::CancelOrder => resolver.cancel_order(&context, input.as_ref()).await,
                Operation::RequestGuestOrderCancel => {
                    resolver
                        .request_guest_order_cancel(&context, input.as_ref())
                        .await
                }
                Operation::ConfirmCancelOrder => {
                    resolver.confirm_cancel_order(&context, input.as_ref()).await
                }
            }
        }
        Err(err) => Err(err),
    };

    let outcome = match &result {
        Ok(response) => response.outcome(),
        Err(err) => err.category(),
    };
    state
        .metrics
        .observe(operation.name(), outcome, started.elapsed().as_secs_f64());

    match result {
        Ok(response) => {
            tracing::info!(operation = operation.name(), outcome, "Request completed");
            HttpResponse::Ok().json(json!({ "data": { (operation.name()): response } }))
        }
        Err(err) => error_response(operation, err),
    }
}

fn error_response(operation: Operation, err: CancellationError) -> HttpResponse {
    let status = match &err {
        CancellationError::Input(_) => StatusCode::BAD_REQUEST,
        CancellationError::Authorization(_) => StatusCode::FORBIDDEN,
        CancellationError::NotFound(_) => StatusCode::NOT_FOUND,
        CancellationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = match &err {
        CancellationError::Internal(inner) => {
            tracing::error!(operation = operation.name(), error = %inner, "Request failed");
            "Internal server error".to_string()
        }
        other => {
            tracing::info!(
                operation = operation.name(),
                category = other.category(),
                error = %other,
                "Request rejected"
            );
            other.to_string()
        }
    };

    HttpResponse::build(status).json(json!({
        "errors": [{
            "message": message,
            "path": [operation.name()],
            "extensions": { "category": err.category() }
        }]
    }))
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "order-cancellation"
    }))
}

async fn metrics_handler(state: web::Data<AppState>) -> HttpResponse {
    match state.metrics.encode_text() {
        Ok(buffer) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buffer),
        Err(err) => {
            tracing::error!(error = %err, "Failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{test, App};

    use crate::adapters::InMemoryOrderRepository;
    use crate::config::AppConfig;
    use crate::domain::order::fixtures::sample_order;
    use crate::domain::order::OrderState;
    use crate::metrics::Metrics;

    async fn state_with(orders: Vec<crate::domain::order::Order>) -> web::Data<AppState> {
        let repo = InMemoryOrderRepository::new();
        for order in orders {
            repo.insert(order).await;
        }
        let metrics = Arc::new(Metrics::new().unwrap());
        web::Data::new(AppState::in_memory(&AppConfig::default(), repo, metrics).unwrap())
    }

    #[actix_web::test]
    async fn test_cancel_order_success() {
        let state = state_with(vec![sample_order(5, Some(5))]).await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/graphql/cancelOrder")
            .insert_header((CUSTOMER_ID_HEADER, "5"))
            .set_json(json!({"input": {"order_id": 5, "reason": "changed mind"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["cancelOrder"]["order"]["status"], "canceled");
        assert_eq!(body["data"]["cancelOrder"]["order"]["state"], OrderState::Canceled.as_str());
    }

    #[actix_web::test]
    async fn test_guest_header_gets_authorization_error() {
        let state = state_with(vec![sample_order(5, Some(5))]).await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/graphql/cancelOrder")
            .set_json(json!({"input": {"order_id": 5, "reason": "r"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0]["extensions"]["category"], "graphql-authorization");
        assert_eq!(
            body["errors"][0]["message"],
            "The current customer isn't authorized."
        );
    }

    #[actix_web::test]
    async fn test_missing_body_is_input_error() {
        let state = state_with(vec![]).await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/graphql/requestGuestOrderCancel")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0]["message"], "GuestOrderCancelInput is missing.");
        assert_eq!(body["errors"][0]["extensions"]["category"], "graphql-input");
    }

    #[actix_web::test]
    async fn test_unknown_store_is_input_error() {
        let state = state_with(vec![]).await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/graphql/confirmCancelOrder")
            .insert_header((STORE_HEADER, "fr"))
            .set_json(json!({"input": {"order_id": 1, "confirmation_key": "k"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_guest_token_flow_over_http() {
        let order = sample_order(3, None);
        let state = state_with(vec![order.clone()]).await;
        let token = state.tokens.encrypt(
            &order.increment_id,
            &order.billing_address.email,
            &order.billing_address.postcode,
        ).unwrap();
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/graphql/requestGuestOrderCancel")
            .insert_header((STORE_HEADER, "default"))
            .set_json(json!({"input": {"token": token, "reason": "wrong size"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["data"]["requestGuestOrderCancel"]["confirmation_sent_to"],
            "roni_cost@example.com"
        );
    }

    #[actix_web::test]
    async fn test_unknown_token_is_not_found() {
        let state = state_with(vec![]).await;
        let token = state.tokens.encrypt("1000000123", "a@b.com", "90210").unwrap();
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/graphql/requestGuestOrderCancel")
            .set_json(json!({"input": {"token": token, "reason": "r"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0]["extensions"]["category"], "graphql-no-such-entity");
    }

    #[actix_web::test]
    async fn test_rejected_order_returns_reason_list() {
        let mut order = sample_order(5, Some(5));
        order.shipped_item_count = 1;
        let state = state_with(vec![order]).await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/graphql/cancelOrder")
            .insert_header((CUSTOMER_ID_HEADER, "5"))
            .set_json(json!({"input": {"order_id": 5, "reason": "r"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["data"]["cancelOrder"],
            json!(["Order with one or more items shipped cannot be cancelled"])
        );
    }

    #[actix_web::test]
    async fn test_health_and_metrics_endpoints() {
        let state = state_with(vec![]).await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/graphql/cancelOrder")
            .to_request();
        test::call_service(&app, req).await;

        let health = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(health.status(), StatusCode::OK);

        let metrics = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert_eq!(metrics.status(), StatusCode::OK);
        let body = test::read_body(metrics).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("cancellation_requests_total"));
        assert!(text.contains("graphql-authorization"));
    }
}
