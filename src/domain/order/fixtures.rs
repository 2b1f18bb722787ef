use chrono::Utc;

use super::aggregate::Order;
use super::value_objects::{BillingAddress, OrderState};

/// A processing order in store 1 with nothing shipped yet
pub(crate) fn sample_order(id: i64, customer_id: Option<i64>) -> Order {
    let now = Utc::now();
    Order {
        id,
        increment_id: format!("{:09}", 100_000_000 + id),
        store_id: 1,
        customer_id,
        customer_is_guest: customer_id.is_none(),
        state: OrderState::Processing,
        status: "processing".to_string(),
        billing_address: BillingAddress {
            firstname: "Veronica".to_string(),
            lastname: "Costello".to_string(),
            email: "roni_cost@example.com".to_string(),
            postcode: "49628-7978".to_string(),
            city: "Calder".to_string(),
            country_id: "US".to_string(),
        },
        shipped_item_count: 0,
        grand_total_cents: 4_500,
        currency_code: "USD".to_string(),
        created_at: now,
        updated_at: now,
        cancellation_reason: None,
    }
}
