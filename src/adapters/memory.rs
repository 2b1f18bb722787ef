use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::cancellation::input::{ConfirmCancelOrderInput, GuestOrderCancelInput};
use crate::cancellation::ports::{CancelOrderAction, GuestCancellationAction, OrderRepository};
use crate::cancellation::response::{GuestCancellation, OrderView};
use crate::domain::order::{Order, OrderCommand, OrderEvent};
use crate::domain::search::{SearchCriteria, SearchResults};
use crate::error::{ActionError, DomainError, RepositoryError};

// ============================================================================
// In-Memory Order Management
// ============================================================================
//
// Stand-ins for the host platform's order storage and order management.
// The order map is the source of truth; actions reload the order from it
// before applying a command so a stale copy can never be written back.
//
// ============================================================================

pub const CONFIRMATION_FAILED: &str = "The order cancellation could not be confirmed.";

/// Events and notices kept for inspection; older entries are dropped
pub const HISTORY_LIMIT: usize = 256;

type OrderMap = Arc<RwLock<HashMap<i64, Order>>>;

/// Order storage keyed by entity id
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: OrderMap,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get(&self, id: i64) -> Result<Order, RepositoryError> {
        self.orders
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NoSuchEntity { id })
    }

    async fn get_list(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<SearchResults<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        let mut candidates: Vec<Order> = orders.values().cloned().collect();
        // Stable default order for callers that do not sort
        candidates.sort_by_key(|o| o.id);
        Ok(criteria.apply(candidates))
    }
}

/// Confirmation key sent to a guest, as an email sender would deliver it
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationNotice {
    pub order_id: i64,
    pub email: String,
    pub confirmation_key: String,
}

#[derive(Debug, Clone)]
struct PendingCancellation {
    confirmation_key: String,
    reason: String,
}

#[derive(Default)]
struct ManagementState {
    pending: HashMap<i64, PendingCancellation>,
    events: VecDeque<OrderEvent>,
    notices: VecDeque<ConfirmationNotice>,
}

impl ManagementState {
    fn record_events(&mut self, events: Vec<OrderEvent>) {
        self.events.extend(events);
        while self.events.len() > HISTORY_LIMIT {
            self.events.pop_front();
        }
    }

    fn record_notice(&mut self, notice: ConfirmationNotice) {
        self.notices.push_back(notice);
        while self.notices.len() > HISTORY_LIMIT {
            self.notices.pop_front();
        }
    }
}

/// Applies cancellation commands to orders held by an `InMemoryOrderRepository`
#[derive(Clone)]
pub struct InMemoryOrderManagement {
    orders: OrderMap,
    state: Arc<Mutex<ManagementState>>,
}

impl InMemoryOrderManagement {
    pub fn new(repository: &InMemoryOrderRepository) -> Self {
        Self {
            orders: repository.orders.clone(),
            state: Arc::new(Mutex::new(ManagementState::default())),
        }
    }

    /// Every event recorded so far, oldest first
    pub async fn events(&self) -> Vec<OrderEvent> {
        self.state.lock().await.events.iter().cloned().collect()
    }

    /// Confirmation notices that would have been emailed
    pub async fn notices(&self) -> Vec<ConfirmationNotice> {
        self.state.lock().await.notices.iter().cloned().collect()
    }

    fn current(orders: &HashMap<i64, Order>, id: i64) -> Result<Order, ActionError> {
        orders
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Order {} is not held by order management", id).into())
    }
}

#[async_trait]
impl CancelOrderAction for InMemoryOrderManagement {
    async fn execute(&self, order: Order, reason: &str) -> Result<Order, ActionError> {
        let mut orders = self.orders.write().await;
        let mut current = Self::current(&orders, order.id)?;

        let events = current.handle_command(&OrderCommand::CancelOrder {
            reason: reason.to_string(),
            cancelled_by: current.customer_id,
        })?;
        for event in &events {
            current.apply_event(event);
        }

        orders.insert(current.id, current.clone());

        let mut state = self.state.lock().await;
        state.pending.remove(&current.id);
        state.record_events(events);

        tracing::info!(order_id = current.id, "✅ Order cancelled");

        Ok(current)
    }
}

#[async_trait]
impl GuestCancellationAction for InMemoryOrderManagement {
    async fn request(
        &self,
        order: Order,
        input: &GuestOrderCancelInput,
    ) -> Result<GuestCancellation, ActionError> {
        let orders = self.orders.read().await;
        let current = Self::current(&orders, order.id)?;

        let events = current.handle_command(&OrderCommand::RequestCancellation {
            reason: input.reason.clone(),
        })?;

        let confirmation_key = Uuid::new_v4().simple().to_string();
        let email = current.billing_address.email.clone();

        let mut state = self.state.lock().await;
        state.pending.insert(
            current.id,
            PendingCancellation {
                confirmation_key: confirmation_key.clone(),
                reason: input.reason.clone(),
            },
        );
        state.record_events(events);
        state.record_notice(ConfirmationNotice {
            order_id: current.id,
            email: email.clone(),
            confirmation_key,
        });

        tracing::info!(order_id = current.id, "📧 Guest cancellation confirmation issued");

        Ok(GuestCancellation {
            order: OrderView::from(&current),
            confirmation_sent_to: Some(email),
        })
    }

    async fn confirm(
        &self,
        order: Order,
        input: &ConfirmCancelOrderInput,
    ) -> Result<GuestCancellation, ActionError> {
        let mut orders = self.orders.write().await;
        let mut current = Self::current(&orders, order.id)?;

        let mut state = self.state.lock().await;
        let pending = match state.pending.get(&current.id) {
            Some(pending) if pending.confirmation_key == input.confirmation_key => pending.clone(),
            _ => {
                tracing::warn!(order_id = current.id, "Guest cancellation confirmation rejected");
                return Err(DomainError::new(CONFIRMATION_FAILED).into());
            }
        };

        let events = current.handle_command(&OrderCommand::CancelOrder {
            reason: pending.reason,
            cancelled_by: None,
        })?;
        for event in &events {
            current.apply_event(event);
        }

        orders.insert(current.id, current.clone());
        state.pending.remove(&current.id);
        state.record_events(events);

        tracing::info!(order_id = current.id, "✅ Guest order cancelled after confirmation");

        Ok(GuestCancellation {
            order: OrderView::from(&current),
            confirmation_sent_to: None,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
