// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    RequestCancellation {
        reason: String,
    },
    CancelOrder {
        reason: String,
        cancelled_by: Option<i64>,
    },
}
