// ============================================================================
// Adapters - Implementations of the cancellation ports
// ============================================================================
//
// - memory/ - order storage and order management kept in process
// - token/  - encrypted guest order tokens
// - store/  - store lookup from configuration
//
// ============================================================================

mod memory;
mod store;
mod token;

pub use memory::{ConfirmationNotice, InMemoryOrderManagement, InMemoryOrderRepository, CONFIRMATION_FAILED};
pub use store::ConfiguredStores;
pub use token::EncryptedTokenCodec;
