use std::sync::Arc;

use dzcart_account::{AccountStore, MemoryAccountStore};

/// Services shared by all route handlers.
pub struct AppServices {
    pub account: Arc<dyn AccountStore>,
}

/// Wire up the service graph.
///
/// The account store is in-memory for now; a relational backend slots in
/// behind the same trait without touching the routes.
pub fn build_services() -> AppServices {
    AppServices {
        account: Arc::new(MemoryAccountStore::new()),
    }
}
