use echomind::Journal;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The server holds exactly one journaling session.
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<RwLock<Journal>>,
}

impl AppState {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal: Arc::new(RwLock::new(journal)),
        }
    }
}
