//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::Resolver;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Per-process wiring shared by all requests.
///
/// Requests share nothing mutable beyond the stores themselves; each visit is
/// an independent computation over this state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub links: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
    pub click_tx: mpsc::Sender<ClickEvent>,
}

impl AppState {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        click_tx: mpsc::Sender<ClickEvent>,
    ) -> Self {
        let resolver = Arc::new(Resolver::new(links.clone(), cache.clone()));
        Self {
            resolver,
            links,
            cache,
            click_tx,
        }
    }
}
