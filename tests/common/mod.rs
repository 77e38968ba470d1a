#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use url_redirector::api::handlers::{health_handler, password_handler, redirect_handler};
use url_redirector::application::services::access_control::password_digest;
use url_redirector::domain::click_event::ClickEvent;
use url_redirector::domain::entities::{LinkRecord, NewClick};
use url_redirector::domain::repositories::LinkRepository;
use url_redirector::error::AppError;
use url_redirector::infrastructure::cache::{CacheService, CachedLink, MemoryCache};
use url_redirector::state::AppState;

/// In-memory durable store standing in for PostgreSQL.
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, LinkRecord>>,
    clicks: Mutex<Vec<NewClick>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            clicks: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, record: LinkRecord) {
        self.links
            .lock()
            .unwrap()
            .insert(record.code.clone(), record);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.links.lock().unwrap().contains_key(code)
    }

    pub fn recorded_clicks(&self) -> Vec<NewClick> {
        self.clicks.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        Ok(self.links.lock().unwrap().get(code).cloned())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.lock().unwrap().remove(code).is_some())
    }

    async fn record_click(&self, click: NewClick) -> Result<(), AppError> {
        self.clicks.lock().unwrap().push(click);
        Ok(())
    }

    async fn touch_last_accessed(&self, code: &str) -> Result<(), AppError> {
        if let Some(record) = self.links.lock().unwrap().get_mut(code) {
            record.last_accessed_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Everything a handler test needs: the server plus direct store handles.
pub struct TestContext {
    pub server: TestServer,
    pub links: Arc<InMemoryLinkRepository>,
    pub cache: Arc<MemoryCache>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

pub fn create_test_context() -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::new());
    let cache = Arc::new(MemoryCache::new(3600));
    let (click_tx, click_rx) = mpsc::channel(100);

    let state = AppState::new(links.clone(), cache.clone(), click_tx);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler).post(password_handler))
        .with_state(state);

    TestContext {
        server: TestServer::new(app).unwrap(),
        links,
        cache,
        click_rx,
    }
}

pub fn link_record(code: &str, destination: &str) -> LinkRecord {
    LinkRecord {
        code: code.to_string(),
        destination: destination.to_string(),
        owner_id: "user_1".to_string(),
        created_at: Utc::now(),
        expires_at: None,
        password_digest: None,
        last_accessed_at: None,
    }
}

/// Seeds a plain link into both stores.
pub async fn seed_link(ctx: &TestContext, code: &str, destination: &str) {
    ctx.links.insert(link_record(code, destination));
    seed_cache_entry(ctx, code, destination, false).await;
}

/// Seeds a password-protected link into both stores; returns the stored digest.
pub async fn seed_protected_link(
    ctx: &TestContext,
    code: &str,
    destination: &str,
    password: &str,
) -> String {
    let digest = password_digest(password);
    let mut record = link_record(code, destination);
    record.password_digest = Some(digest.clone());
    ctx.links.insert(record);
    seed_cache_entry(ctx, code, destination, true).await;
    digest
}

/// Seeds an already-expired link into both stores.
pub async fn seed_expired_link(ctx: &TestContext, code: &str, destination: &str) {
    let mut record = link_record(code, destination);
    record.expires_at = Some(Utc::now() - Duration::hours(1));
    ctx.links.insert(record);
    seed_cache_entry(ctx, code, destination, false).await;
}

/// Seeds the durable store only, leaving the fast cache cold.
pub fn seed_durable_only(ctx: &TestContext, code: &str, destination: &str) {
    ctx.links.insert(link_record(code, destination));
}

pub async fn seed_cache_entry(ctx: &TestContext, code: &str, destination: &str, protected: bool) {
    ctx.cache
        .set_link(
            code,
            &CachedLink {
                destination: destination.to_string(),
                has_password: protected,
            },
            None,
        )
        .await
        .unwrap();
}
