//! Shared fixtures for handler tests.

use std::sync::{Arc, Mutex};

use actix_web::{
    App, Error,
    body::BoxBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web::Data,
};
use anyhow::anyhow;
use async_trait::async_trait;

use crate::auth::jwt::generate_access_token;
use crate::config::Config;
use crate::insights::InsightProvider;
use crate::model::attendance::AttendanceRecord;
use crate::model::theme::Theme;
use crate::model::user::User;
use crate::routes;
use crate::storage::MemoryStorage;
use crate::store::{AttendanceStore, SharedStore};

/// Insight provider answering with a canned report, or failing when `None`.
pub struct CannedInsights(pub Option<String>);

#[async_trait]
impl InsightProvider for CannedInsights {
    async fn generate(&self, _: &[User], _: &[AttendanceRecord]) -> anyhow::Result<String> {
        self.0.clone().ok_or_else(|| anyhow!("insight service unavailable"))
    }
}

pub struct TestState {
    pub storage: MemoryStorage,
    pub store: Data<SharedStore>,
    pub config: Data<Config>,
    pub provider: Data<dyn InsightProvider>,
}

impl TestState {
    pub fn new() -> Self {
        Self::with_provider(CannedInsights(None))
    }

    pub fn with_report(report: &str) -> Self {
        Self::with_provider(CannedInsights(Some(report.to_string())))
    }

    fn with_provider(provider: CannedInsights) -> Self {
        let storage = MemoryStorage::new();
        let store = AttendanceStore::load(storage.clone(), Theme::Light);
        let provider: Arc<dyn InsightProvider> = Arc::new(provider);
        Self {
            storage,
            store: Data::new(Mutex::new(store)),
            config: Data::new(Config::for_tests()),
            provider: Data::from(provider),
        }
    }
}

pub fn app(
    state: &TestState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    > + use<>,
> {
    let config = state.config.get_ref().clone();
    App::new()
        .app_data(state.store.clone())
        .app_data(state.config.clone())
        .app_data(state.provider.clone())
        .configure(|cfg| routes::configure(cfg, config))
}

/// Signs a token for a seeded user without going through `/auth/login`.
pub fn login_as(state: &TestState, username: &str) -> String {
    let store = state.store.lock().unwrap();
    let user = store
        .users()
        .iter()
        .find(|u| u.username == username)
        .unwrap();
    generate_access_token(user, &state.config.jwt_secret, state.config.access_token_ttl).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
