use std::sync::{Arc, Mutex};

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod docs;
mod error;
mod insights;
mod model;
mod models;
mod routes;
mod seed;
mod storage;
mod store;
#[cfg(test)]
mod test_support;

use config::Config;
use insights::{GeminiInsights, InsightProvider};
use storage::{FileStorage, MemoryStorage};
use store::AttendanceStore;

use crate::docs::ApiDoc;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Tros attendance is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    // without a data directory state lives in memory until restart
    let store = match FileStorage::open(&config.data_dir) {
        Ok(storage) => AttendanceStore::load(storage, config.default_theme),
        Err(e) => {
            error!(error = %e, data_dir = %config.data_dir, "Cannot open data directory, keeping state in memory");
            AttendanceStore::load(MemoryStorage::new(), config.default_theme)
        }
    };
    let store = Data::new(Mutex::new(store));

    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set, insight reports will use the fallback text");
    }
    let provider: Arc<dyn InsightProvider> = Arc::new(GeminiInsights::from_config(&config));
    let provider = Data::from(provider);

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(store.clone())
            .app_data(Data::new(config.clone()))
            .app_data(provider.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(&server_addr)
    .with_context(|| format!("cannot bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
