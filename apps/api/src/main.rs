use std::sync::Arc;

use anyhow::{bail, Context};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod health;
mod router;

use appointment_cell::SlotConflictService;
use shared_config::{AppConfig, StoreBackend};
use shared_database::{DocumentStore, MemoryStore, SharedStore, SupabaseClient};

fn connect_store(config: &AppConfig) -> anyhow::Result<SharedStore> {
    match config.store_backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Supabase => {
            if config.supabase_url.is_empty() {
                bail!("STORE_BACKEND=supabase requires SUPABASE_URL");
            }
            Ok(Arc::new(SupabaseClient::new(config)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Medical Booking API server");

    let config = AppConfig::from_env();

    let store = connect_store(&config)?;
    info!("Using {} document store", store.backend_name());

    SlotConflictService::new(store.clone())
        .install_slot_index()
        .await
        .context("failed to install the appointment slot index")?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router::create_router(store)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
