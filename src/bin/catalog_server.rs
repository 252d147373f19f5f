//! Catalog REST API Server
//!
//! ## Usage
//!
//! ```bash
//! # Read-only deployment against Postgres
//! DATABASE_URL=postgresql://localhost/shop cargo run --bin catalog_server --features server
//!
//! # Writable deployment on the in-memory store
//! CATALOG_READ_ONLY=false cargo run --bin catalog_server --features server
//!
//! curl http://localhost:3000/api/category
//! curl http://localhost:3000/api/product?show_inactive=true
//! curl -X POST http://localhost:3000/api/product/{id}/disable
//! ```

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use shop_catalog::api::{create_catalog_router, AppState};
use shop_catalog::store::{CatalogStore, MemoryStore, PgCatalogStore};
use shop_catalog::CatalogService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "shop_catalog=info,tower_http=debug".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let store: Arc<dyn CatalogStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            info!("Connecting to database");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(&database_url)
                .await?;
            let store = PgCatalogStore::new(pool);
            store.ensure_schema().await?;
            Arc::new(store)
        }
        Err(_) => {
            warn!("DATABASE_URL not set, falling back to the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // The observed deployment is read-only; creates return 405 unless opted out
    let read_only = std::env::var("CATALOG_READ_ONLY")
        .map(|v| v != "false")
        .unwrap_or(true);

    let state = AppState {
        catalog: CatalogService::new(store),
        read_only,
    };

    let app = create_catalog_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{port}");
    info!("Starting catalog server on {} (read_only={})", addr, read_only);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
