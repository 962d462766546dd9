//! Main entry point for the YelpCamp server.
//! This crate wires the campground store into the web handlers and serves the site.

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use campground_store::database::*;
use campground_store::{CampgroundStore, MemoryCampgroundStore, PgCampgroundStore};
use sqlx::PgPool;
use web_handlers::*;

mod config;
use config::{ServerConfig, StoreBackend};

/// Opens the configured store. The pool is returned too so it can be closed on shutdown.
async fn open_store(config: &ServerConfig) -> (Arc<dyn CampgroundStore>, Option<PgPool>) {
    match config.store_backend {
        StoreBackend::Memory => {
            log::warn!("⚠️ Using the in-memory store, data is lost on restart");
            (Arc::new(MemoryCampgroundStore::new()), None)
        }
        StoreBackend::Postgres => {
            let pool = match create_connection_pool(&config.database_url).await {
                Ok(pool) => {
                    log::info!("🗃️ Database pool created successfully");

                    if let Err(e) = test_connection(&pool).await {
                        log::error!("❌ Database connection test failed: {}", e);
                    }
                    pool
                }
                Err(e) => {
                    log::error!("❌ Failed to create database pool: {}", e);
                    log::error!(
                        "💡 Make sure PostgreSQL is running and DATABASE_URL points at it"
                    );
                    std::process::exit(1);
                }
            };

            if let Err(e) = ensure_schema(&pool).await {
                log::error!("❌ Failed to create database schema: {}", e);
                std::process::exit(1);
            }

            (Arc::new(PgCampgroundStore::new(pool.clone())), Some(pool))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting YelpCamp server...");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let (store, pool) = open_store(&config).await;

    log::info!("🌐 Server will be available at: http://{}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(store.clone()))
            .wrap(MethodOverride)
            .wrap(Logger::default())
            .configure(configure_routes)
            .default_service(web::to(not_found))
    })
    .bind(&config.bind_address)?
    .run()
    .await?;

    if let Some(pool) = pool {
        pool.close().await;
        log::info!("🗃️ Database pool closed");
    }

    Ok(())
}
