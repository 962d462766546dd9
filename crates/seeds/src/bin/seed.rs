//! Clears the campground store and inserts freshly generated campgrounds.
//! Run it every time the development database should be reset.

use campground_store::PgCampgroundStore;
use campground_store::database::*;
use seeds::{DEFAULT_SEED_COUNT, generate_campgrounds, seed_campgrounds};

fn seed_count() -> usize {
    match std::env::var("SEED_COUNT") {
        Ok(value) => match value.trim().parse() {
            Ok(count) => count,
            Err(_) => {
                log::warn!(
                    "⚠️ Ignoring invalid SEED_COUNT '{}', using {}",
                    value,
                    DEFAULT_SEED_COUNT
                );
                DEFAULT_SEED_COUNT
            }
        },
        Err(_) => DEFAULT_SEED_COUNT,
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let database_url = database_url_from_env();
    let pool = match create_connection_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("❌ Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_schema(&pool).await {
        log::error!("❌ Failed to create database schema: {}", e);
        pool.close().await;
        std::process::exit(1);
    }

    let count = seed_count();
    let records = generate_campgrounds(&mut rand::rng(), count);
    let store = PgCampgroundStore::new(pool.clone());

    let result = seed_campgrounds(&store, &records).await;
    pool.close().await;

    match result {
        Ok(inserted) => log::info!("✅ Database seeded with {} campgrounds", inserted.len()),
        Err(e) => {
            log::error!("❌ Seeding failed: {}", e);
            std::process::exit(1);
        }
    }
}
