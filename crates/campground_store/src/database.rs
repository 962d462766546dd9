use sqlx::{PgPool, Row};

/// Database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/yelp_camp";

/// Reads `DATABASE_URL` from the environment, falling back to the local development database.
pub fn database_url_from_env() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Creates a connection pool to the PostgreSQL database.
pub async fn create_connection_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Tests the database connection by executing a simple query.
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    let row = sqlx::query("SELECT 1 as test").fetch_one(pool).await?;

    let test_value: i32 = row.try_get("test")?;
    log::info!(
        "✅ Database connection successful! Test value: {}",
        test_value
    );

    Ok(())
}

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS campgrounds (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title TEXT NOT NULL CHECK (title <> ''),
        location TEXT NOT NULL CHECK (location <> ''),
        image TEXT NOT NULL CHECK (image <> ''),
        price DOUBLE PRECISION NOT NULL CHECK (price >= 0 AND price <> 'NaN'),
        description TEXT NOT NULL CHECK (description <> ''),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        body TEXT,
        rating DOUBLE PRECISION,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS campground_reviews (
        campground_id UUID NOT NULL REFERENCES campgrounds(id) ON DELETE CASCADE,
        review_id UUID NOT NULL UNIQUE REFERENCES reviews(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        PRIMARY KEY (campground_id, position)
    )
    "#,
];

/// Creates the campground tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    log::info!("🗃️ Database schema is up to date");
    Ok(())
}
