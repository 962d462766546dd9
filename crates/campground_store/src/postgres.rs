use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;
use validator::Validate;

use crate::store::{CampgroundStore, validate_batch};
use crate::types::*;

const SELECT_CAMPGROUNDS: &str = r#"
    SELECT
        c.id, c.title, c.location, c.image, c.price, c.description,
        c.created_at, c.updated_at,
        COALESCE(
            array_agg(cr.review_id ORDER BY cr.position)
                FILTER (WHERE cr.review_id IS NOT NULL),
            '{}'
        ) AS reviews
    FROM campgrounds c
    LEFT JOIN campground_reviews cr ON cr.campground_id = c.id
"#;

/// Campground store backed by PostgreSQL.
///
/// Reviews live in their own table; the ownership edge is the
/// `campground_reviews` table, ordered by `position`.
#[derive(Clone)]
pub struct PgCampgroundStore {
    pool: PgPool,
}

impl PgCampgroundStore {
    /// Creates a new instance of `PgCampgroundStore` with the provided database connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_one(
        conn: &mut PgConnection,
        record: &NewCampground,
    ) -> Result<Campground, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO campgrounds (title, location, image, price, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id, title, location, image, price, description,
                created_at, updated_at, '{}'::uuid[] AS reviews
            "#,
        )
        .bind(&record.title)
        .bind(&record.location)
        .bind(&record.image)
        .bind(record.price)
        .bind(&record.description)
        .fetch_one(conn)
        .await?;

        Ok(campground_from_row(&row)?)
    }
}

fn campground_from_row(row: &PgRow) -> Result<Campground, sqlx::Error> {
    Ok(Campground {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        location: row.try_get("location")?,
        image: row.try_get("image")?,
        price: row.try_get("price")?,
        description: row.try_get("description")?,
        reviews: row.try_get("reviews")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn review_from_row(row: &PgRow) -> Result<Review, sqlx::Error> {
    Ok(Review {
        id: row.try_get("id")?,
        body: row.try_get("body")?,
        rating: row.try_get("rating")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl CampgroundStore for PgCampgroundStore {
    async fn find_all(&self) -> Result<Vec<Campground>, StoreError> {
        let query = format!("{SELECT_CAMPGROUNDS} GROUP BY c.id ORDER BY c.created_at");
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let campgrounds = rows
            .iter()
            .map(campground_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(campgrounds)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Campground>, StoreError> {
        let query = format!("{SELECT_CAMPGROUNDS} WHERE c.id = $1 GROUP BY c.id");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(campground_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, record: &NewCampground) -> Result<Campground, StoreError> {
        record.validate()?;

        let mut conn = self.pool.acquire().await?;
        let campground = Self::insert_one(&mut conn, record).await?;
        log::debug!("Inserted campground {}", campground.id);
        Ok(campground)
    }

    async fn insert_many(&self, records: &[NewCampground]) -> Result<Vec<Campground>, StoreError> {
        validate_batch(records)?;

        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(records.len());
        for record in records {
            stored.push(Self::insert_one(&mut tx, record).await?);
        }
        tx.commit().await?;

        log::debug!("Inserted {} campgrounds", stored.len());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &CampgroundPatch,
    ) -> Result<Option<Campground>, StoreError> {
        patch.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE campgrounds
            SET title = COALESCE($1, title),
                location = COALESCE($2, location),
                image = COALESCE($3, image),
                price = COALESCE($4, price),
                description = COALESCE($5, description),
                updated_at = NOW()
            WHERE id = $6
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.location)
        .bind(&patch.image)
        .bind(patch.price)
        .bind(&patch.description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        log::debug!("Updated campground {}", id);
        self.find_by_id(id).await
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Same row lock as add_review, so no review can be linked mid-delete
        let owner = sqlx::query("SELECT id FROM campgrounds WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if owner.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "DELETE FROM reviews WHERE id IN (SELECT review_id FROM campground_reviews WHERE campground_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM campgrounds WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM campgrounds FOR UPDATE")
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM reviews WHERE id IN (SELECT review_id FROM campground_reviews)")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM campgrounds")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM campgrounds")
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count.max(0) as u64)
    }

    async fn add_review(
        &self,
        campground_id: &Uuid,
        review: &NewReview,
    ) -> Result<Option<Review>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent appends to the same list
        let owner = sqlx::query("SELECT id FROM campgrounds WHERE id = $1 FOR UPDATE")
            .bind(campground_id)
            .fetch_optional(&mut *tx)
            .await?;

        if owner.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO reviews (body, rating)
            VALUES ($1, $2)
            RETURNING id, body, rating, created_at
            "#,
        )
        .bind(&review.body)
        .bind(review.rating)
        .fetch_one(&mut *tx)
        .await?;
        let review = review_from_row(&row)?;

        sqlx::query(
            r#"
            INSERT INTO campground_reviews (campground_id, review_id, position)
            SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
            FROM campground_reviews
            WHERE campground_id = $1
            "#,
        )
        .bind(campground_id)
        .bind(review.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE campgrounds SET updated_at = NOW() WHERE id = $1")
            .bind(campground_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::debug!("Added review {} to campground {}", review.id, campground_id);
        Ok(Some(review))
    }

    async fn find_reviews(&self, campground_id: &Uuid) -> Result<Vec<Review>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.body, r.rating, r.created_at
            FROM campground_reviews cr
            JOIN reviews r ON r.id = cr.review_id
            WHERE cr.campground_id = $1
            ORDER BY cr.position
            "#,
        )
        .bind(campground_id)
        .fetch_all(&self.pool)
        .await?;

        let reviews = rows
            .iter()
            .map(review_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reviews)
    }
}
