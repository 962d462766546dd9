use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::types::*;

/// Persistence operations for campgrounds and the reviews they own.
///
/// Handlers receive the store as `web::Data<dyn CampgroundStore>`, so every
/// implementation must be usable behind a trait object.
#[async_trait]
pub trait CampgroundStore: Send + Sync {
    /// Returns every campground
    async fn find_all(&self) -> Result<Vec<Campground>, StoreError>;

    /// Returns the campground with the given id, or `None` if it does not exist
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Campground>, StoreError>;

    /// Validates and persists a new campground, returning the stored record
    async fn insert(&self, record: &NewCampground) -> Result<Campground, StoreError>;

    /// Persists a batch of campgrounds.
    ///
    /// Every record is validated before anything is written. The batch is
    /// all-or-nothing: either every record is stored or none is.
    async fn insert_many(&self, records: &[NewCampground]) -> Result<Vec<Campground>, StoreError>;

    /// Merges `patch` into an existing campground.
    /// Returns `None` if no campground has the given id.
    async fn update(
        &self,
        id: &Uuid,
        patch: &CampgroundPatch,
    ) -> Result<Option<Campground>, StoreError>;

    /// Removes a campground together with the reviews it owns.
    /// Returns whether a record was removed; removing a missing id is not an error.
    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, StoreError>;

    /// Removes every campground and their reviews, returning how many campgrounds were removed
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// Number of stored campgrounds
    async fn count(&self) -> Result<u64, StoreError>;

    /// Stores a review and appends it to the campground's review list as one atomic step.
    /// Returns `None` (and writes nothing) if the campground does not exist.
    async fn add_review(
        &self,
        campground_id: &Uuid,
        review: &NewReview,
    ) -> Result<Option<Review>, StoreError>;

    /// Reviews owned by a campground, in list order
    async fn find_reviews(&self, campground_id: &Uuid) -> Result<Vec<Review>, StoreError>;
}

/// Checks every record of a bulk insert, reporting the first invalid one
pub fn validate_batch(records: &[NewCampground]) -> Result<(), StoreError> {
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|source| StoreError::InvalidBatch { index, source })?;
    }
    Ok(())
}
