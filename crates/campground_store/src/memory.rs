use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::store::{CampgroundStore, validate_batch};
use crate::types::*;

#[derive(Default)]
struct MemoryState {
    /// Kept in insertion order
    campgrounds: Vec<Campground>,
    reviews: HashMap<Uuid, Review>,
}

impl MemoryState {
    fn position(&self, id: &Uuid) -> Option<usize> {
        self.campgrounds.iter().position(|c| c.id == *id)
    }

    fn push(&mut self, record: &NewCampground) -> Campground {
        let now = Utc::now();
        let campground = Campground {
            id: Uuid::new_v4(),
            title: record.title.clone(),
            location: record.location.clone(),
            image: record.image.clone(),
            price: record.price,
            description: record.description.clone(),
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.campgrounds.push(campground.clone());
        campground
    }

    fn remove_at(&mut self, index: usize) {
        let removed = self.campgrounds.remove(index);
        for review_id in &removed.reviews {
            self.reviews.remove(review_id);
        }
    }
}

/// In-process store used for tests and for running the server without a database
#[derive(Default)]
pub struct MemoryCampgroundStore {
    state: RwLock<MemoryState>,
}

impl MemoryCampgroundStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampgroundStore for MemoryCampgroundStore {
    async fn find_all(&self) -> Result<Vec<Campground>, StoreError> {
        Ok(self.state.read().await.campgrounds.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Campground>, StoreError> {
        let state = self.state.read().await;
        Ok(state.position(id).map(|index| state.campgrounds[index].clone()))
    }

    async fn insert(&self, record: &NewCampground) -> Result<Campground, StoreError> {
        record.validate()?;
        let campground = self.state.write().await.push(record);
        log::debug!("Inserted campground {}", campground.id);
        Ok(campground)
    }

    async fn insert_many(&self, records: &[NewCampground]) -> Result<Vec<Campground>, StoreError> {
        validate_batch(records)?;
        let mut state = self.state.write().await;
        Ok(records.iter().map(|record| state.push(record)).collect())
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &CampgroundPatch,
    ) -> Result<Option<Campground>, StoreError> {
        patch.validate()?;
        let mut state = self.state.write().await;
        let Some(index) = state.position(id) else {
            return Ok(None);
        };

        let campground = &mut state.campgrounds[index];
        patch.apply_to(campground);
        campground.updated_at = Utc::now();
        Ok(Some(campground.clone()))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.position(id) {
            Some(index) => {
                state.remove_at(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let removed = state.campgrounds.len() as u64;
        state.campgrounds.clear();
        state.reviews.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.state.read().await.campgrounds.len() as u64)
    }

    async fn add_review(
        &self,
        campground_id: &Uuid,
        review: &NewReview,
    ) -> Result<Option<Review>, StoreError> {
        let mut state = self.state.write().await;
        let Some(index) = state.position(campground_id) else {
            return Ok(None);
        };

        let review = Review {
            id: Uuid::new_v4(),
            body: review.body.clone(),
            rating: review.rating,
            created_at: Utc::now(),
        };
        state.campgrounds[index].reviews.push(review.id);
        state.reviews.insert(review.id, review.clone());
        Ok(Some(review))
    }

    async fn find_reviews(&self, campground_id: &Uuid) -> Result<Vec<Review>, StoreError> {
        let state = self.state.read().await;
        let Some(index) = state.position(campground_id) else {
            return Ok(Vec::new());
        };

        Ok(state.campgrounds[index]
            .reviews
            .iter()
            .filter_map(|id| state.reviews.get(id).cloned())
            .collect())
    }
}
