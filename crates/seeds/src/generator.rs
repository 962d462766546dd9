use campground_store::{Campground, CampgroundStore, NewCampground, StoreError};
use rand::Rng;

use crate::cities::CITIES;
use crate::seed_helpers::{DESCRIPTORS, PLACES};

/// Number of campgrounds inserted by a default seed run
pub const DEFAULT_SEED_COUNT: usize = 50;

/// Picture shared by every generated campground
pub const PLACEHOLDER_IMAGE: &str = "https://source.unsplash.com/collection/483251";

/// Description shared by every generated campground
pub const PLACEHOLDER_DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

/// Generated prices are whole numbers below this bound
pub const MAX_PRICE: u32 = 1000;

/// Custom error type for seed runs
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The store rejected an operation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The store holds a different number of campgrounds than were seeded
    #[error("Expected {expected} campgrounds after seeding, found {found}")]
    CountMismatch {
        /// Number of campgrounds seeded
        expected: u64,
        /// Number found in the store afterwards
        found: u64,
    },
}

fn sample<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Builds one random campground. Price and location are drawn independently.
pub fn generate_campground<R: Rng>(rng: &mut R) -> NewCampground {
    let price = rng.random_range(0..MAX_PRICE);
    let city = CITIES[rng.random_range(0..CITIES.len())];

    NewCampground {
        title: format!("{} {}", sample(rng, DESCRIPTORS), sample(rng, PLACES)),
        location: city.location(),
        image: PLACEHOLDER_IMAGE.to_string(),
        price: f64::from(price),
        description: PLACEHOLDER_DESCRIPTION.to_string(),
    }
}

/// Builds `count` random campgrounds
pub fn generate_campgrounds<R: Rng>(rng: &mut R, count: usize) -> Vec<NewCampground> {
    (0..count).map(|_| generate_campground(rng)).collect()
}

/// Replaces every campground in the store with `records`.
///
/// Running it twice leaves the store in the same shape: the old records are
/// removed before the new batch is written.
pub async fn seed_campgrounds(
    store: &dyn CampgroundStore,
    records: &[NewCampground],
) -> Result<Vec<Campground>, SeedError> {
    let removed = store.delete_all().await?;
    log::info!("🧹 Removed {} existing campgrounds", removed);

    let inserted = store.insert_many(records).await?;

    let expected = inserted.len() as u64;
    let found = store.count().await?;
    if found != expected {
        return Err(SeedError::CountMismatch { expected, found });
    }

    log::info!("🌱 Seeded {} campgrounds", inserted.len());
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::find_by_location;
    use campground_store::MemoryCampgroundStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_campgrounds_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = generate_campgrounds(&mut rng, DEFAULT_SEED_COUNT);

        assert_eq!(records.len(), DEFAULT_SEED_COUNT);
        for record in &records {
            assert!(record.price >= 0.0 && record.price < f64::from(MAX_PRICE));
            assert_eq!(record.price.fract(), 0.0);
            assert!(find_by_location(&record.location).is_some());
            assert_eq!(record.image, PLACEHOLDER_IMAGE);

            let (descriptor, place) = record.title.split_once(' ').unwrap();
            assert!(DESCRIPTORS.contains(&descriptor));
            assert!(PLACES.contains(&place));
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let first = generate_campgrounds(&mut StdRng::seed_from_u64(42), 10);
        let second = generate_campgrounds(&mut StdRng::seed_from_u64(42), 10);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_seed_replaces_existing_campgrounds() {
        let store = MemoryCampgroundStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        store
            .insert_many(&generate_campgrounds(&mut rng, 3))
            .await
            .unwrap();

        let records = generate_campgrounds(&mut rng, DEFAULT_SEED_COUNT);
        let inserted = seed_campgrounds(&store, &records).await.unwrap();
        assert_eq!(inserted.len(), DEFAULT_SEED_COUNT);
        assert_eq!(store.count().await.unwrap(), DEFAULT_SEED_COUNT as u64);

        // Seeding again does not accumulate records
        seed_campgrounds(&store, &records).await.unwrap();
        assert_eq!(store.count().await.unwrap(), DEFAULT_SEED_COUNT as u64);

        for campground in store.find_all().await.unwrap() {
            assert!(campground.price >= 0.0);
            assert!(find_by_location(&campground.location).is_some());
        }
    }
}
