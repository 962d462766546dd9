use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A campground listing as stored in the database
#[derive(Debug, Clone, PartialEq)]
pub struct Campground {
    /// Store-assigned identifier, immutable after creation
    pub id: Uuid,
    /// Display name of the campground
    pub title: String,
    /// Human readable location, e.g. "Tucson, Arizona"
    pub location: String,
    /// URL of the campground's picture
    pub image: String,
    /// Nightly price, never negative
    pub price: f64,
    /// Long-form description
    pub description: String,
    /// Ids of the reviews owned by this campground, in the order they were added
    pub reviews: Vec<Uuid>,
    /// When the campground was created
    pub created_at: DateTime<Utc>,
    /// When the campground was last modified
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a campground
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewCampground {
    /// Display name of the campground
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Human readable location
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    /// URL of the campground's picture
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    /// Nightly price
    #[validate(
        range(min = 0.0, message = "Price must not be negative"),
        custom(function = "validate_price")
    )]
    pub price: f64,

    /// Long-form description
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// NaN and infinities slip past a range check, so they are rejected here
fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_price").with_message("Price must be a number".into()))
    }
}

/// A partial update of a campground. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CampgroundPatch {
    /// New display name
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    /// New location
    #[validate(length(min = 1, message = "Location must not be empty"))]
    pub location: Option<String>,

    /// New image URL
    #[validate(length(min = 1, message = "Image must not be empty"))]
    pub image: Option<String>,

    /// New nightly price
    #[validate(
        range(min = 0.0, message = "Price must not be negative"),
        custom(function = "validate_price")
    )]
    pub price: Option<f64>,

    /// New description
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
}

impl CampgroundPatch {
    /// Merges the supplied fields into `campground`, leaving the others untouched.
    pub fn apply_to(&self, campground: &mut Campground) {
        if let Some(title) = &self.title {
            campground.title = title.clone();
        }
        if let Some(location) = &self.location {
            campground.location = location.clone();
        }
        if let Some(image) = &self.image {
            campground.image = image.clone();
        }
        if let Some(price) = self.price {
            campground.price = price;
        }
        if let Some(description) = &self.description {
            campground.description = description.clone();
        }
    }

    /// Returns true when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.location.is_none()
            && self.image.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }
}

impl From<NewCampground> for CampgroundPatch {
    fn from(full: NewCampground) -> Self {
        Self {
            title: Some(full.title),
            location: Some(full.location),
            image: Some(full.image),
            price: Some(full.price),
            description: Some(full.description),
        }
    }
}

/// A review attached to exactly one campground
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Store-assigned identifier
    pub id: Uuid,
    /// Free text of the review
    pub body: Option<String>,
    /// Numeric rating
    pub rating: Option<f64>,
    /// When the review was written
    pub created_at: DateTime<Utc>,
}

/// Data submitted for a new review
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewReview {
    /// Free text of the review
    pub body: Option<String>,
    /// Numeric rating
    pub rating: Option<f64>,
}

/// Custom error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The record violates the campground invariants
    #[error("Invalid campground: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    /// One record of a bulk insert is invalid, nothing was written
    #[error("Invalid campground at index {index}: {source}")]
    InvalidBatch {
        /// Position of the first invalid record in the batch
        index: usize,
        /// Why the record was rejected
        source: validator::ValidationErrors,
    },
}
