use actix_web::{HttpResponse, web};
use campground_store::CampgroundStore;

use crate::campground_handlers::{parse_id, redirect};
use crate::error::AppError;
use crate::forms::{FormData, parse_review};

/// Adds a review to a campground and redirects back to the campground's page.
/// The review is stored and linked in a single store operation.
pub async fn create_review(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<String>,
    form: web::Form<FormData>,
) -> Result<HttpResponse, AppError> {
    let campground_id = parse_id(&path)?;
    let review = parse_review(form.into_inner())?;

    let review = store
        .add_review(&campground_id, &review)
        .await?
        .ok_or_else(AppError::campground_not_found)?;

    log::info!(
        "📝 Added review {} to campground {}",
        review.id,
        campground_id
    );
    Ok(redirect(&format!("/campgrounds/{}", campground_id)))
}
