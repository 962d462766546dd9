use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use campground_store::{CampgroundPatch, CampgroundStore};
use uuid::Uuid;

use crate::error::AppError;
use crate::forms::{FormData, parse_campground};
use crate::views;

/// Parses a campground id from the path. Malformed ids cannot match a record,
/// so they are reported as not found.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::campground_not_found())
}

pub(crate) fn render(html: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html)
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Home page, sends the browser to the campground list
pub async fn index() -> HttpResponse {
    redirect("/campgrounds")
}

/// Health check endpoint
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// Renders the list of all campgrounds
pub async fn list_campgrounds(
    store: web::Data<dyn CampgroundStore>,
) -> Result<HttpResponse, AppError> {
    let campgrounds = store.find_all().await?;
    Ok(render(views::campground_index(&campgrounds)))
}

/// Renders the blank creation form
pub async fn new_campground_form() -> HttpResponse {
    render(views::new_campground())
}

/// Validates the submitted form, stores the campground and redirects to the list
pub async fn create_campground(
    store: web::Data<dyn CampgroundStore>,
    form: web::Form<FormData>,
) -> Result<HttpResponse, AppError> {
    let record = parse_campground(form.into_inner())?;
    let campground = store.insert(&record).await?;

    log::info!("🏕️ Created campground {} ({})", campground.id, campground.title);
    Ok(redirect("/campgrounds"))
}

/// Renders a campground with its reviews
pub async fn show_campground(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let campground = store
        .find_by_id(&id)
        .await?
        .ok_or_else(AppError::campground_not_found)?;
    let reviews = store.find_reviews(&id).await?;

    Ok(render(views::show_campground(&campground, &reviews)))
}

/// Renders the edit form pre-filled with the stored values
pub async fn edit_campground_form(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let campground = store
        .find_by_id(&id)
        .await?
        .ok_or_else(AppError::campground_not_found)?;

    Ok(render(views::edit_campground(&campground)))
}

/// Validates the submitted form, merges it into the campground and redirects to its page
pub async fn update_campground(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<String>,
    form: web::Form<FormData>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let patch = CampgroundPatch::from(parse_campground(form.into_inner())?);

    store
        .update(&id, &patch)
        .await?
        .ok_or_else(AppError::campground_not_found)?;

    log::info!("✏️ Updated campground {}", id);
    Ok(redirect(&format!("/campgrounds/{}", id)))
}

/// Deletes a campground and redirects to the list. Deleting twice is not an error.
pub async fn delete_campground(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;

    if store.delete_by_id(&id).await? {
        log::info!("🗑️ Deleted campground {}", id);
    } else {
        log::debug!("Campground {} was already gone", id);
    }

    Ok(redirect("/campgrounds"))
}
