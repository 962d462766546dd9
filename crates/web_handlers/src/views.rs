//! Server-rendered HTML pages.

use actix_web::http::StatusCode;
use campground_store::{Campground, Review};

/// Escapes text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | YelpCamp</title>
</head>
<body>
  <nav>
    <a href="/campgrounds">All Campgrounds</a>
    <a href="/campgrounds/new">New Campground</a>
  </nav>
  <main>
{content}
  </main>
</body>
</html>
"#,
        title = escape(title),
        content = content,
    )
}

/// Whole prices print without decimals, others with two, e.g. `25` or `12.50`
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        format!("{:.2}", price)
    }
}

/// List of every campground
pub fn campground_index(campgrounds: &[Campground]) -> String {
    let items: String = campgrounds
        .iter()
        .map(|c| {
            format!(
                r#"    <li>
      <img src="{image}" alt="{title}" width="200">
      <h2><a href="/campgrounds/{id}">{title}</a></h2>
      <p>{location}</p>
    </li>
"#,
                id = c.id,
                title = escape(&c.title),
                image = escape(&c.image),
                location = escape(&c.location),
            )
        })
        .collect();

    let content = if campgrounds.is_empty() {
        "    <h1>All Campgrounds</h1>\n    <p>No campgrounds yet.</p>".to_string()
    } else {
        format!("    <h1>All Campgrounds</h1>\n    <ul>\n{items}    </ul>")
    };
    layout("All Campgrounds", &content)
}

fn campground_fields(campground: Option<&Campground>) -> String {
    let value = |f: fn(&Campground) -> String| campground.map(f).unwrap_or_default();
    format!(
        r#"      <label>Title <input type="text" name="campground[title]" value="{title}" required></label>
      <label>Location <input type="text" name="campground[location]" value="{location}" required></label>
      <label>Image URL <input type="text" name="campground[image]" value="{image}" required></label>
      <label>Price <input type="number" name="campground[price]" value="{price}" min="0" step="0.01" required></label>
      <label>Description <textarea name="campground[description]" required>{description}</textarea></label>
"#,
        title = escape(&value(|c| c.title.clone())),
        location = escape(&value(|c| c.location.clone())),
        image = escape(&value(|c| c.image.clone())),
        price = value(|c| format_price(c.price)),
        description = escape(&value(|c| c.description.clone())),
    )
}

/// Blank creation form
pub fn new_campground() -> String {
    let content = format!(
        r#"    <h1>New Campground</h1>
    <form action="/campgrounds" method="POST">
{fields}      <button>Add Campground</button>
    </form>
    <a href="/campgrounds">All Campgrounds</a>"#,
        fields = campground_fields(None),
    );
    layout("New Campground", &content)
}

/// Edit form pre-filled with the campground's current values
pub fn edit_campground(campground: &Campground) -> String {
    let content = format!(
        r#"    <h1>Edit Campground</h1>
    <form action="/campgrounds/{id}?_method=PATCH" method="POST">
{fields}      <button>Update Campground</button>
    </form>
    <a href="/campgrounds/{id}">Back to Campground</a>"#,
        id = campground.id,
        fields = campground_fields(Some(campground)),
    );
    layout("Edit Campground", &content)
}

/// Detail page with the campground's reviews and a review form
pub fn show_campground(campground: &Campground, reviews: &[Review]) -> String {
    let review_items: String = reviews
        .iter()
        .map(|r| {
            let rating = r
                .rating
                .map(|rating| format!("Rating: {}", format_price(rating)))
                .unwrap_or_else(|| "No rating".to_string());
            format!(
                "      <li><h4>{rating}</h4><p>{body}</p></li>\n",
                rating = rating,
                body = escape(r.body.as_deref().unwrap_or_default()),
            )
        })
        .collect();

    let content = format!(
        r#"    <h1>{title}</h1>
    <img src="{image}" alt="{title}" width="400">
    <p>{description}</p>
    <p>{location}</p>
    <p>${price}/night</p>
    <a href="/campgrounds/{id}/edit">Edit</a>
    <form action="/campgrounds/{id}?_method=DELETE" method="POST">
      <button>Delete</button>
    </form>
    <h2>Leave a Review</h2>
    <form action="/campgrounds/{id}/reviews" method="POST">
      <label>Rating <input type="range" name="review[rating]" min="1" max="5"></label>
      <label>Review <textarea name="review[body]"></textarea></label>
      <button>Submit</button>
    </form>
    <h2>Reviews ({count})</h2>
    <ul>
{review_items}    </ul>
    <a href="/campgrounds">All Campgrounds</a>"#,
        id = campground.id,
        title = escape(&campground.title),
        image = escape(&campground.image),
        description = escape(&campground.description),
        location = escape(&campground.location),
        price = format_price(campground.price),
        count = reviews.len(),
        review_items = review_items,
    );
    layout(&campground.title, &content)
}

/// Page rendered by the error normalizer
pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        r#"    <h1>{code} {reason}</h1>
    <p>{message}</p>
    <a href="/campgrounds">All Campgrounds</a>"#,
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape(message),
    );
    layout("Error", &content)
}
