use std::collections::HashMap;

use campground_store::{NewCampground, NewReview};

use crate::error::AppError;
use crate::schema::{Schema, parse_number};

/// A submitted urlencoded form, field name to value
pub type FormData = HashMap<String, String>;

fn nested_field<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('['))
        .and_then(|rest| rest.strip_suffix(']'))
}

/// Strips a resource prefix from nested field names, so `campground[title]`
/// becomes `title`. Fields without the prefix are kept as they are, unless a
/// nested field of the same name was also submitted: the nested one wins.
pub fn flatten_form(prefix: &str, form: FormData) -> FormData {
    let (nested, plain): (Vec<_>, Vec<_>) = form
        .into_iter()
        .partition(|(key, _)| nested_field(prefix, key).is_some());

    let mut flat: FormData = plain.into_iter().collect();
    for (key, value) in nested {
        if let Some(field) = nested_field(prefix, &key) {
            flat.insert(field.to_string(), value);
        }
    }
    flat
}

fn text(record: &FormData, field: &str) -> String {
    record
        .get(field)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn optional_text(record: &FormData, field: &str) -> Option<String> {
    Some(text(record, field)).filter(|value| !value.is_empty())
}

/// Validates a submitted campground and converts it to the store's type
pub fn parse_campground(form: FormData) -> Result<NewCampground, AppError> {
    let record = flatten_form("campground", form);
    Schema::campground().validate(&record)?;

    let price = record
        .get("price")
        .and_then(|value| parse_number(value))
        .ok_or_else(|| AppError::Validation("\"price\" must be a number".to_string()))?;

    Ok(NewCampground {
        title: text(&record, "title"),
        location: text(&record, "location"),
        image: text(&record, "image"),
        price,
        description: text(&record, "description"),
    })
}

/// Validates a submitted review and converts it to the store's type
pub fn parse_review(form: FormData) -> Result<NewReview, AppError> {
    let record = flatten_form("review", form);
    Schema::review().validate(&record)?;

    Ok(NewReview {
        body: optional_text(&record, "body"),
        rating: record.get("rating").and_then(|value| parse_number(value)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flatten_nested_fields() {
        let flat = flatten_form(
            "campground",
            form(&[("campground[title]", "A"), ("price", "3"), ("review[body]", "x")]),
        );

        assert_eq!(flat.get("title").map(String::as_str), Some("A"));
        assert_eq!(flat.get("price").map(String::as_str), Some("3"));
        assert_eq!(flat.get("review[body]").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_nested_field_wins_over_plain_field() {
        let flat = flatten_form(
            "campground",
            form(&[("title", "Plain"), ("campground[title]", "Nested")]),
        );
        assert_eq!(flat.get("title").map(String::as_str), Some("Nested"));
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_parse_campground_trims_values() {
        let campground = parse_campground(form(&[
            ("campground[title]", "  Misty Bay "),
            ("campground[location]", "Tucson, Arizona"),
            ("campground[image]", "https://example.com/camp.jpg"),
            ("campground[price]", " 19.99"),
            ("campground[description]", "Shady"),
        ]))
        .unwrap();

        assert_eq!(campground.title, "Misty Bay");
        assert_eq!(campground.price, 19.99);
    }

    #[test]
    fn test_parse_campground_reports_violations() {
        let err = parse_campground(form(&[("title", "Only a title")])).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("\"location\" is required"));
                assert!(msg.contains("\"price\" is required"));
                assert!(!msg.contains("\"title\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_review_accepts_empty_form() {
        let review = parse_review(FormData::new()).unwrap();
        assert_eq!(review, NewReview::default());

        let review = parse_review(form(&[("review[body]", "Nice"), ("review[rating]", "4")]))
            .unwrap();
        assert_eq!(review.body.as_deref(), Some("Nice"));
        assert_eq!(review.rating, Some(4.0));
    }
}
