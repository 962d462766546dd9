use std::collections::HashMap;
use std::fmt;

/// Type a submitted field must parse as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Any text
    String,
    /// A finite number
    Number,
}

/// Declarative rule for one field of a submitted form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    /// Expected type
    pub field_type: FieldType,
    /// Whether the field must be present and non-empty
    pub required: bool,
    /// Inclusive lower bound, numbers only
    pub minimum: Option<f64>,
}

impl FieldRule {
    /// An optional text field
    pub fn string() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            minimum: None,
        }
    }

    /// An optional numeric field
    pub fn number() -> Self {
        Self {
            field_type: FieldType::Number,
            required: false,
            minimum: None,
        }
    }

    /// Marks the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets an inclusive minimum
    pub fn min(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    fn check(&self, name: &str, value: Option<&str>) -> Option<String> {
        let value = match value.map(str::trim) {
            None => return self.required.then(|| format!("\"{name}\" is required")),
            Some("") => {
                return self
                    .required
                    .then(|| format!("\"{name}\" is not allowed to be empty"));
            }
            Some(value) => value,
        };

        match self.field_type {
            FieldType::String => None,
            FieldType::Number => match parse_number(value) {
                None => Some(format!("\"{name}\" must be a number")),
                Some(number) => match self.minimum {
                    Some(min) if number < min => Some(format!(
                        "\"{name}\" must be greater than or equal to {min}"
                    )),
                    _ => None,
                },
            },
        }
    }
}

/// Parses a submitted number, rejecting NaN and infinities
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A single failing field
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Name of the field
    pub field: &'static str,
    /// Human readable explanation
    pub message: String,
}

/// Every failing field of a record, in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(pub Vec<Violation>);

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for Violations {}

/// Ordered field rules for one resource
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<(&'static str, FieldRule)>,
}

impl Schema {
    /// An empty schema
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a field rule
    pub fn field(mut self, name: &'static str, rule: FieldRule) -> Self {
        self.fields.push((name, rule));
        self
    }

    /// Rules for a submitted campground
    pub fn campground() -> Self {
        Self::new()
            .field("title", FieldRule::string().required())
            .field("location", FieldRule::string().required())
            .field("image", FieldRule::string().required())
            .field("price", FieldRule::number().required().min(0.0))
            .field("description", FieldRule::string().required())
    }

    /// Rules for a submitted review. Both fields are optional.
    pub fn review() -> Self {
        Self::new()
            .field("body", FieldRule::string())
            .field("rating", FieldRule::number())
    }

    /// Checks `record` against every rule. Fields not named by the schema are ignored.
    pub fn validate(&self, record: &HashMap<String, String>) -> Result<(), Violations> {
        let violations: Vec<Violation> = self
            .fields
            .iter()
            .filter_map(|(name, rule)| {
                rule.check(name, record.get(*name).map(String::as_str))
                    .map(|message| Violation {
                        field: *name,
                        message,
                    })
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Violations(violations))
        }
    }
}
