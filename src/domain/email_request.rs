use crate::domain::{DisplayName, EmailAddress, HtmlBody, Subject};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A send request whose every field has passed validation.
#[derive(Debug, Clone)]
pub struct EmailRequest {
    pub to_email: EmailAddress,
    pub to_name: DisplayName,
    pub from_email: EmailAddress,
    pub from_name: DisplayName,
    pub subject: Subject,
    pub body: HtmlBody,
}

/// Field name → every problem found with that field.
#[derive(Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, error: String) {
        self.0.entry(field).or_default().push(error);
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<_> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl EmailRequest {
    /// Validates a raw payload keyed by `to_email`, `to_name`, `from_email`,
    /// `from_name`, `subject` and `body`. Every field is checked, so the
    /// error map names all offending fields at once.
    pub fn parse(raw: &Map<String, Value>) -> Result<EmailRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let to_email = parse_field(raw, "to_email", EmailAddress::parse, &mut errors);
        let to_name = parse_field(raw, "to_name", DisplayName::parse, &mut errors);
        let from_email = parse_field(raw, "from_email", EmailAddress::parse, &mut errors);
        let from_name = parse_field(raw, "from_name", DisplayName::parse, &mut errors);
        let subject = parse_field(raw, "subject", Subject::parse, &mut errors);
        let body = parse_field(raw, "body", HtmlBody::parse, &mut errors);

        match (to_email, to_name, from_email, from_name, subject, body) {
            (
                Some(to_email),
                Some(to_name),
                Some(from_email),
                Some(from_name),
                Some(subject),
                Some(body),
            ) => Ok(EmailRequest {
                to_email,
                to_name,
                from_email,
                from_name,
                subject,
                body,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_field<T>(
    raw: &Map<String, Value>,
    field: &'static str,
    parse: impl FnOnce(String) -> Result<T, String>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let parsed = string_value(raw.get(field)).and_then(parse);
    match parsed {
        Ok(value) => Some(value),
        Err(error) => {
            errors.add(field, error);
            None
        }
    }
}

// Scalars are accepted in their textual form, as a form field would be.
fn string_value(value: Option<&Value>) -> Result<String, String> {
    match value {
        None => Err("This field is required.".to_string()),
        Some(Value::Null) => Err("This field may not be null.".to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => {
            Err("Not a valid string.".to_string())
        }
    }
}
