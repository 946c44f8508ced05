mod display_name;
mod email_address;
mod email_request;
mod html_body;
mod subject;

pub use display_name::DisplayName;
pub use email_address::EmailAddress;
pub use email_request::{EmailRequest, ValidationErrors};
pub use html_body::HtmlBody;
pub use subject::Subject;

/// Longest display name or subject line accepted, in grapheme clusters.
pub const MAX_LINE_LENGTH: usize = 255;

pub(crate) const BLANK_FIELD: &str = "This field may not be blank.";

pub(crate) fn too_long() -> String {
    format!(
        "Ensure this field has no more than {} characters.",
        MAX_LINE_LENGTH
    )
}
