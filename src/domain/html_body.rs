#[derive(Debug, Clone, PartialEq)]
pub struct HtmlBody(String);

impl HtmlBody {
    pub fn parse(s: String) -> Result<HtmlBody, String> {
        if s.trim().is_empty() {
            return Err(super::BLANK_FIELD.to_string());
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for HtmlBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
