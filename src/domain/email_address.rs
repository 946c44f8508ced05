use validator::validate_email;

#[derive(Debug, Clone, PartialEq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<EmailAddress, String> {
        let s = s.trim().to_string();
        if s.is_empty() {
            return Err(super::BLANK_FIELD.to_string());
        }
        let has_dotted_domain = s
            .rsplit_once('@')
            .map_or(false, |(_, domain)| domain.contains('.'));
        if validate_email(&s) && has_dotted_domain {
            Ok(Self(s))
        } else {
            Err("Enter a valid email address.".to_string())
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
