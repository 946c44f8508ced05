use unicode_segmentation::UnicodeSegmentation;

/// Human-readable name shown next to an address, e.g. `Ursula <ursula@domain.com>`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(s: String) -> Result<DisplayName, String> {
        let s = s.trim().to_string();
        if s.is_empty() {
            return Err(super::BLANK_FIELD.to_string());
        }
        if s.graphemes(true).count() > super::MAX_LINE_LENGTH {
            return Err(super::too_long());
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
