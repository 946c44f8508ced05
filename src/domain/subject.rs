use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq)]
pub struct Subject(String);

impl Subject {
    pub fn parse(s: String) -> Result<Subject, String> {
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

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
