use crate::providers::{ProviderId, ProviderResult};

/// Decides which provider is tried first and when the other one takes over.
#[derive(Debug, Clone, Copy)]
pub struct SelectionPolicy {
    use_mailgun_as_default: bool,
}

impl SelectionPolicy {
    pub fn new(use_mailgun_as_default: bool) -> Self {
        Self {
            use_mailgun_as_default,
        }
    }

    /// The configured default provider, or the other one when
    /// `override_default` is set.
    pub fn choose(&self, override_default: bool) -> ProviderId {
        if self.use_mailgun_as_default ^ override_default {
            ProviderId::Mailgun
        } else {
            ProviderId::Sendgrid
        }
    }

    /// Anything outside 200..=204 counts as a failed send.
    pub fn is_failure(&self, result: &ProviderResult) -> bool {
        result.status_code < 200 || result.status_code > 204
    }
}
