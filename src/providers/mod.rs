mod mailgun;
mod policy;
mod sendgrid;

use crate::configuration::Settings;
use crate::domain::EmailRequest;
use async_trait::async_trait;
pub use mailgun::MailgunClient;
pub use policy::SelectionPolicy;
pub use sendgrid::SendgridClient;
use serde_json::Value;

/// The transactional email services a request can be relayed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProviderId {
    Mailgun,
    Sendgrid,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Mailgun => "MAILGUN",
            ProviderId::Sendgrid => "SENDGRID",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single call to a provider, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    pub status_code: u16,
    pub message: String,
    pub provider_id: ProviderId,
}

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("Failed to complete the request to {provider}.")]
    Network {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned an unexpected response: {detail}")]
    UnexpectedResponse { provider: ProviderId, detail: String },
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, request: &EmailRequest) -> Result<ProviderResult, ProviderError>;
}

/// One adapter per [`ProviderId`], looked up by the request handler.
pub struct Providers {
    mailgun: Box<dyn EmailProvider>,
    sendgrid: Box<dyn EmailProvider>,
}

impl Providers {
    pub fn new(mailgun: Box<dyn EmailProvider>, sendgrid: Box<dyn EmailProvider>) -> Self {
        Self { mailgun, sendgrid }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, anyhow::Error> {
        let timeout = settings.email_service.timeout();
        let mailgun = MailgunClient::new(&settings.mailgun, timeout)?;
        let sendgrid = SendgridClient::new(&settings.sendgrid, timeout)?;
        Ok(Self::new(Box::new(mailgun), Box::new(sendgrid)))
    }

    pub fn get(&self, id: ProviderId) -> &dyn EmailProvider {
        match id {
            ProviderId::Mailgun => self.mailgun.as_ref(),
            ProviderId::Sendgrid => self.sendgrid.as_ref(),
        }
    }
}

/// Reads `field` out of a JSON response body. Strings are taken as they are,
/// any other JSON value is kept in its serialized form.
fn response_field(
    provider: ProviderId,
    body: &str,
    field: &str,
) -> Result<String, ProviderError> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| ProviderError::UnexpectedResponse {
            provider,
            detail: format!("body is not JSON ({})", e),
        })?;
    match json.get(field) {
        Some(Value::String(message)) => Ok(message.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(ProviderError::UnexpectedResponse {
            provider,
            detail: format!("body has no `{}` field", field),
        }),
    }
}

#[cfg(test)]
pub(crate) fn email_request_fixture() -> EmailRequest {
    use crate::domain::{DisplayName, EmailAddress, HtmlBody, Subject};

    EmailRequest {
        to_email: EmailAddress::parse("ursula@domain.com".into()).unwrap(),
        to_name: DisplayName::parse("Ursula".into()).unwrap(),
        from_email: EmailAddress::parse("ged@earthsea.org".into()).unwrap(),
        from_name: DisplayName::parse("Ged".into()).unwrap(),
        subject: Subject::parse("Testing".into()).unwrap(),
        body: HtmlBody::parse("<h1>Hello</h1><p>world</p>".into()).unwrap(),
    }
}
