use crate::configuration::ProviderSettings;
use crate::domain::EmailRequest;
use crate::html::html_to_plain_text;
use crate::providers::{response_field, EmailProvider, ProviderError, ProviderId, ProviderResult};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Sends through Mailgun's `messages` endpoint as a form post.
pub struct MailgunClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl MailgunClient {
    pub fn new(settings: &ProviderSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl EmailProvider for MailgunClient {
    #[tracing::instrument(name = "Sending email through Mailgun", skip(self, request))]
    async fn send(&self, request: &EmailRequest) -> Result<ProviderResult, ProviderError> {
        let url = format!("{}/messages", self.base_url);
        let from = format!("{} <{}>", request.from_name, request.from_email);
        let to = format!("{} <{}>", request.to_name, request.to_email);
        let text = html_to_plain_text(request.body.as_ref());
        // Repeated `to` keys carry the recipient list; there is one recipient.
        let form = [
            ("from", from.as_str()),
            ("to", to.as_str()),
            ("subject", request.subject.as_ref()),
            ("text", text.as_str()),
            ("html", request.body.as_ref()),
        ];

        let network_error = |source: reqwest::Error| ProviderError::Network {
            provider: ProviderId::Mailgun,
            source,
        };
        let response = self
            .http_client
            .post(&url)
            .basic_auth("api", Some(self.api_key.expose_secret()))
            .form(&form)
            .send()
            .await
            .map_err(network_error)?;
        let status_code = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;
        tracing::info!(status_code, "Mailgun responded");

        Ok(ProviderResult {
            status_code,
            message: response_field(ProviderId::Mailgun, &body, "message")?,
            provider_id: ProviderId::Mailgun,
        })
    }
}
