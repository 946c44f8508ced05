use crate::configuration::ProviderSettings;
use crate::domain::EmailRequest;
use crate::html::html_to_plain_text;
use crate::providers::{response_field, EmailProvider, ProviderError, ProviderId, ProviderResult};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// SendGrid answers a successful send with an empty `202 Accepted`.
const ACCEPTED: u16 = 202;
const ACCEPTED_MESSAGE: &str = "Your message has been sent";

pub struct SendgridClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl SendgridClient {
    pub fn new(settings: &ProviderSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    subject: &'a str,
    content: [Content<'a>; 1],
    from: Address<'a>,
    reply_to: Address<'a>,
}

#[derive(serde::Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(serde::Serialize, Clone, Copy)]
struct Address<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[async_trait]
impl EmailProvider for SendgridClient {
    #[tracing::instrument(name = "Sending email through SendGrid", skip(self, request))]
    async fn send(&self, request: &EmailRequest) -> Result<ProviderResult, ProviderError> {
        let url = format!("{}/mail/send", self.base_url);
        let text = html_to_plain_text(request.body.as_ref());
        let sender = Address {
            email: request.from_email.as_ref(),
            name: request.from_name.as_ref(),
        };
        let request_body = SendEmailRequest {
            personalizations: [Personalization {
                to: [Address {
                    email: request.to_email.as_ref(),
                    name: request.to_name.as_ref(),
                }],
            }],
            subject: request.subject.as_ref(),
            content: [Content {
                content_type: "text/plain",
                value: &text,
            }],
            from: sender,
            reply_to: sender,
        };

        let network_error = |source: reqwest::Error| ProviderError::Network {
            provider: ProviderId::Sendgrid,
            source,
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(network_error)?;
        let status_code = response.status().as_u16();
        tracing::info!(status_code, "SendGrid responded");

        let message = if status_code == ACCEPTED {
            ACCEPTED_MESSAGE.to_string()
        } else {
            let body = response.text().await.map_err(network_error)?;
            response_field(ProviderId::Sendgrid, &body, "errors")?
        };
        Ok(ProviderResult {
            status_code,
            message,
            provider_id: ProviderId::Sendgrid,
        })
    }
}
