use crate::domain::{EmailRequest, ValidationErrors};
use crate::providers::{ProviderId, ProviderResult, Providers, SelectionPolicy};
use crate::routes::error_chain_fmt;
use anyhow::Context;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::{Json, Value};
use rocket::{Request, Response, State};
use serde_json::Map;
use uuid::Uuid;

/// Wire name → name used by the validator and everything after it.
const ADDRESS_FIELDS: [(&str, &str); 2] = [("to", "to_email"), ("from", "from_email")];

#[derive(serde::Serialize)]
pub struct SendEmailResponse {
    message: String,
    service: ProviderId,
}

impl From<ProviderResult> for SendEmailResponse {
    fn from(result: ProviderResult) -> Self {
        Self {
            message: result.message,
            service: result.provider_id,
        }
    }
}

#[tracing::instrument(
    name = "Relaying an email",
    skip(payload, providers, policy),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/email", data = "<payload>")]
pub async fn send_email(
    payload: Json<Map<String, Value>>,
    providers: &State<Providers>,
    policy: &State<SelectionPolicy>,
) -> Result<(Status, Json<SendEmailResponse>), SendEmailError> {
    let raw = rename_address_fields(payload.into_inner());
    let request = EmailRequest::parse(&raw).map_err(SendEmailError::ValidationError)?;
    let result = send_with_fallback(&request, providers, policy).await?;
    Ok((Status::new(result.status_code), Json(result.into())))
}

/// Moves `to`/`from` onto `to_email`/`from_email`. A payload that already
/// uses the internal names loses them, so clients must use the wire names.
pub fn rename_address_fields(mut payload: Map<String, Value>) -> Map<String, Value> {
    for (wire_name, field_name) in ADDRESS_FIELDS {
        match payload.remove(wire_name) {
            Some(value) => {
                payload.insert(field_name.to_string(), value);
            }
            None => {
                payload.remove(field_name);
            }
        }
    }
    payload
}

/// Sends through the default provider and, if it reports a failure, once
/// more through the other one. The second result is final either way.
#[tracing::instrument(
    name = "Sending email through the selected provider",
    skip(request, providers, policy)
)]
async fn send_with_fallback(
    request: &EmailRequest,
    providers: &Providers,
    policy: &SelectionPolicy,
) -> Result<ProviderResult, anyhow::Error> {
    let primary = policy.choose(false);
    let result = providers
        .get(primary)
        .send(request)
        .await
        .with_context(|| format!("Failed to send the email through {}.", primary))?;
    if !policy.is_failure(&result) {
        return Ok(result);
    }

    let fallback = policy.choose(true);
    tracing::warn!(
        %primary,
        %fallback,
        status_code = result.status_code,
        "Primary provider did not accept the email, trying the fallback",
    );
    providers
        .get(fallback)
        .send(request)
        .await
        .with_context(|| format!("Failed to send the email through {}.", fallback))
}

#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error("{0}")]
    ValidationError(ValidationErrors),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SendEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for SendEmailError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        match self {
            SendEmailError::ValidationError(errors) => {
                tracing::info!("Rejected an invalid email request: {}", errors);
                (Status::BadRequest, Json(errors)).respond_to(request)
            }
            SendEmailError::UnexpectedError(_) => {
                tracing::error!("SendEmailError: {:?}", self);
                Response::build().status(Status::InternalServerError).ok()
            }
        }
    }
}
