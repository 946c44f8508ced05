use async_trait::async_trait;
use email_service::configuration::get_configuration;
use email_service::domain::EmailRequest;
use email_service::providers::{
    EmailProvider, ProviderError, ProviderId, ProviderResult, Providers,
};
use email_service::startup::Application;
use email_service::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

#[derive(Clone)]
enum MockOutcome {
    Respond { status_code: u16, message: String },
    Malfunction,
}

/// Stands in for a real provider and records every request it is handed.
#[derive(Clone)]
pub struct MockProvider {
    id: ProviderId,
    outcome: MockOutcome,
    pub sent_emails: Arc<Mutex<Vec<EmailRequest>>>,
}

impl MockProvider {
    pub fn responding(id: ProviderId, status_code: u16, message: &str) -> Self {
        Self::new(
            id,
            MockOutcome::Respond {
                status_code,
                message: message.to_string(),
            },
        )
    }

    /// Fails every send without producing a provider result.
    pub fn malfunctioning(id: ProviderId) -> Self {
        Self::new(id, MockOutcome::Malfunction)
    }

    fn new(id: ProviderId, outcome: MockOutcome) -> Self {
        Self {
            id,
            outcome,
            sent_emails: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.sent_emails.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailProvider for MockProvider {
    async fn send(&self, request: &EmailRequest) -> Result<ProviderResult, ProviderError> {
        self.sent_emails.lock().unwrap().push(request.clone());
        match &self.outcome {
            MockOutcome::Respond {
                status_code,
                message,
            } => Ok(ProviderResult {
                status_code: *status_code,
                message: message.clone(),
                provider_id: self.id,
            }),
            MockOutcome::Malfunction => Err(ProviderError::UnexpectedResponse {
                provider: self.id,
                detail: "mock provider malfunction".into(),
            }),
        }
    }
}

pub struct TestApp {
    pub address: String,
    pub mailgun: MockProvider,
    pub sendgrid: MockProvider,
}

impl TestApp {
    pub async fn post_email(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/email", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_email(&self, body: &'static str) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/email", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// A request body every provider would accept.
pub fn valid_email_body() -> serde_json::Value {
    serde_json::json!({
        "to": "ursula_le_guin@gmail.com",
        "to_name": "Ursula",
        "from": "ged@earthsea.org",
        "from_name": "Ged",
        "subject": "Testing",
        "body": "<h1>Hello</h1><p>world</p>"
    })
}

pub async fn spawn_app(mailgun: MockProvider, sendgrid: MockProvider) -> TestApp {
    spawn_app_with_default(true, mailgun, sendgrid).await
}

pub async fn spawn_app_with_default(
    use_mailgun_as_default: bool,
    mailgun: MockProvider,
    sendgrid: MockProvider,
) -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = None;
        c.email_service.use_mailgun_as_default = use_mailgun_as_default;
        c
    };

    let providers = Providers::new(Box::new(mailgun.clone()), Box::new(sendgrid.clone()));
    let app = Application::build(&configuration, providers)
        .await
        .expect("Failed to build application.");
    let port = app.port;
    let _ = tokio::spawn(app.server.launch());
    let port = port.get().await.expect("Server shut down before listening.");
    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        mailgun,
        sendgrid,
    }
}
