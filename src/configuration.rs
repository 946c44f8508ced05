use secrecy::Secret;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_service: EmailServiceSettings,
    pub mailgun: ProviderSettings,
    pub sendgrid: ProviderSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub port: Option<u16>,
    pub host: IpAddr,
    /// Largest JSON request body accepted, in bytes.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub json_limit_bytes: u64,
}

#[derive(serde::Deserialize)]
pub struct EmailServiceSettings {
    pub use_mailgun_as_default: bool,
    pub timeout_milliseconds: u64,
}

impl EmailServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Where and how to reach one email provider's HTTP API.
#[derive(serde::Deserialize, Clone)]
pub struct ProviderSettings {
    pub api_url: String,
    pub api_key: Secret<String>,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'local' or 'production'.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!(
            "Failed to determine the current directory: {}",
            e
        ))
    })?;
    let configuration_directory = base_path.join("configuration");
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let mut settings = config::Config::default();
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;
    // e.g. `APP_MAILGUN__API_KEY=...` sets `Settings.mailgun.api_key`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;
    settings.try_into()
}
