use email_service::configuration::get_configuration;
use email_service::providers::Providers;
use email_service::startup::Application;
use email_service::telemetry::{get_subscriber, init_subscriber};

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let subscriber = get_subscriber("email_service".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let providers =
        Providers::from_settings(&configuration).expect("Failed to build the provider clients.");
    let application = Application::build(&configuration, providers).await?;
    application.server.launch().await?;
    Ok(())
}
