use crate::catchers::*;
use crate::configuration::Settings;
use crate::port_saver;
use crate::port_saver::Port;
use crate::providers::{Providers, SelectionPolicy};
use crate::routes::*;
use rocket::data::{Limits, ToByteUnit};
use rocket::{Config, Ignite, Rocket};

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: Port,
}

impl Application {
    /// Ignites the server without launching it. A configured port of `None`
    /// lets the OS pick one; `port` reports it once the server is listening.
    pub async fn build(
        configuration: &Settings,
        providers: Providers,
    ) -> Result<Self, rocket::Error> {
        let (port_saver, port) = port_saver::create_pair();
        let policy = SelectionPolicy::new(configuration.email_service.use_mailgun_as_default);
        let server = rocket::custom(Config {
            address: configuration.application.host,
            port: configuration.application.port.unwrap_or(0),
            limits: Limits::default().limit(
                "json",
                configuration.application.json_limit_bytes.bytes(),
            ),
            ..Config::debug_default()
        })
        .attach(port_saver)
        .manage(providers)
        .manage(policy)
        .mount("/", routes![health_check, send_email])
        .register("/", catchers![unprocessable_entity_to_bad_request])
        .ignite()
        .await?;
        Ok(Self { server, port })
    }
}
