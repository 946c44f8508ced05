#[macro_use]
extern crate rocket;

pub mod catchers;
pub mod configuration;
pub mod domain;
pub mod html;
pub mod port_saver;
pub mod providers;
pub mod routes;
pub mod startup;
pub mod telemetry;
