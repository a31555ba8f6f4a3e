pub mod app_constants;
pub mod app_setup;
pub mod cli;
pub mod html;
pub mod routes;
pub mod session;

use app_constants::NOTE_FORM_LIMIT;
use app_setup::AppSetupFairing;
use rocket::figment::Figment;
use rocket::figment::providers::Serialized;
use rocket::{Build, Rocket};

/// Rocket's `config` with the app's own defaults on top, for the config
/// file and environment to be merged over.
pub fn base_figment(config: rocket::Config) -> Figment {
    Figment::from(config)
        .merge(Serialized::default("limits.form", NOTE_FORM_LIMIT))
}

/// The whole web application, configured from `figment`.
pub fn build_rocket(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AppSetupFairing::new())
}
