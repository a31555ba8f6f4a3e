mod errors;
mod guards;
mod notes;
mod web;

use rocket::{Build, Rocket};

pub use errors::WebError;
pub use guards::{MaybeUser, RequireUser};

pub trait WebRocketBuildExt {
    fn install_kvnotes_web(self) -> Self;
}

impl WebRocketBuildExt for Rocket<Build> {
    fn install_kvnotes_web(self) -> Self {
        self
            .mount("/", web::web_routes())
            .mount("/", notes::notes_routes())
            .register("/", errors::catchers())
    }
}
