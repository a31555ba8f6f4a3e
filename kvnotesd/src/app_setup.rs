use async_trait::async_trait;
use kvnotes::config::app_config::AppConfig;
use kvnotes::storage::NoteStore;
use kvnotes::table::table_from_config;
use log::{error, info};
use rocket::fairing::{Fairing, Info};
use rocket::{Build, Orbit, Rocket};
use crate::routes::WebRocketBuildExt;
use crate::session::{SessionResolver, TrustedHeaderSessionResolver};

/// Reads [`AppConfig`] from Rocket's figment, connects the note table and
/// installs the managed state and the routes.
pub struct AppSetupFairing;

impl AppSetupFairing {
    pub fn new() -> Self {
        AppSetupFairing
    }
}

impl Default for AppSetupFairing {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        use rocket::fairing::Kind;
        Info {
            name: "app setup",
            kind: Kind::Ignite | Kind::Liftoff,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let app_config: AppConfig = ok_or_bail!(
            rocket,
            rocket.figment().extract(),
            |e| error!("failed to load app config: {e}")
        );

        let table = ok_or_bail!(
            rocket,
            table_from_config(&app_config.table).await,
            |e| error!("note table initialization failed: {e}")
        );
        let store = NoteStore::new(table);

        let session_resolver: Box<dyn SessionResolver> = Box::new(
            TrustedHeaderSessionResolver::new(&app_config.session.user_header)
        );

        Ok(
            rocket
                .manage(store)
                .manage(session_resolver)
                .manage(app_config)
                .install_kvnotes_web()
        )
    }

    async fn on_liftoff(
        &self,
        rocket: &Rocket<Orbit>,
    ) {
        if let Some(config) = rocket.state::<AppConfig>() {
            info!(
                "serving notes from the {:?} table \"{}\", users identified by the \"{}\" header",
                config.table.backend,
                config.table.name,
                config.session.user_header,
            );
        }
    }
}
