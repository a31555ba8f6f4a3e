use std::path::Path;
use rocket::figment::Figment;
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use crate::config::app_config::AppConfig;
use crate::lib_constants::{APP_CONFIG_ENV_PREFIX, APP_CONFIG_ENV_SPLIT};

pub trait FigmentExt {
    fn setup_app_config(
        self,
        config_file: impl AsRef<Path>,
    ) -> Figment;
}

impl FigmentExt for Figment {
    fn setup_app_config(self, config_file: impl AsRef<Path>) -> Figment {
        self.merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file_exact(config_file.as_ref()))
            .merge(
                Env::prefixed(APP_CONFIG_ENV_PREFIX)
                    .split(APP_CONFIG_ENV_SPLIT)
                    .global()
            )
    }
}
