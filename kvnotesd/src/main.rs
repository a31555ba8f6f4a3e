use clap::{crate_name, Parser};
use kvnotes::config::figment::FigmentExt;
use kvnotes::error_exit;
use kvnotes::logging::init_daemon_logging;
use kvnotesd::{base_figment, build_rocket};
use kvnotesd::cli::CliConfig;
use log::info;

fn main() {
    let cli_config = CliConfig::parse();
    init_daemon_logging(cli_config.syslog.into());

    info!("{} starting up", crate_name!());

    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = base_figment(rocket::Config::default())
        .setup_app_config(&cli_config.config_file);

    let result = rocket::execute(
        build_rocket(figment).launch()
    );
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
