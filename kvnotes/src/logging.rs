use std::path::Path;
use boolean_enums::gen_boolean_enum;
use log::LevelFilter;
use syslog::{BasicLogger, Facility, Formatter3164};
use thiserror::Error;

gen_boolean_enum!(pub UseSyslog);

#[derive(Debug, Error)]
enum SyslogSetupError {
    #[error("cannot connect to syslog: {0}")]
    Connect(#[from] syslog::Error),

    #[error(transparent)]
    AlreadySet(#[from] log::SetLoggerError),
}

/// Logs to syslog when asked to, otherwise (or if syslog is unreachable)
/// to stderr through `env_logger`, which honours `RUST_LOG`.
pub fn init_daemon_logging(use_syslog: UseSyslog) {
    if use_syslog.into() {
        match init_syslog() {
            Ok(()) => return,
            Err(e) => {
                init_stderr_logging();
                log::error!("falling back to stderr logging: {e}");
            },
        }
    } else {
        init_stderr_logging()
    }
}

fn init_syslog() -> Result<(), SyslogSetupError> {
    // only the 3164 formatter integrates with the log crate
    let formatter = Formatter3164 {
        facility: Facility::LOG_DAEMON,
        hostname: None,
        process: program_name(std::env::args().next().as_deref()),
        pid: std::process::id(),
    };
    let logger = syslog::unix(formatter)?;
    log::set_boxed_logger(Box::new(BasicLogger::new(logger)))?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

fn init_stderr_logging() {
    env_logger::builder()
        .filter_level(default_level())
        .parse_default_env()
        .init()
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn program_name(argv0: Option<&str>) -> String {
    argv0
        .and_then(|path| Path::new(path).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
