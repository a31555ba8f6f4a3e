pub mod config;
pub mod data;
pub mod logging;
pub mod note_key;
pub mod rng;
pub mod storage;
pub mod table;
pub mod lib_constants;

#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)+) => ({
        log::error!($($arg)+);
        std::process::exit(1)
    });
}
