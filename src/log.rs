use std::env;

use log::LevelFilter;

/// Environment variable that turns on debug logging, like `--debug`
pub const DEBUG_ENV_VAR: &str = "CROSSWORD_DEBUG";

/// Initialize logging for the command line tool.
///
/// Logs at `Debug` level if `debug_enabled` is true, at `Info` level otherwise. `RUST_LOG` overrides both.
/// Calling it more than once keeps the first logger.
pub fn init_logger(debug_enabled: bool)
{
    let level = if debug_enabled { LevelFilter::Debug } else { LevelFilter::Info };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = env::var("RUST_LOG")
    {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_ok()
    {
        log::debug!("logger initialized at {level:?} level");
    }
}

/// Returns true if [DEBUG_ENV_VAR] is set
pub fn debug_requested() -> bool
{
    env::var_os(DEBUG_ENV_VAR).is_some()
}
