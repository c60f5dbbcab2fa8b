use roundify_core::Config;

/// Runs the overlays until Ctrl+C or until every overlay is closed.
#[cfg(windows)]
pub fn execute(radius: f64, config: &Config) {
    roundify_core::log::init(&config.logging);

    if let Err(e) = roundify_windows::run::run(radius, config) {
        roundify_core::log_error!("Startup failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
pub fn execute(_radius: f64, _config: &Config) {
    super::unsupported("Running the overlays");
}
