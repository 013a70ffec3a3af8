//! Tracing setup for binaries and tests embedding this crate

use tracing_subscriber::EnvFilter;

/// Initialize stdout tracing at the default level
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Initialize stdout tracing; repeated calls are harmless
pub fn init_tracing_with_level(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let filter = format!("textmorph={base_level},reqwest=warn");

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
