//! Tracing setup shared by service binaries

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with per-crate level directives.
///
/// `log_level` applies to our own crates; noisy dependencies stay at warn.
pub fn init_tracing(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let directives = format!(
        "webserver={base_level},optimizer={base_level},shared={base_level},reqwest=warn,hyper=warn,tower_http=warn"
    );

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&directives))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
