/// Configure tracing once at application startup for the entire process.
///
/// `RUST_LOG` controls verbosity when set; otherwise `default_filter`
/// (normally [`super::CatalogConfig::log_filter`]) applies.
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=order_catalog::actors=debug,info cargo run
/// ```
pub fn setup_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
