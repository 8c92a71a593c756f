use tracing_subscriber::EnvFilter;

/// JSON logs with `RUST_LOG`-style filtering, `info` by default.
pub fn init(service_name: &str) {
    init_with(service_name, true);
}

pub fn init_with(service_name: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::info!(service = service_name, "logging initialized");
}
