use tracing_subscriber::EnvFilter;

/// Configure tracing once for the whole process.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies. Output goes to
/// stderr so it never interleaves with the menu on stdout.
pub fn setup_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
