use tracing_subscriber::EnvFilter;

//stdout belongs to the dashboard, so diagnostics go to stderr
pub fn init() {
    let env_filter = EnvFilter::try_from_env("PROC_MONITOR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
