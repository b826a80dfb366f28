/// Initializes the tracing/logging infrastructure for the application.
///
/// Structured logging via the `tracing` crate with environment-based
/// filtering: set `RUST_LOG` to control verbosity.
///
/// - `RUST_LOG=info` - actor lifecycle, accepted commands, subscribers
/// - `RUST_LOG=debug` - full command payloads, per-subscriber delivery
/// - `RUST_LOG=stream_actor=debug` - debug only for this crate
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
