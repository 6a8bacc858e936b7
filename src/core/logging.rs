//! Logger setup for binaries and benches

/// Install `env_logger` as the `log` backend.
///
/// Filters default to `info`; `RUST_LOG=voxsculpt=debug` shows chunk
/// allocation, payload sizes and undo/redo transitions. Timestamps are in
/// milliseconds so per-edit costs are visible.
///
/// # Example
/// ```
/// voxsculpt::core::logging::init();
/// log::info!("Session started");
/// ```
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
