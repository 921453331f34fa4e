/// Initializes the `env_logger` backend for the `log` facade. Call once at
/// process start; the `RUST_LOG` environment variable controls verbosity
/// (defaults to `info` when unset).
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
