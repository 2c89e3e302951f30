//! Device probe - prints the UDID and device snapshot of the running system
//!
//! ```text
//! device-probe/src/
//! ├── config.rs   # environment configuration
//! ├── logger.rs   # tracing setup
//! └── probe.rs    # collection and rendering
//! ```

pub mod config;
pub mod logger;
pub mod probe;

pub use config::{Config, OutputFormat};
pub use logger::init_logger;

/// Load `.env` and initialize logging, returning the configuration
pub fn setup_environment() -> Config {
    // .env is optional
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    init_logger(&config.log_level, config.log_dir.as_deref());
    config
}
