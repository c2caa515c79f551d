//! # SolidForge
//!
//! A solid modeling service that exposes parametric CAD operations as
//! remotely invokable tools. An agent builds geometry (boxes, cylinders,
//! boolean combinations, scripted shapes) inside named workspaces, exports
//! it to STL and STEP, and can hand scripts and models to an external
//! interactive editor.
//!
//! ## Architecture
//!
//! 1. **solidforge-core** - Errors, workspace and object model, geometry engine traits
//! 2. **solidforge-settings** - Configuration loading and validation
//! 3. **solidforge-designer** - Modeling operations, export pipeline, backends, scripts
//! 4. **solidforge-communication** - Editor bridge and JSON-RPC wire types
//! 5. **solidforge** - Tool dispatch and the stdio server binary

pub mod server;

pub use server::{ServerState, ToolResponse, ToolServer};

pub use solidforge_core::{ModelingError, Result};
pub use solidforge_settings::{Config, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging from the service configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout to the protocol
/// - RUST_LOG environment variable support, falling back to the configured level
/// - JSON formatting when `settings.json` is set
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", settings.level, e))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if settings.json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_names(true)
            .json();
        registry.with(fmt_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_thread_names(true)
            .with_line_number(true);
        registry.with(fmt_layer).try_init()?;
    }

    Ok(())
}
