//! # HotwireKit
//!
//! Toolpath generation for four-axis hot-wire foam cutters.
//!
//! ## Architecture
//!
//! HotwireKit is organized as a workspace with multiple crates:
//!
//! 1. **hotwirekit-core** - Points, curves, airfoil profiles, units, profile sources
//! 2. **hotwirekit-contour** - Drawing import: chain assembly, simplification, profile extraction
//! 3. **hotwirekit-camtools** - Ribs, panels, projection and the cutting sequence
//! 4. **hotwirekit-settings** - Job file schema and settings directories
//! 5. **hotwirekit** - Job orchestration and the command line binary

pub mod import;
pub mod job;

pub use hotwirekit_camtools::{
    Command, CommandStream, FoamBlock, Machine, Panel, Phase, Placement, Rib, Toolpath,
    ToolpathError, ToolpathGenerator, WingPlan,
};
pub use hotwirekit_contour::{CanonicalProfile, ContourError};
pub use hotwirekit_core::{
    CachedProfileSource, DirectoryProfileCache, DirectoryProfileSource, MemoryProfileCache,
    Point2D, Profile, ProfileCache, ProfileSource, Units,
};
pub use hotwirekit_settings::{Config, ConfigError, SettingsPaths};
pub use import::{import_profile, ImportOptions, Simplification};
pub use job::{ControllerSettings, Job, JobOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize logging
///
/// Logs go to stderr so program output on stdout stays clean. `RUST_LOG`
/// narrows or widens the default INFO level.
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
