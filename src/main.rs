//! hotwirekit - toolpath generator for four-axis hot-wire foam cutters

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hotwirekit::{
    import_profile, init_logging, CachedProfileSource, Config, ConfigError,
    DirectoryProfileCache, DirectoryProfileSource, ImportOptions, Job, LogFormat,
    MemoryProfileCache, ProfileCache, SettingsPaths, Simplification,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "hotwirekit")]
#[command(about = "Four-axis hot-wire foam cutter toolpath generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the cutting command stream for a job file
    Generate {
        /// Job file (default: job.toml in the user config directory)
        config: Option<PathBuf>,
        /// Directory holding canonical profile files
        #[arg(short, long, default_value = ".")]
        profiles: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a drawing as a canonical profile
    Import {
        /// DXF drawing, SVG file or cutting program
        input: PathBuf,
        /// Profile label
        #[arg(short, long)]
        name: String,
        /// Simplify the contour before extraction
        #[arg(long, value_enum)]
        simplify: Option<SimplifyMode>,
        /// Distance tolerance for `--simplify rdp`
        #[arg(long, default_value_t = 0.001)]
        epsilon: f64,
        /// Point count for `--simplify area`
        #[arg(long, default_value_t = 100)]
        target: usize,
        /// Fail when primitives do not connect to the contour
        #[arg(long)]
        strict: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file and list every problem
    Check {
        /// Job file to check
        config: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SimplifyMode {
    /// Distance-based (Douglas-Peucker)
    Rdp,
    /// Area-based (Visvalingam)
    Area,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    })?;

    match cli.command {
        Commands::Generate {
            config,
            profiles,
            output,
        } => {
            generate(config.as_deref(), &profiles, output.as_deref())?;
        }
        Commands::Import {
            input,
            name,
            simplify,
            epsilon,
            target,
            strict,
            output,
        } => {
            let mut options = ImportOptions::new(name);
            if let Some(mode) = simplify {
                options = options.with_simplification(match mode {
                    SimplifyMode::Rdp => Simplification::Distance { epsilon },
                    SimplifyMode::Area => Simplification::Area { target },
                });
            }
            if strict {
                options = options.strict();
            }
            let profile = import_profile(&input, &options)?;
            write_output(output.as_deref(), &profile.to_selig())?;
        }
        Commands::Check { config } => {
            return check(&config);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn generate(config: Option<&Path>, profiles: &Path, output: Option<&Path>) -> Result<()> {
    let paths = SettingsPaths::resolve()?;
    let config = paths.load_job(config).context("cannot load job file")?;
    let source = DirectoryProfileSource::new(profiles);

    let json = match DirectoryProfileCache::open(paths.profile_cache_dir()) {
        Ok(cache) => run_job(&config, source, cache)?,
        Err(e) => {
            tracing::warn!(error = %e, "profile cache unavailable, using memory");
            run_job(&config, source, MemoryProfileCache::new())?
        }
    };
    write_output(output, &json)
}

fn run_job<C: ProfileCache>(
    config: &Config,
    source: DirectoryProfileSource,
    cache: C,
) -> Result<String> {
    let profiles = CachedProfileSource::new(source, cache);
    let output = Job::from_config(config, &profiles)?.run()?;
    Ok(serde_json::to_string_pretty(&output)?)
}

fn check(path: &Path) -> Result<ExitCode> {
    match Config::load(path) {
        Ok(_) => {
            println!("{}: ok", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ (ConfigError::Invalid(_) | ConfigError::Toml(_))) => {
            for diagnostic in err.diagnostics() {
                println!("{}: {}", path.display(), diagnostic);
            }
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).with_context(|| format!("cannot read {}", path.display())),
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{}", text),
    }
    Ok(())
}
