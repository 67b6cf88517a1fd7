//! benchlog - write and inspect bench and site logs
//!
//! Owns the logger registry for the lifetime of the process.

use anyhow::{bail, Context, Result};
use benchlog_core::{LogConfig, LogLevel, LoggerOptions, LoggerRegistry, SiteContext, SiteSelector};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

mod telemetry;

#[derive(Parser)]
#[command(name = "benchlog")]
#[command(about = "Write and inspect bench and site logs", long_about = None)]
struct Cli {
    /// Directory for bench-wide logs (overrides BENCHLOG_BENCH_DIR)
    #[arg(long, global = true)]
    bench_dir: Option<PathBuf>,

    /// Directory containing one folder per site (overrides BENCHLOG_SITES_DIR)
    #[arg(long, global = true)]
    sites_dir: Option<PathBuf>,

    /// Minimum level written by loggers (overrides BENCHLOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Debug output for benchlog's own diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a message to a module log
    Write(WriteArgs),
    /// Show the most recent records of a module log
    Tail(TailArgs),
    /// Print the files a module logger writes to
    Paths(PathsArgs),
}

#[derive(Args)]
struct WriteArgs {
    /// Module name (log file stem); empty for the default logger
    module: String,

    message: String,

    /// Site the message belongs to
    #[arg(long, conflicts_with = "bench")]
    site: Option<String>,

    /// Write to the bench-wide log only
    #[arg(long)]
    bench: bool,

    /// Severity of the message
    #[arg(long, default_value = "info")]
    level: String,

    /// Append site and form data to the bench-wide record
    #[arg(long)]
    with_more_info: bool,

    /// Request form data as JSON
    #[arg(long)]
    form_dict: Option<String>,
}

#[derive(Args)]
struct TailArgs {
    module: String,

    /// Read the site's log instead of the bench-wide one
    #[arg(long)]
    site: Option<String>,

    /// Number of records to show
    #[arg(short = 'n', long, default_value_t = 20)]
    lines: usize,

    /// Only show records at or above this level
    #[arg(long)]
    min_level: Option<String>,

    /// Print records as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PathsArgs {
    module: String,

    #[arg(long)]
    site: Option<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = build_config(&cli);

    let _guard = telemetry::init_tracing(&config.bench_log_dir, cli.verbose)?;
    debug!("[benchlog] Config: {:?}", config);

    let registry = LoggerRegistry::new(config);
    if let Some(level) = &cli.log_level {
        registry.set_log_level(level);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Write(args) => write_message(&registry, args),
        Commands::Tail(args) => tail(&registry, args, &mut out),
        Commands::Paths(args) => print_paths(&registry, args, &mut out),
    }
}

fn build_config(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::from_env();
    if let Some(dir) = &cli.bench_dir {
        config.bench_log_dir = dir.clone();
    }
    if let Some(dir) = &cli.sites_dir {
        config.sites_root = dir.clone();
    }
    config
}

fn parse_level(name: &str) -> Result<LogLevel> {
    match LogLevel::parse(name) {
        Some(level) => Ok(level),
        None => bail!("Unknown log level '{}'", name),
    }
}

fn write_message(registry: &LoggerRegistry, args: WriteArgs) -> Result<()> {
    let level = parse_level(&args.level)?;

    let mut ctx = match &args.site {
        Some(site) => SiteContext::for_site(site),
        None => SiteContext::none(),
    };
    if let Some(raw) = &args.form_dict {
        let form_dict = serde_json::from_str(raw).context("--form-dict is not valid JSON")?;
        ctx = ctx.with_form_dict(form_dict);
    }

    let site = if args.bench {
        SiteSelector::Bench
    } else {
        SiteSelector::Current
    };
    let options = LoggerOptions::new()
        .site(site)
        .with_more_info(args.with_more_info);

    let logger = registry
        .get_logger(&args.module, options, &ctx)
        .with_context(|| format!("Failed to create logger '{}'", args.module))?;
    let written = logger
        .log(&ctx, level, args.message)
        .with_context(|| format!("Failed to write to logger '{}'", logger.name()))?;

    info!("[benchlog] Wrote {} record(s) for '{}'", written, logger.name());
    Ok(())
}

fn tail(registry: &LoggerRegistry, args: TailArgs, out: &mut impl Write) -> Result<()> {
    let min_level = args.min_level.as_deref().map(parse_level).transpose()?;
    let entries = registry.recent_records(&args.module, args.site.as_deref(), args.lines, min_level)?;

    for entry in entries {
        if args.json {
            writeln!(out, "{}", serde_json::to_string(&entry)?)?;
        } else {
            writeln!(
                out,
                "{} {} {} {}",
                entry.timestamp.format(benchlog_core::TIMESTAMP_FORMAT),
                entry.level,
                entry.logger,
                entry.message
            )?;
        }
    }
    Ok(())
}

fn print_paths(registry: &LoggerRegistry, args: PathsArgs, out: &mut impl Write) -> Result<()> {
    let config = registry.config();
    let module = if args.module.is_empty() {
        benchlog_core::DEFAULT_MODULE
    } else {
        args.module.as_str()
    };

    writeln!(out, "{}", config.bench_log_file(module).display())?;
    if let Some(site) = args.site.as_deref().filter(|s| !s.is_empty()) {
        writeln!(out, "{}", config.site_log_file(site, module).display())?;
    }
    Ok(())
}
