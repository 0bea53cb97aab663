//! chkdomain CLI Application
//!
//! Checks whether domain names are available by asking WHOIS servers.
//! Available domains are printed to stdout as their lookups finish.

mod ui;

use chkdomain_lib::{load_env_config, parse_timeout_string, read_domain_tokens, ConfigManager};
use chkdomain_lib::{CheckConfig, DomainChecker, EnvConfig, FileConfig, MAX_CONCURRENCY};
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{CommandFactory, Parser};
use futures::StreamExt;
use std::process;
use std::time::Instant;
use ui::Reporter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for chkdomain
#[derive(Parser, Debug)]
#[command(name = "chkdomain")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check domain name availability against WHOIS servers")]
#[command(
    long_about = "Check domain name availability against WHOIS servers.\n\nEach domain is looked up concurrently and available names are printed as soon as their lookup finishes. Output order is not stable."
)]
#[command(after_help = "Pass - as the only argument to read whitespace-separated domains from stdin.")]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain names to check, or - to read them from stdin
    #[arg(value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Print every result with its classification and elapsed milliseconds
    #[arg(short = 'd', long = "debug", help_heading = "Output")]
    pub debug: bool,

    /// Max concurrent lookups (default: 32, max: 100)
    #[arg(short = 'c', long = "concurrency", value_name = "N", help_heading = "Lookup")]
    pub concurrency: Option<usize>,

    /// Per-query timeout, e.g. 5s, 2m or 30 (default: none)
    #[arg(short = 't', long = "timeout", value_name = "DURATION", help_heading = "Lookup")]
    pub timeout: Option<String>,

    /// Query this WHOIS server for every domain
    #[arg(short = 's', long = "server", value_name = "HOST[:PORT]", help_heading = "Lookup")]
    pub server: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging and a summary line on stderr
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
struct Settings {
    config: CheckConfig,
    debug: bool,
}

#[tokio::main]
async fn main() {
    let started = Instant::now();
    let args = Args::parse();

    init_tracing(args.verbose);

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run_domain_check(args, started).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > MAX_CONCURRENCY {
            return Err(format!(
                "concurrency must be between 1 and {}",
                MAX_CONCURRENCY
            ));
        }
    }

    if let Some(timeout) = &args.timeout {
        if parse_timeout_string(timeout).is_none() {
            return Err(format!(
                "invalid timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout
            ));
        }
    }

    if let Some(server) = &args.server {
        if server.trim().is_empty() {
            return Err("server cannot be empty".to_string());
        }
    }

    Ok(())
}

/// Main domain checking logic
async fn run_domain_check(
    args: Args,
    started: Instant,
) -> Result<(), Box<dyn std::error::Error>> {
    let domains = get_domains_to_check(&args.domains)?;
    if domains.is_empty() {
        eprintln!("{}", Args::command().render_usage());
        return Err("no domains to check".into());
    }

    let settings = build_settings(&args)?;
    tracing::debug!(
        domains = domains.len(),
        concurrency = settings.config.concurrency,
        timeout = ?settings.config.timeout,
        server = ?settings.config.server,
        "starting checks"
    );

    let checker = DomainChecker::with_config(settings.config);
    let mut reporter = Reporter::new(settings.debug, started);

    let mut results = checker.check_domains_stream(domains);
    while let Some(result) = results.next().await {
        reporter.report(&result);
    }

    if args.verbose {
        reporter.print_summary();
    }

    Ok(())
}

/// Collect the domains to check. A sole `-` means read them from stdin.
fn get_domains_to_check(raw: &[String]) -> chkdomain_lib::Result<Vec<String>> {
    match raw {
        [only] if only == "-" => read_domain_tokens(std::io::stdin().lock()),
        _ => Ok(raw.to_vec()),
    }
}

/// Build the run settings with precedence: CLI > env > config file > defaults.
fn build_settings(args: &Args) -> Result<Settings, Box<dyn std::error::Error>> {
    let env_config = load_env_config();
    let file_config = load_file_config(args, &env_config)?;
    Ok(resolve_settings(args, &env_config, &file_config))
}

/// Load the explicit config file, or fall back to discovery.
///
/// An explicit file that fails to load is fatal. Problems with discovered
/// files are logged and the defaults are used instead.
fn load_file_config(
    args: &Args,
    env_config: &EnvConfig,
) -> Result<FileConfig, Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new(args.verbose);

    if let Some(path) = args.config.as_ref().or(env_config.config.as_ref()) {
        tracing::debug!(path = %path, "using explicit config file");
        return config_manager
            .load_file(path)
            .map_err(|e| format!("failed to load config file '{}': {}", path, e).into());
    }

    match config_manager.discover_and_load() {
        Ok(file_config) => Ok(file_config),
        Err(e) => {
            tracing::warn!("ignoring config files: {}", e);
            Ok(FileConfig::default())
        }
    }
}

fn resolve_settings(args: &Args, env_config: &EnvConfig, file_config: &FileConfig) -> Settings {
    let config = file_config.apply_to(CheckConfig::default());
    let config = env_config.apply_to(config);
    let config = apply_cli_args_to_config(config, args);

    let debug = args.debug || env_config.debug.or(file_config.debug()).unwrap_or(false);

    Settings { config, debug }
}

/// Apply CLI arguments to config (highest precedence).
fn apply_cli_args_to_config(mut config: CheckConfig, args: &Args) -> CheckConfig {
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout) = args.timeout.as_deref().and_then(parse_timeout_string) {
        config = config.with_timeout(timeout);
    }
    if let Some(server) = &args.server {
        config = config.with_server(server.trim());
    }
    config
}
