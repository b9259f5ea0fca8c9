use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use livecheck::catalog::{FileCatalog, PackageCatalog, Selector, watchlist};
use livecheck::config::{LivecheckConfig, watchlist_path};
use livecheck::output::{OutputOptions, render_human, render_json};
use livecheck::version::fetchers::HttpFetcher;
use livecheck::version::registry::StrategyRegistry;
use livecheck::version::runner::LivecheckRunner;
use livecheck::version::strategy::Strategy;

/// Environment variable holding the log filter
const LOG_ENV: &str = "LIVECHECK_LOG";

#[derive(Parser)]
#[command(name = "livecheck")]
#[command(
    version,
    about = "Check for newer versions of packages from upstream",
    long_about = "Check for newer versions of packages from upstream.\n\n\
        If no package argument is passed, the list of packages to check is taken from \
        LIVECHECK_WATCHLIST or ~/.livecheck_watchlist."
)]
struct Cli {
    /// Packages to check
    packages: Vec<String>,

    /// Package catalog file
    #[arg(long, default_value = "packages.toml")]
    catalog: PathBuf,

    /// Configuration file with extra strategies and fetch settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Check all packages in the catalog
    #[arg(long, conflicts_with = "packages")]
    all: bool,

    /// Output information in JSON format
    #[arg(long, conflicts_with = "debug")]
    json: bool,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,

    /// Log debugging information to stderr
    #[arg(short, long)]
    debug: bool,

    /// Show the latest version only if it's newer than the package
    #[arg(long)]
    newer_only: bool,

    /// Print packages with fully-qualified names
    #[arg(long)]
    full_name: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Watchlist file used when no package is given
    #[arg(long)]
    watchlist: Option<PathBuf>,
}

impl Cli {
    fn output_options(&self) -> OutputOptions {
        OutputOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            newer_only: self.newer_only,
            full_name: self.full_name,
        }
    }
}

fn init_logging(debug: bool, log_file: Option<&PathBuf>) -> anyhow::Result<Option<WorkerGuard>> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .context("log file path has no file name")?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn build_registry(config: &LivecheckConfig) -> anyhow::Result<StrategyRegistry> {
    let mut registry = StrategyRegistry::with_builtin()?;
    for strategy_config in &config.strategies {
        let strategy = Strategy::from_config(strategy_config)
            .with_context(|| format!("invalid strategy {}", strategy_config.name))?;
        registry.register(strategy)?;
    }
    Ok(registry)
}

fn selector(cli: &Cli) -> anyhow::Result<Option<Selector>> {
    if cli.all {
        return Ok(Some(Selector::All));
    }
    if !cli.packages.is_empty() {
        return Ok(Some(Selector::Named(cli.packages.clone())));
    }

    let path = cli.watchlist.clone().unwrap_or_else(watchlist_path);
    let names = watchlist::read(&path)
        .with_context(|| format!("failed to read watchlist {}", path.display()))?;
    Ok(names.map(Selector::Named))
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = match &cli.config {
        Some(path) => LivecheckConfig::load(path)?,
        None => LivecheckConfig::default(),
    };
    let registry = Arc::new(build_registry(&config)?);

    let Some(selector) = selector(&cli)? else {
        Cli::command().print_help()?;
        return Ok(false);
    };
    let catalog = FileCatalog::load(&cli.catalog)
        .with_context(|| format!("failed to load catalog {}", cli.catalog.display()))?;
    let packages = catalog.resolve_packages(&selector)?;

    let fetcher = HttpFetcher::new(
        Duration::from_millis(config.fetch_timeout_ms),
        &config.user_agent,
    )?;
    let runner =
        LivecheckRunner::new(registry, Arc::new(fetcher)).with_concurrency(config.concurrency);
    let report = runner.run(packages).await;

    let options = cli.output_options();
    if options.json {
        println!("{}", render_json(&report, &options));
    } else {
        let rendered = render_human(&report, &options);
        for line in rendered.stdout {
            println!("{}", line);
        }
        for line in rendered.stderr {
            eprintln!("{}", line);
        }
    }

    Ok(report.had_failures)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.debug, cli.log_file.as_ref())?;

    let had_failures = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))?;

    if had_failures {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn selector_prefers_named_packages_over_watchlist() {
        let cli = Cli::parse_from(["livecheck", "w3m", "yaf", "--watchlist", "/nonexistent"]);

        let selector = selector(&cli).unwrap();

        assert_eq!(
            selector,
            Some(Selector::Named(vec!["w3m".to_string(), "yaf".to_string()]))
        );
    }

    #[test]
    fn selector_reads_watchlist_when_no_package_is_given() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist");
        std::fs::write(&path, "# tracked\nknot lzlib\n").unwrap();
        let cli = Cli::parse_from(["livecheck", "--watchlist", path.to_str().unwrap()]);

        let selector = selector(&cli).unwrap();

        assert_eq!(
            selector,
            Some(Selector::Named(vec!["knot".to_string(), "lzlib".to_string()]))
        );
    }

    #[tokio::test]
    async fn run_without_packages_or_watchlist_succeeds_without_checking() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("watchlist");
        let cli = Cli::parse_from([
            "livecheck",
            "--watchlist",
            missing.to_str().unwrap(),
            "--catalog",
            dir.path().join("packages.toml").to_str().unwrap(),
        ]);

        let had_failures = run(cli).await.unwrap();

        assert!(!had_failures);
    }
}
