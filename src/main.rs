use clap::{Parser, Subcommand};
use showfolio::{config, fetch, output, site};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that fetch remote content.
#[derive(clap::Args, Clone)]
struct FetchArgs {
    /// Disable the cache-bust token appended to API requests
    #[arg(long)]
    no_cache_bust: bool,
}

impl FetchArgs {
    /// Cache-bust token: the current unix timestamp, so revisits defeat
    /// stale intermediary caches. None when disabled.
    fn token(&self) -> Option<u64> {
        if self.no_cache_bust {
            None
        } else {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|d| d.as_secs())
        }
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("SHOWFOLIO_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("SHOWFOLIO_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "showfolio")]
#[command(about = "Presentation engine for remotely-managed photo portfolios")]
#[command(long_about = "\
Presentation engine for remotely-managed photo portfolios

Your content manager is the data source. showfolio fetches the portfolio
collection, the home background, about content, and the weekly featured
image over its JSON API, derives category facets locally, and renders the
visitor views as static HTML.

Generated site structure:

  dist/
  ├── index.html                   # Home (dynamic background)
  ├── about.html                   # Biography + supporting images
  ├── featured.html                # Weekly featured image with EXIF
  └── portfolio/
      ├── index.html               # All Work, page 1
      ├── all-work/1.html          # One page per (facet, page) pair
      ├── all-work/2.html
      └── wildlife/1.html

Remote content that is empty or unavailable degrades to the hand-authored
fallbacks in config.toml — failures are logged, never rendered.

Run 'showfolio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Path to config.toml (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content-manager API root (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch remote content and print the resolved manifest as JSON
    Fetch(FetchArgs),
    /// Fetch, resolve, and render the site into the output directory
    Build(FetchArgs),
    /// Fetch and validate remote content without writing output
    Check(FetchArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let mut site_config = config::load_config(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        site_config.api.base_url = base_url.clone();
    }
    site_config.validate()?;

    match cli.command {
        Command::Fetch(fetch_args) => {
            let fetcher = fetch::Fetcher::new(&site_config.api.base_url, site_config.api.timeout())?;
            let (manifest, _) = site::fetch_content(&fetcher, &site_config, fetch_args.token()).await;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Build(fetch_args) => {
            let fetcher = fetch::Fetcher::new(&site_config.api.base_url, site_config.api.timeout())?;
            println!("==> Fetching content from {}", site_config.api.base_url);
            let (manifest, report) = site::fetch_content(&fetcher, &site_config, fetch_args.token()).await;
            output::print_check_output(&report, &manifest.facets);
            println!("==> Generating HTML → {}", cli.output.display());
            let build = site::build_site(&site_config, &manifest, &cli.output)?;
            output::print_build_output(&build);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check(fetch_args) => {
            let fetcher = fetch::Fetcher::new(&site_config.api.base_url, site_config.api.timeout())?;
            println!("==> Checking {}", site_config.api.base_url);
            let (manifest, report) = site::fetch_content(&fetcher, &site_config, fetch_args.token()).await;
            output::print_check_output(&report, &manifest.facets);
            if report.all_loaded() {
                println!("==> All resources loaded");
            } else {
                println!("==> Some resources degraded to fallbacks (see statuses above)");
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
