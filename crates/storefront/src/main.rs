//! Entry point for the storefront desktop app.
//!
//! Usage:
//!   storefront
//!   storefront --catalog platzi --theme theme2
//!   storefront --config storefront.toml --in-memory

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

use storefront::components::app::App;
use storefront::{LaunchOptions, STYLES_CSS, set_launch_options};
use storefront_core::{CatalogEndpoint, StorefrontConfig, StorefrontConfigBuilder, ThemeId};

const DEFAULT_LOG_FILTER: &str = "storefront=info,storefront_core=info";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Catalog {
    Dummyjson,
    Platzi,
    Fakestore,
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Multi-theme storefront with a switchable layout")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Product listing URL; overrides --catalog
    #[arg(long)]
    catalog_url: Option<String>,

    /// Known product catalog
    #[arg(long, value_enum)]
    catalog: Option<Catalog>,

    /// DummyJSON category to list
    #[arg(long)]
    category: Option<String>,

    /// Directory for persisted theme and cart
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Do not persist anything
    #[arg(long)]
    in_memory: bool,

    /// Switch to this theme on start (theme1, theme2 or theme3)
    #[arg(short, long)]
    theme: Option<ThemeId>,

    /// Page to open first, e.g. /about
    #[arg(long)]
    open: Option<String>,

    /// tracing filter directive
    #[arg(long)]
    log_filter: Option<String>,
}

fn resolve_config(args: &Args) -> anyhow::Result<StorefrontConfig> {
    let base = match &args.config {
        Some(path) => StorefrontConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => StorefrontConfig::default(),
    };

    let mut builder = StorefrontConfigBuilder::from_config(base);

    if let Some(category) = &args.category {
        builder = builder.catalog(CatalogEndpoint::DummyJsonCategory(category.clone()));
    } else if let Some(catalog) = args.catalog {
        builder = builder.catalog(match catalog {
            Catalog::Dummyjson => CatalogEndpoint::DummyJson,
            Catalog::Platzi => CatalogEndpoint::Platzi,
            Catalog::Fakestore => CatalogEndpoint::FakeStore,
        });
    }
    if let Some(url) = &args.catalog_url {
        builder = builder.catalog_url(url.clone());
    }
    if let Some(dir) = &args.data_dir {
        builder = builder.data_dir(dir.clone());
    }

    Ok(builder.build())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = args
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = resolve_config(&args)?;
    tracing::info!(
        catalog = %config.catalog_url,
        data_dir = %config.data_dir.display(),
        in_memory = args.in_memory,
        "Starting storefront"
    );

    set_launch_options(LaunchOptions {
        config,
        in_memory: args.in_memory,
        initial_theme: args.theme,
        start_path: args.open,
    });

    let wb = WindowBuilder::new()
        .with_title("Multi-Theme Switcher")
        .with_inner_size(LogicalSize::new(1280.0, 860.0));

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(wb)
                .with_custom_head(format!(r#"<style>{}</style>"#, STYLES_CSS)),
        )
        .launch(App);

    Ok(())
}
