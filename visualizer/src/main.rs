use anyhow::Context;
use app::{application_subscription, application_theme, application_title, Locator};
use clap::Parser;
use config::LocatorConfig;
use std::path::PathBuf;

mod app;
mod config;
mod map_canvas;
mod tile_cache;

#[derive(Parser)]
#[command(author, version, about = "Lunar fleet locator")]
struct Args {
    /// Load settings from a YAML file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL serving /api/vehicles.json
    #[arg(long)]
    api_base: Option<String>,
    /// Initial route, e.g. /vehicle/2
    #[arg(long, default_value = "/")]
    route: String,
    /// Re-fetch the fleet every N seconds (0 disables)
    #[arg(long)]
    refresh_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = args.config {
        LocatorConfig::load(path)?
    } else {
        LocatorConfig::default()
    };
    config.apply_overrides(args.api_base, args.refresh_secs);
    let settings = config.to_shell_settings(&args.route);

    // Fail before opening a window if the templates or API URL are unusable.
    config.validate(&args.route).context("validating locator settings")?;
    log::info!("fleet endpoint {}{}", config.api_base, config.vehicles_path);

    let window_size = iced::Size::new(config.viewport.width, config.viewport.height);
    iced::application(
        move || Locator::boot(&config, &settings),
        Locator::update,
        Locator::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .window_size(window_size)
    .run()
    .context("running the locator window")
}
