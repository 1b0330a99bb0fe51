use anyhow::{Context, Result, ensure};
use clap::Parser;
use constants::path::DEFAULT_CONFIG_PATH;
use strata_render_engine::engine::core::{LaunchOptions, create_app};
use strata_render_engine::tools::site_map::validate_site_map_path;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive 3D soil profile viewer", long_about = None)]
struct Args {
    /// Viewer configuration JSON, relative to the asset directory
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// glTF or GLB site map to load at startup, relative to the asset directory
    #[arg(long)]
    site_map: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    ensure!(
        args.config.to_ascii_lowercase().ends_with(".json"),
        "viewer config must be a .json file, got '{}'",
        args.config
    );
    if let Some(path) = args.site_map.as_deref() {
        validate_site_map_path(path).context("invalid --site-map")?;
    }

    let exit = create_app(LaunchOptions {
        config_path: args.config,
        site_map: args.site_map,
    })
    .run();

    ensure!(exit.is_success(), "viewer exited with {:?}", exit);
    Ok(())
}
