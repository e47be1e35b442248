//! `redview` serves or queries a Mars rover photo catalog.
//!
//! ## Usage
//!
//! ```bash
//! redview serve --media-root ./media --port 4001
//! redview latest curiosity
//! redview photos curiosity --camera MAST --sol 12
//! redview all curiosity --limit 50 --offset 100
//! redview sol curiosity --sol 12
//! redview latest-sol curiosity
//! ```
//!
//! Query subcommands print the same JSON envelope the matching HTTP route returns.

use clap::{CommandFactory, Parser};
use redview::{
    catalog::{CatalogScanner, PageOptions},
    cli::{RedviewArgs, RedviewSubcommand},
    config::ServiceConfig,
    init_tracing,
    server::{CatalogServer, LatestPhotosResponse, LatestSolResponse, PhotosResponse},
};
use serde::Serialize;

//--------------------------------------------------------------------------------------------------
// Functions: main
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = RedviewArgs::parse();
    init_tracing(args.verbose);

    let config = ServiceConfig::from_env(args.config_overrides())?;

    let Some(subcommand) = args.subcommand else {
        RedviewArgs::command().print_help()?;
        return Ok(());
    };

    match subcommand {
        RedviewSubcommand::Serve { .. } => {
            CatalogServer::new(config)?.start().await?;
        }
        RedviewSubcommand::Latest { rover } => {
            let scanner = CatalogScanner::new(config.get_media_root())?;
            let latest_photos = scanner.latest_by_rover(&rover).await?;
            print_json(&LatestPhotosResponse { latest_photos })?;
        }
        RedviewSubcommand::Photos { rover, camera, sol } => {
            let scanner = CatalogScanner::new(config.get_media_root())?;
            let photos = scanner
                .by_sol_and_camera(&rover, camera.as_deref(), sol)
                .await?;
            print_json(&PhotosResponse { photos })?;
        }
        RedviewSubcommand::All {
            rover,
            limit,
            offset,
        } => {
            let scanner = CatalogScanner::new(config.get_media_root())?;
            let page = scanner
                .all_by_rover(&rover, PageOptions::new(limit, offset))
                .await?;
            print_json(&page)?;
        }
        RedviewSubcommand::Sol { rover, sol } => {
            let scanner = CatalogScanner::new(config.get_media_root())?;
            let photos = scanner.by_sol(&rover, sol).await?;
            print_json(&PhotosResponse { photos })?;
        }
        RedviewSubcommand::LatestSol { rover } => {
            let scanner = CatalogScanner::new(config.get_media_root())?;
            let latest_sol = scanner.latest_sol(&rover).await?;
            print_json(&LatestSolResponse { latest_sol })?;
        }
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
