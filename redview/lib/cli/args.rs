use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

use super::styles;

//-------------------------------------------------------------------------------------------------
// Types
//-------------------------------------------------------------------------------------------------

/// Redview CLI - Browse a Mars rover photo catalog straight from a media directory
#[derive(Debug, Parser)]
#[command(name = "redview", author, about, version, styles=styles::styles())]
pub struct RedviewArgs {
    /// The subcommand to run
    #[command(subcommand)]
    pub subcommand: Option<RedviewSubcommand>,

    /// Directory holding the `{rover}/{camera}/{sol}/{image}` tree
    #[arg(long, global = true, value_name = "PATH")]
    pub media_root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Debug, Parser)]
pub enum RedviewSubcommand {
    /// Serve the catalog API and the media files over HTTP
    #[command(name = "serve")]
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// URL the service is reachable at
        #[arg(long)]
        public_base_url: Option<String>,
    },

    /// Print every photo at a rover's latest sol
    #[command(name = "latest")]
    Latest {
        /// Rover name
        rover: String,
    },

    /// Print the photos of one camera at one sol
    #[command(name = "photos")]
    Photos {
        /// Rover name
        rover: String,

        /// Camera name
        #[arg(short, long)]
        camera: Option<String>,

        /// Sol number
        #[arg(short, long)]
        sol: Option<u32>,
    },

    /// Print a rover's full photo history
    #[command(name = "all")]
    All {
        /// Rover name
        rover: String,

        /// Maximum number of photos to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Number of photos to skip
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },

    /// Print the photos of every camera at one sol
    #[command(name = "sol")]
    Sol {
        /// Rover name
        rover: String,

        /// Sol number
        #[arg(short, long)]
        sol: Option<u32>,
    },

    /// Print a rover's latest sol number
    #[command(name = "latest-sol")]
    LatestSol {
        /// Rover name
        rover: String,
    },
}

//-------------------------------------------------------------------------------------------------
// Methods
//-------------------------------------------------------------------------------------------------

impl RedviewArgs {
    /// Collects the configuration values given on the command line.
    pub fn config_overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            media_root: self.media_root.clone(),
            ..Default::default()
        };

        if let Some(RedviewSubcommand::Serve {
            host,
            port,
            public_base_url,
        }) = &self.subcommand
        {
            overrides.host = host.clone();
            overrides.port = *port;
            overrides.public_base_url = public_base_url.clone();
        }

        overrides
    }
}

//-------------------------------------------------------------------------------------------------
// Tests
//-------------------------------------------------------------------------------------------------
