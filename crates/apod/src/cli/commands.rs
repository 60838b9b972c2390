//! CLI command definitions.

use apod::StorageBackend;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// APOD - mirror the Astronomy Picture of the Day into a static gallery
#[derive(Parser, Debug)]
#[command(name = "apod")]
#[command(about = "Mirror NASA's Astronomy Picture of the Day into a static HTML gallery", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk backward from today and save the snapshot
    Collect(CollectArgs),

    /// Render the gallery from the saved snapshot
    Render(RenderArgs),

    /// Load the snapshot (collecting when absent), then render
    Run {
        #[command(flatten)]
        collect: CollectArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Fetch a single day and print it as JSON
    Fetch {
        /// Day to fetch (YYYY-MM-DD), latest when omitted
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Request high resolution URLs
        #[arg(long)]
        hd: bool,

        /// Also download the image to this path
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// List peers connected to the content store
    Peers,
}

/// Backfill options
#[derive(Args, Debug, Clone, Default)]
pub struct CollectArgs {
    /// Consecutive failed days that end the backfill
    #[arg(long)]
    pub max_failures: Option<u32>,

    /// Scan at most this many days
    #[arg(long)]
    pub days: Option<u32>,

    /// Request high resolution URLs
    #[arg(long)]
    pub hd: bool,
}

/// Rendering options
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Image storage backend
    #[arg(long)]
    pub backend: Option<BackendArg>,

    /// Link images to their remote URLs even when stored locally
    #[arg(long)]
    pub remote_images: bool,
}

/// Storage backend choices
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    /// Download into the local images directory
    Local,
    /// Upload to the IPFS node
    ContentStore,
}

impl From<BackendArg> for StorageBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => StorageBackend::Local,
            BackendArg::ContentStore => StorageBackend::ContentStore,
        }
    }
}
