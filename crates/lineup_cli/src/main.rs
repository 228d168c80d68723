//! Lineup CLI
//!
//! Every subcommand loads the stored team, applies one edit and writes the
//! team back (last write wins).

mod app;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Edit a soccer lineup: players, formations, photos and exports", long_about = None)]
pub struct Cli {
    /// Data directory (overrides LINEUP_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List formation presets
    Formations,

    /// Print the current lineup
    Show,

    /// Add a player
    Add {
        #[arg(long)]
        name: String,
        /// Role label, e.g. "Goalkeeper" or "Right Flank"
        #[arg(long, default_value = "")]
        position: String,
        #[arg(long)]
        jersey: u8,
    },

    /// Edit a player's form fields
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        jersey: Option<u8>,
    },

    /// Remove a player
    Remove {
        #[arg(long)]
        id: String,
    },

    /// Assign a role label to a player
    Assign {
        #[arg(long)]
        id: String,
        #[arg(long)]
        position: String,
    },

    /// Place a player at field percentages (clamped to 5..95)
    Move {
        #[arg(long)]
        id: String,
        #[arg(long, allow_hyphen_values = true)]
        x: f32,
        #[arg(long, allow_hyphen_values = true)]
        y: f32,
    },

    /// Apply a formation preset
    Formation {
        /// Formation id, e.g. "2-1-1"
        id: String,
    },

    /// Rename the team
    Rename { name: String },

    /// Flip the field display upside down (or back)
    Rotate,

    /// Change field appearance
    Appearance {
        #[arg(long)]
        field_color: Option<String>,
        #[arg(long)]
        marker_color: Option<String>,
        #[arg(long)]
        player_size: Option<u32>,
    },

    /// Crop an image file into a player's round avatar
    Photo {
        #[arg(long)]
        id: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long, default_value = "1.0")]
        zoom: f32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        pan_x: f32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        pan_y: f32,
    },

    /// Remove a player's avatar
    ClearPhoto {
        #[arg(long)]
        id: String,
    },

    /// Write the lineup as a JSON document
    ExportJson {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Write the lineup as a PNG image
    ExportImage {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::from_env().with_data_dir(cli.data_dir);

    app::run(&config, cli.command, &mut std::io::stdout())
}
