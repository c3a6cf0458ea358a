//! Command-line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vrt",
    about = "Vehicle routing with time windows by column generation",
    version
)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve a Solomon-format VRPTW instance to its LP relaxation optimum.
    Solve {
        /// Path to the Solomon instance file.
        instance: PathBuf,

        /// Number of customers to keep from the instance.
        #[arg(long, default_value_t = 25)]
        customers: usize,

        /// Cap on column-generation iterations (overrides the config file).
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Reduced-cost tolerance (overrides the config file).
        #[arg(long)]
        tolerance: Option<f64>,

        /// Emit the result as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
}
