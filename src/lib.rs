#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the analyze binary and integration tests)
pub use app::App;
pub use config::PERSISTENCE;
pub use data::{Dataset, load_dataset};
pub use domain::{BucketWidth, TransactionEvent};
pub use models::{AlivePathError, AlivePathReconstructor, BetaGeoFitter, ChurnScorer};

// CLI argument parsing
use {clap::Parser, std::path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding df_order.csv and customers_characteristics.csv
    #[arg(long, default_value = PERSISTENCE.data.directory)]
    pub data_dir: PathBuf,

    /// L2 penalty applied to the BG/NBD parameters when fitting
    #[arg(long, default_value_t = config::MODEL.penalizer_coef)]
    pub penalizer: f64,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
