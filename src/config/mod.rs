//! Configuration module for the churn dashboard.

// Can all be private now because we have a public re-export.
mod dashboard;
mod debug;
mod model;
mod persistence;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use dashboard::{DASHBOARD, DashboardConfig, StartTimeSlider};
pub use debug::DF;
pub use model::{MODEL, ModelConfig, OptimizerSettings};
pub use persistence::{PERSISTENCE, customers_path, orders_path};
pub use plot::PLOT_CONFIG;
