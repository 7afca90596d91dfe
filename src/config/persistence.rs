//! File locations for input data and persisted UI state.
use std::path::{Path, PathBuf};

/// Configuration for the CSV inputs
pub struct DataFilesConfig {
    /// Default directory holding both CSV files (overridable with `--data-dir`)
    pub directory: &'static str,
    /// One row per order
    pub orders_file: &'static str,
    /// One row per customer, pre-computed RFM summary
    pub customers_file: &'static str,
}

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for saving/loading application UI state
    pub state_path: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub data: DataFilesConfig,
    pub app: AppPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    data: DataFilesConfig {
        directory: "data",
        orders_file: "df_order.csv",
        customers_file: "customers_characteristics.csv",
    },
    app: AppPersistenceConfig {
        state_path: ".states.json",
    },
};

pub fn orders_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PERSISTENCE.data.orders_file)
}

pub fn customers_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PERSISTENCE.data.customers_file)
}
