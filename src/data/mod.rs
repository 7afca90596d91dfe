mod cache;
mod loader;

pub use {
    cache::{AlivePathCache, AlivePathKey, CacheStats, ModelCache},
    loader::{DataVersion, Dataset, load_dataset},
};
