mod alive_path;
mod bgnbd;
mod error;
pub(crate) mod optimizer;
mod scorer;

pub use {
    alive_path::{
        AlivePathReconstructor, CustomerLifetimeSeries, LifetimeRow, PurchaseCounts, rfm_columns,
    },
    bgnbd::{BetaGeoFitter, BgParams, FitSummary},
    error::{AlivePathError, ModelError, ScoringSource},
    scorer::ChurnScorer,
};
