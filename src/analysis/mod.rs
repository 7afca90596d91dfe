// Dashboard computations. Every function takes the dataset and customer explicitly.
pub mod alive_history;
pub mod customer_metrics;
pub mod purchase_history;
pub mod risk_ranking;

pub use {
    alive_history::{cached_customer_alive_path, customer_alive_path, customer_horizon},
    customer_metrics::{MetricCard, MetricKind, customer_metrics},
    purchase_history::{MonthlyPurchases, monthly_purchase_history},
    risk_ranking::{KeyClient, key_clients},
};
