// src/app/state.rs

use {
    crate::{
        analysis::{KeyClient, MetricCard, MonthlyPurchases, key_clients},
        config::DASHBOARD,
        data::Dataset,
        models::{BetaGeoFitter, CustomerLifetimeSeries},
        utils::AppInstant,
    },
    chrono::NaiveDate,
    poll_promise::Promise,
    std::sync::Arc,
};

/// Dataset and the model fitted on it. Both are shared read-only once loaded.
#[derive(Clone)]
pub(crate) struct LoadedData {
    pub(crate) dataset: Arc<Dataset>,
    pub(crate) model: Arc<BetaGeoFitter>,
}

pub(crate) type LoadOutcome = anyhow::Result<LoadedData>;

#[derive(Default)]
pub(crate) enum AppState {
    /// Nothing loaded yet; the next frame starts a load.
    #[default]
    Idle,
    Loading(LoadingState),
    Running(RunningState),
    Failed(FailedState),
}

pub(crate) struct LoadingState {
    pub(crate) promise: Promise<LoadOutcome>,
    pub(crate) started: AppInstant,
}

pub(crate) struct FailedState {
    pub(crate) message: String,
}

/// Everything the central panel shows for the selected customer.
pub(crate) struct CustomerView {
    pub(crate) customer_id: String,
    pub(crate) cards: Vec<MetricCard>,
    pub(crate) alive: Result<Arc<CustomerLifetimeSeries>, String>,
    pub(crate) history: Vec<MonthlyPurchases>,
}

pub(crate) struct RunningState {
    pub(crate) data: LoadedData,
    pub(crate) key_clients: Vec<KeyClient>,
    /// Start date the ranking was computed for
    pub(crate) ranked_for: Option<NaiveDate>,
    pub(crate) view: Option<CustomerView>,
}

impl RunningState {
    pub(crate) fn new(data: LoadedData) -> Self {
        Self {
            data,
            key_clients: Vec::new(),
            ranked_for: None,
            view: None,
        }
    }

    /// Recompute the key clients table if the start date moved.
    pub(crate) fn rerank(&mut self, start_date: NaiveDate) {
        if self.ranked_for == Some(start_date) {
            return;
        }
        self.key_clients = key_clients(
            &self.data.dataset.customers,
            start_date.and_time(chrono::NaiveTime::MIN),
            DASHBOARD.min_frequency,
        );
        self.ranked_for = Some(start_date);
    }

    pub(crate) fn is_ranked(&self, customer_id: &str) -> bool {
        self.key_clients.iter().any(|c| c.customer_id == customer_id)
    }

    pub(crate) fn view_for(&self, customer_id: &str) -> Option<&CustomerView> {
        self.view
            .as_ref()
            .filter(|v| v.customer_id == customer_id)
    }
}
