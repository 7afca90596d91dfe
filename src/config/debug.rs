//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// CSV row counts, data version hashes
    pub log_data_load: bool,

    /// Optimizer progress and final parameters
    pub log_model_fit: bool,

    /// Alive-path cache hits, misses and invalidations
    pub log_cache: bool,

    /// Anything about the selected customer / start date
    pub log_selection: bool,
}

pub const DF: LogFlags = LogFlags {
    log_performance: false,
    log_data_load: true,
    log_model_fit: true,
    log_cache: false,
    log_selection: false,
};
