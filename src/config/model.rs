//! BG/NBD fitting parameters.
use crate::domain::BucketWidth;

pub struct OptimizerSettings {
    /// Starting value for every log-parameter
    pub initial_log_param: f64,
    /// Edge length of the initial simplex, in log space
    pub initial_step: f64,
    pub max_iterations: usize,
    /// Stop when the spread of objective values across the simplex drops below this
    pub f_tolerance: f64,
    /// ... and the simplex has collapsed below this in parameter space
    pub x_tolerance: f64,
}

pub struct ModelConfig {
    pub penalizer_coef: f64,
    /// Unit the `frequency` / `recency` / `T` columns were computed in
    pub time_unit: BucketWidth,
    /// Ages are rescaled so the oldest customer sits at this value while fitting
    pub scaled_max_age: f64,
    pub optimizer: OptimizerSettings,
}

pub const MODEL: ModelConfig = ModelConfig {
    penalizer_coef: 0.0,
    time_unit: BucketWidth::Day,
    scaled_max_age: 10.0,
    optimizer: OptimizerSettings {
        initial_log_param: 0.1,
        initial_step: 0.5,
        max_iterations: 5_000,
        f_tolerance: 1e-10,
        x_tolerance: 1e-8,
    },
};
