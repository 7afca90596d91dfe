//! BG/NBD ("Beta-Geometric / Negative Binomial") buy-till-you-die model.
//!
//! Transactions while alive follow a Poisson process whose rate is Gamma(r, alpha)
//! distributed across customers; after each purchase a customer drops out with a
//! probability that is Beta(a, b) distributed across customers.
use {
    crate::{
        config::{DF, MODEL},
        domain::{BucketWidth, CustomerCharacteristics},
        models::{ChurnScorer, ModelError, optimizer::nelder_mead},
        utils::{expit, log_sum_exp},
    },
    rayon::prelude::*,
    serde::{Deserialize, Serialize},
    statrs::function::gamma::ln_gamma,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BgParams {
    pub r: f64,
    pub alpha: f64,
    pub a: f64,
    pub b: f64,
}

impl BgParams {
    fn from_log(log_params: &[f64]) -> Self {
        Self {
            r: log_params[0].exp(),
            alpha: log_params[1].exp(),
            a: log_params[2].exp(),
            b: log_params[3].exp(),
        }
    }

    fn sum_of_squares(&self) -> f64 {
        self.r * self.r + self.alpha * self.alpha + self.a * self.a + self.b * self.b
    }
}

/// Outcome of a fit, kept for logging and the CLI summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub params: BgParams,
    pub negative_log_likelihood: f64,
    pub iterations: usize,
    pub converged: bool,
    pub customers: usize,
}

/// Population-level summary statistics, one entry per customer.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Observation {
    frequency: f64,
    recency: f64,
    age: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaGeoFitter {
    pub penalizer_coef: f64,
    pub time_unit: BucketWidth,
    summary: Option<FitSummary>,
}

impl Default for BetaGeoFitter {
    fn default() -> Self {
        Self::new(MODEL.penalizer_coef)
    }
}

impl BetaGeoFitter {
    pub fn new(penalizer_coef: f64) -> Self {
        Self {
            penalizer_coef,
            time_unit: MODEL.time_unit,
            summary: None,
        }
    }

    /// Build an already-fitted model from known parameters.
    pub fn from_params(params: BgParams, time_unit: BucketWidth) -> Self {
        Self {
            penalizer_coef: MODEL.penalizer_coef,
            time_unit,
            summary: Some(FitSummary {
                params,
                negative_log_likelihood: f64::NAN,
                iterations: 0,
                converged: true,
                customers: 0,
            }),
        }
    }

    pub fn params(&self) -> Option<BgParams> {
        self.summary.map(|s| s.params)
    }

    pub fn summary(&self) -> Option<&FitSummary> {
        self.summary.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.summary.is_some()
    }

    /// Fit on the RFM summary table.
    pub fn fit_customers(
        &mut self,
        customers: &[CustomerCharacteristics],
    ) -> Result<&FitSummary, ModelError> {
        let frequency: Vec<f64> = customers.iter().map(|c| c.frequency).collect();
        let recency: Vec<f64> = customers.iter().map(|c| c.recency).collect();
        let age: Vec<f64> = customers.iter().map(|c| c.age).collect();
        self.fit(&frequency, &recency, &age)
    }

    /// Maximum (penalised) likelihood fit, optimised over log-parameters.
    ///
    /// Recency and `T` are rescaled before optimising and `alpha` is mapped back to
    /// the input time unit afterwards. The reported likelihood is the scaled one.
    pub fn fit(
        &mut self,
        frequency: &[f64],
        recency: &[f64],
        age: &[f64],
    ) -> Result<&FitSummary, ModelError> {
        let observations = validate_inputs(frequency, recency, age)?;
        let scale = time_scale(&observations);
        let observations = rescale(observations, scale);
        let penalizer = self.penalizer_coef;

        let objective = |log_params: &[f64]| {
            negative_log_likelihood(&BgParams::from_log(log_params), &observations, penalizer)
        };

        let x0 = [MODEL.optimizer.initial_log_param; 4];
        let minimum = crate::trace_time!("BG/NBD fit", 500_000, {
            nelder_mead(objective, &x0, &MODEL.optimizer)
        });

        if !minimum.fun.is_finite() {
            return Err(ModelError::DidNotConverge(format!(
                "objective is {} after {} iterations",
                minimum.fun, minimum.iterations
            )));
        }

        let mut params = BgParams::from_log(&minimum.x);
        params.alpha /= scale;

        let summary = FitSummary {
            params,
            negative_log_likelihood: minimum.fun,
            iterations: minimum.iterations,
            converged: minimum.converged,
            customers: observations.len(),
        };

        if DF.log_model_fit {
            log::info!(
                "BG/NBD fitted on {} customers in {} iterations (converged: {}): {:?}, -LL/n = {:.6}",
                summary.customers,
                summary.iterations,
                summary.converged,
                summary.params,
                summary.negative_log_likelihood
            );
        }
        if !summary.converged {
            log::warn!(
                "BG/NBD optimizer hit the iteration cap ({}), parameters may be imprecise",
                MODEL.optimizer.max_iterations
            );
        }

        Ok(self.summary.insert(summary))
    }

    /// P(alive) for real-valued summary statistics.
    pub fn probability_alive(
        &self,
        frequency: f64,
        recency: f64,
        age: f64,
    ) -> Result<f64, ModelError> {
        let p = self.params().ok_or(ModelError::NotFitted)?;
        if frequency == 0.0 {
            return Ok(1.0);
        }
        let log_div = (p.r + frequency) * ((p.alpha + age) / (p.alpha + recency)).ln()
            + (p.a / (p.b + frequency.max(1.0) - 1.0)).ln();
        Ok(expit(-log_div))
    }
}

impl ChurnScorer for BetaGeoFitter {
    fn time_unit(&self) -> BucketWidth {
        self.time_unit
    }

    fn conditional_probability_alive(
        &self,
        frequency: i64,
        recency: i64,
        t: i64,
    ) -> Result<f64, ModelError> {
        self.probability_alive(frequency as f64, recency as f64, t as f64)
    }
}

fn validate_inputs(
    frequency: &[f64],
    recency: &[f64],
    age: &[f64],
) -> Result<Vec<Observation>, ModelError> {
    if frequency.is_empty() {
        return Err(ModelError::InvalidInput("no customers to fit on".to_string()));
    }
    if frequency.len() != recency.len() || frequency.len() != age.len() {
        return Err(ModelError::InvalidInput(format!(
            "column lengths differ: frequency {}, recency {}, T {}",
            frequency.len(),
            recency.len(),
            age.len()
        )));
    }

    frequency
        .iter()
        .zip(recency)
        .zip(age)
        .enumerate()
        .map(|(i, ((&f, &r), &t))| {
            if !(f.is_finite() && r.is_finite() && t.is_finite()) {
                return Err(ModelError::InvalidInput(format!("row {i}: non-finite value")));
            }
            if f < 0.0 || r < 0.0 || t < 0.0 {
                return Err(ModelError::InvalidInput(format!("row {i}: negative value")));
            }
            if f.fract() != 0.0 {
                return Err(ModelError::InvalidInput(format!(
                    "row {i}: non-integer frequency {f}"
                )));
            }
            if r > t {
                return Err(ModelError::InvalidInput(format!(
                    "row {i}: recency {r} exceeds T {t}"
                )));
            }
            Ok(Observation {
                frequency: f,
                recency: r,
                age: t,
            })
        })
        .collect()
}

/// Factor that brings the oldest customer's `T` to `MODEL.scaled_max_age`.
fn time_scale(observations: &[Observation]) -> f64 {
    let max_age = observations.iter().map(|o| o.age).fold(0.0, f64::max);
    if max_age > 0.0 {
        MODEL.scaled_max_age / max_age
    } else {
        1.0
    }
}

fn rescale(observations: Vec<Observation>, scale: f64) -> Vec<Observation> {
    observations
        .into_iter()
        .map(|obs| Observation {
            recency: obs.recency * scale,
            age: obs.age * scale,
            ..obs
        })
        .collect()
}

fn individual_log_likelihood(p: &BgParams, obs: &Observation) -> f64 {
    let x = obs.frequency;
    let a1 = ln_gamma(p.r + x) - ln_gamma(p.r) + p.r * p.alpha.ln();
    let a2 = ln_gamma(p.a + p.b) + ln_gamma(p.b + x) - ln_gamma(p.b) - ln_gamma(p.a + p.b + x);
    let a3 = -(p.r + x) * (p.alpha + obs.age).ln();
    let a4 = if x > 0.0 {
        p.a.ln() - (p.b + x - 1.0).ln() - (p.r + x) * (p.alpha + obs.recency).ln()
    } else {
        f64::NEG_INFINITY
    };
    a1 + a2 + log_sum_exp(a3, a4)
}

/// Mean negative log-likelihood plus an L2 penalty on the raw parameters.
fn negative_log_likelihood(p: &BgParams, observations: &[Observation], penalizer: f64) -> f64 {
    let total: f64 = observations
        .par_iter()
        .map(|obs| individual_log_likelihood(p, obs))
        .sum();
    -total / observations.len() as f64 + penalizer * p.sum_of_squares()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> BgParams {
        // Published CDNOW estimates (daily-scaled values are not needed for shape checks)
        BgParams {
            r: 0.243,
            alpha: 4.414,
            a: 0.793,
            b: 2.426,
        }
    }

    fn fitted() -> BetaGeoFitter {
        BetaGeoFitter::from_params(reference_params(), BucketWidth::Day)
    }

    #[test]
    fn unfitted_model_refuses_to_score() {
        let model = BetaGeoFitter::new(0.0);
        assert_eq!(
            model.conditional_probability_alive(1, 1, 2),
            Err(ModelError::NotFitted)
        );
    }

    #[test]
    fn no_repeat_purchases_means_alive() {
        let model = fitted();
        assert_eq!(model.conditional_probability_alive(0, 0, 500).unwrap(), 1.0);
    }

    #[test]
    fn alive_probability_decays_after_last_purchase() {
        let model = fitted();
        let mut previous = model.conditional_probability_alive(3, 10, 10).unwrap();
        for t in [15, 30, 60, 120] {
            let p = model.conditional_probability_alive(3, 10, t).unwrap();
            assert!(p < previous, "p({t}) = {p} should be below {previous}");
            assert!((0.0..=1.0).contains(&p));
            previous = p;
        }
    }

    #[test]
    fn matches_closed_form() {
        let model = fitted();
        let p = reference_params();
        let (x, tx, t) = (2.0, 30.43, 38.86);
        let log_div =
            (p.r + x) * ((p.alpha + t) / (p.alpha + tx)).ln() + (p.a / (p.b + x - 1.0)).ln();
        let expected = 1.0 / (1.0 + log_div.exp());
        let got = model.probability_alive(x, tx, t).unwrap();
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_population() {
        let mut model = BetaGeoFitter::new(0.0);
        assert!(matches!(
            model.fit(&[], &[], &[]),
            Err(ModelError::InvalidInput(_))
        ));
        assert!(matches!(
            model.fit(&[1.0], &[5.0], &[3.0]),
            Err(ModelError::InvalidInput(_))
        ));
        assert!(matches!(
            model.fit(&[1.5], &[1.0], &[3.0]),
            Err(ModelError::InvalidInput(_))
        ));
        assert!(matches!(
            model.fit(&[1.0, 2.0], &[1.0], &[3.0]),
            Err(ModelError::InvalidInput(_))
        ));
        assert!(!model.is_fitted());
    }

    fn synthetic_population() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        // Deterministic mix of loyal, lapsed and one-off customers
        let mut frequency = Vec::new();
        let mut recency = Vec::new();
        let mut age = Vec::new();
        for i in 0..300 {
            let t = 100.0 + (i % 50) as f64 * 4.0;
            let (f, r) = match i % 3 {
                0 => ((i % 12) as f64 + 3.0, t - (i % 7) as f64),
                1 => ((i % 4) as f64 + 1.0, t * 0.3),
                _ => (0.0, 0.0),
            };
            frequency.push(f);
            recency.push(r);
            age.push(t);
        }
        (frequency, recency, age)
    }

    #[test]
    fn fit_improves_likelihood_and_yields_positive_params() {
        let (f, r, t) = synthetic_population();
        let observations = validate_inputs(&f, &r, &t).unwrap();
        let observations = rescale(observations.clone(), time_scale(&observations));
        let start = BgParams::from_log(&[MODEL.optimizer.initial_log_param; 4]);
        let start_nll = negative_log_likelihood(&start, &observations, 0.0);

        let mut model = BetaGeoFitter::new(0.0);
        let summary = *model.fit(&f, &r, &t).unwrap();

        assert!(summary.negative_log_likelihood < start_nll);
        let p = summary.params;
        for v in [p.r, p.alpha, p.a, p.b] {
            assert!(v.is_finite() && v > 0.0);
        }
        assert_eq!(summary.customers, 300);

        // Loyal, recently active customer should look more alive than a lapsed one
        let loyal = model.probability_alive(10.0, 195.0, 200.0).unwrap();
        let lapsed = model.probability_alive(10.0, 20.0, 200.0).unwrap();
        assert!(loyal > lapsed);
    }

    #[test]
    fn penalizer_shrinks_parameters() {
        let (f, r, t) = synthetic_population();
        let mut free = BetaGeoFitter::new(0.0);
        let mut penalised = BetaGeoFitter::new(0.1);
        let free_p = free.fit(&f, &r, &t).unwrap().params;
        let pen_p = penalised.fit(&f, &r, &t).unwrap().params;

        // The penalty applies to the parameters the optimiser sees
        let scale = time_scale(&validate_inputs(&f, &r, &t).unwrap());
        let in_fit_units = |p: BgParams| BgParams {
            alpha: p.alpha * scale,
            ..p
        };
        assert!(in_fit_units(pen_p).sum_of_squares() < in_fit_units(free_p).sum_of_squares());
    }

    #[test]
    fn alpha_follows_the_time_unit() {
        let (f, r_days, t_days) = synthetic_population();
        let r_weeks: Vec<f64> = r_days.iter().map(|r| r / 7.0).collect();
        let t_weeks: Vec<f64> = t_days.iter().map(|t| t / 7.0).collect();

        let daily = BetaGeoFitter::new(0.0).fit(&f, &r_days, &t_days).unwrap().params;
        let weekly = BetaGeoFitter::new(0.0).fit(&f, &r_weeks, &t_weeks).unwrap().params;

        let close = |x: f64, y: f64| ((x - y) / y).abs() < 1e-4;
        assert!(close(daily.alpha / weekly.alpha, 7.0), "{daily:?} vs {weekly:?}");
        assert!(close(daily.r, weekly.r));
        assert!(close(daily.a, weekly.a));
        assert!(close(daily.b, weekly.b));
    }

    #[test]
    fn rescale_maps_oldest_customer_to_fixed_age() {
        let observations = validate_inputs(&[1.0, 0.0], &[20.0, 0.0], &[40.0, 10.0]).unwrap();
        let scale = time_scale(&observations);
        let scaled = rescale(observations, scale);
        assert_eq!(scaled[0].age, MODEL.scaled_max_age);
        assert_eq!(scaled[0].recency, MODEL.scaled_max_age / 2.0);
        assert_eq!(scaled[0].frequency, 1.0);
        // All-zero ages are left untouched
        assert_eq!(time_scale(&validate_inputs(&[0.0], &[0.0], &[0.0]).unwrap()), 1.0);
    }
}
