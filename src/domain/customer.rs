use {
    chrono::NaiveDateTime,
    serde::{Deserialize, Serialize},
};

/// One row of `customers_characteristics.csv`: the pre-computed RFM summary.
///
/// `frequency`, `recency` and `age` are in the model's time unit (days for the
/// shipped data). `proba` is the probability the customer is still active,
/// `p_loss` the expected revenue at risk used for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCharacteristics {
    pub customer_id: String,
    pub frequency: f64,
    pub recency: f64,
    #[serde(rename = "T")]
    pub age: f64,
    pub total_revenue_sum: f64,
    pub monthly_revenues: f64,
    #[serde(with = "crate::domain::serde_dates")]
    pub date_created_min: NaiveDateTime,
    #[serde(with = "crate::domain::serde_dates")]
    pub date_created_max: NaiveDateTime,
    pub p_loss: f64,
    pub proba: f64,
}

impl CustomerCharacteristics {
    /// Repeat purchases plus the founding one.
    pub fn transaction_count(&self) -> f64 {
        self.frequency.round() + 1.0
    }

    pub fn churn_probability(&self) -> f64 {
        1.0 - self.proba
    }

    /// Horizon for the alive path: whole time units since the first purchase.
    pub fn horizon(&self) -> usize {
        if self.age.is_finite() && self.age > 0.0 {
            self.age as usize
        } else {
            0
        }
    }
}
