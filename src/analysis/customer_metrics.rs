use {
    crate::{
        data::Dataset,
        domain::CustomerCharacteristics,
        utils::{format_thousands, mean, relative_delta, round_to},
    },
    strum_macros::{Display, EnumIter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MetricKind {
    #[strum(to_string = "CLTV")]
    Cltv,
    #[strum(to_string = "Monthly expenses when active")]
    MonthlyExpenses,
    #[strum(to_string = "Age")]
    Age,
    #[strum(to_string = "Number of transactions")]
    Transactions,
}

impl MetricKind {
    fn customer_value(self, c: &CustomerCharacteristics) -> f64 {
        match self {
            Self::Cltv => c.total_revenue_sum,
            Self::MonthlyExpenses => c.monthly_revenues,
            Self::Age => c.age,
            Self::Transactions => c.frequency,
        }
    }
}

/// One headline number for the selected customer, with its deviation from the population mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricCard {
    pub kind: MetricKind,
    pub value: f64,
    pub population_mean: f64,
    /// (value - mean) / mean, rounded to two decimals
    pub delta: f64,
}

impl MetricCard {
    pub fn value_text(&self) -> String {
        let rounded = self.value.round() as i64;
        match self.kind {
            MetricKind::Cltv | MetricKind::MonthlyExpenses => {
                format!("{}$", format_thousands(rounded))
            }
            MetricKind::Age => format!("{} days", rounded),
            // Repeat purchases plus the first one
            MetricKind::Transactions => format_thousands(rounded + 1),
        }
    }

    /// Shortest decimal form, always with a fractional part (`1.0%*`, `-0.33%*`).
    /// Negative zero prints as `0.0`.
    pub fn delta_text(&self) -> String {
        let delta = if self.delta == 0.0 { 0.0 } else { self.delta };
        if delta.fract() == 0.0 {
            format!("{:.1}%*", delta)
        } else {
            format!("{}%*", delta)
        }
    }

    pub fn is_above_mean(&self) -> bool {
        self.delta > 0.0
    }
}

/// Headline cards for `customer_id`, or None if the customer is not in the summary table.
pub fn customer_metrics(dataset: &Dataset, customer_id: &str) -> Option<Vec<MetricCard>> {
    let customer = dataset.customer(customer_id)?;
    let cards = [
        MetricKind::Cltv,
        MetricKind::MonthlyExpenses,
        MetricKind::Age,
        MetricKind::Transactions,
    ]
    .into_iter()
    .map(|kind| {
        let column: Vec<f64> = dataset
            .customers
            .iter()
            .map(|c| kind.customer_value(c))
            .collect();
        let population_mean = mean(&column);
        let value = kind.customer_value(customer);
        MetricCard {
            kind,
            value,
            population_mean,
            delta: round_to(relative_delta(value, population_mean), 2),
        }
    })
    .collect();
    Some(cards)
}
