use {
    crate::domain::CustomerCharacteristics,
    chrono::NaiveDateTime,
    itertools::Itertools,
    serde::Serialize,
    std::cmp::Ordering,
};

/// A row of the "key clients to target" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyClient {
    pub customer_id: String,
    /// Monthly expenses when active, truncated to whole currency units
    pub monthly_expenses: i64,
    pub churn_probability: f64,
    pub p_loss: f64,
}

/// Customers worth a retention effort: regular buyers (`frequency > min_frequency`)
/// still active after `start_time`, most revenue at risk first.
pub fn key_clients(
    customers: &[CustomerCharacteristics],
    start_time: NaiveDateTime,
    min_frequency: f64,
) -> Vec<KeyClient> {
    customers
        .iter()
        .filter(|c| c.frequency > min_frequency && c.date_created_max > start_time)
        .sorted_by(|a, b| descending_nan_last(a.p_loss, b.p_loss))
        .map(|c| KeyClient {
            customer_id: c.customer_id.clone(),
            monthly_expenses: c.monthly_revenues as i64,
            churn_probability: c.churn_probability(),
            p_loss: c.p_loss,
        })
        .collect()
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, chrono::NaiveDate};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn customer(id: &str, frequency: f64, last: NaiveDateTime, p_loss: f64) -> CustomerCharacteristics {
        CustomerCharacteristics {
            customer_id: id.to_string(),
            frequency,
            recency: 10.0,
            age: 100.0,
            total_revenue_sum: 1_000.0,
            monthly_revenues: 99.9,
            date_created_min: at(2018, 1, 1),
            date_created_max: last,
            p_loss,
            proba: 0.8,
        }
    }

    #[test]
    fn filters_and_sorts_by_revenue_at_risk() {
        let start = at(2019, 6, 25);
        let customers = vec![
            customer("low-risk", 25.0, at(2019, 7, 1), 5.0),
            customer("infrequent", 20.0, at(2019, 7, 1), 500.0),
            customer("stale", 40.0, at(2019, 6, 25), 400.0),
            customer("high-risk", 21.0, at(2019, 8, 1), 50.0),
            customer("unknown-risk", 30.0, at(2019, 8, 1), f64::NAN),
        ];

        let ranked = key_clients(&customers, start, 20.0);
        let ids: Vec<&str> = ranked.iter().map(|k| k.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["high-risk", "low-risk", "unknown-risk"]);

        assert_eq!(ranked[0].monthly_expenses, 99);
        assert!((ranked[0].churn_probability - 0.2).abs() < 1e-12);
    }

    #[test]
    fn empty_when_nobody_qualifies() {
        let customers = vec![customer("a", 5.0, at(2019, 1, 1), 1.0)];
        assert!(key_clients(&customers, at(2018, 1, 1), 20.0).is_empty());
    }
}
