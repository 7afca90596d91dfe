use {
    crate::domain::OrderRecord,
    chrono::{Datelike, NaiveDate},
    std::collections::BTreeMap,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPurchases {
    /// First day of the calendar month
    pub month: NaiveDate,
    pub total_revenue: f64,
    pub quantity: f64,
}

/// Sum revenue and quantity per calendar month, oldest month first.
/// Months without orders are absent, not zero-filled.
pub fn monthly_purchase_history<'a, I>(orders: I) -> Vec<MonthlyPurchases>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut by_month: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
    for order in orders {
        let date = order.date_created.date();
        let slot = by_month
            .entry((date.year(), date.month()))
            .or_insert((0.0, 0.0));
        slot.0 += order.total_revenue;
        slot.1 += order.quantity;
    }

    by_month
        .into_iter()
        .filter_map(|((year, month), (total_revenue, quantity))| {
            Some(MonthlyPurchases {
                month: NaiveDate::from_ymd_opt(year, month, 1)?,
                total_revenue,
                quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use {super::*, crate::utils::TimeUtils};

    fn order(date: &str, revenue: f64, quantity: f64) -> OrderRecord {
        OrderRecord {
            customer_id: "7".to_string(),
            date_created: TimeUtils::parse_datetime(date).unwrap(),
            total_revenue: revenue,
            quantity,
        }
    }

    #[test]
    fn groups_by_calendar_month_in_order() {
        let orders = vec![
            order("2019-03-02", 10.0, 1.0),
            order("2018-12-31 23:59:00", 5.0, 2.0),
            order("2019-03-30", 15.0, 4.0),
            order("2019-01-01", 7.0, 1.0),
        ];
        let history = monthly_purchase_history(&orders);

        let months: Vec<String> = history.iter().map(|m| m.month.format("%Y-%m").to_string()).collect();
        assert_eq!(months, vec!["2018-12", "2019-01", "2019-03"]);
        assert_eq!(history[2].total_revenue, 25.0);
        assert_eq!(history[2].quantity, 5.0);
    }

    #[test]
    fn no_orders_no_months() {
        assert!(monthly_purchase_history(&Vec::new()).is_empty());
    }
}
