use {
    crate::domain::TransactionEvent,
    chrono::NaiveDateTime,
    serde::{Deserialize, Serialize},
};

/// One row of `df_order.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub customer_id: String,
    #[serde(with = "crate::domain::serde_dates")]
    pub date_created: NaiveDateTime,
    pub total_revenue: f64,
    pub quantity: f64,
}

impl OrderRecord {
    pub fn event(&self) -> TransactionEvent {
        TransactionEvent::new(self.date_created)
    }
}
