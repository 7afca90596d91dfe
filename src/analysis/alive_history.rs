use {
    crate::{
        data::{AlivePathCache, AlivePathKey, Dataset},
        domain::{BucketWidth, OrderRecord},
        models::{AlivePathError, AlivePathReconstructor, ChurnScorer, CustomerLifetimeSeries},
    },
    std::sync::Arc,
};

/// Horizon for `customer_id`: its age `T` from the summary table, or 0 when it has no summary row
/// (the path then spans exactly the observed history).
pub fn customer_horizon(dataset: &Dataset, customer_id: &str) -> usize {
    dataset
        .customer(customer_id)
        .map(|c| c.horizon())
        .unwrap_or(0)
}

/// P(alive) history for one customer, scored by `model`.
pub fn customer_alive_path<S: ChurnScorer + ?Sized>(
    dataset: &Dataset,
    model: &S,
    customer_id: &str,
    bucket_width: BucketWidth,
    horizon: usize,
) -> Result<CustomerLifetimeSeries, AlivePathError> {
    let events: Vec<_> = dataset
        .orders_of(customer_id)
        .map(OrderRecord::event)
        .collect();
    if events.is_empty() {
        return Err(AlivePathError::InvalidInput(format!(
            "customer {customer_id} has no recorded orders"
        )));
    }
    crate::trace_time!("Alive path", 20_000, {
        AlivePathReconstructor::new(bucket_width).reconstruct(model, &events, horizon)
    })
}

/// Same as [`customer_alive_path`] with the customer's own horizon, memoised per data version.
pub fn cached_customer_alive_path<S: ChurnScorer + ?Sized>(
    cache: &mut AlivePathCache,
    dataset: &Dataset,
    model: &S,
    customer_id: &str,
    bucket_width: BucketWidth,
) -> Result<Arc<CustomerLifetimeSeries>, AlivePathError> {
    let horizon = customer_horizon(dataset, customer_id);
    let key = AlivePathKey {
        customer_id: customer_id.to_string(),
        data_version: dataset.version,
        horizon,
        bucket_width,
    };
    cache.get_or_try_insert_with(key, || {
        customer_alive_path(dataset, model, customer_id, bucket_width, horizon)
    })
}
