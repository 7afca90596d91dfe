use {
    crate::{
        domain::{BucketWidth, TransactionEvent},
        models::{AlivePathError, ChurnScorer, ScoringSource},
    },
    chrono::NaiveDateTime,
    serde::{Deserialize, Serialize},
};

/// One bucket of a customer's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifetimeRow {
    /// Buckets since the first purchase
    pub t: usize,
    /// 1 if anything was bought in this bucket
    pub transactions: u8,
    /// Active buckets so far, minus the founding purchase
    pub frequency: i64,
    /// `t` of the latest active bucket so far
    pub recency: i64,
    pub p_alive: f64,
}

/// Bucket-indexed survival probabilities over a customer's whole observed life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLifetimeSeries {
    pub bucket_width: BucketWidth,
    /// Start of bucket 0 (the bucket of the first purchase)
    pub origin: NaiveDateTime,
    /// Buckets spanned by the raw history, before right padding
    pub observed_buckets: usize,
    pub rows: Vec<LifetimeRow>,
}

impl CustomerLifetimeSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn p_alive(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.p_alive).collect()
    }

    pub fn frequency(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.frequency).collect()
    }

    pub fn recency(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.recency).collect()
    }

    pub fn indicators(&self) -> Vec<u8> {
        self.rows.iter().map(|r| r.transactions).collect()
    }

    /// `[T, p_alive]` pairs, ready for a line series.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .map(|r| [r.t as f64, r.p_alive])
            .collect()
    }

    /// Buckets holding at least one purchase.
    pub fn purchase_buckets(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .filter(|r| r.transactions == 1)
            .map(|r| r.t)
    }

    /// Calendar start of bucket `t`.
    pub fn bucket_start(&self, t: usize) -> Option<NaiveDateTime> {
        self.bucket_width.bucket_start(self.origin, t)
    }
}

/// Per-bucket purchase counts from the first to the last transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseCounts {
    pub origin: NaiveDateTime,
    pub counts: Vec<u32>,
}

/// Turns a customer's irregular purchase timestamps into a gap-free series of
/// P(alive) values, one per bucket, from the first purchase up to the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlivePathReconstructor {
    bucket_width: BucketWidth,
}

impl AlivePathReconstructor {
    pub fn new(bucket_width: BucketWidth) -> Self {
        Self { bucket_width }
    }

    pub fn bucket_width(&self) -> BucketWidth {
        self.bucket_width
    }

    /// Reconstruct against a fitted model. The model's time unit must equal the bucket width.
    pub fn reconstruct<S: ChurnScorer + ?Sized>(
        &self,
        model: &S,
        events: &[TransactionEvent],
        horizon: usize,
    ) -> Result<CustomerLifetimeSeries, AlivePathError> {
        if model.time_unit() != self.bucket_width {
            return Err(AlivePathError::UnitMismatch {
                model: model.time_unit(),
                requested: self.bucket_width,
            });
        }
        self.reconstruct_with(events, horizon, |f, r, t| {
            model.conditional_probability_alive(f, r, t)
        })
    }

    /// Reconstruct with an arbitrary scoring function `(frequency, recency, T)`.
    ///
    /// No unit check happens here. Scores are recorded as returned, including
    /// values outside [0, 1]. The first scorer error aborts the whole path.
    pub fn reconstruct_with<F, E>(
        &self,
        events: &[TransactionEvent],
        horizon: usize,
        mut score_fn: F,
    ) -> Result<CustomerLifetimeSeries, AlivePathError>
    where
        F: FnMut(i64, i64, i64) -> Result<f64, E>,
        E: Into<ScoringSource>,
    {
        let history = self.purchase_counts(events)?;
        let observed_buckets = history.counts.len();

        let len = horizon
            .checked_add(1)
            .map(|padded| padded.max(observed_buckets))
            .ok_or_else(|| {
                AlivePathError::InvalidInput(format!("horizon {horizon} is out of range"))
            })?;
        let mut rows: Vec<LifetimeRow> = Vec::new();
        rows.try_reserve_exact(len).map_err(|e| {
            AlivePathError::InvalidInput(format!(
                "cannot hold {len} buckets for horizon {horizon}: {e}"
            ))
        })?;
        for (t, (transactions, frequency, recency)) in
            rfm_columns(&history.counts, horizon).into_iter().enumerate()
        {
            let p_alive = score_fn(frequency, recency, t as i64)
                .map_err(|e| AlivePathError::Scoring { t, source: e.into() })?;
            rows.push(LifetimeRow {
                t,
                transactions,
                frequency,
                recency,
                p_alive,
            });
        }

        Ok(CustomerLifetimeSeries {
            bucket_width: self.bucket_width,
            origin: history.origin,
            observed_buckets,
            rows,
        })
    }

    /// Bucket the events from the earliest to the latest one, zero-filling empty buckets.
    pub fn purchase_counts(
        &self,
        events: &[TransactionEvent],
    ) -> Result<PurchaseCounts, AlivePathError> {
        let (Some(first), Some(last)) = (events.iter().min(), events.iter().max()) else {
            return Err(AlivePathError::InvalidInput(
                "empty transaction history: no first purchase to anchor the series".to_string(),
            ));
        };

        let origin = self.bucket_width.floor(first.timestamp);
        let span = self.bucket_width.bucket_index(origin, last.timestamp);
        let len = usize::try_from(span)
            .ok()
            .and_then(|s| s.checked_add(1))
            .ok_or_else(|| AlivePathError::InvalidInput(format!("unusable bucket span {span}")))?;

        let mut counts = vec![0u32; len];
        for event in events {
            // In range: origin is the minimum and `len` covers the maximum.
            let idx = self.bucket_width.bucket_index(origin, event.timestamp) as usize;
            counts[idx] += 1;
        }

        Ok(PurchaseCounts { origin, counts })
    }
}

/// (indicator, frequency, recency) per bucket, right-padded to `horizon + 1` buckets.
/// Longer histories keep their full length.
pub fn rfm_columns(counts: &[u32], horizon: usize) -> Vec<(u8, i64, i64)> {
    let len = counts.len().max(horizon.saturating_add(1));
    let mut cumulative: i64 = 0;
    let mut last_active: Option<i64> = None;

    (0..len)
        .map(|t| {
            let indicator = u8::from(counts.get(t).copied().unwrap_or(0) > 0);
            cumulative += indicator as i64;
            if indicator == 1 {
                last_active = Some(t as i64);
            }
            (indicator, cumulative - 1, last_active.unwrap_or(0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::models::ModelError,
        chrono::{NaiveDate, TimeDelta},
        std::{collections::HashSet, convert::Infallible},
        strum::IntoEnumIterator,
    };

    fn day(offset: i64) -> TransactionEvent {
        let base = NaiveDate::from_ymd_opt(2019, 3, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        TransactionEvent::new(base + TimeDelta::days(offset))
    }

    fn half(_: i64, _: i64, _: i64) -> Result<f64, Infallible> {
        Ok(0.5)
    }

    fn daily() -> AlivePathReconstructor {
        AlivePathReconstructor::new(BucketWidth::Day)
    }

    #[test]
    fn gap_in_history_is_zero_filled() {
        let series = daily()
            .reconstruct_with(&[day(0), day(2)], 4, half)
            .unwrap();
        assert_eq!(series.indicators(), vec![1, 0, 1, 0, 0]);
        assert_eq!(series.frequency(), vec![0, 0, 1, 1, 1]);
        assert_eq!(series.recency(), vec![0, 0, 2, 2, 2]);
        assert_eq!(series.observed_buckets, 3);
    }

    #[test]
    fn single_purchase_zero_horizon() {
        let series = daily().reconstruct_with(&[day(0)], 0, half).unwrap();
        assert_eq!(series.indicators(), vec![1]);
        assert_eq!(series.frequency(), vec![0]);
        assert_eq!(series.recency(), vec![0]);
    }

    #[test]
    fn same_day_purchases_count_once() {
        let series = daily()
            .reconstruct_with(&[day(0), day(1), day(1)], 2, half)
            .unwrap();
        assert_eq!(series.indicators(), vec![1, 1, 0]);
        assert_eq!(series.frequency(), vec![0, 1, 1]);
        assert_eq!(series.recency(), vec![0, 1, 1]);
    }

    #[test]
    fn empty_history_is_invalid_input() {
        let err = daily().reconstruct_with(&[], 3, half).unwrap_err();
        assert!(matches!(err, AlivePathError::InvalidInput(_)));
    }

    #[test]
    fn constant_scorer_passes_through() {
        let series = daily()
            .reconstruct_with(&[day(0), day(3)], 6, half)
            .unwrap();
        assert!(series.p_alive().iter().all(|&p| p == 0.5));
    }

    #[test]
    fn out_of_range_scores_are_not_clamped() {
        let series = daily()
            .reconstruct_with(&[day(0)], 2, |_, _, t| Ok::<_, Infallible>(1.5 + t as f64))
            .unwrap();
        assert_eq!(series.p_alive(), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn long_history_is_never_truncated() {
        let series = daily()
            .reconstruct_with(&[day(0), day(9)], 3, half)
            .unwrap();
        assert_eq!(series.len(), 10);
        assert_eq!(series.rows.last().unwrap().recency, 9);
    }

    #[test]
    fn unordered_events_give_same_series() {
        let sorted = daily()
            .reconstruct_with(&[day(0), day(2), day(5)], 7, half)
            .unwrap();
        let shuffled = daily()
            .reconstruct_with(&[day(5), day(0), day(2)], 7, half)
            .unwrap();
        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn scorer_receives_bucket_coordinates() {
        let mut seen = Vec::new();
        daily()
            .reconstruct_with(&[day(0), day(2)], 3, |f, r, t| {
                seen.push((f, r, t));
                Ok::<_, Infallible>(0.0)
            })
            .unwrap();
        assert_eq!(seen, vec![(0, 0, 0), (0, 0, 1), (1, 2, 2), (1, 2, 3)]);
    }

    #[test]
    fn scorer_error_propagates_with_bucket() {
        let err = daily()
            .reconstruct_with(&[day(0)], 5, |_, _, t| {
                if t == 3 {
                    Err(ModelError::NotFitted)
                } else {
                    Ok(0.9)
                }
            })
            .unwrap_err();
        match err {
            AlivePathError::Scoring { t, source } => {
                assert_eq!(t, 3);
                assert_eq!(source.to_string(), ModelError::NotFitted.to_string());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    struct WeeklyModel;

    impl ChurnScorer for WeeklyModel {
        fn time_unit(&self) -> BucketWidth {
            BucketWidth::Week
        }

        fn conditional_probability_alive(&self, _: i64, _: i64, _: i64) -> Result<f64, ModelError> {
            Ok(1.0)
        }
    }

    #[test]
    fn unit_mismatch_is_rejected_before_scoring() {
        let err = daily()
            .reconstruct(&WeeklyModel, &[day(0)], 1)
            .unwrap_err();
        assert!(matches!(
            err,
            AlivePathError::UnitMismatch {
                model: BucketWidth::Week,
                requested: BucketWidth::Day
            }
        ));

        let weekly = AlivePathReconstructor::new(BucketWidth::Week)
            .reconstruct(&WeeklyModel, &[day(0), day(14)], 1)
            .unwrap();
        assert_eq!(weekly.len(), 3);
    }

    #[test]
    fn bucket_start_maps_back_to_calendar() {
        let series = daily().reconstruct_with(&[day(0)], 3, half).unwrap();
        let third = series.bucket_start(2).unwrap();
        assert_eq!(third.date(), day(2).timestamp.date());
        assert_eq!(series.purchase_buckets().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn rfm_columns_pad_only() {
        assert_eq!(rfm_columns(&[2, 0, 1], 1).len(), 3);
        assert_eq!(rfm_columns(&[1], 4).len(), 5);
        assert_eq!(
            rfm_columns(&[1, 3], 2),
            vec![(1, 0, 0), (1, 1, 1), (0, 1, 1)]
        );
    }

    #[test]
    fn unrepresentable_horizon_is_invalid_input() {
        for horizon in [usize::MAX, usize::MAX / 2] {
            let err = daily()
                .reconstruct_with(&[day(0)], horizon, half)
                .unwrap_err();
            assert!(matches!(err, AlivePathError::InvalidInput(_)), "{horizon}: {err:?}");
        }
    }

    /// Linear congruential generator, seeded per test.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: u64) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (self.0 >> 33) % bound
        }
    }

    #[test]
    fn columns_hold_their_laws_across_widths_and_histories() {
        let mut rng = Lcg(0x5eed);
        for width in BucketWidth::iter() {
            // Spread the events over a few dozen buckets of the current width
            let spread_minutes = match width {
                BucketWidth::Hour => 3 * 24 * 60,
                BucketWidth::Day => 60 * 24 * 60,
                BucketWidth::Week => 300 * 24 * 60,
                BucketWidth::Month => 3 * 365 * 24 * 60,
            };
            let reconstructor = AlivePathReconstructor::new(width);

            for case in 0..50 {
                let n_events = 1 + rng.next(8) as usize;
                let events: Vec<TransactionEvent> = (0..n_events)
                    .map(|_| {
                        let minutes = rng.next(spread_minutes) as i64;
                        TransactionEvent::new(day(0).timestamp + TimeDelta::minutes(minutes))
                    })
                    .collect();
                let horizon = rng.next(40) as usize;
                let ctx = format!("{width} case {case}, horizon {horizon}");

                let series = reconstructor
                    .reconstruct_with(&events, horizon, half)
                    .unwrap();

                let first = events.iter().map(|e| e.timestamp).min().unwrap();
                let last = events.iter().map(|e| e.timestamp).max().unwrap();
                assert_eq!(series.origin, width.floor(first), "{ctx}");
                assert_eq!(
                    series.observed_buckets,
                    width.bucket_index(first, last) as usize + 1,
                    "{ctx}"
                );
                assert_eq!(series.len(), series.observed_buckets.max(horizon + 1), "{ctx}");

                let mut active = 0;
                for (i, row) in series.rows.iter().enumerate() {
                    assert_eq!(row.t, i, "{ctx}");
                    active += i64::from(row.transactions);
                    assert_eq!(row.frequency, active - 1, "{ctx}, bucket {i}");
                    assert!(row.recency <= i as i64, "{ctx}, bucket {i}");
                    if row.transactions == 1 {
                        assert_eq!(row.recency, i as i64, "{ctx}, bucket {i}");
                    }
                    if i >= series.observed_buckets {
                        assert_eq!(row.transactions, 0, "{ctx}, bucket {i}");
                    }
                    if i > 0 {
                        let prev = &series.rows[i - 1];
                        assert!(row.frequency >= prev.frequency, "{ctx}, bucket {i}");
                        assert!(row.recency >= prev.recency, "{ctx}, bucket {i}");
                    }
                }
                assert_eq!(series.rows[0].transactions, 1, "{ctx}");
                assert_eq!(series.rows[0].frequency, 0, "{ctx}");

                for event in &events {
                    let idx = width.bucket_index(series.origin, event.timestamp);
                    assert!(idx >= 0, "{ctx}");
                    let idx = idx as usize;
                    assert_eq!(series.rows[idx].transactions, 1, "{ctx}, event {event:?}");
                    assert_eq!(
                        series.bucket_start(idx),
                        Some(width.floor(event.timestamp)),
                        "{ctx}, event {event:?}"
                    );
                }

                let distinct: HashSet<_> = events.iter().map(|e| width.floor(e.timestamp)).collect();
                assert_eq!(series.purchase_buckets().count(), distinct.len(), "{ctx}");
            }
        }
    }
}
