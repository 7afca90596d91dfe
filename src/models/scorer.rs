use crate::{domain::BucketWidth, models::ModelError};

/// A fitted churn model, as seen by the alive-path reconstruction.
///
/// `frequency`, `recency` and `t` are all expressed in `time_unit()`: feeding
/// day counts into a model fitted on weeks yields meaningless scores, so the
/// reconstructor checks the unit before scoring anything.
pub trait ChurnScorer {
    /// Unit the model's training data was measured in.
    fn time_unit(&self) -> BucketWidth;

    /// P(customer still active | frequency, recency, age t).
    fn conditional_probability_alive(
        &self,
        frequency: i64,
        recency: i64,
        t: i64,
    ) -> Result<f64, ModelError>;
}

impl<S: ChurnScorer + ?Sized> ChurnScorer for &S {
    fn time_unit(&self) -> BucketWidth {
        (**self).time_unit()
    }

    fn conditional_probability_alive(
        &self,
        frequency: i64,
        recency: i64,
        t: i64,
    ) -> Result<f64, ModelError> {
        (**self).conditional_probability_alive(frequency, recency, t)
    }
}
