use {
    crate::{models::AlivePathError, utils::TimeUtils},
    chrono::NaiveDateTime,
    serde::{Deserialize, Serialize},
};

/// A single purchase by one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub timestamp: NaiveDateTime,
}

impl TransactionEvent {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self { timestamp }
    }

    /// Build from a raw date/time string. Malformed text is rejected here, before any bucketing.
    pub fn parse(raw: &str) -> Result<Self, AlivePathError> {
        TimeUtils::parse_datetime(raw)
            .map(Self::new)
            .ok_or_else(|| AlivePathError::InvalidInput(format!("malformed timestamp {raw:?}")))
    }

    /// Build from epoch seconds. NaN / infinite / out-of-range values are rejected.
    pub fn from_epoch_secs(secs: f64) -> Result<Self, AlivePathError> {
        TimeUtils::from_epoch_secs(secs)
            .map(Self::new)
            .ok_or_else(|| AlivePathError::InvalidInput(format!("non-finite timestamp {secs}")))
    }
}

impl From<NaiveDateTime> for TransactionEvent {
    fn from(timestamp: NaiveDateTime) -> Self {
        Self::new(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_text_is_invalid_input() {
        let err = TransactionEvent::parse("not-a-date").unwrap_err();
        assert!(matches!(err, AlivePathError::InvalidInput(_)));
    }

    #[test]
    fn non_finite_epoch_is_invalid_input() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = TransactionEvent::from_epoch_secs(bad).unwrap_err();
            assert!(matches!(err, AlivePathError::InvalidInput(_)));
        }
    }

    #[test]
    fn parse_and_epoch_agree() {
        let a = TransactionEvent::parse("1970-01-02 00:00:00").unwrap();
        let b = TransactionEvent::from_epoch_secs(86_400.0).unwrap();
        assert_eq!(a, b);
    }
}
