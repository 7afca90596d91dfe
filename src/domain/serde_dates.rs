//! serde adapters for the date columns in the CSV inputs.
use {
    crate::utils::TimeUtils,
    chrono::NaiveDateTime,
    serde::{Deserialize, Deserializer, Serializer, de::Error},
};

const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    TimeUtils::parse_datetime(&raw)
        .ok_or_else(|| D::Error::custom(format!("unparsable date {raw:?}")))
}

pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.format(WRITE_FORMAT).to_string())
}
