use {
    chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike},
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

/// Calendar resampling frequency for a transaction timeline.
///
/// Buckets are aligned to the calendar, not to the first transaction: a day
/// bucket runs midnight to midnight, a week bucket starts on Monday, a month
/// bucket starts on the 1st.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum BucketWidth {
    #[strum(serialize = "hour", to_string = "Hour")]
    Hour,
    #[default]
    #[strum(serialize = "day", to_string = "Day")]
    Day,
    #[strum(serialize = "week", to_string = "Week")]
    Week,
    #[strum(serialize = "month", to_string = "Month")]
    Month,
}

impl BucketWidth {
    /// Start of the bucket containing `dt`.
    pub fn floor(self, dt: NaiveDateTime) -> NaiveDateTime {
        let date = dt.date();
        match self {
            Self::Hour => date.and_time(NaiveTime::MIN) + TimeDelta::hours(dt.hour() as i64),
            Self::Day => date.and_time(NaiveTime::MIN),
            Self::Week => {
                let back = date.weekday().num_days_from_monday() as i64;
                (date - TimeDelta::days(back)).and_time(NaiveTime::MIN)
            }
            Self::Month => first_of_month(date).and_time(NaiveTime::MIN),
        }
    }

    /// Number of whole buckets from the bucket holding `origin` to the bucket holding `dt`.
    /// Negative when `dt` precedes `origin`.
    pub fn bucket_index(self, origin: NaiveDateTime, dt: NaiveDateTime) -> i64 {
        let start = self.floor(origin);
        let end = self.floor(dt);
        match self {
            Self::Hour => (end - start).num_hours(),
            Self::Day => (end - start).num_days(),
            Self::Week => (end - start).num_days() / 7,
            Self::Month => month_ordinal(end.date()) - month_ordinal(start.date()),
        }
    }

    /// Start of the bucket `n` buckets after the bucket holding `origin`.
    pub fn bucket_start(self, origin: NaiveDateTime, n: usize) -> Option<NaiveDateTime> {
        let start = self.floor(origin);
        let n_i64 = i64::try_from(n).ok()?;
        match self {
            Self::Hour => start.checked_add_signed(TimeDelta::try_hours(n_i64)?),
            Self::Day => start.checked_add_signed(TimeDelta::try_days(n_i64)?),
            Self::Week => start.checked_add_signed(TimeDelta::try_weeks(n_i64)?),
            Self::Month => start.checked_add_months(Months::new(u32::try_from(n).ok()?)),
        }
    }

    /// Short unit label for axis titles.
    pub fn unit_label(self) -> &'static str {
        match self {
            Self::Hour => "hours",
            Self::Day => "days",
            Self::Week => "weeks",
            Self::Month => "months",
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_ordinal(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr, strum::IntoEnumIterator};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn day_buckets_follow_calendar_midnight() {
        let origin = at("2019-01-01 23:59:00");
        assert_eq!(BucketWidth::Day.bucket_index(origin, at("2019-01-02 00:01:00")), 1);
        assert_eq!(BucketWidth::Day.bucket_index(origin, at("2019-01-01 00:00:00")), 0);
    }

    #[test]
    fn week_buckets_start_on_monday() {
        // 2019-01-06 is a Sunday, 2019-01-07 a Monday
        let sunday = at("2019-01-06 10:00:00");
        let monday = at("2019-01-07 10:00:00");
        assert_eq!(BucketWidth::Week.bucket_index(sunday, monday), 1);
        assert_eq!(BucketWidth::Week.floor(sunday).date().weekday(), chrono::Weekday::Mon);
    }

    #[test]
    fn month_buckets_cross_year_boundaries() {
        let origin = at("2018-11-30 12:00:00");
        assert_eq!(BucketWidth::Month.bucket_index(origin, at("2019-02-01 00:00:00")), 3);
        let start = BucketWidth::Month.bucket_start(origin, 3).unwrap();
        assert_eq!(start, at("2019-02-01 00:00:00"));
    }

    #[test]
    fn hour_bucket_start_round_trips_index() {
        let origin = at("2019-03-10 05:45:00");
        for n in [0usize, 1, 25, 100] {
            let start = BucketWidth::Hour.bucket_start(origin, n).unwrap();
            assert_eq!(BucketWidth::Hour.bucket_index(origin, start), n as i64);
        }
    }

    #[test]
    fn parses_from_cli_text() {
        assert_eq!(BucketWidth::from_str("day").unwrap(), BucketWidth::Day);
        assert_eq!(BucketWidth::from_str("WEEK").unwrap(), BucketWidth::Week);
        assert!(BucketWidth::from_str("fortnight").is_err());
        assert_eq!(BucketWidth::iter().count(), 4);
    }
}
