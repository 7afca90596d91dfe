//! Sidebar filters and slider bounds.
use chrono::NaiveDate;

pub struct StartTimeSlider {
    pub min: NaiveDate,
    pub max: NaiveDate,
    pub default: NaiveDate,
}

pub struct DashboardConfig {
    /// Only customers with strictly more repeat purchases than this are ranked
    pub min_frequency: f64,
    pub start_time: StartTimeSlider,
    /// Rows shown in the "key clients" table before scrolling
    pub key_clients_visible_rows: usize,
}

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => panic!("invalid slider date"),
    }
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    min_frequency: 20.0,
    start_time: StartTimeSlider {
        min: ymd(2017, 9, 22),
        max: ymd(2019, 9, 22),
        default: ymd(2019, 6, 25),
    },
    key_clients_visible_rows: 15,
};
