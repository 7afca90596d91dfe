mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{AppInstant, TimeUtils};

pub use maths_utils::{expit, format_thousands, log_sum_exp, mean, relative_delta, round_to};

pub(crate) use maths_utils::get_max;
