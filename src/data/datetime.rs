// src/data/datetime.rs

//! Functions to transform fixed-offset datetime substrings to chrono
//! [`DateTime`] instances, and to compare datetimes to session windows.
//!
//! All datetimes in _navmergelib_ are UTC. Navigation loggers and the
//! instrument both stamp in UTC so no timezone offset is ever inferred.
//!
//! The most relevant documents to understand this file are:
//! - `chrono` crate [`strftime`] format.
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html

#![allow(non_camel_case_types)]

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    Duration,
    NaiveDate,
    NaiveDateTime,
    TimeZone,
    Utc,
};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

#[allow(unused_imports)]
use crate::debug::printers::str_to_String_noraw;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Crate `chrono` [`strftime`] formatting pattern, passed to
/// chrono [`NaiveDateTime::parse_from_str`].
///
/// [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
/// [`NaiveDateTime::parse_from_str`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html#method.parse_from_str
pub type DateTimePattern_str = str;

/// A chrono [`DateTime`] type used in _navmergelib_.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub type DateTimeU = DateTime<Utc>;
pub type DateTimeUOpt = Option<DateTimeU>;

/// Length of the window of the last session, which has no successor
/// session to bound it.
pub const WINDOW_LAST_SESSION_HOURS: i64 = 24;

/// Return the duration of the window of the last session.
pub fn window_last_session() -> Duration {
    Duration::hours(WINDOW_LAST_SESSION_HOURS)
}

/// Parse `data` with strftime `pattern` as a UTC datetime.
///
/// The `pattern` must not have a timezone; the data is presumed UTC.
/// Returns `None` if `data` does not fully match `pattern`.
pub fn datetime_parse_from_str_utc(
    data: &str,
    pattern: &DateTimePattern_str,
) -> DateTimeUOpt {
    defn!("(pattern {:?}, data {:?})", pattern, str_to_String_noraw(data));
    match NaiveDateTime::parse_from_str(data, pattern) {
        Ok(dt_naive) => {
            let dt: DateTimeU = Utc.from_utc_datetime(&dt_naive);
            defx!("return Some({:?})", dt);

            Some(dt)
        }
        Err(_err) => {
            defx!("NaiveDateTime::parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);

            None
        }
    }
}

/// Create a UTC datetime from the passed components.
///
/// Returns `None` for out-of-range values, e.g. month `13` or second `61`.
pub fn ymdhms(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTimeUOpt {
    let dt_naive: NaiveDateTime = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, sec)?;

    Some(Utc.from_utc_datetime(&dt_naive))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime comparisons
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Describe the result of comparing one [`DateTimeU`] to a session window
/// `(start, end)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Result_Filter_DateTime2 {
    /// like Pass
    InRange,
    /// like Fail
    BeforeRange,
    /// like Fail
    AfterRange,
}

impl Result_Filter_DateTime2 {
    #[inline(always)]
    pub const fn is_pass(&self) -> bool {
        matches!(*self, Result_Filter_DateTime2::InRange)
    }

    #[inline(always)]
    pub const fn is_fail(&self) -> bool {
        matches!(*self, Result_Filter_DateTime2::AfterRange | Result_Filter_DateTime2::BeforeRange)
    }
}

/// Is the passed [`DateTimeU`] `dt` before ([`BeforeRange`]), after
/// ([`AfterRange`]), or in between ([`InRange`]) the window
/// `window_start` and `window_end`?
///
/// Comparisons are "exclusive" on both ends, i.e. `dt == window_start`
/// returns `BeforeRange` and `dt == window_end` returns `AfterRange`.
/// A record stamped exactly at a session boundary belongs to neither
/// neighboring session.
///
/// [`AfterRange`]: crate::data::datetime::Result_Filter_DateTime2::AfterRange
/// [`BeforeRange`]: crate::data::datetime::Result_Filter_DateTime2::BeforeRange
/// [`InRange`]: crate::data::datetime::Result_Filter_DateTime2::InRange
#[inline(always)]
pub fn dt_in_window(
    dt: &DateTimeU,
    window_start: &DateTimeU,
    window_end: &DateTimeU,
) -> Result_Filter_DateTime2 {
    if dt <= window_start {
        return Result_Filter_DateTime2::BeforeRange;
    }
    if window_end <= dt {
        return Result_Filter_DateTime2::AfterRange;
    }

    Result_Filter_DateTime2::InRange
}
