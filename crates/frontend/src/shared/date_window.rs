//! Business dates and the UTC windows used to query them.
//!
//! A purchase order's `date` is a calendar date with no time of day. Dates are
//! always decomposed by hand into year/month/day so that no timezone is ever
//! applied to them. A business day `D` covers the instants from
//! `D 05:00:00.000 UTC` to `D+1 04:59:59.999 UTC`.

use crate::shared::config::BUSINESS_DAY_BOUNDARY_HOUR_UTC;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};
use log::warn;

/// Calendar range as entered in the filter (`YYYY-MM-DD` or empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        let day = date.format("%Y-%m-%d").to_string();
        Self::new(day.clone(), day)
    }

    /// Default filter window: the calendar month containing `today`.
    pub fn current_month(today: NaiveDate) -> Self {
        let month_start = today.with_day(1).unwrap_or(today);
        let next_month_start = if today.month() == 12 {
            NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
        };
        let month_end = next_month_start
            .map(|d| d - Duration::days(1))
            .unwrap_or(today);

        Self::new(
            month_start.format("%Y-%m-%d").to_string(),
            month_end.format("%Y-%m-%d").to_string(),
        )
    }

    /// The month before the one `from` falls in.
    pub fn previous_month(&self) -> Option<Self> {
        let from = parse_business_date(&self.from)?;
        let in_previous = from.with_day(1)? - Duration::days(1);
        Some(Self::current_month(in_previous))
    }

    /// Both ends present and parseable; required before querying.
    pub fn is_complete(&self) -> bool {
        parse_business_date(&self.from).is_some() && parse_business_date(&self.to).is_some()
    }

    pub fn is_single_day(&self) -> bool {
        !self.from.is_empty() && self.from == self.to
    }
}

/// Split `YYYY-MM-DD` (optionally followed by `T...`) into its components.
pub fn parse_business_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next()?;
    let mut parts = date_part.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn boundary_offset() -> Duration {
    Duration::hours(BUSINESS_DAY_BOUNDARY_HOUR_UTC)
}

/// First instant of business day `date`.
pub fn business_day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc() + boundary_offset()
}

/// Last instant (millisecond precision) of business day `date`.
pub fn business_day_end(date: NaiveDate) -> DateTime<Utc> {
    business_day_start(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// Business day an instant belongs to.
pub fn business_date_of(instant: DateTime<Utc>) -> NaiveDate {
    (instant - boundary_offset()).date_naive()
}

/// Inclusive UTC window sent to the purchase-order list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    /// `2025-07-01T05:00:00.000Z`
    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn contains_business_date(&self, date: NaiveDate) -> bool {
        let opens = business_day_start(date);
        opens >= self.start && opens <= self.end
    }
}

pub fn to_query_window(range: &DateRange) -> QueryWindow {
    to_query_window_at(range, Utc::now())
}

/// Same as [`to_query_window`] with an explicit "now" for the degenerate case
/// where one end of the range is missing.
pub fn to_query_window_at(range: &DateRange, now: DateTime<Utc>) -> QueryWindow {
    let start = match parse_business_date(&range.from) {
        Some(date) => business_day_start(date),
        None => {
            warn!("date range has no usable start ({:?}), using now", range.from);
            now
        }
    };
    let end = match parse_business_date(&range.to) {
        Some(date) => business_day_end(date),
        None => {
            warn!("date range has no usable end ({:?}), using now", range.to);
            now
        }
    };
    QueryWindow { start, end }
}

fn display(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `2025-07-01` -> `Jul 1, 2025`. Unparseable input is returned unchanged.
pub fn format_for_display(date_str: &str) -> String {
    match parse_business_date(date_str) {
        Some(date) => display(date),
        None => date_str.to_string(),
    }
}

/// Human readable range; a single-day range renders as one date.
pub fn format_range_for_display(range: &DateRange) -> String {
    let from = (!range.from.trim().is_empty()).then(|| format_for_display(&range.from));
    let to = (!range.to.trim().is_empty()).then(|| format_for_display(&range.to));
    match (from, to) {
        (Some(from), Some(to)) if from == to => from,
        (Some(from), Some(to)) => format!("{} - {}", from, to),
        (Some(from), None) => format!("From {}", from),
        (None, Some(to)) => format!("Until {}", to),
        (None, None) => String::new(),
    }
}

/// Render a query window back as the business-day range it covers.
pub fn format_window_for_display(window: &QueryWindow) -> String {
    let range = DateRange::new(
        business_date_of(window.start).format("%Y-%m-%d").to_string(),
        business_date_of(window.end).format("%Y-%m-%d").to_string(),
    );
    format_range_for_display(&range)
}
