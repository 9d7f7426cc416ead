use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const WHOLE_SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Deal timestamps ───────────────────────────────────────────────────────────

/// Parse a `DATE_CREATE` cell such as `"2024-03-05 14:22:10,123456"`.
///
/// The fractional part after the comma is mandatory and holds 1 to 9 digits
/// read as a decimal fraction of a second, so `,5` is half a second.
/// chrono's `%f` would read the same digits as a nanosecond count, hence the
/// split on the comma. Returns `None` for anything else.
pub fn parse_deal_timestamp(s: &str) -> Option<NaiveDateTime> {
    let (whole, frac) = s.trim().rsplit_once(',')?;
    if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let base = NaiveDateTime::parse_from_str(whole, WHOLE_SECONDS_FORMAT).ok()?;
    // Right-pad to nanoseconds: "123456" → 123_456_000.
    let nanos: u32 = format!("{:0<9}", frac).parse().ok()?;
    base.with_nanosecond(nanos)
}

// ── Range bounds ──────────────────────────────────────────────────────────────

/// Which end of a date range a user-supplied bound describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Start,
    End,
}

/// Parse a user-supplied range bound.
///
/// Accepts a bare date (`2024-01-31`), whole seconds
/// (`2024-01-31 18:00:00`) or a full deal timestamp. A bare date used as an
/// end bound covers the whole day.
pub fn parse_date_bound(s: &str, kind: BoundKind) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if let Some(ts) = parse_deal_timestamp(trimmed) {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, WHOLE_SECONDS_FORMAT) {
        return Some(ts);
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    day_bound(date, kind)
}

/// First or last instant of `date`, depending on which end of a range it is.
pub fn day_bound(date: NaiveDate, kind: BoundKind) -> Option<NaiveDateTime> {
    match kind {
        BoundKind::Start => Some(date.and_time(NaiveTime::MIN)),
        BoundKind::End => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
    }
}

/// Move a range bound by whole days, keeping it on the day boundary `kind`.
pub fn step_day_bound(ts: NaiveDateTime, days: i64, kind: BoundKind) -> Option<NaiveDateTime> {
    let date = ts.date().checked_add_signed(chrono::Duration::days(days))?;
    day_bound(date, kind)
}

// ── Display ───────────────────────────────────────────────────────────────────

/// `"2024-01-15"`.
pub fn format_date(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// `"2024-01-15 10:30:00"`.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(WHOLE_SECONDS_FORMAT).to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
