use chrono::{DateTime, Duration, Months, Utc};

/// How far back the window is anchored.
pub const LOOKBACK_MONTHS: u32 = 12;
/// Length of the window before padding.
pub const WINDOW_MONTHS: u32 = 1;
/// Padding applied to both ends of the window.
pub const GRACE_PERIOD_DAYS: i64 = 3;

/// Release-time range requested from the catalog. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// One-month window anchored a year before `now`, padded by the grace period on each side.
    ///
    /// Month arithmetic clamps to the last day of shorter months. Returns `None` only when the
    /// result falls outside chrono's representable range.
    pub fn anchored_at(now: DateTime<Utc>) -> Option<Self> {
        let anchor = now.checked_sub_months(Months::new(LOOKBACK_MONTHS))?;
        let anchor_end = anchor.checked_add_months(Months::new(WINDOW_MONTHS))?;
        let grace = Duration::days(GRACE_PERIOD_DAYS);

        Some(Self {
            start: anchor.checked_sub_signed(grace)?,
            end: anchor_end.checked_add_signed(grace)?,
        })
    }

    pub fn current() -> Option<Self> {
        Self::anchored_at(Utc::now())
    }

    pub fn start_unix(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_unix(&self) -> i64 {
        self.end.timestamp()
    }
}
