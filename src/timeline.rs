use crate::timeunit;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How much calendar the board shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewGranularity {
    Month,
    Quarter,
    Year,
}

impl ViewGranularity {
    /// How many months a single previous/next navigation step covers.
    pub fn months_per_step(&self) -> i32 {
        match self {
            ViewGranularity::Month => 1,
            ViewGranularity::Quarter => 3,
            ViewGranularity::Year => 12,
        }
    }
}

/// The visible date range. Derived from anchor + granularity on every
/// recompute; never cached across navigations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: i64,
}

impl ViewWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            total_days: timeunit::days_between(start, end) + 1,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One day column of the board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_today: bool,
    pub is_month_start: bool,
}

#[derive(Debug, Clone)]
pub struct TimelineRange {
    pub window: ViewWindow,
    pub columns: Vec<DayColumn>,
}

impl TimelineRange {
    /// Compute the visible window and its day grid. `today` is injected by
    /// the caller; the engine never reads the system clock.
    pub fn compute(anchor: NaiveDate, granularity: ViewGranularity, today: NaiveDate) -> Self {
        let window = window_for(anchor, granularity);
        let mut columns = Vec::with_capacity(window.total_days as usize);
        let mut current = window.start;
        while current <= window.end {
            columns.push(DayColumn {
                date: current,
                is_weekend: matches!(current.weekday(), Weekday::Sat | Weekday::Sun),
                is_today: current == today,
                is_month_start: current.day() == 1,
            });
            current = timeunit::add_days(current, 1);
        }
        Self { window, columns }
    }
}

/// The window an anchor date maps to: its month, its anchored three-month
/// span, or its calendar year.
pub fn window_for(anchor: NaiveDate, granularity: ViewGranularity) -> ViewWindow {
    match granularity {
        ViewGranularity::Month => {
            ViewWindow::new(first_of_month(anchor), last_of_month(anchor))
        }
        ViewGranularity::Quarter => {
            let start = first_of_month(anchor);
            let end = last_of_month(add_months(start, 2));
            ViewWindow::new(start, end)
        }
        ViewGranularity::Year => {
            let start = NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap();
            let end = NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap();
            ViewWindow::new(start, end)
        }
    }
}

/// Shift the anchor by whole navigation steps (negative steps go back).
pub fn shift_anchor(anchor: NaiveDate, granularity: ViewGranularity, steps: i32) -> NaiveDate {
    add_months(anchor, granularity.months_per_step() * steps)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let next_month_first = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1).unwrap()
    };
    timeunit::add_days(next_month_first, -1)
}

fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let last_day = last_of_month(NaiveDate::from_ymd_opt(year, month, 1).unwrap()).day();
    // Clamp the day so e.g. Jan 31 + 1 month lands on the end of February.
    NaiveDate::from_ymd_opt(year, month, date.day().min(last_day)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(add_months(d(2023, 1, 31), 1), d(2023, 2, 28));
        assert_eq!(add_months(d(2024, 3, 15), -3), d(2023, 12, 15));
    }

    #[test]
    fn quarter_window_spans_three_whole_months() {
        let window = window_for(d(2024, 1, 15), ViewGranularity::Quarter);
        assert_eq!(window.start, d(2024, 1, 1));
        assert_eq!(window.end, d(2024, 3, 31));
        assert_eq!(window.total_days, 91);
    }
}
