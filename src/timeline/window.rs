// src/timeline/window.rs

//! Visible date window and its navigation.
//!
//! A window is a plain value; `prev`/`next`/`today` return new windows.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::Serialize;

use crate::timeline::geometry::date_to_offset;
use crate::types::Granularity;

/// Default number of days in a window.
pub const DEFAULT_DAYS_TO_SHOW: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineWindow {
    pub range_start: NaiveDate,
    pub granularity: Granularity,
    pub days_to_show: u32,
}

/// Column header of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub date: NaiveDate,
    pub x: f64,
    pub label: String,
}

impl TimelineWindow {
    pub fn new(range_start: NaiveDate, granularity: Granularity, days_to_show: u32) -> Self {
        Self {
            range_start,
            granularity,
            days_to_show: days_to_show.max(1),
        }
    }

    /// Last visible day (inclusive).
    pub fn range_end(&self) -> NaiveDate {
        shift(self.range_start, i64::from(self.days_to_show) - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.range_start && date <= self.range_end()
    }

    /// Move back by the granularity's step.
    pub fn prev(&self) -> Self {
        Self {
            range_start: shift(self.range_start, -self.granularity.step_days()),
            ..*self
        }
    }

    /// Move forward by the granularity's step.
    pub fn next(&self) -> Self {
        Self {
            range_start: shift(self.range_start, self.granularity.step_days()),
            ..*self
        }
    }

    /// Jump so that the window starts at `today`.
    pub fn today(&self, today: NaiveDate) -> Self {
        Self {
            range_start: today,
            ..*self
        }
    }

    pub fn with_granularity(&self, granularity: Granularity) -> Self {
        Self {
            granularity,
            ..*self
        }
    }

    /// Column headers inside the window for the active granularity.
    ///
    /// - day: every day
    /// - week: every 7 days from `range_start`
    /// - month: the first of each month
    /// - quarter: the first day of each calendar quarter
    pub fn ticks(&self, unit_width: f64) -> Vec<Tick> {
        let end = self.range_end();
        let mut ticks = Vec::new();

        let mut date = match self.granularity {
            Granularity::Day | Granularity::Week => self.range_start,
            Granularity::Month => first_of_month_on_or_after(self.range_start),
            Granularity::Quarter => first_of_quarter_on_or_after(self.range_start),
        };

        while date <= end {
            ticks.push(Tick {
                date,
                x: date_to_offset(date, self.range_start, unit_width),
                label: self.label(date),
            });
            let next = match self.granularity {
                Granularity::Day => shift(date, 1),
                Granularity::Week => shift(date, 7),
                Granularity::Month => add_months(date, 1),
                Granularity::Quarter => add_months(date, 3),
            };
            // Saturated at the calendar edge.
            if next <= date {
                break;
            }
            date = next;
        }

        ticks
    }

    fn label(&self, date: NaiveDate) -> String {
        match self.granularity {
            Granularity::Day | Granularity::Week => date.format("%b %d").to_string(),
            Granularity::Month => date.format("%b %Y").to_string(),
            Granularity::Quarter => format!("Q{} {}", date.month0() / 3 + 1, date.year()),
        }
    }
}

fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(chrono::Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

fn first_of_month_on_or_after(date: NaiveDate) -> NaiveDate {
    if date.day() == 1 {
        date
    } else {
        add_months(date.with_day(1).unwrap_or(date), 1)
    }
}

fn first_of_quarter_on_or_after(date: NaiveDate) -> NaiveDate {
    let quarter_month = date.month0() / 3 * 3 + 1;
    let quarter_start =
        NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap_or(date);
    if quarter_start == date {
        date
    } else {
        add_months(quarter_start, 3)
    }
}
