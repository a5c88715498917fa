use chrono::{Datelike, Days, NaiveDate};

use crate::store::Reminder;

/// 6 rows of 7 days, enough to frame any month.
pub const GRID_CELLS: usize = 42;

/// How many per-day markers a cell shows before collapsing to a count.
pub const CELL_MARKER_LIMIT: usize = 3;

/// One day-slot in the month grid, possibly outside the displayed month.
#[derive(Debug, Clone)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub reminders: Vec<&'a Reminder>,
}

impl<'a> CalendarCell<'a> {
    /// The reminders a cell has room to mark individually.
    pub fn shown(&self) -> &[&'a Reminder] {
        let cap = self.reminders.len().min(CELL_MARKER_LIMIT);
        &self.reminders[..cap]
    }

    /// How many reminders the markers could not fit.
    pub fn overflow(&self) -> usize {
        self.reminders.len().saturating_sub(CELL_MARKER_LIMIT)
    }
}

/// Builds the 42-cell grid for `month` of `year`, starting from the
/// Sunday on or before the 1st. Each cell is annotated with the
/// reminders dated on it and whether it is `today`.
pub fn month_grid<'a>(
    snapshot: &'a [Reminder],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Vec<CalendarCell<'a>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let lead = first.weekday().num_days_from_sunday() as u64;
    let start = first
        .checked_sub_days(Days::new(lead))
        .expect("grid start in range");

    (0..GRID_CELLS as u64)
        .map(|offset| {
            let date = start
                .checked_add_days(Days::new(offset))
                .expect("grid date in range");
            CalendarCell {
                date,
                in_month: date.year() == year && date.month() == month,
                is_today: date == today,
                reminders: super::on_date(snapshot, date),
            }
        })
        .collect()
}
