//! Pure date-driven queries over a store snapshot.
//!
//! Every function takes an immutable slice and a reference date and
//! returns borrowed entries, so the views stay deterministic and the
//! whole module tests without a terminal.

pub mod grid;

pub use grid::{month_grid, CalendarCell};

use chrono::{Days, NaiveDate};

use crate::store::{Category, Reminder};

/// How many upcoming entries the dashboard shows.
pub const UPCOMING_DISPLAY_LIMIT: usize = 5;

/// The "upcoming week" window, in days.
pub const UPCOMING_WINDOW_DAYS: u64 = 7;

/// Everything dated `today`, insertion order, regardless of completion.
pub fn due_today<'a>(snapshot: &'a [Reminder], today: NaiveDate) -> Vec<&'a Reminder> {
    on_date(snapshot, today)
}

/// Everything dated `date`, insertion order.
pub fn on_date<'a>(snapshot: &'a [Reminder], date: NaiveDate) -> Vec<&'a Reminder> {
    snapshot.iter().filter(|r| r.date == date).collect()
}

/// Pending reminders dated within `[today, today + days]` inclusive,
/// soonest first (ties keep insertion order), capped for display.
pub fn upcoming<'a>(snapshot: &'a [Reminder], today: NaiveDate, days: u64) -> Vec<&'a Reminder> {
    let mut hits = pending_in_window(snapshot, today, days);
    hits.sort_by_key(|r| r.date);
    hits.truncate(UPCOMING_DISPLAY_LIMIT);
    hits
}

/// The untruncated size of the same window `upcoming` draws from.
pub fn upcoming_count(snapshot: &[Reminder], today: NaiveDate, days: u64) -> usize {
    pending_in_window(snapshot, today, days).len()
}

fn pending_in_window<'a>(
    snapshot: &'a [Reminder],
    today: NaiveDate,
    days: u64,
) -> Vec<&'a Reminder> {
    let end = today
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX);
    snapshot
        .iter()
        .filter(|r| !r.completed && r.date >= today && r.date <= end)
        .collect()
}

/// Aggregate counts for the dashboard stat tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed_today: usize,
    pub pending_today: usize,
    pub upcoming_week: usize,
}

pub fn stats(snapshot: &[Reminder], today: NaiveDate) -> Stats {
    let today_list = on_date(snapshot, today);
    let completed_today = today_list.iter().filter(|r| r.completed).count();
    Stats {
        total: snapshot.len(),
        completed_today,
        pending_today: today_list.len() - completed_today,
        upcoming_week: upcoming_count(snapshot, today, UPCOMING_WINDOW_DAYS),
    }
}

/// Case-insensitive substring match over title, description, and
/// category. A blank query matches everything.
pub fn search<'a>(snapshot: &'a [Reminder], query: &str) -> Vec<&'a Reminder> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return snapshot.iter().collect();
    }
    snapshot.iter().filter(|r| matches(r, &needle)).collect()
}

/// Whether one reminder matches an already-lowercased needle.
pub fn matches(reminder: &Reminder, needle: &str) -> bool {
    reminder.title.to_lowercase().contains(needle)
        || reminder.description.to_lowercase().contains(needle)
        || reminder.category.as_str().to_lowercase().contains(needle)
}

/// Narrows an already-queried list to one category; `None` means "all".
pub fn filter_category<'a>(
    reminders: Vec<&'a Reminder>,
    category: Option<&Category>,
) -> Vec<&'a Reminder> {
    match category {
        None => reminders,
        Some(wanted) => reminders
            .into_iter()
            .filter(|r| &r.category == wanted)
            .collect(),
    }
}

/// One day's completion tally, for the trailing-week overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTally {
    pub date: NaiveDate,
    pub completed: usize,
    pub total: usize,
}

/// Per-day tallies for the trailing 7 days, oldest first, ending today.
pub fn completion_series(snapshot: &[Reminder], today: NaiveDate) -> Vec<DayTally> {
    (0..UPCOMING_WINDOW_DAYS)
        .rev()
        .map(|back| {
            let date = today
                .checked_sub_days(Days::new(back))
                .unwrap_or(NaiveDate::MIN);
            let day = on_date(snapshot, date);
            DayTally {
                date,
                completed: day.iter().filter(|r| r.completed).count(),
                total: day.len(),
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    use crate::store::{Category, Priority, Reminder};

    pub fn reminder(id: i64, date: &str, completed: bool) -> Reminder {
        Reminder {
            id,
            title: format!("reminder {id}"),
            description: String::new(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            category: Category::Work,
            priority: Priority::Medium,
            completed,
            created: Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{day, reminder};
    use super::*;
    use crate::store::Category;

    #[test]
    fn due_today_ignores_completion() {
        let snapshot = vec![
            reminder(1, "2025-11-11", false),
            reminder(2, "2025-11-12", false),
            reminder(3, "2025-11-11", true),
        ];

        let due = due_today(&snapshot, day("2025-11-11"));
        let ids: Vec<i64> = due.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn completing_drops_from_upcoming_but_not_due_today() {
        let today = day("2025-11-11");
        let mut snapshot = vec![reminder(1, "2025-11-11", false)];

        assert_eq!(upcoming(&snapshot, today, 7).len(), 1);

        snapshot[0].completed = true;
        assert_eq!(due_today(&snapshot, today).len(), 1);
        assert!(upcoming(&snapshot, today, 7).is_empty());
    }

    #[test]
    fn upcoming_respects_window_and_completion() {
        let today = day("2025-11-11");
        let snapshot = vec![
            reminder(1, "2025-11-10", false), // past
            reminder(2, "2025-11-11", false), // window start
            reminder(3, "2025-11-18", false), // window end
            reminder(4, "2025-11-19", false), // past the window
            reminder(5, "2025-11-14", true),  // completed
        ];

        let hits = upcoming(&snapshot, today, 7);
        let ids: Vec<i64> = hits.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn upcoming_sorts_by_date_with_stable_ties_and_caps_at_five() {
        let today = day("2025-11-11");
        let snapshot = vec![
            reminder(1, "2025-11-15", false),
            reminder(2, "2025-11-12", false),
            reminder(3, "2025-11-12", false),
            reminder(4, "2025-11-13", false),
            reminder(5, "2025-11-14", false),
            reminder(6, "2025-11-16", false),
            reminder(7, "2025-11-11", false),
        ];

        let hits = upcoming(&snapshot, today, 7);
        let ids: Vec<i64> = hits.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 2, 3, 4, 5]);
        assert_eq!(hits.len(), UPCOMING_DISPLAY_LIMIT);
    }

    #[test]
    fn stats_count_the_untruncated_week() {
        let today = day("2025-11-11");
        let snapshot: Vec<_> = (0..8)
            .map(|i| reminder(i, "2025-11-12", false))
            .chain([
                reminder(100, "2025-11-11", true),
                reminder(101, "2025-11-11", false),
            ])
            .collect();

        let s = stats(&snapshot, today);
        assert_eq!(s.total, 10);
        assert_eq!(s.completed_today, 1);
        assert_eq!(s.pending_today, 1);
        // 8 tomorrow + 1 pending today, well past the display cap.
        assert_eq!(s.upcoming_week, 9);
    }

    #[test]
    fn search_matches_title_description_and_category() {
        let mut gym = reminder(1, "2025-11-13", false);
        gym.title = "Gym Workout".to_owned();
        gym.description = "Leg day routine".to_owned();
        gym.category = Category::Health;
        let mut dinner = reminder(2, "2025-11-14", false);
        dinner.title = "Family Dinner".to_owned();
        dinner.category = Category::Personal;
        let snapshot = vec![gym, dinner];

        assert_eq!(search(&snapshot, "GYM").len(), 1);
        assert_eq!(search(&snapshot, "leg day").len(), 1);
        assert_eq!(search(&snapshot, "personal").len(), 1);
        assert_eq!(search(&snapshot, "").len(), 2);
        assert!(search(&snapshot, "zzz").is_empty());
    }

    #[test]
    fn filter_category_narrows_to_one_category() {
        let mut a = reminder(1, "2025-11-11", false);
        a.category = Category::Health;
        let b = reminder(2, "2025-11-11", false);
        let snapshot = vec![a, b];

        let all = due_today(&snapshot, day("2025-11-11"));
        assert_eq!(filter_category(all.clone(), None).len(), 2);

        let health = filter_category(all, Some(&Category::Health));
        assert_eq!(health.len(), 1);
        assert_eq!(health[0].id, 1);
    }

    #[test]
    fn completion_series_covers_the_trailing_week() {
        let today = day("2025-11-11");
        let snapshot = vec![
            reminder(1, "2025-11-11", true),
            reminder(2, "2025-11-11", false),
            reminder(3, "2025-11-04", false), // day before the window opens
            reminder(4, "2025-11-08", true),
        ];

        let series = completion_series(&snapshot, today);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, day("2025-11-05"));
        assert_eq!(series[0].total, 0);
        assert_eq!(series[6].date, today);
        assert_eq!(series[6].completed, 1);
        assert_eq!(series[6].total, 2);
        assert_eq!(series[3].date, day("2025-11-08"));
        assert_eq!(series[3].completed, 1);
    }
}
