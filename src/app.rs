use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};
use color_eyre::Result;

use crate::components::form::ReminderFormState;
use crate::query;
use crate::store::{Category, Reminder, ReminderStore, StoreError};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Calendar,
    Settings,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Calendar,
            View::Calendar => View::Settings,
            View::Settings => View::Dashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
    Search,
}

/// Holds the store, the current view, and everything the views need.
/// All mutation funnels through the command methods below, which call
/// into the store and translate its errors into status-bar text.
pub struct App {
    pub running: bool,
    pub view: View,
    pub input_mode: InputMode,
    pub today: NaiveDate,
    pub selected_date: NaiveDate,
    pub category_filter: Option<Category>,
    pub search_query: String,
    pub form: Option<ReminderFormState>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub selection: usize,
    pub theme: Theme,
    store: ReminderStore,
}

impl App {
    pub fn new() -> Result<Self> {
        let store = ReminderStore::open_default()?;
        Ok(Self::with_store(store))
    }

    fn with_store(store: ReminderStore) -> Self {
        let today = Local::now().date_naive();
        Self {
            running: true,
            view: View::Dashboard,
            input_mode: InputMode::Normal,
            today,
            selected_date: today,
            category_filter: None,
            search_query: String::new(),
            form: None,
            status_message: None,
            show_help: false,
            selection: 0,
            theme: Theme::load(),
            store,
        }
    }

    pub fn snapshot(&self) -> &[Reminder] {
        self.store.all()
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// What the dashboard's main list shows: today's reminders, or the
    /// global search hits while a query is live. The category filter
    /// narrows either one.
    pub fn visible_today(&self) -> Vec<&Reminder> {
        let list = if self.search_query.trim().is_empty() {
            query::due_today(self.snapshot(), self.today)
        } else {
            query::search(self.snapshot(), &self.search_query)
        };
        query::filter_category(list, self.category_filter.as_ref())
    }

    pub fn day_list(&self) -> Vec<&Reminder> {
        query::on_date(self.snapshot(), self.selected_date)
    }

    /// The list j/k, Space, and d act on in the current view.
    pub fn active_list(&self) -> Vec<&Reminder> {
        match self.view {
            View::Dashboard => self.visible_today(),
            View::Calendar => self.day_list(),
            View::Settings => Vec::new(),
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.selection = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.active_list().len();
        if len > 0 && self.selection + 1 < len {
            self.selection += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.active_list().len();
        self.selection = self.selection.min(len.saturating_sub(1));
    }

    fn selected_id(&self) -> Option<i64> {
        self.active_list().get(self.selection).map(|r| r.id)
    }

    // ── commands ──

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.store.toggle_completed(id) {
            Ok(reminder) => {
                let verb = if reminder.completed {
                    "Completed"
                } else {
                    "Reopened"
                };
                self.status_message = Some(format!("{verb}: {}", reminder.title));
            }
            Err(err) => self.report(err),
        }
        self.clamp_selection();
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.store.remove(id) {
            Ok(()) => self.status_message = Some("Reminder deleted".to_string()),
            Err(err) => self.report(err),
        }
        self.clamp_selection();
    }

    pub fn open_form(&mut self) {
        let date = match self.view {
            View::Calendar => self.selected_date,
            _ => self.today,
        };
        self.form = Some(ReminderFormState::new(date));
        self.input_mode = InputMode::Form;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        match self.store.add(form.draft()) {
            Ok(reminder) => {
                self.status_message = Some(format!("Reminder added: {}", reminder.title));
                self.close_form();
            }
            Err(err @ StoreError::MissingField(_)) => {
                // Keep the form open so the field can be fixed.
                self.status_message = Some(err.to_string());
            }
            Err(err) => {
                self.report(err);
                self.close_form();
            }
        }
        self.clamp_selection();
    }

    /// Persistence failures keep the in-memory change; say so instead of
    /// pretending the operation failed outright.
    fn report(&mut self, err: StoreError) {
        if err.is_persistence() {
            self.status_message = Some(format!("Change kept in memory only: {err}"));
        } else {
            self.status_message = Some(err.to_string());
        }
    }

    // ── search & filters ──

    pub fn start_search(&mut self) {
        self.set_view(View::Dashboard);
        self.input_mode = InputMode::Search;
    }

    pub fn push_search(&mut self, c: char) {
        self.search_query.push(c);
        self.clamp_selection();
    }

    pub fn pop_search(&mut self) {
        self.search_query.pop();
    }

    pub fn finish_search(&mut self, keep: bool) {
        if !keep {
            self.search_query.clear();
        }
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    pub fn cycle_category(&mut self) {
        self.category_filter = match self.category_filter.take() {
            None => Some(Category::KNOWN[0].clone()),
            Some(current) => Category::KNOWN
                .iter()
                .position(|c| c == &current)
                .and_then(|at| Category::KNOWN.get(at + 1))
                .cloned(),
        };
        self.selection = 0;
        let label = self
            .category_filter
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "all".to_string());
        self.status_message = Some(format!("Category: {label}"));
    }

    pub fn toggle_theme(&mut self) {
        let next = self.theme.name.toggled();
        if let Err(err) = Theme::persist_name(next) {
            self.status_message = Some(format!("Theme not saved: {err}"));
        } else {
            self.status_message = Some(format!("Switched to {next} theme"));
        }
        self.theme = Theme::with_name(next);
    }

    // ── date navigation ──

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
        self.on_date_changed();
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
        self.on_date_changed();
    }

    pub fn next_month(&mut self) {
        let (year, month) = (self.selected_date.year(), self.selected_date.month());
        let (year, month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        self.jump_to_month(year, month);
    }

    pub fn prev_month(&mut self) {
        let (year, month) = (self.selected_date.year(), self.selected_date.month());
        let (year, month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        self.jump_to_month(year, month);
    }

    fn jump_to_month(&mut self, year: i32, month: u32) {
        let day = self.selected_date.day().min(days_in_month(year, month));
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            self.selected_date = date;
        }
        self.on_date_changed();
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.selected_date = self.today;
        self.on_date_changed();
    }

    fn on_date_changed(&mut self) {
        self.clamp_selection();
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid month")
    .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).expect("valid month"))
    .num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::STORE_FILE;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ReminderStore::open(dir.path().join(STORE_FILE)).unwrap();
        (App::with_store(store), dir)
    }

    #[test]
    fn month_jump_clamps_the_day() {
        let (mut app, _dir) = test_app();
        app.selected_date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

        app.next_month();
        assert_eq!(
            app.selected_date,
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );

        app.prev_month();
        assert_eq!(
            app.selected_date,
            NaiveDate::from_ymd_opt(2025, 1, 28).unwrap()
        );
    }

    #[test]
    fn december_wraps_into_january() {
        let (mut app, _dir) = test_app();
        app.selected_date = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();

        app.next_month();
        assert_eq!(
            app.selected_date,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
    }

    #[test]
    fn category_cycle_returns_to_all() {
        let (mut app, _dir) = test_app();
        assert!(app.category_filter.is_none());

        for expected in Category::KNOWN.iter() {
            app.cycle_category();
            assert_eq!(app.category_filter.as_ref(), Some(expected));
        }
        app.cycle_category();
        assert!(app.category_filter.is_none());
    }

    #[test]
    fn toggle_acts_on_the_selected_row() {
        let (mut app, _dir) = test_app();
        app.today = NaiveDate::from_ymd_opt(2025, 11, 11).unwrap();

        // Seed data has two reminders on 2025-11-11.
        let before: Vec<i64> = app.visible_today().iter().map(|r| r.id).collect();
        assert_eq!(before.len(), 2);

        app.selection = 1;
        app.toggle_selected();

        let after = app.visible_today();
        assert_eq!(after[1].id, before[1]);
        assert!(!after[1].completed); // was completed in the seed set
    }

    #[test]
    fn delete_clamps_the_selection() {
        let (mut app, _dir) = test_app();
        app.today = NaiveDate::from_ymd_opt(2025, 11, 11).unwrap();

        app.selection = 1;
        app.delete_selected();
        assert_eq!(app.visible_today().len(), 1);
        assert_eq!(app.selection, 0);
    }

    #[test]
    fn search_narrows_the_dashboard_list() {
        let (mut app, _dir) = test_app();
        app.today = NaiveDate::from_ymd_opt(2025, 11, 11).unwrap();

        app.start_search();
        for c in "grocery".chars() {
            app.push_search(c);
        }
        let hits = app.visible_today();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Grocery Shopping");

        app.finish_search(false);
        assert_eq!(app.visible_today().len(), 2);
    }
}
