pub mod dashboard;
pub mod day_panel;
pub mod form;
pub mod month_view;
pub mod settings;
pub mod status_bar;

pub use dashboard::Dashboard;
pub use day_panel::DayPanel;
pub use form::ReminderForm;
pub use month_view::MonthView;
pub use settings::Settings;
pub use status_bar::StatusBar;

use ratatui::style::Style;

use crate::store::Priority;
use crate::theme::Theme;

pub(crate) fn priority_style(priority: Priority, theme: &Theme) -> Style {
    match priority {
        Priority::High => theme.high,
        Priority::Medium => theme.medium,
        Priority::Low => theme.low,
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        s.chars().take(max).collect()
    }
}
