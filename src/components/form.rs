use chrono::{NaiveDate, NaiveTime};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::store::{Category, Priority, ReminderDraft};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Description,
    Date,
    Time,
    Category,
    Priority,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Date,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::Category,
            FormField::Category => FormField::Priority,
            FormField::Priority => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::Date => FormField::Description,
            FormField::Time => FormField::Date,
            FormField::Category => FormField::Time,
            FormField::Priority => FormField::Category,
        }
    }
}

/// Editable state of the new-reminder popup. Text fields hold raw input;
/// the draft carries parse results so the store does the rejecting.
#[derive(Debug, Clone)]
pub struct ReminderFormState {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub category: Category,
    pub priority: Priority,
    pub active: FormField,
}

impl ReminderFormState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            time: "09:00".to_string(),
            category: Category::Work,
            priority: Priority::Medium,
            active: FormField::Title,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn parsed_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.time.trim(), "%H:%M").ok()
    }

    pub fn input_char(&mut self, c: char) {
        match self.active {
            FormField::Title => self.title.push(c),
            FormField::Description => self.description.push(c),
            FormField::Date => self.date.push(c),
            FormField::Time => self.time.push(c),
            FormField::Category | FormField::Priority => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Time => {
                self.time.pop();
            }
            FormField::Category | FormField::Priority => {}
        }
    }

    /// Space cycles the choice fields.
    pub fn cycle_choice(&mut self) {
        match self.active {
            FormField::Category => {
                let known = &Category::KNOWN;
                let at = known.iter().position(|c| c == &self.category).unwrap_or(0);
                self.category = known[(at + 1) % known.len()].clone();
            }
            FormField::Priority => self.priority = self.priority.cycled(),
            _ => {}
        }
    }

    pub fn draft(&self) -> ReminderDraft {
        ReminderDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.parsed_date(),
            time: self.parsed_time(),
            category: self.category.clone(),
            priority: self.priority,
        }
    }
}

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &ReminderFormState, theme: &Theme) {
        let form_w = area.width.clamp(32, 52);
        let form_h = area.height.clamp(10, 13);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" New Reminder ")
            .title_style(theme.accent)
            .borders(Borders::ALL)
            .border_style(theme.accent);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // description
            Constraint::Length(1), // date
            Constraint::Length(1), // time
            Constraint::Length(1), // category
            Constraint::Length(1), // priority
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(
            frame,
            rows[0],
            "Title:",
            &state.title,
            state.active == FormField::Title,
            theme,
        );
        render_field(
            frame,
            rows[1],
            "Notes:",
            &state.description,
            state.active == FormField::Description,
            theme,
        );
        render_field(
            frame,
            rows[2],
            "Date:",
            &state.date,
            state.active == FormField::Date,
            theme,
        );
        render_field(
            frame,
            rows[3],
            "Time:",
            &state.time,
            state.active == FormField::Time,
            theme,
        );
        render_field(
            frame,
            rows[4],
            "Cat:",
            state.category.as_str(),
            state.active == FormField::Category,
            theme,
        );
        render_field(
            frame,
            rows[5],
            "Prio:",
            state.priority.as_str(),
            state.active == FormField::Priority,
            theme,
        );

        let help = Line::from(vec![
            Span::styled("Tab", theme.header.add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme.dim),
            Span::styled("Space", theme.header.add_modifier(Modifier::BOLD)),
            Span::styled(":Cycle ", theme.dim),
            Span::styled("Enter", theme.header.add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme.dim),
            Span::styled("Esc", theme.header.add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[7]);
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    active: bool,
    theme: &Theme,
) {
    let cursor = if active { "_" } else { "" };
    let value_style = if active { theme.selected } else { theme.header };

    let line = Line::from(vec![
        Span::styled(format!("{label:<7}"), theme.dim),
        Span::styled(format!("{value}{cursor}"), value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ReminderFormState {
        let mut form = ReminderFormState::new(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        form.title = "X".to_string();
        form
    }

    #[test]
    fn new_form_defaults_to_the_given_date() {
        let form = ReminderFormState::new(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        assert_eq!(form.date, "2025-11-20");
        assert_eq!(form.parsed_time(), NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn draft_carries_parse_failures_as_none() {
        let mut form = filled_form();
        form.date = "not-a-date".to_string();
        form.time = "25:99".to_string();

        let draft = form.draft();
        assert_eq!(draft.title, "X");
        assert!(draft.date.is_none());
        assert!(draft.time.is_none());
    }

    #[test]
    fn choice_fields_cycle_with_space() {
        let mut form = filled_form();
        form.active = FormField::Category;
        form.cycle_choice();
        assert_eq!(form.category, Category::Personal);

        form.active = FormField::Priority;
        form.cycle_choice();
        assert_eq!(form.priority, Priority::Low);
    }

    #[test]
    fn tab_order_visits_every_field_once() {
        let mut field = FormField::Title;
        let mut seen = vec![field];
        for _ in 0..5 {
            field = field.next();
            seen.push(field);
        }
        assert_eq!(field.next(), FormField::Title);
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }
}
