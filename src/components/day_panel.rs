use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::{priority_style, truncate};
use crate::store::Reminder;
use crate::theme::Theme;

/// The calendar view's side panel: everything on the selected date.
pub struct DayPanel;

impl DayPanel {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        reminders: &[&Reminder],
        selection: usize,
        theme: &Theme,
    ) {
        let w = area.width as usize;
        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else {
            format!(" {} ", date.format("%b %d"))
        };

        let count = reminders.len();
        let count_str = if count == 0 {
            String::new()
        } else {
            format!(" {count} reminder{} ", if count == 1 { "" } else { "s" })
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count_str, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if reminders.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No reminders for this date").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = reminders
            .iter()
            .enumerate()
            .map(|(i, reminder)| row(reminder, i == selection, inner_w, theme))
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

fn row<'a>(reminder: &Reminder, selected: bool, width: usize, theme: &Theme) -> ListItem<'a> {
    let checkbox = if reminder.completed { "[x]" } else { "[ ]" };
    let title_style = if selected {
        theme.selected
    } else if reminder.completed {
        theme.done
    } else {
        theme.header
    };

    let mut spans = vec![
        Span::styled(
            format!(" {checkbox} "),
            if selected { theme.selected } else { theme.dim },
        ),
        Span::styled(format!("{} ", reminder.time.format("%H:%M")), theme.dim),
        Span::styled(
            truncate(&reminder.title, width.saturating_sub(20)),
            title_style,
        ),
        Span::styled(
            format!(" {}", reminder.priority),
            priority_style(reminder.priority, theme),
        ),
    ];

    let category = format!(" {}", reminder.category);
    if spans.iter().map(|s| s.width()).sum::<usize>() + category.len() < width {
        spans.push(Span::styled(category, theme.dim));
    }

    ListItem::new(Line::from(spans))
}
