use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::priority_style;
use crate::query::CalendarCell;
use crate::theme::Theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Width of one day cell: " dd" + up to three markers + overflow count.
const CELL_WIDTH: usize = 8;

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        cells: &[CalendarCell<'_>],
        selected_date: NaiveDate,
        theme: &Theme,
    ) {
        let title = format!(
            " {} {} ",
            month_name(selected_date.month()),
            selected_date.year()
        );

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header_cells: Vec<Span> = DAY_NAMES
            .iter()
            .map(|d| Span::styled(format!("{:^1$}", d, CELL_WIDTH), theme.header))
            .collect();
        let header = Line::from(header_cells);

        let mut rows: Vec<Line> = Vec::with_capacity(6);
        for week in cells.chunks(7) {
            let mut spans: Vec<Span> = Vec::new();
            for cell in week {
                spans.extend(cell_spans(cell, selected_date, theme));
            }
            rows.push(Line::from(spans));
        }

        let mut constraints = vec![Constraint::Length(1); rows.len() + 1];
        constraints.push(Constraint::Min(0));
        let layout = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), layout[0]);
        for (i, row) in rows.iter().enumerate() {
            frame.render_widget(Paragraph::new(row.clone()), layout[i + 1]);
        }
    }
}

fn cell_spans<'a>(
    cell: &CalendarCell<'_>,
    selected_date: NaiveDate,
    theme: &Theme,
) -> Vec<Span<'a>> {
    let day_style = if cell.date == selected_date {
        theme.selected
    } else if cell.is_today {
        theme.today
    } else if !cell.in_month {
        theme.dim
    } else {
        theme.header
    };

    let mut spans = vec![Span::styled(format!(" {:>2}", cell.date.day()), day_style)];

    for reminder in cell.shown() {
        spans.push(Span::styled(
            "\u{2022}",
            priority_style(reminder.priority, theme),
        ));
    }
    let mut used = 3 + cell.shown().len();
    if cell.overflow() > 0 {
        let more = format!("+{}", cell.overflow().min(9));
        used += more.len();
        spans.push(Span::styled(more, theme.dim));
    }

    // Pad out to the fixed cell width so the columns stay aligned.
    spans.push(Span::raw(" ".repeat(CELL_WIDTH.saturating_sub(used))));
    spans
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
