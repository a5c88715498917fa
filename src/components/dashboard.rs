use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::{priority_style, truncate};
use crate::app::App;
use crate::query::{self, DayTally, Stats};
use crate::store::Reminder;
use crate::theme::Theme;

/// The landing view: stat tiles, today's reminders, the upcoming list,
/// and the trailing week's completion tallies.
pub struct Dashboard;

impl Dashboard {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let rows =
            Layout::vertical([Constraint::Length(3), Constraint::Min(5)]).split(area);

        let stats = query::stats(app.snapshot(), app.today);
        render_stats(frame, rows[0], &stats, &app.theme);

        let cols =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(rows[1]);
        render_today(frame, cols[0], app);

        let right =
            Layout::vertical([Constraint::Min(7), Constraint::Length(9)]).split(cols[1]);
        render_upcoming(frame, right[0], app);
        render_week(frame, right[1], app);
    }
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &Stats, theme: &Theme) {
    let tiles = [
        ("Total", stats.total),
        ("Done Today", stats.completed_today),
        ("Pending", stats.pending_today),
        ("This Week", stats.upcoming_week),
    ];

    let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for (i, (label, value)) in tiles.iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(format!(" {label} "))
            .title_style(theme.dim);
        let inner = block.inner(cols[i]);
        frame.render_widget(block, cols[i]);
        let number = Paragraph::new(Line::from(Span::styled(value.to_string(), theme.accent)))
            .centered();
        frame.render_widget(number, inner);
    }
}

fn render_today(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let visible = app.visible_today();

    let mut title = if app.search_query.trim().is_empty() {
        format!(" Today \u{2022} {} ", app.today.format("%b %d"))
    } else {
        format!(" Search \"{}\" ", app.search_query)
    };
    if let Some(category) = &app.category_filter {
        title.push_str(&format!("[{category}] "));
    }

    let block = Block::default()
        .title(title)
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_style(theme.border);

    if visible.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let text = if app.search_query.trim().is_empty() {
            "All caught up! No reminders for today."
        } else {
            "No reminders match the search."
        };
        frame.render_widget(Paragraph::new(text).style(theme.dim), inner);
        return;
    }

    let inner_w = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, reminder)| reminder_row(reminder, i == app.selection, inner_w, theme))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn reminder_row<'a>(
    reminder: &Reminder,
    selected: bool,
    width: usize,
    theme: &Theme,
) -> ListItem<'a> {
    let checkbox = if reminder.completed { "[x]" } else { "[ ]" };
    let title_style = if selected {
        theme.selected
    } else if reminder.completed {
        theme.done
    } else {
        theme.header
    };

    let title_room = width.saturating_sub(16);
    let line = Line::from(vec![
        Span::styled(
            format!(" {checkbox} "),
            if selected { theme.selected } else { theme.dim },
        ),
        Span::styled(format!("{} ", reminder.time.format("%H:%M")), theme.dim),
        Span::styled(truncate(&reminder.title, title_room), title_style),
        Span::styled(
            format!(" {}", reminder.priority),
            priority_style(reminder.priority, theme),
        ),
    ]);
    ListItem::new(line)
}

fn render_upcoming(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let upcoming = query::upcoming(
        app.snapshot(),
        app.today,
        query::UPCOMING_WINDOW_DAYS,
    );

    let block = Block::default()
        .title(" Upcoming ")
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_style(theme.border);

    if upcoming.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let msg = Paragraph::new("No upcoming reminders this week").style(theme.dim);
        frame.render_widget(msg, inner);
        return;
    }

    let inner_w = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = upcoming
        .iter()
        .map(|reminder| {
            let when = if reminder.date == app.today {
                "Today".to_string()
            } else {
                reminder.date.format("%b %d").to_string()
            };
            let line = Line::from(vec![
                Span::styled(" \u{2022} ", priority_style(reminder.priority, theme)),
                Span::styled(
                    truncate(&reminder.title, inner_w.saturating_sub(16)),
                    theme.header,
                ),
                Span::styled(
                    format!(" {} {}", when, reminder.time.format("%H:%M")),
                    theme.dim,
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_week(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let series = query::completion_series(app.snapshot(), app.today);

    let block = Block::default()
        .title(" Past 7 Days ")
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_style(theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = series
        .iter()
        .map(|tally| tally_line(tally, tally.date == app.today, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

const TALLY_BAR_WIDTH: usize = 8;

fn tally_line<'a>(tally: &DayTally, is_today: bool, theme: &Theme) -> Line<'a> {
    let label_style = if is_today { theme.header } else { theme.dim };
    let filled = if tally.total == 0 {
        0
    } else {
        (tally.completed * TALLY_BAR_WIDTH).div_ceil(tally.total)
    };

    Line::from(vec![
        Span::styled(format!(" {} ", tally.date.format("%a")), label_style),
        Span::styled("\u{2588}".repeat(filled), theme.accent),
        Span::styled("\u{2591}".repeat(TALLY_BAR_WIDTH - filled), theme.dim),
        Span::styled(format!(" {}/{}", tally.completed, tally.total), label_style),
    ])
}
