use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::query;
use crate::theme::ThemeName;

/// The settings view: theme selection and where the data lives.
pub struct Settings;

impl Settings {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let rows = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);

        let theme_block = Block::default()
            .title(" Theme ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let theme_inner = theme_block.inner(rows[0]);
        frame.render_widget(theme_block, rows[0]);

        let marker = |name: ThemeName| {
            if theme.name == name {
                "(\u{2022})"
            } else {
                "( )"
            }
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} light  ", marker(ThemeName::Light)), theme.header),
                Span::styled(format!("{} dark", marker(ThemeName::Dark)), theme.header),
            ]),
            Line::from(Span::styled(" T toggles and saves the choice", theme.dim)),
        ];
        frame.render_widget(Paragraph::new(lines), theme_inner);

        let stats = query::stats(app.snapshot(), app.today);
        let storage_block = Block::default()
            .title(" Storage ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let storage_inner = storage_block.inner(rows[1]);
        frame.render_widget(storage_block, rows[1]);

        let lines = vec![
            Line::from(vec![
                Span::styled(" Data file: ", theme.dim),
                Span::styled(app.store_path().display().to_string(), theme.header),
            ]),
            Line::from(vec![
                Span::styled(" Reminders: ", theme.dim),
                Span::styled(stats.total.to_string(), theme.header),
            ]),
            Line::from(vec![
                Span::styled(" Pending today: ", theme.dim),
                Span::styled(stats.pending_today.to_string(), theme.header),
            ]),
            Line::from(Span::styled(
                " Every change rewrites the file in place",
                theme.dim,
            )),
        ];
        frame.render_widget(Paragraph::new(lines), storage_inner);
    }
}
