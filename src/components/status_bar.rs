use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode, View};

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let w = area.width as usize;

        let view_str = match app.view {
            View::Dashboard => "[1]Dashboard",
            View::Calendar => "[2]Calendar",
            View::Settings => "[3]Settings",
        };
        let mode_str = match app.input_mode {
            InputMode::Form => " [New Reminder]",
            InputMode::Search => " [Search]",
            InputMode::Normal => "",
        };

        // A transient message wins over the hint text.
        let right = if let Some(ref msg) = app.status_message {
            format!(" {msg} ")
        } else {
            hints(app, w).to_string()
        };

        let left = format!(" {view_str}{mode_str} ");
        let padding = " ".repeat(w.saturating_sub(left.len() + right.len()));

        let line = Line::from(vec![
            Span::styled(left, theme.status),
            Span::styled(padding, theme.status),
            Span::styled(right, theme.status),
        ]);
        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}

fn hints(app: &App, w: usize) -> &'static str {
    match app.input_mode {
        InputMode::Search => " type to filter  Enter:Keep Esc:Clear",
        InputMode::Form => " Tab:Next Space:Cycle Enter:Save Esc:Cancel",
        InputMode::Normal => match app.view {
            View::Dashboard if w >= 80 => {
                " jk:Select Sp:Toggle n:New d:Del /:Search c:Category T:Theme ?:Help q:Quit"
            }
            View::Dashboard if w >= 50 => " jk:Sel Sp:Toggle n:New /:Find q:Quit",
            View::Calendar if w >= 80 => {
                " hl:Day [/]:Month t:Today jk:Select Sp:Toggle n:New d:Del ?:Help q:Quit"
            }
            View::Calendar if w >= 50 => " hl:Day [/]:Mon t:Today n:New q:Quit",
            View::Settings if w >= 50 => " T:Toggle theme ?:Help q:Quit",
            _ => " ?:Help q:Quit",
        },
    }
}
