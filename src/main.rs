mod app;
mod components;
mod event;
mod query;
mod store;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode, View};
use chrono::Datelike;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let mut app = App::new()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            let layout =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
            let content = layout[0];

            match app.view {
                View::Dashboard => components::Dashboard::render(frame, content, app),
                View::Calendar => render_calendar(frame, content, app),
                View::Settings => components::Settings::render(frame, content, app),
            }

            if let Some(ref form) = app.form {
                components::ReminderForm::render(frame, area, form, &app.theme);
            }

            if app.show_help {
                render_help(frame, area, app);
            }

            components::StatusBar::render(frame, layout[1], app);
        })?;

        if let Some(key) = event::next_key(Duration::from_millis(100))? {
            app.status_message = None;

            if app.show_help {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
                ) {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::Form => handle_form_input(app, key.code),
                InputMode::Search => handle_search_input(app, key.code),
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('1'), _) => app.set_view(View::Dashboard),
        (KeyCode::Char('2'), _) => app.set_view(View::Calendar),
        (KeyCode::Char('3'), _) => app.set_view(View::Settings),
        (KeyCode::Tab, _) => app.set_view(app.view.next()),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('n'), _) => app.open_form(),
        (KeyCode::Char('d'), _) => app.delete_selected(),
        (KeyCode::Char(' '), _) => app.toggle_selected(),
        (KeyCode::Char('/'), _) => app.start_search(),
        (KeyCode::Char('c'), _) => app.cycle_category(),
        (KeyCode::Char('T'), _) => app.toggle_theme(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.select_prev(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.select_next(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
            if app.view == View::Calendar {
                app.prev_day();
            }
        }
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
            if app.view == View::Calendar {
                app.next_day();
            }
        }
        (KeyCode::Char('['), _) => {
            if app.view == View::Calendar {
                app.prev_month();
            }
        }
        (KeyCode::Char(']'), _) => {
            if app.view == View::Calendar {
                app.next_month();
            }
        }
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab => {
            if let Some(ref mut form) = app.form {
                form.active = form.active.next();
            }
        }
        KeyCode::BackTab => {
            if let Some(ref mut form) = app.form {
                form.active = form.active.prev();
            }
        }
        KeyCode::Backspace => {
            if let Some(ref mut form) = app.form {
                form.backspace();
            }
        }
        KeyCode::Char(' ') => {
            if let Some(ref mut form) = app.form {
                use components::form::FormField;
                match form.active {
                    FormField::Category | FormField::Priority => form.cycle_choice(),
                    _ => form.input_char(' '),
                }
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut form) = app.form {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.finish_search(false),
        KeyCode::Enter => app.finish_search(true),
        KeyCode::Backspace => app.pop_search(),
        KeyCode::Char(c) => app.push_search(c),
        _ => {}
    }
}

fn render_calendar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let cells = query::month_grid(
        app.snapshot(),
        app.selected_date.year(),
        app.selected_date.month(),
        app.today,
    );

    if area.width < 82 {
        components::MonthView::render(frame, area, &cells, app.selected_date, &app.theme);
        return;
    }

    let cols = Layout::horizontal([Constraint::Length(58), Constraint::Min(20)]).split(area);
    components::MonthView::render(frame, cols[0], &cells, app.selected_date, &app.theme);

    let day_list = app.day_list();
    components::DayPanel::render(
        frame,
        cols[1],
        app.selected_date,
        &day_list,
        app.selection,
        &app.theme,
    );
}

fn render_help(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    use ratatui::style::Modifier;
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let theme = &app.theme;
    let popup_w = area.width.clamp(30, 52);
    let popup_h = area.height.clamp(12, 24);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.accent)
        .borders(Borders::ALL)
        .border_style(theme.accent);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key = theme.header.add_modifier(Modifier::BOLD);
    let section = theme.header.add_modifier(Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Views", section)),
        Line::from(vec![
            Span::styled("  1/2/3     ", key),
            Span::raw("Dashboard / Calendar / Settings"),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", key),
            Span::raw("Next view"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Navigation", section)),
        Line::from(vec![
            Span::styled("  j/k       ", key),
            Span::raw("Select reminder"),
        ]),
        Line::from(vec![
            Span::styled("  h/l       ", key),
            Span::raw("Previous/next day (calendar)"),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", key),
            Span::raw("Previous/next month (calendar)"),
        ]),
        Line::from(vec![
            Span::styled("  t         ", key),
            Span::raw("Jump to today"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Actions", section)),
        Line::from(vec![
            Span::styled("  n         ", key),
            Span::raw("New reminder"),
        ]),
        Line::from(vec![
            Span::styled("  Space     ", key),
            Span::raw("Toggle completion"),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key),
            Span::raw("Delete selected"),
        ]),
        Line::from(vec![
            Span::styled("  /         ", key),
            Span::raw("Search (dashboard)"),
        ]),
        Line::from(vec![
            Span::styled("  c         ", key),
            Span::raw("Cycle category filter"),
        ]),
        Line::from(vec![
            Span::styled("  T         ", key),
            Span::raw("Toggle light/dark theme"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key),
            Span::styled(" / ", theme.dim),
            Span::styled("Esc     ", key),
            Span::raw("Quit / close popup"),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
