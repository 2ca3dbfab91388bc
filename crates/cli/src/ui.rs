//! Rendering of the console
//!
//! Pure function of `App` state: navigation rail on the left, the active
//! page in the middle, the detail fly-in on the right, an optional console
//! log panel and a key-hint footer at the bottom. Until the session token is
//! entered everything sits behind the login overlay.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
    },
    Frame,
};
use repository::IdentityProvider;
use shared::Record;

use crate::app::{App, Page, DETAIL_PLACEHOLDER, LOCKED_MESSAGE, RELATED_HEADER};
use crate::settings::SettingsField;

/// Rows reserved for the console log panel, borders included
const CONSOLE_HEIGHT: u16 = 10;

/// Width of the navigation rail
const RAIL_WIDTH: u16 = 16;

const LOGIN_HINTS: &str = "Enter: submit token  Esc: quit";
const SETTINGS_HINTS: &str =
    "↑/↓: move  ←/→: change  Enter: select  Tab/1-3: pages  Ctrl+L: clear log  q: quit";
const TABLE_HINTS: &str =
    "↑/↓: select  Enter: details  PgUp/PgDn: scroll  Esc: close  Tab/1-3: pages  q: quit";

/// Areas of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub rail: Rect,
    pub content: Rect,
    pub detail: Option<Rect>,
    pub console: Option<Rect>,
    pub footer: Rect,
}

/// Split `area` for the current state of `app`
pub fn layout<P: IdentityProvider>(area: Rect, app: &App<P>) -> ScreenLayout {
    let mut constraints = vec![Constraint::Min(5)];
    if app.console_visible() {
        constraints.push(Constraint::Length(CONSOLE_HEIGHT));
    }
    constraints.push(Constraint::Length(1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let show_detail = app.page() != Page::Settings && !app.page_locked();
    let mut columns = vec![Constraint::Length(RAIL_WIDTH), Constraint::Min(20)];
    if show_detail {
        columns.push(Constraint::Percentage(40));
    }

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(rows[0]);

    ScreenLayout {
        rail: main[0],
        content: main[1],
        detail: show_detail.then(|| main[2]),
        console: app.console_visible().then(|| rows[1]),
        footer: rows[rows.len() - 1],
    }
}

/// Text width inside the detail panel's borders; `u16::MAX` when it is hidden
pub fn detail_text_width<P: IdentityProvider>(area: Rect, app: &App<P>) -> u16 {
    layout(area, app)
        .detail
        .map(|rect| rect.width.saturating_sub(2))
        .unwrap_or(u16::MAX)
}

/// Render the whole screen
pub fn render<P: IdentityProvider>(frame: &mut Frame, app: &App<P>) {
    let area = frame.area();
    let screen = layout(area, app);

    render_rail(frame, screen.rail, app);
    if app.page_locked() {
        render_locked(frame, screen.content, app);
    } else {
        match app.page() {
            Page::Settings => render_settings(frame, screen.content, app),
            Page::Policies => render_policies(frame, screen.content, app),
            Page::Users => render_users(frame, screen.content, app),
        }
    }
    if let Some(detail) = screen.detail {
        render_detail(frame, detail, app);
    }
    if let Some(console) = screen.console {
        render_console(frame, console, app);
    }
    render_footer(frame, screen.footer, app);

    if !app.is_authenticated() {
        render_login(frame, area, app);
    }
}

/// Navigation rail
fn render_rail<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let style = if page.requires_settings() && !app.settings_complete() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {} {}", i + 1, page.icon(), page.label())).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

    let mut state = ListState::default().with_selected(Some(app.page().index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn settings_line<P: IdentityProvider>(app: &App<P>, field: SettingsField) -> Line<'static> {
    let form = app.settings();
    let text = match field {
        SettingsField::Profile => format!("Tenancy profile:  < {} >", form.profile()),
        SettingsField::InstancePrincipal => {
            format!("{} Use instance principal", checkbox(form.use_instance_principal))
        }
        SettingsField::Recursive => {
            format!("{} Include child compartments", checkbox(form.recursive))
        }
        SettingsField::ShowConsole => {
            format!("{} Show console log", checkbox(app.console_visible()))
        }
        SettingsField::LogLevel => format!("Log level:        < {} >", app.log_level()),
        SettingsField::Save => "[ Save Settings ]".to_string(),
        SettingsField::Reset => "[ Reset ]".to_string(),
        SettingsField::GoPolicies => "[ Go to Policies ]".to_string(),
        SettingsField::GoUsers => "[ Go to Users ]".to_string(),
    };

    let disabled = matches!(field, SettingsField::GoPolicies | SettingsField::GoUsers)
        && !app.settings_complete();
    let focused = form.focus == field;

    let mut style = Style::default();
    if disabled {
        style = style.fg(Color::DarkGray);
    }
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let marker = if focused { "▶ " } else { "  " };
    Line::from(vec![Span::raw(marker), Span::styled(text, style)])
}

fn render_settings<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    let mut lines: Vec<Line> = SettingsField::ALL
        .iter()
        .map(|field| settings_line(app, *field))
        .collect();

    let status_style = if app.settings_complete() && app.settings_error().is_none() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(app.settings_status().to_string(), status_style)));

    let repository = app.repository();
    if let Some(ocid) = repository.tenancy_ocid() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Tenancy: {}", ocid)));
        lines.push(Line::from(format!(
            "Loaded: {} policies, {} users, {} groups",
            repository.policies().len(),
            repository.users().len(),
            repository.groups().len()
        )));
    }

    let settings = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Settings"))
        .wrap(Wrap { trim: false });
    frame.render_widget(settings, area);
}

fn render_locked<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    let locked = Paragraph::new(Line::from(Span::styled(
        LOCKED_MESSAGE,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title(app.page().label()));
    frame.render_widget(locked, area);
}

/// ID / Name table shared by the Policies and Users pages
fn render_records<R: Record>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    records: &[R],
    cursor: usize,
) {
    let header = Row::new(vec!["ID", "Name"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = records
        .iter()
        .map(|record| Row::new(vec![record.id().to_string(), record.name().to_string()]))
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(40), Constraint::Percentage(60)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({})", title, records.len())),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");

    let selected = (!records.is_empty()).then_some(cursor);
    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_policies<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    render_records(
        frame,
        area,
        "Policies",
        app.repository().policies(),
        app.policy_cursor(),
    );
}

fn render_users<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    render_records(frame, area, "Users", app.repository().users(), app.user_cursor());
}

/// Detail fly-in with the selected record as JSON
fn render_detail<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    let block = Block::default().borders(Borders::ALL).title("Details");

    let Some(detail) = app.detail() else {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            DETAIL_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = detail
        .body_lines()
        .into_iter()
        .map(|line| {
            if line == RELATED_HEADER {
                Line::from(Span::styled(line, heading))
            } else {
                Line::from(line)
            }
        })
        .collect();

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((detail.scroll, 0));
    frame.render_widget(body, area);
}

/// Console log panel fed by the logging layer
fn render_console<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .logging()
        .console()
        .tail_lines(visible)
        .into_iter()
        .map(Line::from)
        .collect();

    let console = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Console Log [{}]", app.log_level())),
    );
    frame.render_widget(console, area);
}

fn render_footer<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    let hints = if !app.is_authenticated() {
        LOGIN_HINTS
    } else {
        match app.page() {
            Page::Settings => SETTINGS_HINTS,
            Page::Policies | Page::Users => TABLE_HINTS,
        }
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, area);
}

/// Modal token prompt
fn render_login<P: IdentityProvider>(frame: &mut Frame, area: Rect, app: &App<P>) {
    let popup = centered_rect(60, 30, area);
    let login = app.login();

    let message_style = if login.failed {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let masked = "•".repeat(login.input.chars().count());
    let lines = vec![
        Line::from(Span::styled(login.message.clone(), message_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Token: ", Style::default().fg(Color::Cyan)),
            Span::raw(masked),
            Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
    ];

    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Login Required")
                .style(Style::default().fg(Color::White).bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(dialog, popup);
}

/// Helper function to create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionToken;
    use crate::settings::SettingsForm;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use logging::{ConsoleBuffer, LogEntry, LoggingHandle};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use repository::DataRepository;
    use shared::LogLevel;

    const TOKEN: &str = "token-123";

    fn test_app() -> App {
        App::new(
            SessionToken::from(TOKEN),
            DataRepository::default(),
            LoggingHandle::detached(ConsoleBuffer::new(50), LogLevel::Info),
            SettingsForm::new(vec!["DEFAULT".into()]),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn logged_in() -> App {
        let mut app = test_app();
        for c in TOKEN.chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        app
    }

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(120, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    /// Rows inside the detail panel's borders, trimmed and joined with spaces
    fn detail_text(app: &App) -> String {
        let area = Rect::new(0, 0, 120, 32);
        let backend = TestBackend::new(area.width, area.height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let panel = layout(area, app).detail.unwrap();
        let buffer = terminal.backend().buffer();
        let mut rows = Vec::new();
        for y in panel.y + 1..panel.y + panel.height - 1 {
            let mut row = String::new();
            for x in panel.x + 1..panel.x + panel.width - 1 {
                row.push_str(buffer[(x, y)].symbol());
            }
            let row = row.trim().to_string();
            if !row.is_empty() {
                rows.push(row);
            }
        }
        rows.join(" ")
    }

    #[test]
    fn test_login_overlay_shown_first() {
        let screen = draw(&test_app());
        assert!(screen.contains("Login Required"));
        assert!(screen.contains("Please enter the token from server logs"));
    }

    #[test]
    fn test_login_input_is_masked() {
        let mut app = test_app();
        for c in "secret".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        let screen = draw(&app);
        assert!(!screen.contains("secret"));
        assert!(screen.contains("••••••"));
    }

    #[test]
    fn test_settings_page_after_login() {
        let screen = draw(&logged_in());
        assert!(!screen.contains("Login Required"));
        assert!(screen.contains("Tenancy profile:"));
        assert!(screen.contains("DEFAULT"));
        assert!(screen.contains("Complete settings to unlock other pages"));
        assert!(screen.contains("Settings"));
        assert!(screen.contains("Policies"));
        assert!(screen.contains("Users"));
    }

    #[test]
    fn test_locked_page_message() {
        let mut app = logged_in();
        press(&mut app, KeyCode::Char('2'));
        let screen = draw(&app);
        assert!(screen.contains("Please complete Settings first"));
        assert!(!screen.contains("Details"));
    }

    #[test]
    fn test_policies_table_and_detail() {
        let mut app = logged_in();
        app.complete_settings();
        press(&mut app, KeyCode::Char('2'));

        let screen = draw(&app);
        assert!(screen.contains("Policies (2)"));
        assert!(screen.contains("AdminPolicy"));
        assert!(screen.contains("ReadPolicy"));
        assert!(screen.contains("Select a row..."));

        press(&mut app, KeyCode::Enter);
        let screen = draw(&app);
        assert!(screen.contains("Details"));
        assert!(screen.contains("\"id\": \"p1\""));
        assert!(!screen.contains("Select a row..."));
    }

    #[test]
    fn test_user_detail_shows_related_policies() {
        let mut app = logged_in();
        app.complete_settings();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let screen = draw(&app);
        assert!(screen.contains("\"name\": \"Bob\""));
        assert!(screen.contains("Policies via groups:"));
        assert!(screen.contains("ReadPolicy (p2)"));
    }

    #[test]
    fn test_long_statement_wraps_in_detail() {
        let mut app = logged_in();
        app.complete_settings();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);

        let text = detail_text(&app);
        assert!(text.contains("\"ALLOW group Admins to manage all-resources\""), "{}", text);
    }

    #[test]
    fn test_related_policy_wraps_in_detail() {
        let mut app = logged_in();
        app.complete_settings();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let text = detail_text(&app);
        assert!(
            text.contains("ReadPolicy (p2): ALLOW group Readers to read all-resources"),
            "{}",
            text
        );
    }

    #[test]
    fn test_detail_text_width_follows_layout() {
        let area = Rect::new(0, 0, 120, 32);
        let mut app = logged_in();
        assert_eq!(detail_text_width(area, &app), u16::MAX);

        app.complete_settings();
        press(&mut app, KeyCode::Char('2'));
        let panel = layout(area, &app).detail.unwrap();
        assert_eq!(detail_text_width(area, &app), panel.width - 2);
        assert!(panel.width < area.width / 2);
    }

    #[test]
    fn test_console_panel_toggle() {
        let mut app = logged_in();
        app.logging()
            .console()
            .push(LogEntry::new(LogLevel::Info, "cli", "Loaded 2 users."));

        assert!(!draw(&app).contains("Console Log"));

        app.toggle_console();
        let screen = draw(&app);
        assert!(screen.contains("Console Log [INFO]"));
        assert!(screen.contains("INFO - Loaded 2 users."));
    }

    #[test]
    fn test_settings_complete_status() {
        let mut app = logged_in();
        app.complete_settings();
        let screen = draw(&app);
        assert!(screen.contains("Settings complete!"));
        assert!(screen.contains("Loaded: 2 policies, 2 users, 2 groups"));
    }

    #[test]
    fn test_renders_in_tiny_terminal() {
        let app = logged_in();
        let backend = TestBackend::new(20, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }

    #[test]
    fn test_centered_rect_within_bounds() {
        let rect = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(60, 30, rect);

        assert_eq!(centered.x, 20);
        assert_eq!(centered.width, 60);
        assert!(centered.y + centered.height <= rect.height);
    }
}
