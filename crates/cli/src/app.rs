//! Console application state and key handling
//!
//! Every key press mutates `App` synchronously; `ui::render` draws whatever
//! state results. Nothing here touches the terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use logging::LoggingHandle;
use repository::{DataRepository, IdentityProvider, PlaceholderProvider, RepositoryError};
use shared::{LogLevel, Record, User};
use tracing::{debug, error, info, warn};

use crate::session::SessionToken;
use crate::settings::{SettingsField, SettingsForm};

pub const LOGIN_PROMPT: &str = "Please enter the token from server logs";
pub const LOGIN_INVALID: &str = "❌ Invalid token, try again";
pub const SETTINGS_INCOMPLETE: &str = "Complete settings to unlock other pages";
pub const SETTINGS_COMPLETE: &str = "✅ Settings complete!";
pub const LOCKED_MESSAGE: &str = "⚠️ Please complete Settings first";
pub const DETAIL_PLACEHOLDER: &str = "Select a row...";

/// Heading above the policies a user receives through their groups
pub const RELATED_HEADER: &str = "Policies via groups:";

/// Lines the detail panel moves per PageUp/PageDown
const DETAIL_PAGE: u16 = 5;

/// Rows `line` takes when word-wrapped into `width` columns
fn wrapped_rows(line: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let mut rows = 1;
    let mut col = 0;
    for (i, word) in line.split(' ').enumerate() {
        let len = word.chars().count();
        let start = if i == 0 { 0 } else { col + 1 };
        if start + len <= width {
            col = start + len;
        } else if col > 0 && len <= width {
            rows += 1;
            col = len;
        } else {
            // Words longer than the panel start a row and are broken mid-word.
            if col > 0 {
                rows += 1;
            }
            rows += (len - 1) / width;
            col = (len - 1) % width + 1;
        }
    }
    rows
}

/// Navigation rail destinations, in rail order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Settings,
    Policies,
    Users,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Settings, Page::Policies, Page::Users];

    pub fn index(&self) -> usize {
        match self {
            Page::Settings => 0,
            Page::Policies => 1,
            Page::Users => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Page> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Settings => "Settings",
            Page::Policies => "Policies",
            Page::Users => "Users",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Settings => "⚙",
            Page::Policies => "§",
            Page::Users => "☺",
        }
    }

    /// Pages that stay locked until settings are saved
    pub fn requires_settings(&self) -> bool {
        !matches!(self, Page::Settings)
    }
}

/// Content of the detail fly-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Pretty-printed JSON of the selected record
    pub json: String,
    /// Extra lines shown under the JSON
    pub related: Vec<String>,
    /// Vertical scroll offset in lines
    pub scroll: u16,
}

impl DetailView {
    pub fn for_record<R: Record>(record: &R) -> Self {
        Self {
            json: record.to_pretty_json(),
            related: Vec::new(),
            scroll: 0,
        }
    }

    pub fn with_related(mut self, related: Vec<String>) -> Self {
        self.related = related;
        self
    }

    /// Body lines before wrapping: the JSON, then the related section if any
    pub fn body_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.json.lines().map(str::to_string).collect();
        if !self.related.is_empty() {
            lines.push(String::new());
            lines.push(RELATED_HEADER.to_string());
            lines.extend(self.related.iter().map(|l| format!("• {}", l)));
        }
        lines
    }

    /// Number of rows the body occupies when wrapped to `width` columns
    pub fn line_count(&self, width: u16) -> usize {
        self.body_lines()
            .iter()
            .map(|line| wrapped_rows(line, width as usize))
            .sum()
    }

    fn scroll_down(&mut self, lines: u16, width: u16) {
        let max = self.line_count(width).saturating_sub(1).min(u16::MAX as usize) as u16;
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }

    fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}

/// Login overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginState {
    pub input: String,
    pub message: String,
    pub failed: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            input: String::new(),
            message: LOGIN_PROMPT.to_string(),
            failed: false,
        }
    }
}

/// The console application
pub struct App<P: IdentityProvider = PlaceholderProvider> {
    token: SessionToken,
    authenticated: bool,
    login: LoginState,
    page: Page,
    settings: SettingsForm,
    settings_complete: bool,
    settings_error: Option<String>,
    repository: DataRepository<P>,
    logging: LoggingHandle,
    console_visible: bool,
    detail: Option<DetailView>,
    policy_cursor: usize,
    user_cursor: usize,
    detail_width: u16,
    displayed: bool,
    running: bool,
}

impl<P: IdentityProvider> App<P> {
    pub fn new(
        token: SessionToken,
        repository: DataRepository<P>,
        logging: LoggingHandle,
        settings: SettingsForm,
    ) -> Self {
        Self {
            token,
            authenticated: false,
            login: LoginState::default(),
            page: Page::Settings,
            settings,
            settings_complete: false,
            settings_error: None,
            repository,
            logging,
            console_visible: false,
            detail: None,
            policy_cursor: 0,
            user_cursor: 0,
            detail_width: u16::MAX,
            displayed: false,
            running: true,
        }
    }

    // ===== Accessors used by rendering =====

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login(&self) -> &LoginState {
        &self.login
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn settings(&self) -> &SettingsForm {
        &self.settings
    }

    pub fn settings_complete(&self) -> bool {
        self.settings_complete
    }

    pub fn settings_error(&self) -> Option<&str> {
        self.settings_error.as_deref()
    }

    /// Status line of the settings page
    pub fn settings_status(&self) -> &str {
        match (&self.settings_error, self.settings_complete) {
            (Some(err), _) => err,
            (None, true) => SETTINGS_COMPLETE,
            (None, false) => SETTINGS_INCOMPLETE,
        }
    }

    pub fn repository(&self) -> &DataRepository<P> {
        &self.repository
    }

    pub fn logging(&self) -> &LoggingHandle {
        &self.logging
    }

    pub fn log_level(&self) -> LogLevel {
        self.logging.level()
    }

    pub fn console_visible(&self) -> bool {
        self.console_visible
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn policy_cursor(&self) -> usize {
        self.policy_cursor
    }

    pub fn user_cursor(&self) -> usize {
        self.user_cursor
    }

    /// Text width of the detail panel, used to bound scrolling
    pub fn detail_width(&self) -> u16 {
        self.detail_width
    }

    pub fn set_detail_width(&mut self, width: u16) {
        self.detail_width = width;
    }

    /// Whether the current page's content is hidden behind the settings lock
    pub fn page_locked(&self) -> bool {
        self.page.requires_settings() && !self.settings_complete
    }

    // ===== Actions =====

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Called after each frame; logs once when the first page is on screen
    pub fn frame_drawn(&mut self) {
        if !self.displayed {
            self.displayed = true;
            info!("App started and initial page displayed.");
        }
    }

    /// Compare the login input with the session token
    pub fn submit_login(&mut self) {
        if self.token.matches(&self.login.input) {
            self.authenticated = true;
            self.login = LoginState::default();
            info!("User logged in successfully.");
        } else {
            self.login.message = LOGIN_INVALID.to_string();
            self.login.failed = true;
            warn!("Failed login attempt.");
        }
    }

    /// Flat index dispatch over the navigation rail
    pub fn show_page(&mut self, index: usize) {
        if let Some(page) = Page::from_index(index) {
            self.page = page;
        }
    }

    fn next_page(&mut self) {
        self.show_page((self.page.index() + 1) % Page::ALL.len());
    }

    fn previous_page(&mut self) {
        let len = Page::ALL.len();
        self.show_page((self.page.index() + len - 1) % len);
    }

    /// Initialize the repository from the form and load every listing
    fn load_repository(&mut self) -> Result<(), RepositoryError> {
        self.repository.initialize(self.settings.init_options())?;
        self.repository.load_policies()?;
        self.repository.load_users()?;
        self.repository.load_groups()?;
        Ok(())
    }

    /// "Save Settings": load IAM data and unlock the other pages
    pub fn complete_settings(&mut self) {
        self.detail = None;
        self.policy_cursor = 0;
        self.user_cursor = 0;

        match self.load_repository() {
            Ok(()) => {
                self.settings_complete = true;
                self.settings_error = None;
                info!("Settings marked complete.");
            }
            Err(e) => {
                self.repository.reset();
                self.settings_complete = false;
                self.settings_error = Some(format!("❌ {}", e));
                error!("Failed to load IAM data: {}", e);
            }
        }
    }

    /// Drop loaded data and lock the Policies and Users pages again
    pub fn reset_settings(&mut self) {
        self.repository.reset();
        self.settings_complete = false;
        self.settings_error = None;
        self.detail = None;
        self.policy_cursor = 0;
        self.user_cursor = 0;
        info!("Settings reset.");
    }

    pub fn toggle_console(&mut self) {
        self.console_visible = !self.console_visible;
        info!(
            "Console log {}.",
            if self.console_visible { "enabled" } else { "disabled" }
        );
    }

    pub fn change_log_level(&mut self, level: LogLevel) {
        if let Err(e) = self.logging.set_level(level) {
            error!("{}", e);
            return;
        }
        info!("Log level changed to {}", level);
    }

    pub fn clear_console(&mut self) {
        self.logging.console().clear();
        debug!("Console output cleared.");
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Open the detail fly-in for the row under the cursor
    pub fn show_selected_detail(&mut self) {
        if self.page_locked() {
            return;
        }
        self.detail = match self.page {
            Page::Settings => None,
            Page::Policies => self
                .repository
                .policies()
                .get(self.policy_cursor)
                .map(DetailView::for_record),
            Page::Users => self
                .repository
                .users()
                .get(self.user_cursor)
                .map(|user| DetailView::for_record(user).with_related(self.user_policies(user))),
        };
    }

    /// "<policy> (<id>): <statement>" lines granting to the user's groups
    fn user_policies(&self, user: &User) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        for group in &user.groups {
            for policy in self.repository.policies_for_group(group) {
                for statement in &policy.statements {
                    let line = format!("{} ({}): {}", policy.name, policy.id, statement);
                    if !lines.contains(&line) {
                        lines.push(line);
                    }
                }
            }
        }
        lines
    }

    fn row_count(&self) -> usize {
        match self.page {
            Page::Settings => 0,
            Page::Policies => self.repository.policies().len(),
            Page::Users => self.repository.users().len(),
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut usize> {
        match self.page {
            Page::Settings => None,
            Page::Policies => Some(&mut self.policy_cursor),
            Page::Users => Some(&mut self.user_cursor),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        if let Some(cursor) = self.cursor_mut() {
            let next = (*cursor as isize + delta).clamp(0, rows as isize - 1);
            *cursor = next as usize;
        }
    }

    // ===== Key handling =====

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.quit(),
                KeyCode::Char('l') if self.authenticated => self.clear_console(),
                _ => {}
            }
            return;
        }

        if !self.authenticated {
            self.handle_login_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Char(c @ '1'..='3') => self.show_page(c as usize - '1' as usize),
            KeyCode::Esc => self.close_detail(),
            KeyCode::PageDown => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll_down(DETAIL_PAGE, self.detail_width);
                }
            }
            KeyCode::PageUp => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll_up(DETAIL_PAGE);
                }
            }
            code => match self.page {
                Page::Settings => self.handle_settings_key(code),
                Page::Policies | Page::Users => self.handle_table_key(code),
            },
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                self.login.input.pop();
            }
            KeyCode::Char(c) => self.login.input.push(c),
            KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.settings.focus_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.settings.focus_next(),
            KeyCode::Left | KeyCode::Char('h') => self.adjust_focused(false),
            KeyCode::Right | KeyCode::Char('l') => self.adjust_focused(true),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_focused(),
            _ => {}
        }
    }

    /// Left/Right on a selector field
    fn adjust_focused(&mut self, forward: bool) {
        match self.settings.focus {
            SettingsField::Profile => {
                if forward {
                    self.settings.next_profile();
                } else {
                    self.settings.previous_profile();
                }
            }
            SettingsField::LogLevel => {
                let current = self.log_level();
                let level = if forward { current.next() } else { current.previous() };
                self.change_log_level(level);
            }
            _ => {}
        }
    }

    /// Enter/Space on the focused field
    fn activate_focused(&mut self) {
        match self.settings.focus {
            SettingsField::Profile | SettingsField::LogLevel => self.adjust_focused(true),
            SettingsField::InstancePrincipal => {
                self.settings.use_instance_principal = !self.settings.use_instance_principal;
            }
            SettingsField::Recursive => self.settings.recursive = !self.settings.recursive,
            SettingsField::ShowConsole => self.toggle_console(),
            SettingsField::Save => self.complete_settings(),
            SettingsField::Reset => self.reset_settings(),
            // Disabled until settings are complete.
            SettingsField::GoPolicies if self.settings_complete => {
                self.show_page(Page::Policies.index())
            }
            SettingsField::GoUsers if self.settings_complete => {
                self.show_page(Page::Users.index())
            }
            SettingsField::GoPolicies | SettingsField::GoUsers => {}
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) {
        if self.page_locked() {
            return;
        }
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Home => self.move_cursor(isize::MIN / 2),
            KeyCode::End => self.move_cursor(isize::MAX / 2),
            KeyCode::Enter | KeyCode::Char(' ') => self.show_selected_detail(),
            _ => {}
        }
    }
}
