//! Terminal setup, teardown and the event loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use repository::IdentityProvider;
use tracing::{debug, warn};

use crate::app::App;
use crate::ui;

/// Input poll interval; also bounds how stale the console panel can get
const TICK: Duration = Duration::from_millis(100);

/// Raw-mode alternate-screen terminal, restored on drop
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        debug!("Entered alternate screen");
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Draw and dispatch key presses until the app stops running
pub fn run<P: IdentityProvider>(app: &mut App<P>) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;

    while app.is_running() {
        let size = guard.terminal().size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        app.set_detail_width(ui::detail_text_width(area, app));

        guard.terminal().draw(|frame| ui::render(frame, app))?;
        app.frame_drawn();

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}
