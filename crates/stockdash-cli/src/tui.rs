//! Terminal setup and the interactive event loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use stockdash_core::{Dashboard, PriceSource};
use tracing::{debug, info};

use crate::app::{Action, App};
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Restores the terminal when dropped, including on early returns and panics
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the dashboard until the user quits
pub async fn run<S: PriceSource>(dashboard: &Dashboard<S>, mut app: App) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;
    info!("Interactive dashboard started");

    loop {
        if app.needs_refresh() {
            app.begin_refresh();
            guard.terminal.draw(|f| ui::draw(f, &app))?;

            let selection = app.selection().clone();
            let report = dashboard.run(&selection).await;
            app.set_report(report);
        }

        guard.terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = Action::from_key(key) {
                        debug!(?action, "Key action");
                        app.apply(action);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("Interactive dashboard closed");
    Ok(())
}
