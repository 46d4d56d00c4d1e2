//! Interactive dashboard state

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stockdash_core::{DashboardReport, Sector, Selection};

/// A user intent decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextSector,
    PreviousSector,
    CursorUp,
    CursorDown,
    ToggleTicker,
    Refresh,
    ClearSelection,
    Quit,
}

impl Action {
    /// Map a key press to an action
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => Some(Action::NextSector),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => Some(Action::PreviousSector),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleTicker),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('c') => Some(Action::ClearSelection),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Everything the interactive screen shows
pub struct App {
    pub title: String,
    selection: Selection,
    /// Highlighted row in the ticker list
    cursor: usize,
    report: DashboardReport,
    pub status: String,
    needs_refresh: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(title: impl Into<String>, selection: Selection) -> Self {
        let needs_refresh = !selection.is_empty();
        Self {
            title: title.into(),
            // Nothing fetched yet, so no report matches a non-empty selection
            report: DashboardReport::empty(Selection::new(selection.sector())),
            selection,
            cursor: 0,
            status: "Select tickers to compare".to_string(),
            needs_refresh,
            should_quit: false,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn sector(&self) -> Sector {
        self.selection.sector()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn report(&self) -> &DashboardReport {
        &self.report
    }

    /// Whether the stored report was computed for the current selection
    pub fn report_is_current(&self) -> bool {
        self.report.selection == self.selection
    }

    /// Whether the selection changed since the last report
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Apply a user action to the selection
    pub fn apply(&mut self, action: Action) {
        let sector = self.sector();
        let ticker_count = sector.tickers().len();

        match action {
            Action::NextSector => self.change_sector(sector.next()),
            Action::PreviousSector => self.change_sector(sector.previous()),
            Action::CursorUp => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(ticker_count - 1);
            }
            Action::CursorDown => {
                self.cursor = (self.cursor + 1) % ticker_count;
            }
            Action::ToggleTicker => {
                if let Some(ticker) = sector.tickers().get(self.cursor) {
                    match self.selection.toggled(ticker) {
                        Ok(next) => self.replace_selection(next),
                        Err(e) => self.status = e.to_string(),
                    }
                }
            }
            Action::Refresh => {
                if !self.selection.is_empty() {
                    self.needs_refresh = true;
                }
            }
            Action::ClearSelection => self.replace_selection(self.selection.cleared()),
            Action::Quit => self.should_quit = true,
        }
    }

    fn change_sector(&mut self, sector: Sector) {
        self.cursor = 0;
        self.replace_selection(self.selection.with_sector(sector));
    }

    fn replace_selection(&mut self, selection: Selection) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        if self.selection.is_empty() {
            self.report = DashboardReport::empty(self.selection.clone());
            self.needs_refresh = false;
            self.status = "Select tickers to compare".to_string();
        } else {
            self.needs_refresh = true;
        }
    }

    /// Mark a fetch as in progress
    pub fn begin_refresh(&mut self) {
        self.status = format!(
            "Fetching {} ticker(s)...",
            self.selection.tickers().len()
        );
    }

    /// Store a freshly computed report
    ///
    /// Reports for a selection that is no longer current are ignored.
    pub fn set_report(&mut self, report: DashboardReport) {
        if report.selection != self.selection {
            return;
        }
        self.status = match (&report.notice, report.warnings.len()) {
            (Some(notice), _) => notice.clone(),
            (None, 0) => format!("Updated {} ticker(s)", report.charts.len()),
            (None, n) => format!("Updated with {n} warning(s)"),
        };
        self.report = report;
        self.needs_refresh = false;
    }
}
