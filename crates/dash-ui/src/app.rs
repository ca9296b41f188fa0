//! Main application state and TUI event loop for the healthcare dashboard.
//!
//! [`App`] owns the theme, the control options, the local copy of the control
//! values and the latest figure for each chart.  Key presses become
//! [`ControlChange`]s sent to the orchestrator; rendered figures come back as
//! [`FigureUpdate`]s.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;

use dash_core::chart::Figure;
use dash_data::dataset::SummaryStats;
use dash_runtime::controls::{ControlChange, ControlOptions, Controls};
use dash_runtime::orchestrator::{FigureUpdate, OrchestratorChannels};

use crate::dashboard_view::{self, DashboardViewData};
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub summary: SummaryStats,
    pub options: ControlOptions,
    /// Local mirror of the control values sent to the orchestrator.
    pub controls: Controls,
    /// Latest figure per chart slot; `None` until the first render arrives.
    pub figures: [Option<Figure>; 5],
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, summary: SummaryStats, options: ControlOptions, controls: Controls) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            summary,
            options,
            controls,
            figures: Default::default(),
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 100 ms timeout so that key
    /// handling stays on this thread while figure updates arrive on the async
    /// channel via `try_recv`.
    pub async fn run(mut self, channels: OrchestratorChannels) -> io::Result<()> {
        let OrchestratorChannels {
            changes,
            mut updates,
        } = channels;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(100);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if let Some(change) = self.handle_key(key) {
                            if changes.send(change).await.is_err() {
                                tracing::warn!("orchestrator stopped; closing dashboard");
                                self.should_quit = true;
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            // Drain any pending figure updates (non-blocking).
            loop {
                match updates.try_recv() {
                    Ok(update) => self.apply_update(update),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// Translate a key press into a control change, applying it to the local
    /// controls.  Returns `None` for quit keys, unbound keys, and changes that
    /// leave the control value as it was.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ControlChange> {
        let slider = &self.options.slider;
        let ceiling = self.controls.billing_ceiling;

        let change = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('g') => {
                ControlChange::Gender(self.options.next_gender(self.controls.gender.as_deref()))
            }
            KeyCode::Char('c') => ControlChange::Condition(
                self.options
                    .next_condition(self.controls.condition.as_deref()),
            ),
            KeyCode::Char('t') => ControlChange::ChartStyle(self.controls.chart_style.toggled()),
            KeyCode::Left => ControlChange::BillingCeiling(slider.step_by(ceiling, -1)),
            KeyCode::Right => ControlChange::BillingCeiling(slider.step_by(ceiling, 1)),
            KeyCode::Char('[') => ControlChange::BillingCeiling(slider.prev_mark(ceiling)),
            KeyCode::Char(']') => ControlChange::BillingCeiling(slider.next_mark(ceiling)),
            _ => return None,
        };

        if self.controls.apply(change.clone()) {
            tracing::debug!(?change, "control changed");
            Some(change)
        } else {
            None
        }
    }

    /// Store a freshly rendered figure in its slot.
    pub fn apply_update(&mut self, update: FigureUpdate) {
        self.figures[update.id.index()] = Some(update.figure);
    }

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let data = DashboardViewData {
            summary: self.summary,
            options: &self.options,
            controls: &self.controls,
            figures: &self.figures,
        };
        dashboard_view::render_dashboard(frame, area, &data, &self.theme);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
