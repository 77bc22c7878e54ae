//! Application state and event handling

pub mod command;
pub mod input;
pub mod state;
pub mod update;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::quiz::{Configuration, GenerationFailure, PendingGeneration, Quiz, QuizProvider, Step, Ticket};
use crate::{report, ui};
use state::AppState;
use update::Effect;

/// Outcome of a provider call, tagged with the request it answers
type Completion = (Ticket, Result<Quiz, GenerationFailure>);

/// The main application
pub struct App<P> {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    /// Quiz source shared with generation tasks
    provider: Arc<P>,

    /// Generation tasks report back here
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<P: QuizProvider + Send + Sync + 'static> App<P> {
    /// Create a new application instance with the setup form preseeded
    pub fn new(config: Config, provider: P, setup: Configuration) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            state: AppState::new(setup),
            terminal,
            provider: Arc::new(provider),
            completions_tx,
            completions_rx,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();

        loop {
            self.drain_completions();

            if self.state.session.step() == Step::Loading {
                self.state.loading.tick();
            }

            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &theme);
            })?;

            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if self.handle_key(key.code, key.modifiers) {
                            break;
                        }
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Apply every provider outcome that has arrived
    fn drain_completions(&mut self) {
        while let Ok((ticket, outcome)) = self.completions_rx.try_recv() {
            match self.state.session.complete(ticket, outcome) {
                Ok(()) => self.state.sync_quiz_view(),
                Err(rejection) => tracing::debug!(%rejection, "dropped provider outcome"),
            }
        }
    }

    /// Run a generation request in the background
    fn launch(&self, pending: PendingGeneration) {
        let provider = Arc::clone(&self.provider);
        let tx = self.completions_tx.clone();
        let PendingGeneration { ticket, request } = pending;

        tokio::spawn(async move {
            let outcome = provider.generate(request).await;
            // The receiver only goes away when the app is shutting down
            let _ = tx.send((ticket, outcome));
        });
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, code: event::KeyCode, modifiers: event::KeyModifiers) -> bool {
        let effect = if self.state.command_line.is_input_mode() {
            self.state.handle_command_key(code)
        } else {
            match input::key_to_action(
                self.state.session.step(),
                self.state.quiz_view.confirm_end,
                code,
                modifiers,
            ) {
                Some(action) => self.state.handle_action(action),
                None => Effect::None,
            }
        };

        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Generate(pending) => self.launch(pending),
            Effect::Print(dir) => self.print(dir),
            Effect::Copy => self.copy(),
        }
        false
    }

    /// Write the printable summary and report where it went
    fn print(&mut self, dir: Option<PathBuf>) {
        let dir = dir.unwrap_or_else(|| self.config.export_dir());
        let Some(summary) = self.state.session.summary() else { return };

        match report::write_to(&dir, &summary) {
            Ok(path) => self.state.command_line.set_message(format!("Saved {}", path.display())),
            Err(e) => {
                tracing::error!("Failed to write summary: {:#}", e);
                self.state.command_line.set_error(format!("Could not save summary: {}", e));
            }
        }
    }

    /// Copy the printable summary to the system clipboard
    fn copy(&mut self) {
        let Some(summary) = self.state.session.summary() else { return };
        let text = report::render(&summary);

        let result = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .context("Clipboard unavailable");

        match result {
            Ok(()) => self.state.command_line.set_message("Summary copied to clipboard"),
            Err(e) => {
                tracing::warn!("{:#}", e);
                self.state.command_line.set_error("Could not copy to clipboard");
            }
        }
    }
}

impl<P> Drop for App<P> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = self.terminal.show_cursor();
    }
}
