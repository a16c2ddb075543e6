//! TUI rendering and the application loop (impure shell).
//!
//! [`App`] owns the terminal, the input source and every collaborator that
//! touches the outside world. All decisions are delegated to the pure state
//! types in [`crate::state`]; this module only draws frames, reads events
//! and performs the side effects the state machine asks for.

mod prompt;
pub mod screens;
pub mod styles;

pub use prompt::{LinePrompt, QueryPrompt, StdinPrompt};
pub use styles::{ColorConfig, Palette};

use crate::aggregator::Aggregator;
use crate::config::ResolvedConfig;
use crate::input::{ChunkReader, EventSource};
use crate::markdown::{render_document, SyntaxHighlighter};
use crate::model::{AppError, EditorError, SearchResult, TerminalEvent};
use crate::source::{CommandSearchTool, Corpus, SearchTool};
use crate::state::{MainMenu, MenuCommand, Navigator, Outcome, View};
use crate::terminal::{
    CrosstermMode, EditorCommand, EditorHandoff, ProcessLauncher, TerminalMode, TerminalSession,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    text::Line,
    Terminal,
};
use std::io;
use tracing::{info, warn};

/// How a nested screen ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Back to the main menu.
    Menu,
    /// Leave the program.
    Quit,
}

/// Collaborators the application drives.
pub struct Services {
    /// Documents being searched.
    pub corpus: Corpus,
    /// External search program.
    pub search_tool: Box<dyn SearchTool>,
    /// Editor launcher.
    pub editor: EditorHandoff,
    /// Query prompt used in cooked mode.
    pub prompt: Box<dyn QueryPrompt>,
    /// Code block highlighter for previews.
    pub highlighter: SyntaxHighlighter,
    /// Screen styles.
    pub palette: Palette,
}

/// Per-search-session screen data that is not navigation state.
#[derive(Debug, Default)]
struct SessionScreen {
    /// Last editor failure, shown on the detail screen.
    notice: Option<String>,
    /// Rendered document for the preview screen.
    preview: Option<Vec<Line<'static>>>,
}

/// Main TUI application.
///
/// Generic over backend, input and terminal mode so tests can run it on a
/// `TestBackend` with scripted input.
pub struct App<B: Backend, E: EventSource, M: TerminalMode> {
    terminal: Terminal<B>,
    session: TerminalSession<M>,
    events: E,
    services: Services,
    menu: MainMenu,
}

impl<B: Backend, E: EventSource, M: TerminalMode> App<B, E, M> {
    /// Assemble an application around an already started terminal session.
    pub fn new(
        terminal: Terminal<B>,
        session: TerminalSession<M>,
        events: E,
        services: Services,
    ) -> Self {
        Self {
            terminal,
            session,
            events,
            services,
            menu: MainMenu::new(),
        }
    }

    /// The outer menu state.
    pub fn menu(&self) -> &MainMenu {
        &self.menu
    }

    /// The terminal, for inspecting the last frame in tests.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run until the user quits.
    ///
    /// With an `initial_query` the search session for it starts right away;
    /// leaving it with `m` lands on the main menu.
    pub fn run(&mut self, initial_query: Option<&str>) -> Result<(), AppError> {
        if let Some(query) = initial_query.map(str::trim).filter(|q| !q.is_empty()) {
            if self.search_session(query)? == SessionEnd::Quit {
                return Ok(());
            }
        }

        loop {
            self.draw_menu()?;
            let event = self.events.next_event()?;
            let end = match self.menu.handle(event) {
                MenuCommand::Search => match self.prompt_query()? {
                    Some(query) => self.search_session(&query)?,
                    None => SessionEnd::Menu,
                },
                MenuCommand::Tags => self.tag_overview()?,
                MenuCommand::Quit => SessionEnd::Quit,
                MenuCommand::None => SessionEnd::Menu,
            };
            if end == SessionEnd::Quit {
                info!("Quit requested");
                return Ok(());
            }
        }
    }

    /// Restore the terminal for good.
    pub fn finish(self) -> Result<(), AppError> {
        self.session.finish()?;
        Ok(())
    }

    /// Search, then browse the results until the user leaves.
    fn search_session(&mut self, query: &str) -> Result<SessionEnd, AppError> {
        let aggregator = Aggregator::new(self.services.search_tool.as_ref(), &self.services.corpus);
        let results = match aggregator.search(query) {
            Ok(results) => results,
            Err(err) => {
                warn!(query, error = %err, "Search failed");
                self.menu.set_notice(format!("Search failed: {err}"));
                return Ok(SessionEnd::Menu);
            }
        };

        let Some(mut navigator) = Navigator::new(results) else {
            info!(query, "No results");
            self.menu.set_notice(format!("No results for '{query}'"));
            return Ok(SessionEnd::Menu);
        };

        let mut screen = SessionScreen::default();
        loop {
            self.draw_session(&navigator, &screen)?;
            let event = self.events.next_event()?;

            if navigator.view() == View::ResultDetail {
                screen.notice = None;
            }

            match navigator.handle(event) {
                Outcome::Continue => {}
                Outcome::OpenEditor(path) => match self.open_editor(&navigator, &path) {
                    Ok(()) => {}
                    Err(EditorError::Terminal(err)) => return Err(err.into()),
                    Err(err @ EditorError::StalePath { .. }) => {
                        warn!(error = %err, "Stale result path");
                        self.menu.set_notice(err.to_string());
                        return Ok(SessionEnd::Menu);
                    }
                    Err(err) => {
                        warn!(error = %err, "Editor failed");
                        screen.notice = Some(err.to_string());
                    }
                },
                Outcome::ReturnToMenu => return Ok(SessionEnd::Menu),
                Outcome::Quit => return Ok(SessionEnd::Quit),
            }

            match (navigator.view(), navigator.active_result()) {
                (View::Preview, Some(result)) if screen.preview.is_none() => {
                    screen.preview = Some(self.load_preview(result));
                }
                (View::Preview, _) => {}
                _ => screen.preview = None,
            }
        }
    }

    fn open_editor(&mut self, navigator: &Navigator, path: &str) -> Result<(), EditorError> {
        if !navigator.contains_path(path) {
            return Err(EditorError::StalePath {
                path: path.to_string(),
            });
        }

        let absolute = self.services.corpus.resolve(path);
        let opened = self.services.editor.open(&mut self.session, &absolute);
        // The editor drew over our screen.
        self.terminal.clear()?;
        opened
    }

    fn load_preview(&self, result: &SearchResult) -> Vec<Line<'static>> {
        let path = self.services.corpus.resolve(&result.path);
        match std::fs::read_to_string(&path) {
            Ok(content) => self
                .services
                .palette
                .apply_to(render_document(&content, &self.services.highlighter)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Cannot read document for preview");
                vec![Line::from(format!("Cannot read {}: {err}", path.display()))]
            }
        }
    }

    fn prompt_query(&mut self) -> Result<Option<String>, AppError> {
        let guard = self.session.suspend()?;
        let answer = self.services.prompt.read_query();
        guard.resume()?;
        self.terminal.clear()?;
        Ok(answer?)
    }

    fn tag_overview(&mut self) -> Result<SessionEnd, AppError> {
        let tags = self.services.corpus.tag_counts();
        info!(tags = tags.len(), "Showing tag overview");

        let palette = &self.services.palette;
        self.terminal
            .draw(|frame| screens::render_tag_overview(frame, &tags, palette))?;

        match self.events.next_event()? {
            TerminalEvent::Quit => Ok(SessionEnd::Quit),
            _ => Ok(SessionEnd::Menu),
        }
    }

    fn draw_menu(&mut self) -> Result<(), AppError> {
        let root = self.services.corpus.root().display().to_string();
        let menu = &self.menu;
        let palette = &self.services.palette;
        self.terminal
            .draw(|frame| screens::render_main_menu(frame, menu, &root, palette))?;
        Ok(())
    }

    fn draw_session(&mut self, navigator: &Navigator, screen: &SessionScreen) -> Result<(), AppError> {
        let palette = &self.services.palette;
        self.terminal.draw(|frame| match navigator.view() {
            View::ResultsList => screens::render_results_list(frame, navigator, palette),
            View::Table => screens::render_results_table(frame, navigator.results(), palette),
            View::ResultDetail => {
                if let Some(result) = navigator.active_result() {
                    screens::render_detail(frame, result, screen.notice.as_deref(), palette);
                }
            }
            View::Preview => {
                if let (Some(result), Some(lines)) = (navigator.active_result(), &screen.preview) {
                    screens::render_preview(frame, &result.title, lines, palette);
                }
            }
        })?;
        Ok(())
    }
}

/// Build the production application from resolved configuration and run it.
///
/// The terminal is restored on every exit path.
pub fn run_with_config(
    config: &ResolvedConfig,
    query: Option<&str>,
    colors: ColorConfig,
) -> Result<(), AppError> {
    let editor = EditorHandoff::new(EditorCommand::parse(&config.editor)?, Box::new(ProcessLauncher));
    let services = Services {
        corpus: Corpus::new(&config.root, &config.extension),
        search_tool: Box::new(CommandSearchTool::new(config.search_tool)),
        editor,
        prompt: Box::new(StdinPrompt),
        highlighter: SyntaxHighlighter::new(&config.theme),
        palette: Palette::with_color_config(colors),
    };

    let session = TerminalSession::start(CrosstermMode)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = App::new(terminal, session, ChunkReader::stdin(), services);

    let result = app.run(query);
    let finished = app.finish();
    result.and(finished)
}
