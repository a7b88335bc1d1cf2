use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::Config;
use crate::session::{Navigator, Session};
use crate::source::{Location, SymbolSource};

use super::input;
use super::render;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Preview only; the filter panel is closed
    Browse,
    /// The filter panel is open and owns the keyboard
    Filter,
}

/// Document preview state — the navigator collaborator. `goto` recenters
/// the preview on the target line.
#[derive(Debug)]
pub struct DocView {
    /// Current line, 1-based.
    pub line: usize,
    /// First visible line, 0-based.
    pub scroll: usize,
    /// Rows available at the last render.
    pub height: usize,
    /// Total document lines.
    pub total: usize,
}

impl DocView {
    pub fn new(total: usize) -> DocView {
        DocView {
            line: 1,
            scroll: 0,
            height: 0,
            total,
        }
    }

    /// Clamp `line` into the document and scroll it into the middle of
    /// the viewport.
    pub fn recenter(&mut self) {
        self.line = self.line.clamp(1, self.total.max(1));
        let half = self.height / 2;
        self.scroll = (self.line - 1).saturating_sub(half);
        if self.total > self.height {
            self.scroll = self.scroll.min(self.total - self.height);
        } else {
            self.scroll = 0;
        }
    }

    /// Browse-mode scrolling, outside any session.
    pub fn scroll_by(&mut self, by: isize) {
        let line = self.line as isize + by;
        self.line = line.clamp(1, self.total.max(1) as isize) as usize;
        self.recenter();
    }
}

impl Navigator<Location> for DocView {
    fn goto(&mut self, target: &Location) {
        self.line = target.line;
        self.recenter();
    }
}

/// Main application state
pub struct App {
    pub path: PathBuf,
    pub config: Config,
    pub source: SymbolSource,
    pub session: Session<Location>,
    pub view: DocView,
    pub mode: Mode,
    pub should_quit: bool,
    /// One-shot status message, cleared on the next key
    pub flash: Option<String>,
    /// Ring the terminal bell after this frame
    pub bell: bool,
    /// Start of the active-edit selection in the query (chars); typing
    /// replaces everything from here. Set by prefix seeding.
    pub select_from: Option<usize>,
    /// List rows available at the last render; the default page size
    pub list_height: usize,
}

impl App {
    pub fn new(path: PathBuf, source: SymbolSource, config: Config) -> App {
        let total = source.lines().len();
        App {
            path,
            config,
            source,
            session: Session::new(),
            view: DocView::new(total),
            mode: Mode::Browse,
            should_quit: false,
            flash: None,
            bell: false,
            select_from: None,
            list_height: 10,
        }
    }

    /// Show the filter panel: open a session over freshly extracted
    /// symbols, seeding the query from config. The current preview line
    /// becomes the origin that Escape returns to.
    pub fn open_panel(&mut self) {
        let origin = Location { line: self.view.line };
        let prefix = self.config.query.prefix.clone();
        self.session
            .open(&mut self.source, origin, prefix.as_deref());
        self.select_from = prefix.map(|p| p.chars().count());
        self.mode = Mode::Filter;
    }

    /// Effective page size for PageUp/PageDown: config override, else the
    /// rendered list height.
    pub fn page_size(&self) -> usize {
        if self.config.ui.page_size > 0 {
            self.config.ui.page_size
        } else {
            self.list_height.max(1)
        }
    }
}

/// Run the interactive panel on a file.
pub fn run(path: &Path, config_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_dir)?;
    let source = SymbolSource::from_file(path)?;
    let mut app = App::new(path.to_path_buf(), source, config);
    app.open_panel();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if app.bell {
            app.bell = false;
            execute!(terminal.backend_mut(), Print("\u{7}"))?;
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
