mod view;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use line_highlight_config::Config;
use line_highlight_engine::interaction::surface::{
    ElementInfo, LINE_NUMBERS_CLASS, LIVE_VIEW_CLASS, READING_VIEW_CLASS,
};
use line_highlight_engine::interaction::{ClickEvent, MouseButton as ClickButton, Rect as ClickRect};
use line_highlight_engine::{
    ClickOutcome, ColorTag, DocumentRef, DocumentStore, EditOutcome, FileStore,
    InteractionController, PaletteChoice, io,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
    time::Instant,
};
use view::{ViewMode, gutter_width, rgb, source_line};

/// Cells per palette entry, including the gap after it.
const PALETTE_ENTRY_WIDTH: u16 = 3;

struct App {
    store: FileStore,
    documents: Vec<DocumentRef>,
    file_list_state: ListState,
    active: Option<DocumentRef>,
    source: String,
    view: ViewMode,
    controller: InteractionController,
    scroll: usize,
    status: String,
    // Screen areas from the last draw, for mouse hit testing.
    file_list_area: Rect,
    content_area: Rect,
    palette_area: Option<Rect>,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let documents = io::list_documents(&config.notes_path)?;

        let mut app = Self {
            store: FileStore::new(&config.notes_path),
            documents,
            file_list_state: ListState::default(),
            active: None,
            source: String::new(),
            view: config.default_view.into(),
            controller: InteractionController::new(config.palette_grace()),
            scroll: 0,
            status: String::new(),
            file_list_area: Rect::default(),
            content_area: Rect::default(),
            palette_area: None,
        };

        if !app.documents.is_empty() {
            app.select_document(0);
        }

        Ok(app)
    }

    fn line_count(&self) -> usize {
        self.source.split('\n').count()
    }

    fn select_document(&mut self, index: usize) {
        self.file_list_state.select(Some(index));
        self.controller.dismiss();
        self.scroll = 0;
        self.active = self.documents.get(index).cloned();
        self.reload();
    }

    fn reload(&mut self) {
        let Some(document) = &self.active else {
            self.source.clear();
            return;
        };
        match self.store.read(document) {
            Ok(content) => self.source = content,
            Err(e) => {
                self.source.clear();
                self.status = format!("Error reading file: {e}");
            }
        }
    }

    fn next_file(&mut self) {
        if self.documents.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.documents.len(),
            None => 0,
        };
        self.select_document(i);
    }

    fn previous_file(&mut self) {
        if self.documents.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => self.documents.len() - 1,
            Some(i) => i - 1,
        };
        self.select_document(i);
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.line_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    fn toggle_view(&mut self) {
        self.controller.dismiss();
        self.view = self.view.toggled();
    }

    fn choose(&mut self, choice: PaletteChoice) {
        let line = self.controller.palette().map(|p| p.line_index + 1);
        match self
            .controller
            .apply_selection(choice, &self.store, &self.active)
        {
            Ok(Some(EditOutcome::Applied)) => {
                self.status = match (choice.color(), line) {
                    (Some(color), Some(line)) => format!("Line {line} marked {color}"),
                    (None, Some(line)) => format!("Line {line} cleared"),
                    _ => String::new(),
                };
                self.reload();
            }
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to update marker: {e}");
                self.status = format!("Error writing file: {e}");
            }
        }
    }

    /// Describes a terminal click the way the controller expects: the cell
    /// under the pointer first, then its containers.
    fn click_event(&self, button: MouseButton, column: u16, row: u16) -> ClickEvent {
        let button = match button {
            MouseButton::Left => ClickButton::Primary,
            MouseButton::Right => ClickButton::Secondary,
            MouseButton::Middle => ClickButton::Middle,
        };
        let view_class = match self.view {
            ViewMode::Reading => READING_VIEW_CLASS,
            ViewMode::Live => LIVE_VIEW_CLASS,
        };

        let area = self.content_area;
        let mut path = Vec::new();
        if contains(area, column, row) {
            let line = self.scroll + usize::from(row - area.y);
            let gutter_end = area.x + gutter_width(self.line_count());
            if column < gutter_end && line < self.line_count() {
                let bounds = ClickRect::new(
                    f64::from(area.x),
                    f64::from(row),
                    f64::from(gutter_end),
                    f64::from(row) + 1.0,
                );
                path.push(ElementInfo::gutter_cell(line + 1, bounds));
                path.push(ElementInfo::new(&[LINE_NUMBERS_CLASS]));
            }
            path.push(ElementInfo::new(&[view_class]));
        } else {
            path.push(ElementInfo::default());
        }

        ClickEvent {
            button,
            path,
            at: Instant::now(),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let MouseEventKind::Down(button) = mouse.kind else {
            match mouse.kind {
                MouseEventKind::ScrollDown => self.scroll_by(1),
                MouseEventKind::ScrollUp => self.scroll_by(-1),
                _ => {}
            }
            return;
        };

        if let Some(area) = self.palette_area
            && button == MouseButton::Left
            && contains(area, mouse.column, mouse.row)
        {
            if let Some(choice) = self.palette_choice_at(area, mouse.column) {
                self.choose(choice);
            }
            return;
        }

        let event = self.click_event(button, mouse.column, mouse.row);
        if self.controller.handle_click(&event) == ClickOutcome::Propagate
            && button == MouseButton::Left
        {
            self.click_file_list(mouse.column, mouse.row);
        }
    }

    fn palette_choice_at(&self, area: Rect, column: u16) -> Option<PaletteChoice> {
        let palette = self.controller.palette()?;
        let offset = column.checked_sub(area.x + 1)?;
        palette
            .entries
            .get(usize::from(offset / PALETTE_ENTRY_WIDTH))
            .copied()
    }

    fn click_file_list(&mut self, column: u16, row: u16) {
        let area = self.file_list_area;
        if !contains(area, column, row) || row == area.y {
            return;
        }
        let index = self.file_list_state.offset() + usize::from(row - area.y - 1);
        if index < self.documents.len() {
            self.select_document(index);
        }
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.controller.is_open() {
            match key.code {
                KeyCode::Char(c @ '1'..='7') => {
                    let index = usize::from(c as u8 - b'1');
                    self.choose(PaletteChoice::Color(ColorTag::ALL[index]));
                }
                KeyCode::Char('0') | KeyCode::Backspace => self.choose(PaletteChoice::Clear),
                KeyCode::Esc => self.controller.dismiss(),
                KeyCode::Char('q') => return false,
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Tab => self.toggle_view(),
            KeyCode::Down | KeyCode::Char('j') => self.next_file(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_file(),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::PageUp => self.scroll_by(-10),
            _ => {}
        }
        true
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Logs go to the file named by `LINE_HIGHLIGHT_LOG`; the terminal belongs to
/// the UI.
fn init_logging() -> Result<()> {
    let Some(log_path) = env::var_os("LINE_HIGHLIGHT_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(&log_path)?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config;
    let from_config;

    if args.len() == 2 {
        config = match Config::with_notes_override(&PathBuf::from(&args[1])) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                process::exit(1);
            }
        };
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(loaded)) => {
                config = loaded;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No notes path provided and no config file found");
                eprintln!("Usage: {} <notes-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <notes-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [notes-folder-path]", args[0]);
        process::exit(1);
    };

    if let Err(e) = io::validate_notes_dir(&config.notes_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Notes path '{}'{} is invalid: {e}",
            config.notes_path.display(),
            source
        );
        process::exit(1);
    }
    log::info!("Opening notes in {}", config.notes_path.display());

    let mut app = App::new(&config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                if !app.handle_key(key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(rows[0]);

    let file_items: Vec<ListItem> = app
        .documents
        .iter()
        .map(|doc| ListItem::new(Line::raw(doc.display_path().to_string())))
        .collect();
    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Notes"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    app.file_list_area = chunks[0];
    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    let title = match &app.active {
        Some(doc) => format!("{} [{}]", doc.title(), app.view.title()),
        None => app.view.title().to_string(),
    };
    let content_block = Block::default().borders(Borders::ALL).title(title);
    app.content_area = content_block.inner(chunks[1]);

    let gutter = usize::from(gutter_width(app.line_count()));
    let gutter_style = match app.view {
        ViewMode::Live => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        ViewMode::Reading => Style::default().fg(Color::DarkGray),
    };
    let lines: Vec<Line> = if app.active.is_none() {
        vec![Line::raw("Select a note to view it")]
    } else {
        app.source
            .split('\n')
            .enumerate()
            .skip(app.scroll)
            .map(|(i, text)| {
                let mut line = source_line(text, app.view);
                let number = format!("{:>width$} ", i + 1, width = gutter - 1);
                line.spans.insert(0, Span::styled(number, gutter_style));
                line
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines).block(content_block), chunks[1]);

    app.palette_area = app.controller.palette().map(|palette| {
        let entries = u16::try_from(palette.entries.len()).unwrap_or(u16::MAX);
        let width = entries * PALETTE_ENTRY_WIDTH + 2;
        let frame = f.area();
        let area = Rect {
            x: (palette.left.max(0.0) as u16).min(frame.width.saturating_sub(width)),
            y: (palette.top.max(0.0) as u16).min(frame.height.saturating_sub(3)),
            width: width.min(frame.width),
            height: 3.min(frame.height),
        };

        let spans: Vec<Span> = palette
            .entries
            .iter()
            .enumerate()
            .map(|(i, choice)| match choice.color() {
                Some(color) => Span::styled(
                    format!(" {} ", i + 1),
                    Style::default().bg(rgb(color.swatch())).fg(Color::White),
                ),
                None => Span::styled(
                    format!(" {} ", line_highlight_engine::interaction::CLEAR_GLYPH),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                ),
            })
            .collect();
        let title = format!("Line {}", palette.line_index + 1);
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(Line::from(spans))
                .block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
        area
    });

    let help = Line::from(vec![
        Span::raw("q: Quit | ↑/k ↓/j: Notes | Tab: Reading/Live | "),
        Span::raw("click a line number (live): Highlight | 1-7/0: Pick | Esc: Close"),
    ]);
    let status = Line::from(Span::styled(
        app.status.clone(),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(vec![help, status]), rows[1]);
}
