mod text;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::executor::block_on;
use log::{info, warn};
use markdown_hybrid_config::Config;
use markdown_hybrid_engine::{
    BlockKind, ClickAction, HybridView, LineRange, Payload, RenderDirective, RenderMode,
    RenderOptions, SelectionRange, Theme, ViewMode, WidgetClick, click::footnote_reference, io,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    collections::HashMap,
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

struct App {
    path: PathBuf,
    view: HybridView,
    cursor_line: usize,
    has_focus: bool,
    top_line: usize,
    page_height: usize,
    status: String,
}

impl App {
    fn new(path: PathBuf, options: RenderOptions) -> Result<Self> {
        let content = io::read_file(&path)?;
        Ok(Self {
            path,
            view: HybridView::new(&content, options),
            cursor_line: 1,
            has_focus: true,
            top_line: 1,
            page_height: 20,
            status: String::new(),
        })
    }

    fn line_count(&self) -> usize {
        self.view.buffer().line_count()
    }

    fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor_line.saturating_add_signed(delta);
        self.cursor_line = target.clamp(1, self.line_count());
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let height = self.page_height.max(1);
        if self.cursor_line < self.top_line {
            self.top_line = self.cursor_line;
        } else if self.cursor_line >= self.top_line + height {
            self.top_line = self.cursor_line + 1 - height;
        }
    }

    fn caret(&self) -> SelectionRange {
        SelectionRange::caret(self.view.buffer().offset_of_line(self.cursor_line))
    }

    fn toggle_raw(&mut self) {
        let mut options = self.view.options().clone();
        options.mode = match options.mode {
            ViewMode::Hybrid => ViewMode::Raw,
            ViewMode::Raw => ViewMode::Hybrid,
        };
        self.status = format!("mode: {:?}", options.mode);
        self.view.set_options(options);
    }

    fn toggle_line_numbers(&mut self) {
        let mut options = self.view.options().clone();
        options.line_numbers = !options.line_numbers;
        self.view.set_options(options);
    }

    fn click_checkbox(&mut self) -> Result<()> {
        let click = WidgetClick {
            on_checkbox: true,
            ..WidgetClick::default()
        };
        self.perform(self.view.click(self.cursor_line, &click))
    }

    fn follow_footnote(&mut self) -> Result<()> {
        let line = self.view.buffer().line_text(self.cursor_line);
        let Some(label) = footnote_reference(line) else {
            self.status = "no footnote reference on this line".to_string();
            return Ok(());
        };
        let click = WidgetClick {
            footnote: Some(label),
            ..WidgetClick::default()
        };
        self.perform(self.view.click(self.cursor_line, &click))
    }

    fn perform(&mut self, action: ClickAction) -> Result<()> {
        match action {
            ClickAction::Select { anchor, .. } => {
                self.cursor_line = self.view.buffer().line_at_offset(anchor);
                self.scroll_to_cursor();
            }
            ClickAction::Edit(edit) => {
                self.view.apply_edit(&edit);
                io::write_file(&self.path, &self.view.text())?;
                info!("saved {}", self.path.display());
                self.status = format!("saved {}", self.path.display());
            }
            ClickAction::OpenExternal(href) => {
                self.status = format!("link: {href}");
            }
            ClickAction::Ignore => {
                self.status = "nothing to do here".to_string();
            }
        }
        Ok(())
    }

    /// Recompute directives for the visible page and settle any diagram
    /// renders before drawing.
    fn directives(&mut self) -> HashMap<usize, RenderDirective> {
        let last = (self.top_line + self.page_height).min(self.line_count());
        let viewport = LineRange::new(self.top_line, last);
        let caret = self.caret();
        let update = self.view.directives(&[caret], self.has_focus, viewport);

        for task in update.diagram_tasks {
            let completion = block_on(task.into_future());
            if !self.view.complete_diagram(completion) {
                warn!("diagram render arrived for a stale block");
            }
        }

        update
            .directives
            .into_iter()
            .map(|d| (d.line, d))
            .collect()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Determine the file from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let path = match (args.len(), config.default_file.clone()) {
        (2, _) => PathBuf::from(&args[1]),
        (1, Some(path)) => path,
        (1, None) => {
            eprintln!("Error: No file provided and no default_file in config");
            eprintln!("Usage: {} <file.md>", args[0]);
            eprintln!("Or set default_file in {}", config_path.display());
            process::exit(1);
        }
        _ => {
            eprintln!("Usage: {} [file.md]", args[0]);
            process::exit(1);
        }
    };

    let mut app = match App::new(path.clone(), config.render) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: Cannot open '{}': {e}", path.display());
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let directives = app.directives();
        terminal.draw(|f| ui(f, app, &directives))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
                KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
                KeyCode::Char('f') => app.has_focus = !app.has_focus,
                KeyCode::Char('r') => app.toggle_raw(),
                KeyCode::Char('n') => app.toggle_line_numbers(),
                KeyCode::Char(' ') => {
                    if let Err(e) = app.click_checkbox() {
                        app.status = format!("save failed: {e}");
                    }
                }
                KeyCode::Enter => {
                    if let Err(e) = app.follow_footnote() {
                        app.status = format!("{e}");
                    }
                }
                _ => {}
            }
        }
    }
}

fn block_style(kind: BlockKind) -> Style {
    let color = match kind {
        BlockKind::CodeBlock => Color::Yellow,
        BlockKind::MathBlock => Color::Magenta,
        BlockKind::Table => Color::Cyan,
        BlockKind::Frontmatter => Color::DarkGray,
    };
    Style::default().fg(color)
}

fn payload_lines(app: &App, payload: &Payload) -> Vec<(String, Style)> {
    let plain = Style::default();
    match payload {
        Payload::Diagram { key, .. } => match app.view.diagram_markup(*key) {
            Some(markup) => text::markup_to_lines(&markup)
                .into_iter()
                .map(|l| (l, Style::default().fg(Color::Green)))
                .collect(),
            None => vec![("[rendering diagram…]".to_string(), plain)],
        },
        Payload::Error { message, .. } => {
            vec![(format!("⚠ {message}"), Style::default().fg(Color::Red))]
        }
        Payload::Line { markup } => {
            let style = match text::heading_level(markup) {
                Some(_) => plain.add_modifier(Modifier::BOLD),
                None => plain,
            };
            text::markup_to_lines(markup)
                .into_iter()
                .map(|l| (l, style))
                .collect()
        }
        other => text::markup_to_lines(other.markup().unwrap_or(""))
            .into_iter()
            .map(|l| (l, plain.add_modifier(Modifier::ITALIC)))
            .collect(),
    }
}

fn ui(f: &mut Frame, app: &mut App, directives: &HashMap<usize, RenderDirective>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    app.page_height = chunks[0].height.saturating_sub(2) as usize;

    let options = app.view.options();
    let cursor_style = match options.theme {
        Theme::Light => Style::default().bg(Color::Yellow).fg(Color::Black),
        Theme::Dark => Style::default().bg(Color::DarkGray),
    };

    let mut lines = Vec::new();
    let last = (app.top_line + app.page_height).min(app.line_count());
    for number in app.top_line..=last {
        let raw = app.view.buffer().line_text(number).to_string();
        let rows: Vec<(String, Style)> = match directives.get(&number).map(|d| &d.mode) {
            None => vec![(raw, Style::default())],
            Some(RenderMode::Raw { style }) => vec![(raw, block_style(*style))],
            Some(RenderMode::Elided) => continue,
            Some(RenderMode::Rendered(payload)) => payload_lines(app, payload),
        };

        for (i, (text, style)) in rows.into_iter().enumerate() {
            let mut spans = Vec::new();
            if options.line_numbers {
                let gutter = if i == 0 {
                    format!("{number:>4} ")
                } else {
                    "     ".to_string()
                };
                spans.push(Span::styled(gutter, Style::default().fg(Color::DarkGray)));
            }
            let style = if number == app.cursor_line {
                style.patch(cursor_style)
            } else {
                style
            };
            spans.push(Span::styled(text, style));
            lines.push(Line::from(spans));
        }
    }

    let title = format!(
        "{}{}",
        app.path.display(),
        if app.has_focus { "" } else { " (unfocused)" }
    );
    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, chunks[0]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | ↑/k ↓/j: Move | f: Focus | r: Raw/Hybrid | "),
        Span::raw("Space: Checkbox | Enter: Footnote | n: Line numbers  "),
        Span::styled(app.status.clone(), Style::default().fg(Color::Green)),
    ]);
    f.render_widget(Paragraph::new(vec![help_text]), chunks[1]);
}
