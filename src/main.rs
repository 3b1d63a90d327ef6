mod app;
mod event;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};

use kare::config::Config;
use kare::generator::WordList;
use kare::keyboard::KanaKeyboard;
use kare::keyboard::display::{BACKSPACE, ENTER};
use kare::logging;

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use ui::components::keyboard_diagram::{DIAGRAM_HEIGHT, KeyboardDiagram};
use ui::components::results::ResultsPanel;
use ui::components::stats_sidebar::{StatsSidebar, format_accuracy, format_wpm};
use ui::components::typing_area::TypingArea;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "kare", version, about = "Terminal hiragana typing tutor")]
struct Cli {
    #[arg(short, long, help = "Number of words per test")]
    words: Option<usize>,

    #[arg(long, help = "Hide the kana keyboard diagram")]
    no_keyboard: bool,

    #[arg(long, help = "Hide romaji readings")]
    no_romaji: bool,

    #[arg(long, help = "Fetch the word list from the configured URL")]
    download: bool,

    #[arg(long, help = "Log level (error, warn, info, debug, trace)")]
    log_level: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(words) = self.words {
            config.word_count = words;
        }
        if self.no_keyboard {
            config.show_keyboard = false;
        }
        if self.no_romaji {
            config.show_romaji = false;
        }
        if self.download {
            config.word_list_downloads_enabled = true;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.normalize();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load();
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    cli.apply(&mut config);

    if let Err(err) = logging::init(&logging::log_path(), &config.log_level) {
        eprintln!("kare: logging disabled: {err:#}");
    }
    if let Err(err) = &loaded {
        warn!(path = %Config::config_path().display(), "ignoring unreadable config: {err:#}");
    }

    let word_list =
        WordList::load(&config, KanaKeyboard::jis_kana()).context("loading word list")?;
    info!(list = word_list.name(), words = word_list.len(), "word list ready");

    let mut app = App::new(config, word_list);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Typing => handle_typing_key(app, key),
        AppScreen::Result => handle_result_key(app, key),
    }
}

/// Every printable key types kana here, so quitting is Esc only.
fn handle_typing_key(app: &mut App, key: KeyEvent) {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.restart_test(),
        KeyCode::Backspace => app.type_key(BACKSPACE, false),
        KeyCode::Enter => app.type_key(ENTER, false),
        KeyCode::Char(ch) => app.type_key(ch, shift),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('r') => app.start_test(),
        KeyCode::Tab => app.restart_test(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Typing => render_typing(frame, app),
        AppScreen::Result => render_result(frame, app),
    }
}

fn render_typing(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area);
    let tier = app_layout.tier;
    let session = &app.session;

    let title = Span::styled(
        " kare ",
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    );
    let info_text = if tier.show_sidebar() {
        format!(" {} ", app.word_list().name())
    } else {
        let metrics = session.metrics();
        format!(
            " WPM: {} | Acc: {} | Errors: {}",
            format_wpm(metrics.wpm),
            format_accuracy(metrics.accuracy),
            session.error_count()
        )
    };
    let header = Paragraph::new(Line::from(vec![
        title,
        Span::styled(
            info_text,
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .block(Block::default().style(Style::default().bg(colors.header_bg())));
    frame.render_widget(header, app_layout.header);

    let show_keyboard = app.config.show_keyboard && tier.show_keyboard(area.height);
    let mut constraints = vec![Constraint::Min(5)];
    if show_keyboard {
        constraints.push(Constraint::Length(DIAGRAM_HEIGHT));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    let typing = TypingArea::new(session, app.config.show_romaji, &app.theme);
    frame.render_widget(typing, main_layout[0]);

    if show_keyboard {
        let hint = session.next_key();
        let kbd = KeyboardDiagram::new(app.keyboard, &hint, &app.theme);
        frame.render_widget(kbd, main_layout[1]);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        frame.render_widget(StatsSidebar::new(session, &app.theme), sidebar_area);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Esc] Quit  [Tab] Restart  [Enter] Confirm word  [Backspace] Delete ",
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, app_layout.footer);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(ref result) = app.last_result {
        let centered = ui::layout::centered_rect(60, 70, area);
        let panel = ResultsPanel::new(result, &app.session, &app.theme);
        frame.render_widget(panel, centered);
    }
}
