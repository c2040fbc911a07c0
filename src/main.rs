use std::fs;
use std::io::stdout;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use tracing_subscriber::EnvFilter;

use deck::app::App;
use deck::config::Config;
use deck::focus::Key;
use deck::store::Store;
use deck::views::{LogView, NotesView, ScheduleView, ViewContext, ViewFactory};

fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deck");
    fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::never(log_dir, "deck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn main() -> Result<()> {
    let _guard = init_tracing();

    let config = Config::load()?;
    if let Some(parent) = config.db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let store = Rc::new(Store::open(&config.db_path)?);
    let keymap = config.keymap();
    let ctx = ViewContext {
        store,
        config: config.clone(),
    };

    let registry: Vec<(String, ViewFactory)> = vec![
        (
            "notes".to_string(),
            Box::new(|ctx, params| Ok(Box::new(NotesView::new(ctx, params)?) as _)),
        ),
        (
            "schedule".to_string(),
            Box::new(|ctx, params| Ok(Box::new(ScheduleView::new(ctx, params)?) as _)),
        ),
        (
            "system".to_string(),
            Box::new(|ctx, params| Ok(Box::new(LogView::new(ctx, params)?) as _)),
        ),
    ];

    let mut app = App::new("deck", registry, ctx, keymap)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut app, &mut terminal);

    // Restore the terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        ratatui::crossterm::cursor::Show
    )?;

    result
}

/// One logical loop: draw, block on the next input event, deliver it.
/// Each keystroke runs to completion before the next is read.
fn run(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| app.render(f))?;

        match event::read()? {
            Event::Key(ev) => {
                if let Some(key) = Key::from_event(ev) {
                    app.keypress(key);
                }
            }
            Event::Resize(_, _) => {}
            _ => {}
        }
    }
    Ok(())
}
