// Native binary for tcgview - Terminal UI mode

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::OpenOptions,
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use tcgview::{
    app::App,
    catalog::{CatalogClient, HttpCatalog},
    config::{load, Config},
    fetch::spawn_initial_fetch,
    theme::ColorScheme,
    types::AppEvent,
    ui, view,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    let cfg = load().context("Failed to load configuration")?;
    init_logging(&cfg)?;
    cfg.print_summary();

    let client: Arc<dyn CatalogClient> =
        Arc::new(HttpCatalog::new(cfg.catalog_url.clone()).with_timeout(cfg.request_timeout));

    // app + channel; the fetch fires once, on mount
    let (tx, mut rx) = unbounded_channel::<AppEvent>();
    let mut app = App::new(cfg.render_fps);
    let fetch_task = spawn_initial_fetch(client, cfg.page_size, tx);

    if cfg.dump_view {
        if let Some(ev) = rx.recv().await {
            app.on_event(ev);
        }
        let v = view::render(&app, &cfg.background_url);
        println!("{}", serde_json::to_string_pretty(&v)?);
        return Ok(());
    }

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_loop(&mut app, &mut terminal, rx, &cfg).await;

    // cleanup: late results are ignored once the screen is gone
    app.unmount();
    fetch_task.abort();
    execute!(terminal.backend_mut(), DisableMouseCapture)?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn init_logging(cfg: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.log_file)
        .with_context(|| format!("Failed to open log file {}", cfg.log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
    cfg: &Config,
) -> Result<()> {
    let colors: ColorScheme = cfg.theme.colors();
    let mut last_frame = Instant::now()
        .checked_sub(Duration::from_secs(1))
        .unwrap_or_else(Instant::now);

    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps()) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        if event::poll(wait)? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat => {
                    handle_key(app, k)
                }
                Event::Mouse(m) => handle_mouse(app, m),
                _ => {}
            }
        }

        while let Ok(ev) = rx.try_recv() {
            app.on_event(ev);
        }

        if last_frame.elapsed() >= budget {
            app.tick_spinner();
            let v = view::render(app, &cfg.background_url);
            terminal.draw(|f| ui::draw(f, app, &v, &colors))?;
            last_frame = Instant::now();
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, k: KeyEvent) {
    match (k.code, k.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.on_event(AppEvent::Quit);
            return;
        }
        _ => {}
    }

    // Modal: only the close keys reach the overlay
    if app.selection().is_open() {
        if matches!(
            k.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('c')
        ) {
            app.dismiss();
        }
        return;
    }

    match k.code {
        KeyCode::Up | KeyCode::Char('k') => app.up(),
        KeyCode::Down | KeyCode::Char('j') => app.down(),
        KeyCode::PageUp => app.page_up(10),
        KeyCode::PageDown => app.page_down(10),
        KeyCode::Home | KeyCode::Char('g') => app.home(),
        KeyCode::End | KeyCode::Char('G') => app.end(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_highlighted(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let overlay_open = app.selection().is_open();
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (col, row) = (mouse.column, mouse.row);
            if overlay_open {
                if app.hits_close(col, row) {
                    app.dismiss();
                }
            } else if let Some(idx) = app.row_at(col, row) {
                log::debug!("[input] click on row {idx}");
                app.select_index(idx);
            }
        }
        MouseEventKind::ScrollUp if !overlay_open => app.up(),
        MouseEventKind::ScrollDown if !overlay_open => app.down(),
        _ => {}
    }
}
