use anyhow::{Context, Result};
use aura::app::{App, DynAssistant, Tab};
use aura::assistant::{Assistant, GeminiClient, Task, TextGenerator};
use aura::config::Args;
use aura::scene::{Globe, MarkerStyle};
use aura::{document, ui};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aura=info"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(out) = args.export_scene.as_deref() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
        return export_scene(&args, out);
    }

    // The terminal owns stdout/stderr while the UI runs
    let log = File::create(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(log))
        .init();

    let globe = Globe::load(args.globe_config())
        .with_context(|| format!("failed to load land data from {}", args.land.display()))?;
    tracing::info!(
        path = %globe.land_path().display(),
        polygons = globe.polygon_count(),
        radius = globe.radius(),
        "land dataset ready"
    );
    let assistant = match args.gemini_config() {
        Some(config) => {
            let client = GeminiClient::new(config)?;
            Some(Assistant::new(Box::new(client) as Box<dyn TextGenerator>))
        }
        None => {
            tracing::warn!("no API key configured, summarize/translate disabled");
            None
        }
    };
    let doc = args.document.as_deref().map(document::load).transpose()?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &args, globe, assistant, doc);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Build the globe, place the markers and write the figure JSON.
fn export_scene(args: &Args, out: &Path) -> Result<()> {
    let globe = Globe::load(args.globe_config())
        .with_context(|| format!("failed to load land data from {}", args.land.display()))?;
    let (mut scene, markers) = globe.build();
    let (lons, lats) = args.marker_columns();
    globe.update_markers(&mut scene, markers, &lons, &lats, &MarkerStyle::default())?;

    let json = scene.to_json()?;
    fs::write(out, json).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), markers = lons.len(), "exported scene");
    Ok(())
}

/// Mouse drag rotates the globe or scrolls the text; the wheel zooms or scrolls.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => match app.tab {
            Tab::Globe => app.zoom_in(),
            Tab::Text => app.scroll_by(-3),
        },
        MouseEventKind::ScrollDown => match app.tab {
            Tab::Globe => app.zoom_out(),
            Tab::Text => app.scroll_by(3),
        },
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    args: &Args,
    globe: Globe,
    assistant: Option<DynAssistant>,
    doc: Option<document::Document>,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(
        globe,
        assistant,
        args.out_dir.clone(),
        size.width as usize,
        size.height as usize,
    );

    let (lons, lats) = args.marker_columns();
    app.set_markers(&lons, &lats)?;
    if let Some(doc) = doc {
        app.load_document(&doc.name, doc.text);
    }

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // A queued request blocks; the frame above already shows the thinking status
        if app.pending.is_some() {
            app.run_pending();
            continue;
        }

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            KeyCode::Char('o') => app.show_original(),
                            KeyCode::Char('s') => app.request(Task::Summarize),
                            KeyCode::Char('t') => app.request(Task::Translate),
                            KeyCode::Char('g') => app.show_globe(),
                            KeyCode::Char('w') => app.download(),

                            KeyCode::Left | KeyCode::Char('h') => app.navigate(-1, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.navigate(1, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.navigate(0, -1),
                            KeyCode::Down | KeyCode::Char('j') => app.navigate(0, 1),
                            KeyCode::PageUp => app.scroll_by(-20),
                            KeyCode::PageDown => app.scroll_by(20),

                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
