use anyhow::{Context, Result};
use clap::Parser;
use common::{Event, PlaybackEngine, Reporter, Session, Viewer};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info};

use terminal::app::App;
use terminal::config::Config;
use terminal::input::spawn_input_thread;
use terminal::loader::{AssetLoader, JpegSink};
use terminal::logging;
use terminal::timer::TokioScheduler;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();
    let config = Config::parse();

    logging::init(&config.log_file)?;
    info!("starting with asset directory {:?}", config.asset_path);

    if !config.asset_path.exists() {
        info!("creating asset directory {:?}", config.asset_path);
        std::fs::create_dir_all(&config.asset_path).with_context(|| {
            format!("Failed to create asset directory: {:?}", config.asset_path)
        })?;
    }

    // One queue, two producers: the input thread and the playback timer
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (reporter, reports) = Reporter::channel();

    let engine = PlaybackEngine::new(
        Box::new(TokioScheduler::new(events_tx.clone())),
        config.policy(),
        reporter.clone(),
    );
    let session = Session::new(
        engine,
        Box::new(AssetLoader::new(
            config.asset_path.clone(),
            config.max_width,
            config.max_height,
        )),
        Box::new(JpegSink::new(config.asset_path.clone())),
        reporter.clone(),
    );
    let viewer = Viewer::new(session, reporter).context("Failed to build command menu")?;
    let mut app = App::new(viewer, reports, config.render_mode());

    if let Some(item) = config.initial_item() {
        app.load_item(item);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = match spawn_input_thread(events_tx) {
        Ok(_) => run_app(&mut terminal, &mut app, events_rx).await,
        Err(err) => Err(err),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("viewer stopped: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    info!("bye");
    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: UnboundedReceiver<Event>,
) -> Result<()> {
    loop {
        app.drain_reports();
        terminal.draw(|f| app.render(f))?;

        let Some(event) = events.recv().await else {
            return Ok(());
        };
        app.handle_event(event);

        // Handle whatever else queued up before drawing again
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
            if !app.is_running() {
                break;
            }
        }

        if !app.is_running() {
            return Ok(());
        }
    }
}
