use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;

use wxwatch::config::{DisplayMode, MonitorConfig};
use wxwatch::ui::{self, Renderer, Theme};
use wxwatch::{logging, App, DataSource, FileSource, HttpSource, WeatherClient};

/// How long one loop iteration waits for input.
const INPUT_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "wxwatch")]
#[command(about = "Terminal monitor for a personal weather station, with trends and sparklines")]
struct Args {
    /// PWS station ID to query (e.g., KCOHOTSU8)
    station_id: Option<String>,

    /// Config file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Weather Underground API key
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Update interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Number of readings kept for trends and sparklines
    #[arg(long)]
    history: Option<usize>,

    /// Plain text output instead of the full-screen interface
    #[arg(long)]
    plain: bool,

    /// Read observations from a saved API response instead of the network
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch one observation, export it to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    logging::init(config.log_file.as_deref())?;
    tracing::info!(
        station = %config.station_id,
        interval_secs = config.interval_secs,
        display = ?config.display,
        "starting monitor"
    );

    // File mode: every poll is a tick, so poll once per interval.
    if let Some(ref path) = args.file {
        let source = Box::new(FileSource::new(path));
        if let Some(ref export_path) = args.export {
            return export_once(source, config, export_path);
        }
        let interval = config.interval();
        return run(source, config, interval);
    }

    config.validate_remote()?;
    let client = WeatherClient::from_config(&config).context("cannot build HTTP client")?;

    // The runtime must outlive the UI loop: the fetch task runs on it.
    let rt = tokio::runtime::Runtime::new()?;
    let source = rt.block_on(async { HttpSource::spawn(client, config.interval()) });

    let result = match args.export {
        Some(ref export_path) => export_once(Box::new(source), config, export_path),
        // The source paces itself; poll often so ticks show up promptly.
        None => run(Box::new(source), config, INPUT_TIMEOUT),
    };

    rt.shutdown_timeout(Duration::from_secs(1));
    tracing::info!("monitor stopped");
    result
}

/// Layer CLI flags over file and environment settings.
fn load_config(args: &Args) -> Result<MonitorConfig> {
    let mut config = MonitorConfig::load(args.config.as_deref())?;

    if let Some(ref station_id) = args.station_id {
        config.station_id = station_id.clone();
    }
    if let Some(ref key) = args.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(interval) = args.interval {
        config.interval_secs = interval;
    }
    if let Some(history) = args.history {
        config.history_capacity = history;
    }
    if args.plain {
        config.display = DisplayMode::Plain;
    }
    if let Some(ref log_file) = args.log_file {
        config.log_file = Some(log_file.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Run the display with the given data source
fn run(source: Box<dyn DataSource>, config: MonitorConfig, poll_every: Duration) -> Result<()> {
    let mode = config.display;
    let mut app = App::new(source, config);
    if mode == DisplayMode::Rich {
        app.theme = Theme::auto_detect();
    }

    let mut renderer = ui::create(mode)?;
    let result = run_app(renderer.as_mut(), &mut app, poll_every);
    renderer.restore()?;

    result
}

fn run_app(renderer: &mut dyn Renderer, app: &mut App, poll_every: Duration) -> Result<()> {
    app.reload_data()?;
    let mut last_poll = Instant::now();

    while app.running {
        renderer.draw(app)?;
        renderer.handle_input(app, INPUT_TIMEOUT)?;

        if last_poll.elapsed() >= poll_every {
            app.reload_data()?;
            last_poll = Instant::now();
        }
    }

    Ok(())
}

/// Wait for a single tick and export it
fn export_once(source: Box<dyn DataSource>, config: MonitorConfig, path: &Path) -> Result<()> {
    let deadline = config.request_timeout() + Duration::from_secs(5);
    let mut app = App::new(source, config);

    let started = Instant::now();
    while !app.reload_data()? {
        if started.elapsed() > deadline {
            bail!("no observation received within {}s", deadline.as_secs());
        }
        std::thread::sleep(INPUT_TIMEOUT);
    }

    if let Some(err) = app.load_error() {
        bail!("{}", err);
    }

    app.export_state(path)?;
    println!("Exported weather state to: {}", path.display());
    Ok(())
}
