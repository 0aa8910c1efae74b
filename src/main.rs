use anyhow::Context;
use clap::Parser;
use ids_sim::app::{Command, Controller, Outcome};
use ids_sim::config::settings::{self, DEFAULT_CONFIG_PATH};
use ids_sim::events::Alert;
use ids_sim::monitoring::CaptureUpdate;
use ids_sim::simulation::Scenario;
use simplelog::*;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::Duration;

// Global shutdown flag with atomic ordering
static RUNNING: AtomicBool = AtomicBool::new(true);
static SHUTDOWN_ONCE: Once = Once::new();

#[derive(Parser)]
#[command(name = "ids-sim")]
#[command(about = "Simulated network intrusion detection dashboard", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Traffic scenario (mixed, dos, scan)
    #[arg(short, long)]
    scenario: Option<Scenario>,

    /// Seed for a reproducible packet feed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the capture tick interval
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Begin capturing immediately
    #[arg(long)]
    autostart: bool,

    /// Save the effective settings to the config path and exit
    #[arg(long)]
    write_config: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level: LevelFilter = cli
        .log_level
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid log level '{}'", cli.log_level))?;

    CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .context("failed to initialize logging")?;

    log::info!("=========================================");
    log::info!("       IDS Simulator Starting");
    log::info!("=========================================");

    let mut settings = settings::load_settings(&cli.config);
    if let Some(scenario) = cli.scenario {
        settings.default_scenario = scenario;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if let Some(interval_ms) = cli.interval_ms {
        settings.tick_interval_ms = interval_ms;
    }

    if cli.write_config {
        settings::save_settings(&settings, &cli.config)
            .with_context(|| format!("failed to write {}", cli.config.display()))?;
        log::info!("Configuration written to {}", cli.config.display());
        return Ok(());
    }

    let mut controller = Controller::new(&settings);
    let updates = controller.updates();

    ctrlc::set_handler(|| {
        SHUTDOWN_ONCE.call_once(|| {
            log::info!("");
            log::info!("🛑 Received shutdown signal");
            RUNNING.store(false, Ordering::Relaxed);
        });
    })
    .context("failed to set Ctrl+C handler")?;

    log::info!("=========================================");
    log::info!("       IDS Simulator Running");
    log::info!("=========================================");
    log::info!(
        "📊 Scenario: {} | Tick: {} ms | Window: {} packets",
        settings.default_scenario.description(),
        settings.tick_interval_ms,
        settings.history_capacity
    );
    log::info!("🛑 To stop: press Ctrl+C or type 'q' then Enter");
    log::info!("=========================================");

    println!("{}", controller.render_current());
    if cli.autostart {
        dispatch(&mut controller, Command::Start);
    }

    let lines = spawn_stdin_reader();
    while RUNNING.load(Ordering::Relaxed) {
        crossbeam_channel::select! {
            recv(updates) -> update => {
                if let Ok(update) = update {
                    on_update(&controller, &update);
                }
            }
            recv(lines) -> line => {
                let Ok(line) = line else {
                    log::info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if !dispatch(&mut controller, command) {
                            SHUTDOWN_ONCE.call_once(|| {
                                log::info!(
                                    "🛑 Manual shutdown requested via command: '{}'",
                                    line.trim()
                                );
                                RUNNING.store(false, Ordering::Relaxed);
                            });
                        }
                    }
                    Err(e) => {
                        log::info!("❓ {}", e);
                        log::info!("   Type 'help' for available commands");
                    }
                }
            }
            default(Duration::from_millis(100)) => {}
        }
    }

    perform_shutdown(&mut controller);
    Ok(())
}

/// Runs one command against the controller. Returns `false` on quit.
fn dispatch(controller: &mut Controller, command: Command) -> bool {
    match controller.handle(command) {
        Ok(Outcome::Render(view)) => println!("{}", view),
        Ok(Outcome::Message(message)) => println!("{}", message.trim_end()),
        Ok(Outcome::Quit) => return false,
        Err(e) => log::error!("{}", e),
    }
    true
}

/// Logs the tick and prints the current page's incremental view.
fn on_update(controller: &Controller, update: &CaptureUpdate) {
    if let Some(alert) = Alert::from_event(&update.event) {
        log::warn!("🚨 ALERT: {}", alert);
    } else {
        log::debug!("{}", update.event);
    }
    if let Some(line) = controller.refresh(update) {
        println!("{}", line);
    }
}

fn spawn_stdin_reader() -> crossbeam_channel::Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

fn perform_shutdown(controller: &mut Controller) {
    log::info!("");
    log::info!("=========================================");
    log::info!("       Initiating Graceful Shutdown");
    log::info!("=========================================");

    match controller.shutdown() {
        Ok(pending) => {
            for update in &pending {
                on_update(controller, update);
            }
            log::info!("  ✅ Capture task stopped ({} pending updates flushed)", pending.len());
        }
        Err(e) => log::error!("  ❌ Capture task failed during shutdown: {}", e),
    }

    let session = controller.session();
    let stats = session.lock().stats();
    log::info!(
        "📊 Session totals: {} packets, {} alerts ({:.1}% normal)",
        stats.total_events,
        stats.total_alerts,
        stats.percent_normal()
    );
    log::info!("=========================================");
    log::info!("       Shutdown Complete");
    log::info!("=========================================");
}
