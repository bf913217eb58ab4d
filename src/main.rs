use aicodex::companion::Companion;
use aicodex::hotkey::parse_hotkey;
use aicodex::logging;
use aicodex::settings::{Settings, DEFAULT_SETTINGS_FILE};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// AicodeX - Companion Overlay Code Engine
///
/// Reads one key combination per line from stdin (e.g. `ctrl+shift+o`) and
/// dispatches it to the configured hotkeys.
#[derive(Parser, Debug)]
#[command(name = "aicodex", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (settings, load_error) = Settings::load_or_default(&args.config);
    logging::init(
        args.debug || settings.debug_logging,
        settings.log_file.as_ref().map(PathBuf::from),
    );

    tracing::info!("AicodeX {} starting...", aicodex::VERSION);
    match load_error {
        Some(e) => tracing::warn!(
            "Error loading configuration {}: {e}; using default settings",
            args.config.display()
        ),
        None => tracing::info!("Configuration loaded from: {}", args.config.display()),
    }
    tracing::debug!("Debug mode: {}", args.debug);

    let mut companion = Companion::new(settings);
    let registered = companion.start();
    tracing::info!("{registered} hotkeys registered");

    let stdin = std::io::stdin();
    let mut out = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match parse_hotkey(input) {
            Ok(combo) => {
                let triggered = companion.handle_combo(&combo);
                writeln!(out, "{combo}: {}", if triggered { "triggered" } else { "no action" })?;
            }
            Err(e) => writeln!(out, "{input}: {e}")?,
        }
        out.flush()?;
    }

    companion.stop();
    tracing::info!("AicodeX stopped.");
    Ok(())
}
