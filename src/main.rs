use log::{LevelFilter, Log, Metadata, Record};
use miette::{miette, IntoDiagnostic, Result};
use weather_summary::{generate_daily_summary, generate_summary, load_data_from_csv};

/// Writes `[LEVEL] message` lines to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> Result<()> {
    let level = std::env::var("WEATHER_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn);
    log::set_logger(&LOGGER).into_diagnostic()?;
    log::set_max_level(level);

    let file = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("Missing filename"))?;
    log::info!("opening {file}");

    let records = load_data_from_csv(&file)?;
    println!("{}", generate_summary(&records)?);
    print!("{}", generate_daily_summary(&records)?);

    Ok(())
}
