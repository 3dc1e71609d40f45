use anyhow::{bail, Context};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use urania::ephemeris::{EphemerisProvider, FixedEphemeris};
use urania::{BirthInput, ChartCalculator, ChartConfig, StaticGazetteer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart and print it as JSON")]
struct Args {
    /// Birth record JSON: {"name", "date": "YYYY-MM-DD", "time": "HH:MM", "location", "time_known"}.
    /// `time_known` defaults to whether `time` is present.
    #[arg(long)]
    birth: PathBuf,

    /// Recorded ephemeris snapshot (JSON). Required unless built with `swisseph`.
    #[arg(long)]
    ephemeris: Option<PathBuf>,

    /// Chart configuration TOML (default: configs/urania.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding Swiss Ephemeris data files.
    #[cfg(feature = "swisseph")]
    #[arg(long)]
    ephe_path: Option<PathBuf>,

    /// Pretty-print the chart.
    #[arg(long)]
    pretty: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ChartConfig> {
    if let Some(path) = path {
        return ChartConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    match ChartConfig::discover().context("loading discovered config")? {
        Some((path, config)) => {
            log::debug!("Using config {}", path.display());
            Ok(config)
        }
        None => {
            log::info!("No config file found; using defaults");
            Ok(ChartConfig::default())
        }
    }
}

fn ephemeris_provider(args: &Args) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    if let Some(path) = &args.ephemeris {
        let snapshot = FixedEphemeris::load(path)
            .with_context(|| format!("loading ephemeris snapshot {}", path.display()))?;
        return Ok(Box::new(snapshot));
    }
    live_provider(args)
}

#[cfg(feature = "swisseph")]
fn live_provider(args: &Args) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    let adapter = urania::SwissEphemerisAdapter::new(args.ephe_path.clone())
        .context("initialising Swiss Ephemeris")?;
    log::info!("Using Swiss Ephemeris files at {}", adapter.ephemeris_path().display());
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swisseph"))]
fn live_provider(_args: &Args) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    bail!("--ephemeris is required (build with the `swisseph` feature for live positions)")
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let calculator = ChartCalculator::new(config).context("invalid chart config")?;

    let text = fs::read_to_string(&args.birth)
        .with_context(|| format!("reading birth record {}", args.birth.display()))?;
    let input: BirthInput = serde_json::from_str(&text)
        .with_context(|| format!("parsing birth record {}", args.birth.display()))?;

    let provider = ephemeris_provider(&args)?;
    let chart = calculator
        .compute_input(&input, provider.as_ref(), &StaticGazetteer)
        .context("computing chart")?;

    let json = if args.pretty {
        chart.to_json_pretty()?
    } else {
        chart.to_json()?
    };
    println!("{}", json);
    Ok(())
}
