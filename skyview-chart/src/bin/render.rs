use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use skyview_chart::catalog::{CatalogLoader, DirectorySource};
use skyview_chart::plot::SvgCanvas;
use skyview_chart::profile::{DeviceProfile, DeviceTier};
use skyview_chart::session::{SessionConfig, SkyviewSession};
use skyview_chart::state::{FileStateStore, StateStore, ViewState};
use skyview_core::Location;
use skyview_time::FixedClock;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Tier {
    Low,
    Medium,
    High,
}

#[derive(Parser)]
#[command(name = "skyview-render")]
#[command(about = "Render a polar sky chart to SVG")]
struct Cli {
    /// Directory holding the catalog JSON files
    #[arg(long)]
    catalog: PathBuf,

    /// Observer latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Observer longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Instant to render, RFC 3339 (defaults to now)
    #[arg(long)]
    time: Option<String>,

    #[arg(long, default_value = "800")]
    width: u32,

    #[arg(long, default_value = "800")]
    height: u32,

    /// Zoom factor, 1..200
    #[arg(long, default_value = "1.0")]
    zoom: f64,

    /// Flip east and west, as seen through a diagonal
    #[arg(long)]
    mirror: bool,

    /// Red-on-black palette
    #[arg(long)]
    night: bool,

    /// Device tier for magnitude ceilings; omit for the conservative profile
    #[arg(long, value_enum)]
    tier: Option<Tier>,

    /// Saved view toggles to restore
    #[arg(long)]
    state: Option<PathBuf>,

    /// Output SVG path
    #[arg(long, short, default_value = "skyview.svg")]
    output: PathBuf,
}

fn parse_time(text: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match text {
        Some(t) => Ok(DateTime::parse_from_rfc3339(t)
            .with_context(|| format!("invalid --time {t:?}"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let at = parse_time(cli.time.as_deref())?;
    let location = Location::new(cli.lat, cli.lon).context("invalid observer location")?;

    let mut state = match &cli.state {
        Some(path) => FileStateStore::new(path).load(),
        None => ViewState::default(),
    };
    state.mirrored |= cli.mirror;
    state.toggles.night_mode |= cli.night;

    let profile = match cli.tier {
        Some(Tier::Low) => DeviceProfile::for_tier(DeviceTier::Low),
        Some(Tier::Medium) => DeviceProfile::for_tier(DeviceTier::Medium),
        Some(Tier::High) => DeviceProfile::for_tier(DeviceTier::High),
        None => DeviceProfile::conservative(),
    };

    let loader = CatalogLoader::new(Box::new(DirectorySource::corrected(&cli.catalog)))
        .with_fallback(Box::new(DirectorySource::plain(&cli.catalog)));
    let catalog = loader.load();

    let config = SessionConfig {
        location,
        width: f64::from(cli.width),
        height: f64::from(cli.height),
        profile,
        state,
    };
    let mut session = SkyviewSession::new(catalog, FixedClock::new(at), config);
    let extras = DirectorySource::plain(&cli.catalog);
    session.refresh_solar_system(&extras);
    session.refresh_calibration(&extras);
    session.set_zoom(cli.zoom);

    let mut canvas = SvgCanvas::to_file(&cli.output, cli.width, cli.height);
    let stats = session
        .redraw(&mut canvas)
        .context("redraw already in progress")?;
    canvas
        .finish()
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!(
        "{}: {} objects drawn, {} labels ({} unregistered), {} pickable",
        cli.output.display(),
        stats.culling.drawn,
        stats.labels.committed,
        stats.labels.unregistered,
        stats.hit_records,
    );
    Ok(())
}
