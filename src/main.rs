use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use quakemap::{FeatureSet, MapSession, ProximityHitTest, Settings};

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_scene(path: &Path) -> Result<FeatureSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse scene file {}", path.display()))
}

fn print_breakdown(session: &MapSession) {
    let breakdown = session.breakdown();
    println!("\n🌍 Earthquakes by country:");
    for (country, count) in &breakdown.by_country {
        println!("   {}: {}", country, count);
    }
    println!("   OCEAN QUAKES: {}", breakdown.ocean);
}

fn print_top_quakes(session: &MapSession, limit: usize) {
    let top = session.top_quakes(limit);
    println!("\n📈 Top {} earthquakes by magnitude ({} available):", limit, top.len());
    for (rank, quake) in top.iter().enumerate() {
        println!("   {:>2}. M{:.1}  {}", rank + 1, quake.magnitude(), quake.title());
    }
}

fn main() -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    init_logging(&settings);

    let scene_path = std::env::args()
        .nth(1)
        .or_else(|| settings.scene_file.clone())
        .map(PathBuf::from)
        .context("No scene file given: pass a path or set scene_file in quakemap.ini")?;

    info!(scene = %scene_path.display(), "loading scene");
    let features = read_scene(&scene_path)?;
    let (mut session, report) = MapSession::load(&features);

    println!(
        "🗺️  QuakeMap: {} quakes ({} land, {} ocean), {} cities, {} countries",
        report.quakes, report.land_quakes, report.ocean_quakes, report.cities, report.countries
    );
    if report.skipped > 0 {
        println!("   ⚠️  {} malformed features skipped", report.skipped);
    }

    print_breakdown(&session);
    print_top_quakes(&session, settings.top_quakes);

    let hit_test = ProximityHitTest {
        tolerance_km: settings.hit_radius_km,
    };
    for event in &features.events {
        let hit = session.apply(*event, &hit_test);
        debug!(?event, ?hit, "event applied");
    }

    let frame = session.frame();
    let encoded = serde_json::to_string_pretty(&frame).context("Failed to encode frame")?;
    println!("\n{}", encoded);

    Ok(())
}
