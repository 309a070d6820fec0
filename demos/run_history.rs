//! Generate a world, run its history, and print what happened.
//!
//! Usage: `cargo run --example run_history -- [seed] [years]`
//! Set `RUST_LOG=civgen=debug` to see generation summaries.

use civgen::model::EventCategory;
use civgen::sim::trade::trade_routes;
use civgen::{Session, SessionConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);
    let years: u32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(50);

    let mut session = Session::new(SessionConfig::seeded(seed))?;
    println!(
        "World {} ({}x{}), {:.0}% land, {} resources",
        session.world().seed,
        session.world().width,
        session.world().height,
        session.world().land_ratio() * 100.0,
        session.resources().len()
    );

    session.advance(years);

    println!("\nAfter {} years:", session.current_year());
    for civ in session.civilizations() {
        println!(
            "  {:<16} {:>8} people  {} cities  tech {:>2}  army {:>2}  {} wars  {} tiles  ruled by {} ({})",
            civ.name,
            civ.population,
            civ.cities.len(),
            civ.technology_level,
            civ.military_strength,
            civ.wars.len(),
            session.world().owned_tile_count(civ.id),
            civ.ruler,
            civ.government,
        );
    }

    println!("\nEvents by category:");
    for category in EventCategory::ALL {
        let count = session
            .log()
            .iter()
            .filter(|e| e.category() == *category)
            .count();
        println!("  {:<14} {count}", category.as_str());
    }

    if let Some(largest) = session.civilizations().iter().max_by_key(|c| c.population) {
        let routes = trade_routes(session.civilizations(), Some(largest.id));
        println!("\n{} has {} trade routes. Its recent history:", largest.name, routes.len());
        for event in session.events_for(largest.id).into_iter().take(8) {
            println!("  {} {:<6} {}", event.year, event.season.as_str(), event.description);
        }
    }

    if let Some(last) = session.log().as_slice().last() {
        println!("\nLatest event as JSON: {}", serde_json::to_string(last)?);
    }
    Ok(())
}
