mod config;

use std::time::Instant;

use anyhow::Result;
use config::get_config;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cell_seed_loader::{Seeder, Strategy, postgres::PgConnector};

fn setup_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.parse()?)
        .from_env_lossy();

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = get_config()?;
    setup_tracing(&config.logging.level)?;
    tracing::debug!(?config, "Full application configuration");

    let started = Instant::now();

    let connector = PgConnector::new(config.database.clone());
    let strategy = Strategy::from_config(&config.loader)?;
    tracing::info!(
        strategy = ?config.loader.strategy,
        rows = config.generation.row_count,
        columns = config.generation.column_count,
        "Seeding {} cells",
        config.generation.cells()
    );

    let seeder = Seeder::new(connector, strategy, config.generation).verify(config.loader.verify);
    let succeeded = seeder.seed();

    tracing::info!(
        "Data generation and insertion completed in {:.3} seconds",
        started.elapsed().as_secs_f64()
    );

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
