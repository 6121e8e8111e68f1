use std::time::{Duration, Instant};

use cell_seed_config::GenerationConfig;
use cell_seed_model::CellGenerator;

use crate::{Connect, Loader, SeedError, Store, Strategy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedReport {
    /// Rows written by the strategy.
    pub rows: u64,
    pub elapsed: Duration,
}

/// Generates a sheet of cells and replaces the cells table with it through
/// the configured strategy, over a single connection.
pub struct Seeder<C> {
    connector: C,
    strategy: Strategy,
    generation: GenerationConfig,
    verify: bool,
}

impl<C: Connect> Seeder<C> {
    pub fn new(connector: C, strategy: Strategy, generation: GenerationConfig) -> Self {
        Seeder {
            connector,
            strategy,
            generation,
            verify: true,
        }
    }

    /// Whether to count the table rows once the strategy is done.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn run(&self) -> Result<SeedReport, SeedError> {
        let started = Instant::now();

        tracing::info!("Connecting to the database...");
        let mut store = self
            .connector
            .connect()
            .map_err(SeedError::ConnectionFailed)?;

        let filled = self.fill(&mut store);

        if let Err(err) = store.close() {
            tracing::warn!("Cannot close the database connection: {err:#}");
        }

        let rows = filled?;
        Ok(SeedReport {
            rows,
            elapsed: started.elapsed(),
        })
    }

    /// Runs the seeding and reports the outcome in the log instead of
    /// returning the error.
    pub fn seed(&self) -> bool {
        match self.run() {
            Ok(report) => {
                tracing::debug!(rows = report.rows, "Seeding succeeded");
                true
            }
            Err(err) => {
                let err = anyhow::Error::new(err);
                tracing::error!("Error: {err:#}");
                false
            }
        }
    }

    fn fill<S: Store>(&self, store: &mut S) -> Result<u64, SeedError> {
        let GenerationConfig {
            row_count,
            column_count,
        } = self.generation;
        let cells = CellGenerator::new(row_count, column_count);
        let expected = cells.total();

        let rows = self.strategy.load(store, cells)?;

        if self.verify {
            let stored = store.row_count().map_err(SeedError::LoadFailed)?;
            if stored != expected {
                let err = anyhow::anyhow!("table holds {stored} rows, expected {expected}");
                return Err(SeedError::LoadFailed(err));
            }
            tracing::debug!(stored, "Row count verified");
        }
        Ok(rows)
    }
}
