pub mod batch_insert;
pub mod bulk_load;

pub use batch_insert::BatchInsert;
pub use bulk_load::BulkLoad;

use cell_seed_config::{LoaderConfig, StrategyKind};
use cell_seed_model::Cell;

use crate::{SeedError, Store};

/// A way of replacing the cells table content with a sequence of cells.
pub trait Loader {
    /// Returns the number of rows written.
    fn load<S: Store>(
        &self,
        store: &mut S,
        cells: impl IntoIterator<Item = Cell>,
    ) -> Result<u64, SeedError>;
}

#[derive(Debug, Clone)]
pub enum Strategy {
    BulkLoad(BulkLoad),
    BatchInsert(BatchInsert),
}

impl Strategy {
    pub fn from_config(config: &LoaderConfig) -> anyhow::Result<Self> {
        let strategy = match config.strategy {
            StrategyKind::BulkLoad => Strategy::BulkLoad(BulkLoad::default()),
            StrategyKind::BatchInsert => Strategy::BatchInsert(BatchInsert::new(config.batch_size)?),
        };
        Ok(strategy)
    }
}

impl Loader for Strategy {
    fn load<S: Store>(
        &self,
        store: &mut S,
        cells: impl IntoIterator<Item = Cell>,
    ) -> Result<u64, SeedError> {
        match self {
            Strategy::BulkLoad(loader) => loader.load(store, cells),
            Strategy::BatchInsert(loader) => loader.load(store, cells),
        }
    }
}
