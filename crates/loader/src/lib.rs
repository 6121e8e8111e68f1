pub mod error;
pub mod postgres;
pub mod schema;
pub mod seeder;
pub mod strategy;

#[cfg(test)]
pub(crate) mod memory;

pub use error::SeedError;
pub use seeder::{SeedReport, Seeder};
pub use strategy::{BatchInsert, BulkLoad, Loader, Strategy};

use cell_seed_model::Cell;

/// An open connection to the destination of the cells.
///
/// Every call blocks until the database answers.
pub trait Store {
    /// Drops the cells table if present and creates it again empty.
    fn recreate_table(&mut self) -> anyhow::Result<()>;

    /// Imports headerless `column,row,value` CSV with the engine's bulk
    /// import and returns the number of imported rows.
    fn copy_csv(&mut self, source: &mut dyn std::io::Read) -> anyhow::Result<u64>;

    /// Inserts `cells` with a single multi-row statement.
    fn insert_batch(&mut self, cells: &[Cell]) -> anyhow::Result<u64>;

    fn row_count(&mut self) -> anyhow::Result<u64>;

    fn close(self) -> anyhow::Result<()>
    where
        Self: Sized;
}

/// Opens one [`Store`] per seeding run.
pub trait Connect {
    type Store: Store;

    fn connect(&self) -> anyhow::Result<Self::Store>;
}
