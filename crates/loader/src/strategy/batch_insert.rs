use std::num::NonZeroUsize;

use cell_seed_model::Cell;

use crate::{Loader, SeedError, Store};

/// Buffers cells in memory and flushes them as multi-row INSERT statements
/// of `batch_size` cells each.
///
/// There is no transaction around the run: batches flushed before a failure
/// stay in the table.
#[derive(Debug, Clone)]
pub struct BatchInsert {
    batch_size: NonZeroUsize,
}

impl Default for BatchInsert {
    fn default() -> Self {
        BatchInsert {
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }
}

impl BatchInsert {
    pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10_000).unwrap();

    pub fn new(batch_size: usize) -> anyhow::Result<Self> {
        let Some(batch_size) = NonZeroUsize::new(batch_size) else {
            anyhow::bail!("batch size must be positive");
        };
        Ok(BatchInsert { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    fn flush<S: Store>(store: &mut S, batch: &mut Vec<Cell>) -> Result<u64, SeedError> {
        let inserted = store.insert_batch(batch).map_err(SeedError::LoadFailed)?;
        batch.clear();
        Ok(inserted)
    }
}

impl Loader for BatchInsert {
    fn load<S: Store>(
        &self,
        store: &mut S,
        cells: impl IntoIterator<Item = Cell>,
    ) -> Result<u64, SeedError> {
        store
            .recreate_table()
            .map_err(SeedError::SchemaSetupFailed)?;

        tracing::info!("Generating data and inserting in batches of {}...", self.batch_size);
        let mut batch = Vec::with_capacity(self.batch_size.get());
        let mut inserted = 0;
        for cell in cells {
            batch.push(cell);
            if batch.len() == self.batch_size.get() {
                inserted += Self::flush(store, &mut batch)?;
                tracing::info!("Inserted {inserted} records so far");
            }
        }
        if !batch.is_empty() {
            inserted += Self::flush(store, &mut batch)?;
            tracing::info!("Inserted {inserted} records so far");
        }
        Ok(inserted)
    }
}
