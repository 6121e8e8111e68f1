use cell_seed_model::{Cell, CellFile};

use crate::{Loader, SeedError, Store};

/// Stages every cell in a temporary CSV file, then imports the file with
/// the store's bulk import in one operation.
#[derive(Debug, Clone)]
pub struct BulkLoad {
    temp_dir: std::path::PathBuf,
}

impl Default for BulkLoad {
    fn default() -> Self {
        Self::with_temp_dir(std::env::temp_dir())
    }
}

impl BulkLoad {
    pub fn with_temp_dir(temp_dir: impl Into<std::path::PathBuf>) -> Self {
        BulkLoad {
            temp_dir: temp_dir.into(),
        }
    }

    fn import<S: Store>(store: &mut S, staged: &CellFile) -> Result<u64, SeedError> {
        store
            .recreate_table()
            .map_err(SeedError::SchemaSetupFailed)?;

        let mut file = staged.reopen().map_err(SeedError::FilesystemFailed)?;
        tracing::info!("Loading data into the database...");
        let imported = store.copy_csv(&mut file).map_err(SeedError::LoadFailed)?;

        let staged_records = staged.records();
        if imported != staged_records {
            let err = anyhow::anyhow!("imported {imported} of {staged_records} staged cells");
            return Err(SeedError::LoadFailed(err));
        }
        Ok(imported)
    }
}

impl Loader for BulkLoad {
    fn load<S: Store>(
        &self,
        store: &mut S,
        cells: impl IntoIterator<Item = Cell>,
    ) -> Result<u64, SeedError> {
        tracing::info!("Generating data and writing to CSV file...");
        let staged =
            CellFile::stage_in(&self.temp_dir, cells).map_err(SeedError::FilesystemFailed)?;
        tracing::debug!(
            path = %staged.path().display(),
            records = staged.records(),
            "Cells staged"
        );

        let imported = Self::import(store, &staged);

        if let Err(err) = staged.close() {
            tracing::warn!("Temporary file left behind: {err:#}");
        }
        imported
    }
}
