use anyhow::Context;

use crate::cell::Cell;

/// Cells staged in a temporary CSV file for a bulk import.
///
/// The file is removed when the value is dropped, so a failed import
/// never leaves it behind.
#[derive(Debug)]
pub struct CellFile {
    file: tempfile::NamedTempFile,
    records: u64,
}

impl CellFile {
    const PREFIX: &str = "cell_data";
    const SUFFIX: &str = ".csv";

    /// Stages `cells` in the system temporary directory.
    pub fn stage(cells: impl IntoIterator<Item = Cell>) -> anyhow::Result<Self> {
        Self::stage_in(&std::env::temp_dir(), cells)
    }

    pub fn stage_in(
        dir: &std::path::Path,
        cells: impl IntoIterator<Item = Cell>,
    ) -> anyhow::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(Self::PREFIX)
            .suffix(Self::SUFFIX)
            .tempfile_in(dir)
            .with_context(|| format!("cannot create temporary file in {}", dir.display()))?;
        let records = crate::write_cells(file.as_file_mut(), cells)
            .with_context(|| format!("cannot write cells to {}", file.path().display()))?;
        Ok(CellFile { file, records })
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Number of cells written to the file.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Opens a new read handle positioned at the start of the file.
    pub fn reopen(&self) -> anyhow::Result<std::fs::File> {
        let file = self
            .file
            .reopen()
            .with_context(|| format!("cannot reopen {}", self.path().display()))?;
        Ok(file)
    }

    /// Removes the file, reporting a failed removal instead of ignoring it.
    pub fn close(self) -> anyhow::Result<()> {
        let path = self.path().to_path_buf();
        self.file
            .close()
            .with_context(|| format!("cannot remove {}", path.display()))
    }
}
