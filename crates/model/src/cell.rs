use std::num::NonZeroU32;

use crate::letters;

/// One generated spreadsheet cell.
///
/// `(column, row)` is the natural key of the cells table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    column: String,
    row: u32,
    value: String,
}

impl Cell {
    pub fn new(column: NonZeroU32, row: NonZeroU32) -> Self {
        let column = letters::column_letters(column);
        Self::with_letters(column, row)
    }

    pub(crate) fn with_letters(column: String, row: NonZeroU32) -> Self {
        let value = format!("${column}${row}");
        Cell {
            column,
            row: row.get(),
            value,
        }
    }

    /// Column letters, e.g. `AB`
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// Absolute cell reference, e.g. `$AB$12`
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn serialize_csv<W>(&self, writer: &mut csv::Writer<W>) -> anyhow::Result<()>
    where
        W: std::io::Write,
    {
        writer.write_field(self.column.as_bytes())?;
        writer.write_field(self.row.to_string())?;
        writer.write_field(self.value.as_bytes())?;
        writer.write_record(None::<&[u8]>)?;
        Ok(())
    }
}
