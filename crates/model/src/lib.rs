pub mod cell;
pub mod generator;
pub mod letters;
pub mod temp;

pub use cell::Cell;
pub use generator::CellGenerator;
pub use letters::LettersError;
pub use temp::CellFile;

/// Writes `cells` as headerless CSV records `column,row,value` and returns
/// how many were written.
pub fn write_cells<W>(writer: W, cells: impl IntoIterator<Item = Cell>) -> anyhow::Result<u64>
where
    W: std::io::Write,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    let mut records = 0;
    for cell in cells {
        cell.serialize_csv(&mut csv_writer)?;
        records += 1;
    }
    csv_writer.flush()?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_cells_read_back() -> anyhow::Result<()> {
        let mut bytes = Vec::new();
        let written = write_cells(&mut bytes, CellGenerator::new(3, 28))?;
        assert_eq!(written, 84);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes.as_slice());
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(records.len(), 84);
        assert_eq!(&records[27][0], "AB");
        assert_eq!(&records[27][1], "1");
        assert_eq!(&records[27][2], "$AB$1");
        assert_eq!(&records[83][2], "$AB$3");
        Ok(())
    }
}
