use std::num::NonZeroU32;

use crate::cell::Cell;
use crate::letters::column_letters;

/// Lazily yields every cell of a `row_count` x `column_count` sheet in
/// row-major order: all columns of row 1, then row 2, and so on.
///
/// The generator only depends on its bounds, so a clone taken before
/// iteration replays the same sequence.
#[derive(Debug, Clone)]
pub struct CellGenerator {
    row_count: u32,
    column_count: u32,
    // Wider than the bounds so stepping past `u32::MAX` rows ends the sheet.
    row: u64,
    column: u32,
    // Letters of the current column are reused by every row.
    letters: Vec<String>,
}

impl CellGenerator {
    pub fn new(row_count: u32, column_count: u32) -> Self {
        CellGenerator {
            row_count,
            column_count,
            row: 1,
            column: 1,
            letters: Vec::new(),
        }
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    /// Number of cells in the whole sheet.
    pub fn total(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.column_count)
    }

    fn remaining(&self) -> u64 {
        let row_count = u64::from(self.row_count);
        if self.row > row_count || self.column_count == 0 {
            return 0;
        }
        let full_rows = (row_count - self.row) * u64::from(self.column_count);
        full_rows + u64::from(self.column_count - self.column + 1)
    }

    fn letters_of(&mut self, column: NonZeroU32) -> String {
        let index = column.get() as usize - 1;
        if let Some(letters) = self.letters.get(index) {
            return letters.clone();
        }
        let letters = column_letters(column);
        // Columns are visited in order during the first row.
        if self.letters.len() == index {
            self.letters.push(letters.clone());
        }
        letters
    }
}

impl Iterator for CellGenerator {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.column_count == 0 || self.row > u64::from(self.row_count) {
            return None;
        }
        let row = u32::try_from(self.row).ok().and_then(NonZeroU32::new)?;
        let column = NonZeroU32::new(self.column)?;
        let letters = self.letters_of(column);

        if self.column == self.column_count {
            self.column = 1;
            self.row += 1;
        } else {
            self.column += 1;
        }

        Some(Cell::with_letters(letters, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
