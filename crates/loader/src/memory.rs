//! In-memory store used by the loader tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use cell_seed_model::Cell;

use crate::{Connect, Store};

pub(crate) type SharedState = Rc<RefCell<MemoryState>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Failure {
    Connect,
    RecreateTable,
    Copy,
    /// Fails the flush with this zero-based index.
    Insert { flush: usize },
    RowCount,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    /// `None` until the table is created.
    table: Option<BTreeMap<(String, u32), String>>,
    failure: Option<Failure>,
    pub(crate) flushes: Vec<usize>,
    pub(crate) copies: usize,
    pub(crate) connections: usize,
    pub(crate) closed: usize,
}

impl MemoryState {
    pub(crate) fn shared() -> SharedState {
        Rc::new(RefCell::new(MemoryState::default()))
    }

    pub(crate) fn failing(failure: Failure) -> SharedState {
        let state = MemoryState {
            failure: Some(failure),
            ..Default::default()
        };
        Rc::new(RefCell::new(state))
    }

    pub(crate) fn store(state: &SharedState) -> MemoryStore {
        MemoryStore {
            state: state.clone(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.table.as_ref().map_or(0, BTreeMap::len)
    }

    pub(crate) fn value(&self, column: &str, row: u32) -> Option<&str> {
        let table = self.table.as_ref()?;
        table.get(&(column.to_owned(), row)).map(String::as_str)
    }

    pub(crate) fn rows(&self) -> BTreeMap<(String, u32), String> {
        self.table.clone().unwrap_or_default()
    }

    fn fails(&self, failure: Failure) -> anyhow::Result<()> {
        if self.failure == Some(failure) {
            anyhow::bail!("connection reset by peer");
        }
        Ok(())
    }

    /// Inserts all rows or none of them, like a single statement would.
    fn insert_all(&mut self, rows: Vec<(String, u32, String)>) -> anyhow::Result<u64> {
        let Some(table) = self.table.as_mut() else {
            anyhow::bail!("relation does not exist");
        };
        let mut keys = std::collections::HashSet::new();
        for (column, row, _) in &rows {
            let key = (column.clone(), *row);
            if table.contains_key(&key) || !keys.insert(key) {
                anyhow::bail!("duplicate key ({column}, {row})");
            }
        }
        let inserted = rows.len() as u64;
        for (column, row, value) in rows {
            table.insert((column, row), value);
        }
        Ok(inserted)
    }
}

pub(crate) struct MemoryStore {
    state: SharedState,
}

impl Store for MemoryStore {
    fn recreate_table(&mut self) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        state.fails(Failure::RecreateTable)?;
        state.table = Some(BTreeMap::new());
        Ok(())
    }

    fn copy_csv(&mut self, source: &mut dyn std::io::Read) -> anyhow::Result<u64> {
        let mut state = self.state.borrow_mut();
        state.fails(Failure::Copy)?;
        state.copies += 1;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(source);
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push((record[0].to_owned(), record[1].parse()?, record[2].to_owned()));
        }
        state.insert_all(rows)
    }

    fn insert_batch(&mut self, cells: &[Cell]) -> anyhow::Result<u64> {
        let mut state = self.state.borrow_mut();
        let flush = state.flushes.len();
        state.fails(Failure::Insert { flush })?;

        let rows = cells
            .iter()
            .map(|cell| (cell.column().to_owned(), cell.row(), cell.value().to_owned()))
            .collect();
        let inserted = state.insert_all(rows)?;
        state.flushes.push(cells.len());
        Ok(inserted)
    }

    fn row_count(&mut self) -> anyhow::Result<u64> {
        let state = self.state.borrow();
        state.fails(Failure::RowCount)?;
        Ok(state.len() as u64)
    }

    fn close(self) -> anyhow::Result<()> {
        self.state.borrow_mut().closed += 1;
        Ok(())
    }
}

pub(crate) struct MemoryConnector {
    state: SharedState,
}

impl MemoryConnector {
    pub(crate) fn new(state: &SharedState) -> Self {
        MemoryConnector {
            state: state.clone(),
        }
    }
}

impl Connect for MemoryConnector {
    type Store = MemoryStore;

    fn connect(&self) -> anyhow::Result<MemoryStore> {
        let mut state = self.state.borrow_mut();
        state.fails(Failure::Connect)?;
        state.connections += 1;
        Ok(MemoryState::store(&self.state))
    }
}
