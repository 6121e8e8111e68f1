//! SQL of the cells table.

use cell_seed_config::MAX_COLUMN_LETTERS;

pub const TABLE: &str = "spreadsheet_cells";

pub const DROP_TABLE: &str = const_format::formatc!("DROP TABLE IF EXISTS {TABLE}");

// Postgres has no unsigned integers, the check keeps rows positive.
pub const CREATE_TABLE: &str = const_format::formatc!(
    "CREATE TABLE {TABLE} (
        \"column\" VARCHAR({MAX_COLUMN_LETTERS}) NOT NULL,
        \"row\" BIGINT NOT NULL CHECK (\"row\" > 0),
        \"value\" VARCHAR(255) NULL,
        PRIMARY KEY (\"column\", \"row\")
    )"
);

pub const COPY_CELLS: &str = const_format::formatc!(
    "COPY {TABLE} (\"column\", \"row\", \"value\") FROM STDIN WITH (FORMAT csv)"
);

/// Completed with `VALUES` tuples by the query builder.
pub const INSERT_CELLS: &str =
    const_format::formatc!("INSERT INTO {TABLE} (\"column\", \"row\", \"value\") ");

pub const COUNT_CELLS: &str = const_format::formatc!("SELECT COUNT(*) FROM {TABLE}");
