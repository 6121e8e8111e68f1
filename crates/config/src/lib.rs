use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

/// Prefix of environment overrides, e.g. `CELL_SEED_DATABASE__HOST`.
pub const ENV_PREFIX: &str = "CELL_SEED_";

/// Database settings are read verbatim, `007` stays a string.
const DATABASE_ENV_PREFIX: &str = "CELL_SEED_DATABASE__";

/// Width of the `column` key in the cells table.
pub const MAX_COLUMN_LETTERS: u32 = 5;

/// Postgres accepts at most 65535 bind parameters per statement and every
/// inserted cell binds three of them.
pub const MAX_BATCH_SIZE: usize = u16::MAX as usize / 3;

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub loader: LoaderConfig,
}

impl Config {
    /// Layers built-in defaults, the TOML file at `config_file` (skipped
    /// when missing) and `CELL_SEED_*` environment variables.
    pub fn figment(config_file: &std::path::Path) -> Figment {
        let typed_env = Env::prefixed(ENV_PREFIX)
            .filter(|key| !key.as_str().to_ascii_lowercase().starts_with("database__"))
            .split("__");
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(typed_env);
        for (key, value) in Env::prefixed(DATABASE_ENV_PREFIX).iter() {
            let key = format!("database.{}", key.as_str().to_ascii_lowercase());
            figment = figment.merge((key, value));
        }
        figment
    }

    pub fn from_figment(figment: &Figment) -> anyhow::Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let GenerationConfig {
            row_count,
            column_count,
        } = self.generation;
        if row_count == 0 {
            anyhow::bail!("generation.row_count must be positive");
        }
        if column_count == 0 {
            anyhow::bail!("generation.column_count must be positive");
        }
        let max_column = cell_seed_model::letters::max_column(MAX_COLUMN_LETTERS);
        if u64::from(column_count) > max_column {
            anyhow::bail!(
                "generation.column_count {column_count} exceeds {max_column}, \
                 the last column with at most {MAX_COLUMN_LETTERS} letters"
            );
        }
        let batch_size = self.loader.batch_size;
        if !(1..=MAX_BATCH_SIZE).contains(&batch_size) {
            anyhow::bail!("loader.batch_size must be within 1..={MAX_BATCH_SIZE}, got {batch_size}");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_owned(),
        }
    }
}

/// Connection settings of the destination database.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            host: "localhost".to_owned(),
            name: "cells_db".to_owned(),
            user: "test_user".to_owned(),
            password: "test_password".to_owned(),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Bounds of the generated sheet.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GenerationConfig {
    pub row_count: u32,
    pub column_count: u32,
}

impl GenerationConfig {
    pub fn cells(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.column_count)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            row_count: 1000,
            column_count: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoaderConfig {
    pub strategy: StrategyKind,
    /// Cells per INSERT statement of the batch-insert strategy.
    pub batch_size: usize,
    /// Count the table rows after loading.
    pub verify: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            strategy: StrategyKind::BulkLoad,
            batch_size: 10_000,
            verify: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Stage a CSV file and import it with one bulk operation.
    BulkLoad,
    /// Send multi-row INSERT statements of `batch_size` cells.
    BatchInsert,
}

impl std::str::FromStr for StrategyKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bulk-load" => Ok(Self::BulkLoad),
            "batch-insert" => Ok(Self::BatchInsert),
            _ => Err("unknown strategy, expected `bulk-load` or `batch-insert`"),
        }
    }
}
