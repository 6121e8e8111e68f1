use clap::Parser;
use project_root::get_project_root;

use cell_seed_config::{Config, StrategyKind};

const SETTINGS_FILE: &str = "config/settings.toml";

/// Seeds the cells table with a generated spreadsheet.
///
/// Every flag overrides the settings file and `CELL_SEED_*` variables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file, `config/settings.toml` of the project by default
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
    #[arg(short, long)]
    pub rows: Option<u32>,
    #[arg(short = 'C', long)]
    pub columns: Option<u32>,
    /// `bulk-load` or `batch-insert`
    #[arg(short, long)]
    pub strategy: Option<StrategyKind>,
    #[arg(short, long)]
    pub batch_size: Option<usize>,
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// Loads the configuration from the settings file and the environment and
/// merges the CLI arguments on top.
pub fn get_config() -> anyhow::Result<Config> {
    config_from(Cli::parse())
}

fn config_from(cli: Cli) -> anyhow::Result<Config> {
    let config_path = match cli.config {
        Some(path) => path,
        None => get_project_root()?.join(SETTINGS_FILE),
    };
    let mut figment = Config::figment(&config_path);

    if let Some(rows) = cli.rows {
        figment = figment.merge(("generation.row_count", rows));
    }
    if let Some(columns) = cli.columns {
        figment = figment.merge(("generation.column_count", columns));
    }
    if let Some(strategy) = cli.strategy {
        figment = figment.merge(("loader.strategy", strategy));
    }
    if let Some(batch_size) = cli.batch_size {
        figment = figment.merge(("loader.batch_size", batch_size));
    }
    if let Some(level) = cli.log_level {
        figment = figment.merge(("logging.level", level));
    }

    Config::from_figment(&figment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("cell-seeder").chain(args.iter().copied()))
    }

    #[test]
    fn flags_override_settings_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let settings = dir.path().join("settings.toml");
        std::fs::write(&settings, "[generation]\nrow_count = 5\ncolumn_count = 6\n")?;
        let settings = settings.to_string_lossy().into_owned();

        let config = config_from(parse(&["--config", &settings]))?;
        assert_eq!(config.generation.row_count, 5);
        assert_eq!(config.generation.column_count, 6);
        assert_eq!(config.loader.strategy, StrategyKind::BulkLoad);

        let cli = parse(&[
            "--config",
            &settings,
            "--rows",
            "7",
            "--strategy",
            "batch-insert",
            "--batch-size",
            "99",
            "--log-level",
            "debug",
        ]);
        let config = config_from(cli)?;
        assert_eq!(config.generation.row_count, 7);
        assert_eq!(config.generation.column_count, 6);
        assert_eq!(config.loader.strategy, StrategyKind::BatchInsert);
        assert_eq!(config.loader.batch_size, 99);
        assert_eq!(config.logging.level, "debug");
        Ok(())
    }

    #[test]
    fn invalid_override_is_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let settings = dir.path().join("missing.toml");
        let settings = settings.to_string_lossy().into_owned();

        assert!(config_from(parse(&["--config", &settings, "--batch-size", "0"])).is_err());
        Ok(())
    }

    #[test]
    fn unknown_strategy_fails_to_parse() {
        let args = ["cell-seeder", "--strategy", "copy"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
