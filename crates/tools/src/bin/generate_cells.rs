use clap::Parser;

/// Writes the cells of a generated sheet as `column,row,value` CSV, ready
/// for a manual `COPY`.
fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    if let Some(parent) = config.out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&config.out_path)?;
    let cells = cell_seed_model::CellGenerator::new(config.rows, config.columns);
    let written = cell_seed_model::write_cells(std::io::BufWriter::new(file), cells)?;
    println!("{written} cells written to {}", config.out_path.display());
    Ok(())
}

#[derive(Clone, Debug, Parser)]
#[command()]
struct Config {
    #[arg()]
    out_path: std::path::PathBuf,
    #[arg(default_value_t = 1000)]
    rows: u32,
    #[arg(default_value_t = 1000)]
    columns: u32,
}
