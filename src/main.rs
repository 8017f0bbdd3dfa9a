mod analysis;
mod db;
mod error;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let data_dir = get_data_dir()?;
    logging::init(&data_dir.join("expensetui.log"))?;

    let db_path = data_dir.join("expenses.db");
    let db = match db::Database::open(&db_path) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Could not open database at {}: {e}", db_path.display());
            return Err(e).with_context(|| format!("opening database at {}", db_path.display()));
        }
    };

    run::as_tui(&db)
}

fn get_data_dir() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
