use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the timebar directory - checks for a local .timebar first, then falls
/// back to the global ~/.timebar
pub fn get_timebar_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_timebar(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".timebar"))
}

/// Find a local .timebar directory by walking up the directory tree
fn find_local_timebar(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let timebar_dir = current.join(".timebar");
        if timebar_dir.exists() && timebar_dir.is_dir() {
            return Some(timebar_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the timebar directory exists
pub fn ensure_timebar_dir() -> Result<PathBuf> {
    let dir = get_timebar_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .timebar directory in the current directory
pub fn init_local_timebar() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let timebar_dir = current_dir.join(".timebar");

    if timebar_dir.exists() {
        anyhow::bail!("Timebar directory already exists: {}", timebar_dir.display());
    }

    fs::create_dir_all(&timebar_dir)
        .with_context(|| format!("Failed to create directory: {}", timebar_dir.display()))?;

    Ok(timebar_dir)
}

/// Path to the marker data file for a date (markers-YYYY-MM-DD.json)
pub fn data_file(date: chrono::NaiveDate) -> Result<PathBuf> {
    let filename = format!("markers-{}.json", date.format("%Y-%m-%d"));
    Ok(ensure_timebar_dir()?.join(filename))
}

/// Path to today's marker data file
pub fn today_data_file() -> Result<PathBuf> {
    let today = chrono::Local::now().date_naive();
    data_file(today)
}

/// Path to the generated report for a date
pub fn report_file(date: chrono::NaiveDate) -> Result<PathBuf> {
    Ok(ensure_timebar_dir()?.join(format!("report-{}.md", date)))
}

/// File name of the downloadable snapshot artifact for a date
pub fn snapshot_file_name(date: chrono::NaiveDate) -> String {
    format!("timebar_data_{}.json", date.format("%Y-%m-%d"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "file path has no parent directory",
        )
    })?;

    // Temp file lives in the target directory so the rename stays on one
    // filesystem.
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read file content, return empty string if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path)
}
