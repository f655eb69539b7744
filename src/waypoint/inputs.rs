use crate::runtime::WaypointError;
use std::path::{Path, PathBuf};

/// Paths of the entries directly inside `input_dir`, sorted. No recursion.
pub async fn list_input_paths(input_dir: &Path) -> Result<Vec<PathBuf>, WaypointError> {
    let mut entries = tokio::fs::read_dir(input_dir).await?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        paths.push(entry.path());
    }
    paths.sort();
    log::debug!(
        "Found {} input(s) in '{}'",
        paths.len(),
        input_dir.display()
    );
    Ok(paths)
}
