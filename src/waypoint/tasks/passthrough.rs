use crate::runtime::{TaskInvocation, TaskUnit};
use async_trait::async_trait;
use std::error::Error;

/// Copies every input file into the output directory unchanged.
///
/// Parameters:
/// - `overwrite` (bool, default `true`): replace files already present in the output
pub struct PassThroughTask;

#[async_trait]
impl TaskUnit for PassThroughTask {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn run(&self, invocation: &TaskInvocation) -> Result<(), Box<dyn Error + Send + Sync>> {
        let overwrite = invocation.bool_param("overwrite", true);
        tokio::fs::create_dir_all(&invocation.output_path).await?;

        for input in &invocation.input_paths {
            if !tokio::fs::metadata(input).await?.is_file() {
                log::debug!("Skipping non-file input '{}'", input.display());
                continue;
            }
            let file_name = input
                .file_name()
                .ok_or_else(|| format!("input '{}' has no file name", input.display()))?;
            let target = invocation.output_path.join(file_name);
            if !overwrite && tokio::fs::try_exists(&target).await? {
                log::debug!("Keeping existing '{}'", target.display());
                continue;
            }
            tokio::fs::copy(input, &target).await?;
        }
        Ok(())
    }
}
