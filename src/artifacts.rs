//! Artifact materialization under `<prefix>/artifacts/`.

use std::fs;

use crate::config::Config;
use crate::error::AppError;
use crate::modules::Module;

/// Copy each module's build output into its versioned artifact directory.
///
/// Directories are created with create-if-missing semantics, and a file that
/// already exists at the target path is left untouched (stale copies are
/// never refreshed). Returns the number of files actually copied.
pub fn materialize(config: &Config, modules: &[Module]) -> Result<usize, AppError> {
    let mut copied = 0;
    for module in modules {
        let artifact_dir = config.artifact_dir(&module.name);
        fs::create_dir_all(&artifact_dir)?;

        let target = artifact_dir.join(&module.file_name);
        if !target.exists() {
            fs::copy(&module.source, &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
