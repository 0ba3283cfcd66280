//! Build-directory scanning and module identification.
//!
//! Each regular file directly inside the build directory is one module; the
//! text before the first `.` of its filename is the module name. The module
//! named [`MAIN_MODULE`] is the SFC main service and gets a different recipe
//! template than every other module.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Module name of the SFC main service.
pub const MAIN_MODULE: &str = "sfc-main";

/// One packagable unit, derived from a single build-output file.
#[derive(Debug, Clone)]
pub struct Module {
    /// Logical module name, e.g. `modbus`.
    pub name: String,
    /// Original filename, e.g. `modbus.tar.gz`.
    pub file_name: String,
    /// Full path of the build output inside the build directory.
    pub source: PathBuf,
}

impl Module {
    /// Whether this is the SFC main service module.
    pub fn is_main(&self) -> bool {
        self.name == MAIN_MODULE
    }
}

/// Derive the module name from a build-output filename.
///
/// Returns the text before the first `.`. A filename without a `.`, or with
/// nothing before it, carries no extension to strip and is rejected rather
/// than silently used whole.
pub fn module_name(file_name: &str) -> Result<&str, AppError> {
    match file_name.split_once('.') {
        Some((name, _)) if !name.is_empty() => Ok(name),
        _ => Err(AppError::ModuleName(file_name.to_string())),
    }
}

/// List the build directory (non-recursive) and derive one [`Module`] per
/// regular file, sorted by filename.
///
/// Subdirectories are skipped. The returned order drives every later stage,
/// so artifact entries, recipes, and command lists stay in lockstep.
pub fn scan_build_dir(build_dir: &Path) -> Result<Vec<Module>, AppError> {
    if !build_dir.is_dir() {
        return Err(AppError::BuildDirNotFound(build_dir.to_path_buf()));
    }

    let mut modules = Vec::new();
    for entry in fs::read_dir(build_dir)? {
        let entry = entry?;
        let source = entry.path();
        if !source.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let name = module_name(&file_name)?.to_string();
        modules.push(Module { name, file_name, source });
    }

    modules.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(modules)
}
