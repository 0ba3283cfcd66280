//! ggpack: package SFC build artifacts as AWS IoT Greengrass v2 components.
//!
//! The pipeline is strictly linear: scan the build directory, materialize
//! artifact copies, generate one recipe per module, then emit the installer
//! and uninstaller command scripts. Failures abort the run with partial
//! output left in place for the operator to inspect.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod modules;
pub mod recipe;
pub mod scripts;

use std::fs;
use std::path::{Path, PathBuf};

pub use config::Config;
pub use error::AppError;
pub use modules::{MAIN_MODULE, Module};
pub use recipe::{RecipeTemplate, TemplateKind, TemplateSet};
pub use scripts::{CommandSet, INSTALLER_BASENAME, UNINSTALLER_BASENAME};

/// Summary of one packaging run.
#[derive(Debug, Clone)]
pub struct PackagingReport {
    /// Module names in processing order.
    pub modules: Vec<String>,
    /// Number of artifact files actually copied (existing copies skipped).
    pub copied: usize,
    /// Generated recipe files, one per module.
    pub recipe_files: Vec<PathBuf>,
    /// The four emitted command scripts.
    pub script_files: Vec<PathBuf>,
}

/// Run the full packaging pipeline, emitting command scripts into the
/// current working directory.
pub fn run(config: &Config) -> Result<PackagingReport, AppError> {
    run_in(config, Path::new("."))
}

/// Run the full packaging pipeline, emitting command scripts into `out_dir`.
pub fn run_in(config: &Config, out_dir: &Path) -> Result<PackagingReport, AppError> {
    let modules = modules::scan_build_dir(&config.build_dir)?;

    // Templates load before any output is produced; a broken template aborts
    // the run with no recipes written.
    let templates = TemplateSet::load(&config.resources_dir)?;

    fs::create_dir_all(config.recipes_dir())?;
    let copied = artifacts::materialize(config, &modules)?;

    let mut commands = CommandSet::new(config);
    let mut recipe_files = Vec::new();
    for module in &modules {
        let doc = templates.for_module(module).render(config, module)?;
        let recipe_file = config.recipe_path(&module.name);
        recipe::write_recipe(&recipe_file, &doc)?;

        commands.push_module(config, module, &recipe_file);
        recipe_files.push(recipe_file);
    }

    let script_files = scripts::emit(out_dir, &commands)?;

    Ok(PackagingReport {
        modules: modules.into_iter().map(|m| m.name).collect(),
        copied,
        recipe_files,
        script_files,
    })
}
