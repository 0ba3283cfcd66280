//! Packaging configuration and output-layout derivations.

use std::path::PathBuf;

/// Resolved packaging options. Immutable after CLI parsing.
///
/// Defaults are intentionally non-functional placeholders (bucket, region,
/// account id) that an operator must override; no cross-field validation is
/// performed here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the SFC build artifacts to package.
    pub build_dir: PathBuf,
    /// Greengrass component basename, e.g. `com.amazon.sfc`.
    pub base_name: String,
    /// Version under which every component is registered.
    pub component_version: String,
    /// S3 bucket URI receiving the artifact tree.
    pub bucket: String,
    /// Prefix directory namespacing this release's artifacts and recipes.
    pub prefix: String,
    /// Component name suffix (echoed for confirmation, not consumed).
    pub suffix: String,
    /// AWS region where components get registered.
    pub region: String,
    /// AWS account id owning the registered components.
    pub account_id: String,
    /// Directory holding the two recipe templates.
    pub resources_dir: PathBuf,
}

impl Config {
    /// Echo every resolved option to stdout for operator confirmation.
    pub fn echo(&self) {
        println!("build-dir = {}", self.build_dir.display());
        println!("base-name = {}", self.base_name);
        println!("component-version = {}", self.component_version);
        println!("bucket = {}", self.bucket);
        println!("prefix = {}", self.prefix);
        println!("suffix = {}", self.suffix);
        println!("region = {}", self.region);
        println!("account-id = {}", self.account_id);
        println!("resources-dir = {}", self.resources_dir.display());
    }

    /// Top-level output directory: `<buildDir>/<prefix>`.
    pub fn prefix_dir(&self) -> PathBuf {
        self.build_dir.join(&self.prefix)
    }

    /// Directory receiving generated recipe files.
    pub fn recipes_dir(&self) -> PathBuf {
        self.prefix_dir().join("recipes")
    }

    /// Fully qualified component name for a module: `<baseName>.<module>`.
    pub fn component_name(&self, module: &str) -> String {
        format!("{}.{}", self.base_name, module)
    }

    /// Versioned artifact directory for a module:
    /// `<buildDir>/<prefix>/artifacts/<baseName>.<module>/<version>`.
    pub fn artifact_dir(&self, module: &str) -> PathBuf {
        self.prefix_dir()
            .join("artifacts")
            .join(self.component_name(module))
            .join(&self.component_version)
    }

    /// S3 URI of a module's uploaded artifact.
    pub fn artifact_uri(&self, module: &str, file_name: &str) -> String {
        format!(
            "{}/{}/artifacts/{}/{}/{}",
            self.bucket,
            self.prefix,
            self.component_name(module),
            self.component_version,
            file_name
        )
    }

    /// Path of the generated recipe file for a module:
    /// `<buildDir>/<prefix>/recipes/<baseName>.<module>-<version>.json`.
    pub fn recipe_path(&self, module: &str) -> PathBuf {
        self.recipes_dir()
            .join(format!("{}-{}.json", self.component_name(module), self.component_version))
    }

    /// ARN of a module's registered component version.
    pub fn component_arn(&self, module: &str) -> String {
        format!(
            "arn:aws:greengrass:{}:{}:components:{}:versions:{}",
            self.region,
            self.account_id,
            self.component_name(module),
            self.component_version
        )
    }
}
