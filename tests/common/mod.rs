//! Shared testing utilities for ggpack CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated packaging environment.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    build_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with an empty build directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let build_dir = work_dir.join("build");
        fs::create_dir_all(&build_dir).expect("Failed to create test build directory");

        Self { root, work_dir, build_dir }
    }

    /// Path to the working directory the binary runs in (scripts land here).
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Path to the build directory holding seeded artifacts.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Path to the recipe templates shipped with the crate.
    pub fn resources_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
    }

    /// Seed one build artifact file.
    pub fn seed_artifact(&self, file_name: &str, content: &[u8]) {
        fs::write(self.build_dir.join(file_name), content).expect("Failed to seed artifact");
    }

    /// Build a command for invoking the compiled `ggpack` binary with the
    /// standard test configuration.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("ggpack").expect("Failed to locate ggpack binary");
        cmd.current_dir(&self.work_dir).args([
            "--build-dir",
            "build",
            "--component-version",
            "1.0.0",
            "--bucket",
            "s3://my-bucket",
            "--prefix",
            "latest",
            "--region",
            "eu-west-1",
            "--account-id",
            "111122223333",
            "--resources-dir",
            Self::resources_dir().to_str().expect("resources path should be UTF-8"),
        ]);
        cmd
    }

    /// Build a command without any preset flags.
    pub fn cli_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("ggpack").expect("Failed to locate ggpack binary");
        cmd.current_dir(&self.work_dir);
        cmd
    }

    /// Path inside the generated prefix tree (`build/latest/...`).
    pub fn prefix_path(&self, relative: &str) -> PathBuf {
        self.build_dir.join("latest").join(relative)
    }

    /// Path to a generated command script in the working directory.
    pub fn script_path(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }

    /// Read a generated recipe document.
    pub fn read_recipe(&self, file_name: &str) -> serde_json::Value {
        let path = self.prefix_path(&format!("recipes/{file_name}"));
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Recipe {} should exist", path.display()));
        serde_json::from_str(&content).expect("Recipe should be valid JSON")
    }

    /// Assert that a module's artifact copy exists with the given content.
    pub fn assert_artifact(&self, component: &str, version: &str, file_name: &str, content: &[u8]) {
        let path =
            self.prefix_path(&format!("artifacts/{component}/{version}/{file_name}"));
        assert!(path.exists(), "Artifact {} should exist", path.display());
        assert_eq!(fs::read(&path).unwrap(), content, "Artifact content mismatch");
    }
}
