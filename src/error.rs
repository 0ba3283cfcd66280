use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for ggpack operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Build directory missing or not a directory.
    #[error("Build directory not found: {}", .0.display())]
    BuildDirNotFound(PathBuf),

    /// Artifact filename yields no module name.
    #[error("Cannot derive a module name from '{0}': expected '<module>.<extension>'")]
    ModuleName(String),

    /// Recipe template file missing.
    #[error("Recipe template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Recipe template is not valid JSON.
    #[error("Failed to parse recipe template {}: {details}", .path.display())]
    TemplateParse { path: PathBuf, details: String },

    /// Recipe template lacks a field this tool overwrites.
    #[error("Recipe template {} has an unexpected shape: {reason}", .path.display())]
    TemplateShape { path: PathBuf, reason: String },
}

impl AppError {
    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::ModuleName(_) | AppError::TemplateParse { .. } => io::ErrorKind::InvalidInput,
            AppError::TemplateShape { .. } => io::ErrorKind::InvalidData,
            AppError::BuildDirNotFound(_) | AppError::TemplateNotFound(_) => io::ErrorKind::NotFound,
        }
    }
}
