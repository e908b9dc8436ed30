//! Precondition errors raised before any filesystem mutation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run before anything is written
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Shared template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("No template pack configured for {0}")]
    NoTemplatePack(String),

    #[error("Project directory not found: {}", .0.display())]
    ProjectNotFound(PathBuf),

    #[error("Unsupported IDE target: {0}")]
    UnsupportedAdapter(String),

    #[error("Invalid pack manifest {}: {message}", .path.display())]
    InvalidManifest { path: PathBuf, message: String },
}
