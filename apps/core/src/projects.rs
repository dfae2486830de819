use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::model::Project;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project root is empty")]
    EmptyRoot,
    #[error("failed to read project root {path}: {source}")]
    Read {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Immediate subdirectories of `root`, sorted by name.
pub fn list_subdirectories(root: &Path) -> Result<Vec<Project>, ProjectError> {
    if root.as_os_str().is_empty() {
        return Err(ProjectError::EmptyRoot);
    }

    let mut projects = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| ProjectError::Read {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path().to_string_lossy().into_owned();
        projects.push(Project { name, path });
    }

    Ok(projects)
}
