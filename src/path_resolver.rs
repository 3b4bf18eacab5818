use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Maps request keys to files inside the storage directory.
///
/// The containment check is purely textual: `..` segments are folded away
/// lexically and the result must sit strictly below the base directory.
/// Symlinks inside the base directory are not followed or detected.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: PathBuf,
}

impl PathResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn resolve(&self, key: &str) -> Result<PathBuf, PathError> {
        let base = absolute(&self.base_dir)?;
        let resolved = absolute(&base.join(key))?;

        // Component-wise prefix, so "storage-other" never matches "storage"
        if resolved != base && resolved.starts_with(&base) {
            log::debug!("Resolved key {:?} to {}", key, resolved.display());
            Ok(resolved)
        } else {
            log::warn!("Rejected key {:?}: resolves outside {}", key, base.display());
            Err(PathError::Invalid)
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf, PathError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_err(PathError::WorkingDir)?.join(path)
    };

    Ok(normalize(&joined))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}
