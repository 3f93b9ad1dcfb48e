//! Path resolution and access checks for tool file arguments.
//!
//! Paths are made absolute against the working directory and normalized
//! lexically (no symlink resolution), then checked against a denylist of
//! system directories before any file is touched.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// System directories tools may never read from or write to.
pub const DENIED_PREFIXES: &[&str] = &["/etc", "/bin", "/usr/bin", "/var", "/sys", "/proc"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Path cannot be empty.")]
    Empty,

    #[error("Access to system directory \"{}\" is not allowed.", .0.display())]
    SystemDirectory(PathBuf),

    #[error("File \"{}\" is not readable or does not exist.", .0.display())]
    NotReadable(PathBuf),

    #[error("Directory \"{}\" is not writable and could not be created.", .0.display())]
    NotWritable(PathBuf),

    #[error("Could not determine working directory: {0}")]
    WorkingDirectory(String),
}

/// Resolves and authorizes file paths for reading or writing.
#[derive(Debug, Clone)]
pub struct PathResolver {
    denied: Vec<PathBuf>,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::with_denied_prefixes(DENIED_PREFIXES.iter().map(PathBuf::from))
    }
}

impl PathResolver {
    pub fn with_denied_prefixes(prefixes: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            denied: prefixes.into_iter().collect(),
        }
    }

    /// Resolve `raw` to an absolute path and check it for `access`.
    ///
    /// Write access creates the parent directory when it is missing. Read
    /// access requires an existing, openable file.
    pub async fn resolve(&self, raw: &str, access: AccessKind) -> Result<PathBuf, PathError> {
        let path = self.authorize(raw)?;
        match access {
            AccessKind::Read => ensure_readable(&path).await?,
            AccessKind::Write => ensure_writable_parent(&path).await?,
        }
        tracing::debug!(path = %path.display(), ?access, "Path resolved");
        Ok(path)
    }

    /// Absolute, normalized form of `raw`, rejected if it is inside a denied
    /// directory. Touches no files.
    pub fn authorize(&self, raw: &str) -> Result<PathBuf, PathError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let candidate = Path::new(raw);
        let absolute = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| PathError::WorkingDirectory(e.to_string()))?
                .join(candidate)
        };
        let normalized = normalize_lexically(&absolute);

        if self.denied.iter().any(|prefix| normalized.starts_with(prefix)) {
            return Err(PathError::SystemDirectory(normalized));
        }
        Ok(normalized)
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

async fn ensure_readable(path: &Path) -> Result<(), PathError> {
    let not_readable = || PathError::NotReadable(path.to_path_buf());
    let metadata = tokio::fs::metadata(path).await.map_err(|_| not_readable())?;
    if !metadata.is_file() {
        return Err(not_readable());
    }
    tokio::fs::File::open(path).await.map_err(|_| not_readable())?;
    Ok(())
}

async fn ensure_writable_parent(path: &Path) -> Result<(), PathError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("/"));
    let not_writable = || PathError::NotWritable(dir.to_path_buf());

    match tokio::fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() && !metadata.permissions().readonly() => Ok(()),
        Ok(_) => Err(not_writable()),
        Err(_) => {
            tracing::debug!(dir = %dir.display(), "Creating output directory");
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|_| not_writable())
        }
    }
}
