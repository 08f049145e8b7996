//! Template asset copying.
//!
//! Every file sitting next to the template document (stylesheets, scripts,
//! images) is copied into each niche's output directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

/// Asset copying errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template directory does not exist.
    #[error("template directory not found: {0}")]
    MissingDir(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copies the files of a template directory, leaving out the template document.
#[derive(Debug, Clone)]
pub struct AssetCopier {
    source_dir: PathBuf,
    template_file: String,
}

impl AssetCopier {
    /// Create a copier for `source_dir` that skips `template_file`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, template_file: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            template_file: template_file.into(),
        }
    }

    /// Asset files in the template directory, sorted by name.
    ///
    /// Only regular files directly inside the directory are listed. Hidden
    /// files and the template document are excluded.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.source_dir.is_dir() {
            return Err(AssetError::MissingDir(self.source_dir.clone()));
        }

        let mut assets = Vec::new();
        for entry in fs::read_dir(&self.source_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
                continue;
            };
            if name.starts_with('.') || name == self.template_file.as_str() {
                continue;
            }

            assets.push(path);
        }

        assets.sort();
        Ok(assets)
    }

    /// Copy all assets into `dest_dir`, returning how many files were copied.
    pub fn copy_to(&self, dest_dir: &Path) -> Result<usize> {
        let assets = self.list()?;
        fs::create_dir_all(dest_dir)?;

        for asset in &assets {
            // `list` only yields paths with a file name.
            let Some(name) = asset.file_name() else {
                continue;
            };
            let dest_path = dest_dir.join(name);
            fs::copy(asset, &dest_path)?;

            debug!(
                src = %asset.display(),
                dest = %dest_path.display(),
                "copied asset"
            );
        }

        Ok(assets.len())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn template_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html>{{TITLE}}</html>").unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();
        fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
        fs::write(dir.path().join(".DS_Store"), "junk").unwrap();
        fs::create_dir_all(dir.path().join(".github/scripts")).unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/logo.png"), "png").unwrap();
        dir
    }

    #[test]
    fn test_list_excludes_template_and_directories() {
        let dir = template_dir();
        let copier = AssetCopier::new(dir.path(), "index.html");

        let names: Vec<_> = copier
            .list()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["app.js", "style.css"]);
    }

    #[test]
    fn test_copy_to() {
        let dir = template_dir();
        let dest = TempDir::new().unwrap();
        let out = dest.path().join("yoga-mats");

        let copier = AssetCopier::new(dir.path(), "index.html");
        let count = copier.copy_to(&out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(out.join("style.css")).unwrap(), "body {}");
        assert!(out.join("app.js").exists());
        assert!(!out.join("index.html").exists());
        assert!(!out.join("img").exists());
    }

    #[test]
    fn test_missing_source_dir() {
        let copier = AssetCopier::new("/nonexistent/site_template", "index.html");
        assert!(matches!(copier.list(), Err(AssetError::MissingDir(_))));
    }
}
