use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::HttpError;

/// Serves raw file bytes from a fixed document root.
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base_dir: base.into() }
    }

    /// Map a URL path onto the document root.
    ///
    /// Only plain path components are accepted; `..` and absolute components
    /// would escape the root and yield `None`.
    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut resolved = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }

    fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            // html pages always carry the charset
            "html" => "text/html;charset=utf-8",
            "css" => "text/css",
            "js" => "application/javascript",
            "json" => "application/json",
            "txt" => "text/plain",
            "ico" => "image/x-icon",
            _ => "application/octet-stream",
        }
    }

    /// Read the file a URL path resolves to, returning its bytes and content
    /// type.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the path escapes the root or no regular file
    /// exists there; `Io` when the file exists but cannot be read.
    pub fn load(&self, url_path: &str) -> Result<(Vec<u8>, &'static str), HttpError> {
        let path = self.map_path(url_path).ok_or_else(|| HttpError::ResourceNotFound {
            path: url_path.to_string(),
        })?;
        if !path.is_file() {
            return Err(HttpError::ResourceNotFound {
                path: url_path.to_string(),
            });
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}
