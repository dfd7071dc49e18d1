//! Asset loading with embedded fallbacks
//!
//! The default config and the upload page are compiled into the binary.
//! If `CONFIG_FILE` is set and the file exists it replaces the embedded
//! config; the static page is always served from the embedded copy.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded static page and its assets
#[derive(RustEmbed)]
#[folder = "static/"]
#[include = "*.html"]
#[include = "*.css"]
#[include = "*.js"]
struct EmbeddedStatic;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// A static file and the content type to serve it with
#[derive(Debug, Clone)]
pub struct StaticFile {
    pub data: Cow<'static, [u8]>,
    pub content_type: &'static str,
}

/// Where the active config comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
    /// `CONFIG_FILE` is set but points nowhere
    Missing(PathBuf),
}

/// Asset loader with optional filesystem override for the config
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if the env var was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Create a loader from the `CONFIG_FILE` environment variable
    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    pub fn config_source(&self) -> ConfigSource {
        match &self.config_file {
            Some(path) if path.exists() => ConfigSource::File(path.clone()),
            Some(path) => ConfigSource::Missing(path.clone()),
            None => ConfigSource::Embedded,
        }
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let ConfigSource::File(path) = self.config_source() {
            tracing::trace!(path = %path.display(), "Loading config from filesystem");
            return Ok(Cow::Owned(fs::read(&path)?));
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Look up an embedded static file by its path relative to `static/`
    pub fn static_file(path: &str) -> Option<StaticFile> {
        let path = path.trim_start_matches('/');
        let path = if path.is_empty() { "index.html" } else { path };
        EmbeddedStatic::get(path).map(|f| StaticFile {
            data: f.data,
            content_type: content_type_for(path),
        })
    }
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_is_present() {
        let loader = AssetLoader::new(None);
        assert_eq!(loader.config_source(), ConfigSource::Embedded);
        let content = loader.read_config_string().unwrap();
        assert!(content.contains("product_name"));
    }

    #[test]
    fn test_external_config_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "product_name: Custom").unwrap();

        let loader = AssetLoader::new(Some(file.path().to_path_buf()));
        assert_eq!(
            loader.config_source(),
            ConfigSource::File(file.path().to_path_buf())
        );
        assert_eq!(loader.read_config_string().unwrap().trim(), "product_name: Custom");
    }

    #[test]
    fn test_missing_external_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");

        let loader = AssetLoader::new(Some(path.clone()));
        assert_eq!(loader.config_source(), ConfigSource::Missing(path));
        assert!(loader.read_config_string().unwrap().contains("product_name"));
    }

    #[test]
    fn test_index_page_is_embedded() {
        let index = AssetLoader::static_file("/").unwrap();
        assert_eq!(index.content_type, "text/html; charset=utf-8");
        assert!(String::from_utf8_lossy(&index.data).contains("PhotoBatcher"));

        assert!(AssetLoader::static_file("index.html").is_some());
        assert!(AssetLoader::static_file("missing.js").is_none());
    }
}
