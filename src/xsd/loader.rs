use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {location}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {location}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("cannot resolve {location:?} against {base:?}: {message}")]
    InvalidLocation {
        location: String,
        base: String,
        message: String,
    },
}

/// Looks up schema documents by the relative name used in `schemaLocation`.
pub trait SchemaLoader {
    /// Returns the document text for `location`.
    fn load(&self, location: &str) -> Result<String, LoadError>;
}

/// Resolves locations relative to a fixed base directory.
#[derive(Clone, Debug)]
pub struct FileLoader {
    base_dir: PathBuf,
}

impl FileLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// A loader rooted at the directory containing `file`.
    pub fn beside(file: &Path) -> Self {
        Self::new(file.parent().unwrap_or_else(|| Path::new(".")))
    }
}

impl SchemaLoader for FileLoader {
    fn load(&self, location: &str) -> Result<String, LoadError> {
        let path = self.base_dir.join(location);
        std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            location: path.display().to_string(),
            source,
        })
    }
}

/// Resolves locations relative to a base URL and fetches them over HTTP.
pub struct HttpLoader {
    base_url: reqwest::Url,
    client: reqwest::blocking::Client,
}

impl HttpLoader {
    pub fn new(base_url: &str) -> Result<Self, LoadError> {
        let base_url = reqwest::Url::parse(base_url).map_err(|e| LoadError::InvalidLocation {
            location: base_url.to_string(),
            base: String::new(),
            message: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        })
    }

    fn resolve(&self, location: &str) -> Result<reqwest::Url, LoadError> {
        self.base_url
            .join(location)
            .map_err(|e| LoadError::InvalidLocation {
                location: location.to_string(),
                base: self.base_url.to_string(),
                message: e.to_string(),
            })
    }
}

impl SchemaLoader for HttpLoader {
    fn load(&self, location: &str) -> Result<String, LoadError> {
        let url = self.resolve(location)?;
        let http_error = |source| LoadError::Http {
            location: url.to_string(),
            source,
        };
        self.client
            .get(url.clone())
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(http_error)
    }
}

/// Picks the loader matching the form of `input`.
pub fn loader_for(input: &str) -> Result<Box<dyn SchemaLoader>, LoadError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        Ok(Box::new(HttpLoader::new(input)?))
    } else {
        Ok(Box::new(FileLoader::beside(Path::new(input))))
    }
}

/// Reads the input document itself. Files are read directly, URLs are fetched.
pub fn read_input(input: &str) -> Result<String, LoadError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        HttpLoader::new(input)?.load(input)
    } else {
        std::fs::read_to_string(input).map_err(|source| LoadError::Io {
            location: input.to_string(),
            source,
        })
    }
}
