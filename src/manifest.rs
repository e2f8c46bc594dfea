//! Manifest loading and decoding.
//!
//! A manifest comes from a file, a URL or inline text and is decoded as
//! YAML or JSON (JSON is valid YAML).  Only the first document of a stream
//! is used, and anything over [`MAX_MANIFEST_BYTES`] is refused before
//! decoding starts.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Upper bound on the size of a single manifest.
pub const MAX_MANIFEST_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestSource {
    Path(PathBuf),
    Url(String),
    Inline(String),
}

impl ManifestSource {
    /// Interpret `location` as a URL when it starts with `http`, otherwise
    /// as a filesystem path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http") {
            Self::Url(location.to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }

    pub fn inline(text: impl Into<String>) -> Self {
        Self::Inline(text.into())
    }

    /// Load the raw manifest bytes.
    pub async fn read(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Self::Inline(text) => text.as_bytes().to_vec(),
            Self::Path(path) => tokio::fs::read(path).await.map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?,
            Self::Url(url) => {
                let mut resp = reqwest::get(url.as_str()).await?.error_for_status()?;
                if let Some(len) = resp.content_length() {
                    check_size(usize::try_from(len).unwrap_or(usize::MAX))?;
                }
                // Content-Length may be absent (chunked, close-delimited).
                let mut body = Vec::new();
                while let Some(chunk) = resp.chunk().await? {
                    check_size(body.len() + chunk.len())?;
                    body.extend_from_slice(&chunk);
                }
                body
            }
        };
        check_size(bytes.len())?;
        debug!(source = %self, size = bytes.len(), "read manifest");
        Ok(bytes)
    }

    /// Load and decode the manifest into `K`.
    pub async fn parse<K: DeserializeOwned>(&self) -> Result<K> {
        decode(&self.read().await?)
    }
}

impl std::fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Inline(_) => f.write_str("<inline>"),
        }
    }
}

fn check_size(len: usize) -> Result<()> {
    if len > MAX_MANIFEST_BYTES {
        return Err(Error::manifest(format!(
            "manifest exceeds {MAX_MANIFEST_BYTES} bytes ({len} bytes seen)"
        )));
    }
    Ok(())
}

/// Decode the first YAML or JSON document in `bytes`.
pub fn decode<K: DeserializeOwned>(bytes: &[u8]) -> Result<K> {
    check_size(bytes.len())?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::manifest("manifest is empty"));
    }

    let document = serde_yaml::Deserializer::from_slice(bytes)
        .next()
        .ok_or_else(|| Error::manifest("manifest contains no document"))?;
    Ok(K::deserialize(document)?)
}
