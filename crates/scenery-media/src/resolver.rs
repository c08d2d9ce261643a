//! Media URL resolution.
//!
//! A resolver turns whatever the user typed into a URL the playback element
//! can fetch, along with its content type and attribution metadata.

use crate::error::ResolutionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Attribution metadata reported by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMeta {
    pub name: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    /// Where the media originally came from.
    pub url: Option<String>,
}

impl MediaMeta {
    /// Single-line attribution text, or `None` when there is nothing to credit.
    pub fn attribution(&self) -> Option<String> {
        match (&self.name, &self.author) {
            (Some(name), Some(author)) => Some(format!("{} by {}", name, author)),
            (Some(name), None) => Some(name.clone()),
            (None, Some(author)) => Some(format!("by {}", author)),
            (None, None) => None,
        }
    }
}

/// Output of a successful [`MediaResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub accessible_url: String,
    pub content_type: String,
    pub meta: MediaMeta,
}

/// Resolves source URLs into fetchable ones.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Resolve `url` into an accessible URL, content type and metadata.
    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, ResolutionError>;

    /// Rewrite a URL requested while streaming `original_url` so it can be
    /// fetched directly.
    fn unproxy(&self, original_url: &str, segment_url: &str) -> String;
}

/// Guess a content type from the extension of a URL or path.
pub fn guess_content_type(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "ogv" => "video/ogg",
        "m3u8" => "application/vnd.apple.mpegurl",
        "ts" => "video/mp2t",
        _ => "application/octet-stream",
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Resolver for local files and plain HTTP(S) URLs.
///
/// Remote URLs may be routed through a CORS proxy by setting a proxy prefix;
/// relative paths are resolved against the media root.
pub struct LocalResolver {
    media_root: PathBuf,
    proxy_prefix: Option<String>,
}

impl LocalResolver {
    /// Create a resolver rooted at `media_root`.
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
            proxy_prefix: None,
        }
    }

    /// Route remote URLs through `prefix` (e.g. `https://proxy.example/`).
    pub fn with_proxy(mut self, prefix: impl Into<String>) -> Self {
        self.proxy_prefix = Some(prefix.into());
        self
    }

    /// Get the media root.
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    fn proxied(&self, url: &str) -> String {
        match &self.proxy_prefix {
            Some(prefix) => format!("{}{}", prefix, url),
            None => url.to_string(),
        }
    }

    fn local_path(&self, url: &str) -> PathBuf {
        let raw = url.strip_prefix("file://").unwrap_or(url);
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.media_root.join(path)
        }
    }
}

#[async_trait]
impl MediaResolver for LocalResolver {
    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, ResolutionError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ResolutionError::InvalidUrl(url.to_string()));
        }

        let name = url
            .split(['?', '#'])
            .next()
            .and_then(|p| p.rsplit('/').next())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if is_remote(url) {
            debug!(url, "Resolving remote media");
            return Ok(ResolvedMedia {
                accessible_url: self.proxied(url),
                content_type: guess_content_type(url).to_string(),
                meta: MediaMeta {
                    name,
                    url: Some(url.to_string()),
                    ..MediaMeta::default()
                },
            });
        }

        let path = self.local_path(url);
        if !path.exists() {
            return Err(ResolutionError::NotFound(path.display().to_string()));
        }

        debug!(url, path = %path.display(), "Resolved local media");
        Ok(ResolvedMedia {
            accessible_url: path.display().to_string(),
            content_type: guess_content_type(url).to_string(),
            meta: MediaMeta {
                name,
                ..MediaMeta::default()
            },
        })
    }

    fn unproxy(&self, original_url: &str, segment_url: &str) -> String {
        let segment = match &self.proxy_prefix {
            Some(prefix) => segment_url.strip_prefix(prefix.as_str()).unwrap_or(segment_url),
            None => segment_url,
        };

        if is_remote(segment) || segment.starts_with('/') {
            return segment.to_string();
        }

        // Relative segment: resolve against the playlist's directory.
        match original_url.rsplit_once('/') {
            Some((base, _)) => format!("{}/{}", base, segment),
            None => segment.to_string(),
        }
    }
}
