//! Content fetching against the content-management API.
//!
//! The fetcher is the only place that talks to the network. It issues one
//! request per logical resource, enforces the configured timeout, validates
//! the payload into the strict shapes from [`crate::model`], and folds every
//! outcome into a [`RemoteContent`] value:
//!
//! - `Loaded(T)` — transport succeeded and the payload parsed.
//! - `Empty` — transport succeeded but the resource is genuinely absent: a
//!   zero-length collection or a null/blank singleton. An empty catalog is
//!   valid content, not an error.
//! - `Failed(reason)` — non-2xx status, transport error, or malformed
//!   payload. The reason is detailed enough to log; it is never rendered.
//!
//! No retries happen here. The caller re-fetches on navigation (never on a
//! timer), optionally passing a cache-bust token so repeated visits to the
//! same route defeat stale intermediary caches.

use crate::model::{AboutContent, Background, CategoryList, Featured, Image};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Logical resources served by the content manager. The path mapping is the
/// transport binding; everything downstream deals in keys, not URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKey {
    Portfolio,
    Categories,
    Background,
    AboutContent,
    AboutImages,
    Featured,
}

impl ResourceKey {
    pub fn path(self) -> &'static str {
        match self {
            ResourceKey::Portfolio => "/api/portfolio",
            ResourceKey::Categories => "/api/categories",
            ResourceKey::Background => "/api/background-image",
            ResourceKey::AboutContent => "/api/about-content",
            ResourceKey::AboutImages => "/api/about-image",
            ResourceKey::Featured => "/api/featured",
        }
    }

    pub fn all() -> [ResourceKey; 6] {
        [
            ResourceKey::Portfolio,
            ResourceKey::Categories,
            ResourceKey::Background,
            ResourceKey::AboutContent,
            ResourceKey::AboutImages,
            ResourceKey::Featured,
        ]
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKey::Portfolio => "portfolio",
            ResourceKey::Categories => "categories",
            ResourceKey::Background => "background",
            ResourceKey::AboutContent => "about content",
            ResourceKey::AboutImages => "about images",
            ResourceKey::Featured => "featured image",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error fetching {key}: {source}")]
    Transport {
        key: ResourceKey,
        source: reqwest::Error,
    },
    #[error("{key} request returned HTTP {status}")]
    Status {
        key: ResourceKey,
        status: reqwest::StatusCode,
    },
    #[error("malformed {key} payload: {source}")]
    Parse {
        key: ResourceKey,
        source: serde_json::Error,
    },
}

/// Tagged result of a fetch. Used uniformly for the portfolio collection,
/// the background selection, about content, and the featured image.
#[derive(Debug)]
pub enum RemoteContent<T> {
    /// Dispatched but not yet settled. Views render a loading affordance.
    Pending,
    Loaded(T),
    Empty,
    Failed(FetchError),
}

impl<T> RemoteContent<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, RemoteContent::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RemoteContent::Failed(_))
    }

    /// Map the loaded payload, preserving the other states.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteContent<U> {
        match self {
            RemoteContent::Pending => RemoteContent::Pending,
            RemoteContent::Loaded(value) => RemoteContent::Loaded(f(value)),
            RemoteContent::Empty => RemoteContent::Empty,
            RemoteContent::Failed(err) => RemoteContent::Failed(err),
        }
    }

    /// Short status word for CLI reports.
    pub fn status_word(&self) -> &'static str {
        match self {
            RemoteContent::Pending => "pending",
            RemoteContent::Loaded(_) => "loaded",
            RemoteContent::Empty => "empty",
            RemoteContent::Failed(_) => "failed",
        }
    }
}

/// HTTP client for the content manager. One instance per process; the
/// request timeout is fixed at construction.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for a resource, with the optional cache-bust token
    /// appended as a `t` query parameter.
    pub fn request_url(&self, key: ResourceKey, cache_bust: Option<u64>) -> String {
        match cache_bust {
            Some(token) => format!("{}{}?t={}", self.base_url, key.path(), token),
            None => format!("{}{}", self.base_url, key.path()),
        }
    }

    /// The portfolio image collection. The upstream endpoint answers either
    /// a bare array or a pagination envelope (`{"images": […], …}`); the
    /// engine paginates locally, so only the records are kept.
    pub async fn portfolio(&self, cache_bust: Option<u64>) -> RemoteContent<Vec<Image>> {
        let value = match self.get_json(ResourceKey::Portfolio, cache_bust).await {
            Ok(v) => v,
            Err(err) => return RemoteContent::Failed(err),
        };
        let records = match value {
            Value::Null => return RemoteContent::Empty,
            Value::Object(mut map) => map.remove("images").unwrap_or(Value::Array(Vec::new())),
            other => other,
        };
        match decode::<Vec<Image>>(ResourceKey::Portfolio, records) {
            Ok(images) if images.is_empty() => RemoteContent::Empty,
            Ok(images) => RemoteContent::Loaded(images),
            Err(err) => RemoteContent::Failed(err),
        }
    }

    /// The upstream category list. Presentation derives its facets locally
    /// from the collection; this resource exists for `check` reporting.
    pub async fn categories(&self, cache_bust: Option<u64>) -> RemoteContent<Vec<String>> {
        match self.get_json(ResourceKey::Categories, cache_bust).await {
            Ok(Value::Null) => RemoteContent::Empty,
            Ok(value) => match decode::<CategoryList>(ResourceKey::Categories, value) {
                Ok(CategoryList(labels)) if labels.is_empty() => RemoteContent::Empty,
                Ok(CategoryList(labels)) => RemoteContent::Loaded(labels),
                Err(err) => RemoteContent::Failed(err),
            },
            Err(err) => RemoteContent::Failed(err),
        }
    }

    /// The home-view background selection.
    pub async fn background(&self, cache_bust: Option<u64>) -> RemoteContent<Background> {
        match self.get_json(ResourceKey::Background, cache_bust).await {
            Ok(Value::Null) => RemoteContent::Empty,
            Ok(value) => match decode::<Background>(ResourceKey::Background, value) {
                Ok(bg) if bg.is_unset() => RemoteContent::Empty,
                Ok(bg) => RemoteContent::Loaded(bg),
                Err(err) => RemoteContent::Failed(err),
            },
            Err(err) => RemoteContent::Failed(err),
        }
    }

    /// Biography text for the about view.
    pub async fn about_content(&self, cache_bust: Option<u64>) -> RemoteContent<AboutContent> {
        match self.get_json(ResourceKey::AboutContent, cache_bust).await {
            Ok(Value::Null) => RemoteContent::Empty,
            Ok(value) => match decode::<AboutContent>(ResourceKey::AboutContent, value) {
                Ok(about) if about.is_blank() => RemoteContent::Empty,
                Ok(about) => RemoteContent::Loaded(about),
                Err(err) => RemoteContent::Failed(err),
            },
            Err(err) => RemoteContent::Failed(err),
        }
    }

    /// Supporting images for the about view. The endpoint historically
    /// served a single record; newer deployments serve a list. Both decode.
    pub async fn about_images(&self, cache_bust: Option<u64>) -> RemoteContent<Vec<Image>> {
        match self.get_json(ResourceKey::AboutImages, cache_bust).await {
            Ok(Value::Null) => RemoteContent::Empty,
            Ok(value) => match decode::<OneOrMany>(ResourceKey::AboutImages, value) {
                Ok(list) => {
                    let images = list.into_vec();
                    if images.is_empty() {
                        RemoteContent::Empty
                    } else {
                        RemoteContent::Loaded(images)
                    }
                }
                Err(err) => RemoteContent::Failed(err),
            },
            Err(err) => RemoteContent::Failed(err),
        }
    }

    /// The weekly featured image.
    pub async fn featured(&self, cache_bust: Option<u64>) -> RemoteContent<Featured> {
        match self.get_json(ResourceKey::Featured, cache_bust).await {
            Ok(Value::Null) => RemoteContent::Empty,
            Ok(value) => match decode::<Featured>(ResourceKey::Featured, value) {
                Ok(feat) => RemoteContent::Loaded(feat),
                Err(err) => RemoteContent::Failed(err),
            },
            Err(err) => RemoteContent::Failed(err),
        }
    }

    async fn get_json(
        &self,
        key: ResourceKey,
        cache_bust: Option<u64>,
    ) -> Result<Value, FetchError> {
        let url = self.request_url(key, cache_bust);
        debug!(%key, %url, "fetching remote content");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { key, source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { key, status });
        }
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { key, source })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Parse { key, source })
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    key: ResourceKey,
    value: Value,
) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|source| FetchError::Parse { key, source })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Image),
    Many(Vec<Image>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<Image> {
        match self {
            OneOrMany::One(image) => vec![image],
            OneOrMany::Many(images) => images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_appends_cache_bust_token() {
        let fetcher = Fetcher::new("http://cms.local/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            fetcher.request_url(ResourceKey::Portfolio, None),
            "http://cms.local/api/portfolio"
        );
        assert_eq!(
            fetcher.request_url(ResourceKey::Featured, Some(1_724_000_000)),
            "http://cms.local/api/featured?t=1724000000"
        );
    }

    #[test]
    fn resource_paths_are_stable() {
        // Shared links and deployed admin tooling depend on these paths.
        assert_eq!(ResourceKey::Portfolio.path(), "/api/portfolio");
        assert_eq!(ResourceKey::Background.path(), "/api/background-image");
        assert_eq!(ResourceKey::AboutContent.path(), "/api/about-content");
        assert_eq!(ResourceKey::AboutImages.path(), "/api/about-image");
        assert_eq!(ResourceKey::Featured.path(), "/api/featured");
        assert_eq!(ResourceKey::all().len(), 6);
    }

    #[test]
    fn status_words_cover_all_states() {
        assert_eq!(RemoteContent::<()>::Pending.status_word(), "pending");
        assert_eq!(RemoteContent::Loaded(()).status_word(), "loaded");
        assert_eq!(RemoteContent::<()>::Empty.status_word(), "empty");
    }
}
