//! Asset URL resolution and category slugs.
//!
//! Remote records reference their displayable asset either by a full `url`
//! or by a bare `filename` that must be joined onto the static-asset prefix
//! (`/data` against the stock content manager). Resolution is a pure
//! function of (prefix, record) with no side effects — bookmarked and
//! shared links depend on it staying stable across builds.

use crate::model::{Background, Image};

/// Resolves image references to displayable asset paths.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    prefix: String,
}

impl AssetResolver {
    /// Create a resolver for the given static-asset prefix. A trailing
    /// slash on the prefix is tolerated and normalized away.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve an image to its displayable source. An explicit `url` wins
    /// and passes through verbatim; otherwise the filename joins the prefix.
    pub fn resolve(&self, image: &Image) -> String {
        match &image.url {
            Some(url) => url.clone(),
            None => self.resolve_filename(&image.filename),
        }
    }

    /// Join a bare filename onto the asset prefix.
    pub fn resolve_filename(&self, filename: &str) -> String {
        format!("{}/{}", self.prefix, filename.trim_start_matches('/'))
    }

    /// Resolve the home-view background, if one is set.
    pub fn resolve_background(&self, background: &Background) -> Option<String> {
        background
            .url
            .clone()
            .or_else(|| background.filename.as_deref().map(|f| self.resolve_filename(f)))
    }
}

const MAX_SLUG_LEN: usize = 80;

/// Sanitize a category label for use in generated page paths.
///
/// - Lowercases; keeps Unicode alphanumerics (so "夜景" stays addressable)
/// - Replaces everything else with dashes, collapses consecutive dashes,
///   strips leading/trailing dashes — a sanitized slug never contains `--`
/// - Truncates to `MAX_SLUG_LEN` bytes at the last dash before the limit
///
/// Deterministic but lossy: distinct labels can sanitize to the same slug
/// (or, for symbol-only labels, to nothing). [`crate::catalog::index`]
/// assigns the unique per-facet slugs that page paths are built from.
pub fn category_slug(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut prev_dash = true; // suppress a leading dash
    for c in label.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    let trimmed = slug.trim_end_matches('-');

    if trimmed.len() <= MAX_SLUG_LEN {
        return trimmed.to_string();
    }
    let mut cut = MAX_SLUG_LEN;
    while !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    let truncated = &trimmed[..cut];
    match truncated.rfind('-') {
        Some(pos) => truncated[..pos].to_string(),
        None => truncated.to_string(),
    }
}
