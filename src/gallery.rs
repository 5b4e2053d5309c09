//! Filtering, pagination, and addressable gallery state.
//!
//! The visible slice of the portfolio is a pure function of
//! (collection, selected category, page, page size). Filtering is an exact
//! label match against each image's category set; "All Work" passes the
//! collection through unchanged. Pagination clamps the requested page into
//! `[1, total_pages]` before slicing, and `total_pages` is never zero — an
//! empty filtered list still has one (empty) page.
//!
//! The selected category and page are mirrored into a query string so a
//! shared link reproduces the same view, and re-derived (not incremented)
//! whenever the collection changes size, so state never points past the end
//! of a now-shorter filtered list.

use crate::catalog::ALL_WORK;
use crate::model::Image;

/// Images shown per gallery page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// One visible slice of the filtered collection.
#[derive(Debug)]
pub struct GalleryPage<'a> {
    pub items: Vec<&'a Image>,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Size of the filtered collection across all pages.
    pub total: usize,
}

/// Keep only images whose category set contains `category` (exact match);
/// "All Work" is the identity filter.
pub fn filter<'a>(images: &'a [Image], category: &str) -> Vec<&'a Image> {
    if category == ALL_WORK {
        images.iter().collect()
    } else {
        images
            .iter()
            .filter(|img| img.categories.iter().any(|c| c == category))
            .collect()
    }
}

/// Number of pages needed for `count` items: `max(1, ceil(count / size))`.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size).max(1)
}

/// Compute the visible slice for a category and (possibly out-of-range)
/// page number. Deterministic for the same input.
pub fn view<'a>(
    images: &'a [Image],
    category: &str,
    page: usize,
    page_size: usize,
) -> GalleryPage<'a> {
    let filtered = filter(images, category);
    let total = filtered.len();
    let total_pages = total_pages(total, page_size);
    let page = page.clamp(1, total_pages);
    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    GalleryPage {
        items,
        page,
        total_pages,
        total,
    }
}

/// Navigable gallery state: selected category, 1-based page, page size.
///
/// Mutations keep the invariant that `page` stays within
/// `[1, total_pages(filtered_count)]` for the collection last synced
/// against; changing category always resets to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryViewState {
    pub selected_category: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for GalleryViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl GalleryViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            selected_category: ALL_WORK.to_string(),
            page: 1,
            page_size,
        }
    }

    /// Select a category. Always resets to page 1, even when re-selecting
    /// the current category (re-selection is a navigation).
    pub fn select_category(&mut self, label: &str) {
        if self.selected_category != label {
            self.selected_category = label.to_string();
        }
        self.page = 1;
    }

    /// Request a page; clamped against the filtered count.
    pub fn set_page(&mut self, page: usize, filtered_count: usize) {
        self.page = page.clamp(1, total_pages(filtered_count, self.page_size));
    }

    /// Re-derive the page after the underlying collection changed size.
    pub fn sync(&mut self, filtered_count: usize) {
        self.page = self.page.clamp(1, total_pages(filtered_count, self.page_size));
    }

    /// Canonical query-string encoding, suitable for shareable links.
    pub fn to_query(&self) -> String {
        format!(
            "category={}&page={}",
            urlencoding::encode(&self.selected_category),
            self.page
        )
    }

    /// Parse state out of a query string. Missing or unparsable parameters
    /// fall back to the defaults ("All Work", page 1); a leading `?` is
    /// tolerated. Unknown parameters are ignored.
    pub fn from_query(query: &str, page_size: usize) -> Self {
        let mut state = Self::new(page_size);
        for pair in query.trim_start_matches('?').split('&') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            match name {
                "category" => {
                    if let Ok(decoded) = urlencoding::decode(value) {
                        if !decoded.is_empty() {
                            state.selected_category = decoded.into_owned();
                        }
                    }
                }
                "page" => {
                    if let Ok(page) = value.parse::<usize>() {
                        if page >= 1 {
                            state.page = page;
                        }
                    }
                }
                _ => {}
            }
        }
        state
    }
}
