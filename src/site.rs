//! The fetch → resolve → render pipeline.
//!
//! Entry points for the CLI stages:
//!
//! - [`fetch_content`] pulls every remote resource once, records a
//!   per-resource status report, and resolves everything into a
//!   [`ContentManifest`] — plain renderable values with fallbacks already
//!   applied. The manifest is what `showfolio fetch` prints as JSON.
//! - [`build_site`] renders the manifest into the output directory: the
//!   home view, one portfolio page per (facet, page) pair, the about view,
//!   and the featured view.
//!
//! Fetches are dispatched through a [`Session`] so each request is tagged
//! with the view it serves; the CLI navigates view by view, but the same
//! coordination discards stale settles for any shell that navigates while
//! requests are in flight.

use crate::assets::{AssetResolver, category_slug};
use crate::catalog::{self, ALL_WORK, CatalogIndex, Facet};
use crate::config::SiteConfig;
use crate::fetch::{Fetcher, ResourceKey};
use crate::gallery::{self, GalleryViewState};
use crate::lightbox::{Lightbox, NoopEffects};
use crate::model::{AboutContent, Background, Featured, Image};
use crate::render;
use crate::resolve::{resolve, resolve_with};
use crate::session::{Session, ViewKey, ViewSlot};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// All remote content after fallback resolution: what the views present.
#[derive(Debug, Serialize)]
pub struct ContentManifest {
    pub images: Vec<Image>,
    pub facets: Vec<Facet>,
    pub background: Option<Background>,
    pub about: AboutContent,
    pub about_images: Vec<Image>,
    pub featured: Option<Featured>,
}

/// Per-resource fetch outcome, for `check` and diagnostics.
#[derive(Debug)]
pub struct FetchReport {
    pub statuses: Vec<(ResourceKey, &'static str)>,
}

impl FetchReport {
    pub fn all_loaded(&self) -> bool {
        self.statuses.iter().all(|(_, s)| *s == "loaded")
    }
}

/// Fetch every resource, resolve fallbacks, and derive the facet index.
pub async fn fetch_content(
    fetcher: &Fetcher,
    config: &SiteConfig,
    cache_bust: Option<u64>,
) -> (ContentManifest, FetchReport) {
    let mut session = Session::new();
    let mut statuses = Vec::new();

    // Portfolio view: the collection, re-fetched on every navigation here.
    let mut slot = ViewSlot::new();
    let tag = session.navigate(ViewKey::portfolio(ALL_WORK, 1));
    slot.settle(&session, tag, fetcher.portfolio(cache_bust).await);
    statuses.push((ResourceKey::Portfolio, slot.content().status_word()));
    let images = resolve(slot.take(), Vec::new());

    // The upstream category list is informational only — facets are always
    // recomputed from the collection, which keeps counts consistent.
    let categories = fetcher.categories(cache_bust).await;
    statuses.push((ResourceKey::Categories, categories.status_word()));

    // Home view.
    let mut slot = ViewSlot::new();
    let tag = session.navigate(ViewKey::home());
    slot.settle(&session, tag, fetcher.background(cache_bust).await);
    statuses.push((ResourceKey::Background, slot.content().status_word()));
    let background = resolve(slot.take().map(Some), None);

    // About view: biography plus supporting images.
    let mut about_slot = ViewSlot::new();
    let mut about_images_slot = ViewSlot::new();
    let tag = session.navigate(ViewKey::about());
    about_slot.settle(&session, tag, fetcher.about_content(cache_bust).await);
    about_images_slot.settle(&session, tag, fetcher.about_images(cache_bust).await);
    statuses.push((ResourceKey::AboutContent, about_slot.content().status_word()));
    statuses.push((ResourceKey::AboutImages, about_images_slot.content().status_word()));
    let about = resolve_with(about_slot.take(), || AboutContent {
        title: config.fallbacks.about_title.clone(),
        content: config.fallbacks.about_body.clone(),
    });
    let about_images = resolve(about_images_slot.take(), Vec::new());

    // Featured view.
    let mut slot = ViewSlot::new();
    let tag = session.navigate(ViewKey::featured());
    slot.settle(&session, tag, fetcher.featured(cache_bust).await);
    statuses.push((ResourceKey::Featured, slot.content().status_word()));
    let featured = resolve(slot.take().map(Some), None);

    let facets = catalog::index(&images).facets().to_vec();
    (
        ContentManifest {
            images,
            facets,
            background,
            about,
            about_images,
            featured,
        },
        FetchReport { statuses },
    )
}

/// Summary of a completed build.
#[derive(Debug)]
pub struct BuildReport {
    /// Site-relative paths of every written page.
    pub pages: Vec<String>,
    pub image_count: usize,
    pub facet_count: usize,
}

/// Render the resolved manifest into `output_dir`.
pub fn build_site(
    config: &SiteConfig,
    manifest: &ContentManifest,
    output_dir: &Path,
) -> Result<BuildReport, BuildError> {
    let resolver = AssetResolver::new(&config.assets.prefix);
    let index = catalog::index(&manifest.images);
    let page_size = config.gallery.page_size;
    let mut pages = Vec::new();

    fs::create_dir_all(output_dir)?;

    // Home.
    let background_url = manifest
        .background
        .as_ref()
        .and_then(|bg| resolver.resolve_background(bg));
    let home = render::render_home(config, background_url.as_deref());
    write_page(output_dir, "index.html", home, &mut pages)?;

    // Portfolio: one page per (facet, page number) so every filter/page
    // combination has a shareable address. Directories come from the
    // index's unique slug assignment, so facets whose labels sanitize to
    // the same slug cannot overwrite each other.
    for facet in index.facets() {
        let slug = index
            .slug(&facet.label)
            .map(str::to_string)
            .unwrap_or_else(|| category_slug(&facet.label));
        let dir = Path::new("portfolio").join(slug);
        fs::create_dir_all(output_dir.join(&dir))?;
        for page_no in 1..=gallery::total_pages(facet.count, page_size) {
            let html = portfolio_page(config, &resolver, &index, manifest, facet, page_no, page_size);
            let rel = dir.join(format!("{page_no}.html"));
            write_page(output_dir, &rel.to_string_lossy(), html, &mut pages)?;
        }
    }
    // The portfolio landing page is "All Work" page 1.
    let all_work = index.facets()[0].clone();
    let landing = portfolio_page(config, &resolver, &index, manifest, &all_work, 1, page_size);
    write_page(output_dir, "portfolio/index.html", landing, &mut pages)?;

    // About.
    let about = render::render_about(config, &resolver, &manifest.about, &manifest.about_images);
    write_page(output_dir, "about.html", about, &mut pages)?;

    // Featured.
    let featured = render::render_featured(config, &resolver, manifest.featured.as_ref());
    write_page(output_dir, "featured.html", featured, &mut pages)?;

    info!(pages = pages.len(), "site build complete");
    Ok(BuildReport {
        pages,
        image_count: manifest.images.len(),
        facet_count: index.facets().len(),
    })
}

fn portfolio_page(
    config: &SiteConfig,
    resolver: &AssetResolver,
    index: &CatalogIndex,
    manifest: &ContentManifest,
    facet: &Facet,
    page_no: usize,
    page_size: usize,
) -> maud::Markup {
    let mut state = GalleryViewState::new(page_size);
    state.select_category(&facet.label);
    state.set_page(page_no, facet.count);
    let page = gallery::view(&manifest.images, &facet.label, page_no, page_size);
    let lightbox = Lightbox::new(NoopEffects);
    render::render_portfolio(config, resolver, index, &state, &page, &lightbox)
}

fn write_page(
    output_dir: &Path,
    rel: &str,
    html: maud::Markup,
    pages: &mut Vec<String>,
) -> Result<(), BuildError> {
    fs::write(output_dir.join(rel), html.into_string())?;
    pages.push(rel.to_string());
    Ok(())
}
