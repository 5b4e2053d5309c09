//! HTML rendering for the four visitor views.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating —
//! type-safe templates with automatic XSS escaping and no runtime template
//! files. CSS and the lightbox shim are embedded at compile time.
//!
//! Every render function takes *resolved* content (plain values, never
//! `RemoteContent`): by the time markup is produced, fallbacks have already
//! been applied and no error state can leak into a page.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): full-bleed background with title and tagline
//! - **Portfolio** (`/portfolio/{category}/{n}.html`): filterable grid,
//!   one page per (facet, page number) pair so links are shareable
//! - **About** (`/about.html`): biography plus supporting images
//! - **Featured** (`/featured.html`): the weekly image with capture data

use crate::assets::{AssetResolver, category_slug};
use crate::catalog::{ALL_WORK, CatalogIndex};
use crate::config::SiteConfig;
use crate::gallery::{GalleryPage, GalleryViewState};
use crate::lightbox::{Lightbox, ViewportEffects};
use crate::model::{AboutContent, Featured, Image};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS: &str = include_str!("../static/style.css");
const LIGHTBOX_JS: &str = include_str!("../static/lightbox.js");

/// Site-absolute path of a portfolio page for a facet label, using the
/// index's unique slug assignment so links always match the written files.
/// Stable across builds so shared links keep working; page 1 of "All Work"
/// doubles as the portfolio landing page.
pub fn page_href(index: &CatalogIndex, label: &str, page: usize) -> String {
    if label == ALL_WORK && page == 1 {
        return "/portfolio/index.html".to_string();
    }
    let slug = index
        .slug(label)
        .map(str::to_string)
        .unwrap_or_else(|| category_slug(label));
    format!("/portfolio/{slug}/{page}.html")
}

/// Renders the base HTML document structure. `head_extra` lands inside
/// `<head>`, for per-view metadata like the canonical link.
fn base_document(title: &str, head_extra: Option<Markup>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(extra) = head_extra {
                    (extra)
                }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
                script { (PreEscaped(LIGHTBOX_JS)) }
            }
        }
    }
}

fn site_header(config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            a.brand href="/index.html" { (config.site.title) }
            nav.site-nav {
                a href="/index.html" { "Home" }
                a href="/portfolio/index.html" { "Portfolio" }
                a href="/about.html" { "About" }
                a href="/featured.html" { "Featured" }
            }
        }
    }
}

/// The home view: dynamic background (or the solid-color fallback baseline)
/// behind the site identity. Never blank — a failed background fetch has
/// already been resolved to `None` by the caller.
pub fn render_home(config: &SiteConfig, background_url: Option<&str>) -> Markup {
    let hero_style = match background_url {
        Some(url) => format!("background-image:url('{url}')"),
        None => format!("background-color:{}", config.fallbacks.background_color),
    };
    base_document(
        &config.site.title,
        None,
        html! {
            (site_header(config))
            div.hero style=(hero_style) {
                h1 { (config.site.title) }
                h3.tagline { (config.site.tagline) }
                a.button href="/portfolio/index.html" { "View Portfolio" }
            }
        },
    )
}

/// One portfolio page: facet filters with counts, the visible grid slice,
/// pagination, and the lightbox container.
pub fn render_portfolio<E: ViewportEffects>(
    config: &SiteConfig,
    resolver: &AssetResolver,
    index: &CatalogIndex,
    state: &GalleryViewState,
    page: &GalleryPage<'_>,
    lightbox: &Lightbox<E>,
) -> Markup {
    let title = format!("Portfolio — {}", config.site.title);
    let canonical = html! {
        link rel="canonical" href=(format!("/portfolio/?{}", state.to_query()));
    };
    base_document(
        &title,
        Some(canonical),
        html! {
            (site_header(config))
            div.page {
                h1.page-title { "Portfolio" }
                p.lede {
                    "Explore The Collection! There are currently "
                    (index.count(ALL_WORK))
                    " images on the Portfolio."
                }
                p.lede {
                    "The images are categorized for easy navigation. \
                     All images are clickable to view a larger version."
                }
                div.filters {
                    @for facet in index.facets() {
                        a.filter.active[facet.label == state.selected_category]
                            href=(page_href(index, &facet.label, 1)) {
                            (facet.label)
                            span.count { (facet.count) }
                        }
                    }
                }
                @if page.items.is_empty() {
                    p.empty { "No images found in this category." }
                } @else {
                    div.grid {
                        @for image in page.items.iter().copied() {
                            (image_card(resolver, image))
                        }
                    }
                }
                @if page.total_pages > 1 {
                    (pagination(index, &state.selected_category, page))
                }
            }
            (render_lightbox(lightbox, resolver))
        },
    )
}

fn image_card(resolver: &AssetResolver, image: &Image) -> Markup {
    let src = resolver.resolve(image);
    let alt = if image.title.is_empty() {
        "Portfolio image"
    } else {
        &image.title
    };
    html! {
        figure.card data-image-id=(image.id) data-full=(src) data-title=(image.title) {
            img src=(src) alt=(alt) loading="lazy";
            figcaption {
                @if !image.title.is_empty() {
                    h3 { (image.title) }
                }
                @for category in &image.categories {
                    span.badge { (category) }
                }
            }
        }
    }
}

fn pagination(index: &CatalogIndex, category: &str, page: &GalleryPage<'_>) -> Markup {
    html! {
        nav.pagination {
            @if page.page > 1 {
                a href=(page_href(index, category, page.page - 1)) { "Previous" }
            } @else {
                span.disabled { "Previous" }
            }
            @for n in 1..=page.total_pages {
                @if n == page.page {
                    span.current { (n) }
                } @else {
                    a href=(page_href(index, category, n)) { (n) }
                }
            }
            @if page.page < page.total_pages {
                a href=(page_href(index, category, page.page + 1)) { "Next" }
            } @else {
                span.disabled { "Next" }
            }
        }
    }
}

/// The lightbox container. Rendered from the state machine: closed emits the
/// hidden shell the JS shim populates; open emits the active image (used for
/// pre-opened deep links).
pub fn render_lightbox<E: ViewportEffects>(
    lightbox: &Lightbox<E>,
    resolver: &AssetResolver,
) -> Markup {
    match lightbox.active() {
        Some(image) => html! {
            div #lightbox {
                button.lightbox-close aria-label="Close" { "\u{d7}" }
                img src=(resolver.resolve(image)) alt=(image.title);
            }
        },
        None => html! {
            div #lightbox hidden {
                button.lightbox-close aria-label="Close" { "\u{d7}" }
                img alt="";
            }
        },
    }
}

/// The about view: biography (markdown subset) plus supporting images.
pub fn render_about(
    config: &SiteConfig,
    resolver: &AssetResolver,
    about: &AboutContent,
    images: &[Image],
) -> Markup {
    let title = format!("About — {}", config.site.title);
    base_document(
        &title,
        None,
        html! {
            (site_header(config))
            div.page {
                h1.page-title { (about.title) }
                p.lede { (config.site.tagline) }
                div.prose {
                    (markdown(&about.content))
                }
                @if !images.is_empty() {
                    div.grid {
                        @for image in images {
                            (image_card(resolver, image))
                        }
                    }
                }
            }
        },
    )
}

/// The weekly featured view. `None` renders the hand-authored placeholder;
/// a failed fetch never surfaces an error message here.
pub fn render_featured(
    config: &SiteConfig,
    resolver: &AssetResolver,
    featured: Option<&Featured>,
) -> Markup {
    let title = format!("Featured — {}", config.site.title);
    base_document(
        &title,
        None,
        html! {
            (site_header(config))
            div.page {
                h1.page-title { "Weekly Featured Image" }
                @match featured {
                    Some(feat) => {
                        figure.card data-full=(resolver.resolve_filename(&feat.filename))
                            data-title=(feat.title) {
                            img src=(resolver.resolve_filename(&feat.filename)) alt=(feat.title);
                            figcaption {
                                span.badge { (feat.title) }
                                @if let Some(category) = feat.categories.first() {
                                    span.badge { (category) }
                                }
                            }
                        }
                        (exif_card(feat))
                        @if let Some(story) = &feat.story {
                            div.story {
                                h3 { "The Story Behind the Shot" }
                                p { (story) }
                            }
                        }
                    },
                    None => {
                        p.empty { (config.fallbacks.featured_note) }
                    },
                }
            }
            (render_lightbox(&Lightbox::new(crate::lightbox::NoopEffects), resolver))
        },
    )
}

/// Capture-information card. Absent fields are skipped entirely; when no
/// field carries a value the card shows a single unavailable note.
fn exif_card(featured: &Featured) -> Markup {
    let exif = featured.exif.as_ref();
    let rows = exif.map_or_else(Vec::new, |e| {
        let mut rows: Vec<(&str, String)> = Vec::new();
        if let Some(camera) = &e.camera {
            rows.push(("Camera", camera.clone()));
        }
        if let Some(lens) = &e.lens {
            rows.push(("Lens", lens.clone()));
        }
        if let Some(aperture) = &e.aperture {
            rows.push(("Aperture", format!("f/{aperture}")));
        }
        if let Some(shutter) = &e.shutter_speed {
            rows.push(("Shutter", format!("{shutter}s")));
        }
        if let Some(iso) = &e.iso {
            rows.push(("ISO", iso.clone()));
        }
        if let Some(date) = &e.date_taken {
            rows.push(("Date", date.clone()));
        }
        rows
    });
    html! {
        div.exif-card {
            h3 { "Image Capture Information" }
            @if rows.is_empty() {
                p.unavailable { "EXIF data not available for this image" }
            } @else {
                dl {
                    @for (label, value) in &rows {
                        dt { (label) ":" }
                        dd { (value) }
                    }
                }
            }
        }
    }
}

/// Render the biography markup subset (bold, italic, line breaks) to HTML.
fn markdown(src: &str) -> Markup {
    let parser = Parser::new(src);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}
