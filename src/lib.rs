//! # Showfolio
//!
//! A presentation engine for photography portfolios whose content lives in
//! an external content manager. The collaborator produces everything —
//! images, categories, the home background, about text, the weekly featured
//! image — as JSON plus static asset URLs; showfolio fetches that content,
//! normalizes it into strict shapes, degrades gracefully when it is slow,
//! malformed, or absent, and renders the visitor-facing views.
//!
//! # Architecture: One-Way Content Flow
//!
//! ```text
//! Fetcher → Fallback Resolver → Catalog Indexer → Filter/Paginate → views
//!                                                                     ↓
//!                                                     Lightbox on selection
//! ```
//!
//! Each stage only sees the previous stage's output:
//!
//! - **Fetch boundary**: dynamic JSON is validated into strict types; every
//!   outcome folds into `RemoteContent` (loaded / empty / failed). Nothing
//!   downstream handles transport or parse errors.
//! - **Resolution boundary**: every remote value becomes a plain renderable
//!   value exactly once; failures turn into hand-authored baselines and a
//!   log line, never an error screen.
//! - **Presentation**: facets, pagination, and views are pure functions of
//!   the resolved collection, so the same content always renders the same
//!   pages.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | Resource keys, HTTP transport, payload validation, `RemoteContent` |
//! | [`resolve`] | Fallback resolution at the fetch → presentation boundary |
//! | [`model`] | Strict internal content shapes and normalization rules |
//! | [`catalog`] | Facet derivation from the image collection |
//! | [`gallery`] | Filtering, pagination, addressable view state |
//! | [`session`] | View keys and stale-response discarding |
//! | [`lightbox`] | Modal viewer state machine with owned viewport effects |
//! | [`assets`] | Pure asset-URL resolution and category slugs |
//! | [`render`] | Maud templates for the four visitor views |
//! | [`site`] | The fetch → resolve → render pipeline |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Re-fetch on Navigation, Never on a Timer
//!
//! Content is edited externally at unpredictable times. The engine
//! re-fetches whenever a view is (re)visited — optionally cache-busted — so
//! visitors pick up edits without the complexity of polling or push
//! channels. A request is tagged with the view it serves; if the visitor
//! has navigated on by the time it settles, the response is discarded
//! (see [`session`]).
//!
//! ## Local Facet Derivation
//!
//! The content manager serves a category list, but facets are always
//! recomputed from the image collection itself. That keeps label counts
//! consistent with what the grid actually shows and makes an orphan
//! category (zero remaining images) impossible.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked, type-safe, XSS-safe by default, and no template directory to
//! ship or get out of sync.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod gallery;
pub mod lightbox;
pub mod model;
pub mod output;
pub mod render;
pub mod resolve;
pub mod session;
pub mod site;
