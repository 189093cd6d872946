//! Slideshow state machine.
//!
//! [`Presenter`] owns the loaded catalog, the current index and the summary
//! de-duplication guard. It talks to the outside world only through two
//! seams:
//!
//! - [`SlideView`] - named setters for every visible region
//! - [`SlideBackend`] - fire-and-forget requests for image preloads and
//!   summary fetches
//!
//! Backend completions come back through [`Presenter::image_preloaded`] and
//! [`Presenter::summary_loaded`] as `Result`s, so each request resolves to
//! exactly one success or one failure.

use crate::catalog::{Catalog, CatalogError, MetaField};
use crate::content::{ImageError, Summary, SummaryError};
use std::sync::Arc;

/// Description text shown when the catalog cannot be loaded.
pub const CATALOG_ERROR_TEXT: &str = "Error: Could not load image data.";
/// Summary text shown when the summary fetch fails.
pub const SUMMARY_ERROR_TEXT: &str = "Error: Could not load Wikipedia summary.";
/// Alt text used when a slide's image cannot be preloaded.
pub const IMAGE_NOT_FOUND_ALT: &str = "Image not found";

// ============================================================================
// Seams
// ============================================================================

/// Setter interface for the visible regions of the slideshow.
pub trait SlideView {
    /// Toggle the "image loading" marker on the slide container.
    fn set_loading(&mut self, loading: bool);
    /// Show a successfully preloaded image.
    fn set_image(&mut self, url: &str, alt: &str);
    /// Replace only the image's alt text (used on preload failure).
    fn set_image_alt(&mut self, alt: &str);
    fn set_title(&mut self, text: &str);
    fn set_description(&mut self, text: &str);
    fn set_metadata(&mut self, field: MetaField, text: &str);
    /// Show the "Loading..." placeholder in the summary region.
    fn set_summary_loading(&mut self);
    /// Show a fetched HTML extract in the summary region.
    fn set_summary_html(&mut self, html: &str);
    /// Show a plain-text error in the summary region.
    fn set_summary_error(&mut self, text: &str);
    /// Point the "full article" link at `url` and show it, or hide it.
    fn set_article_link(&mut self, url: Option<&str>);
}

/// An image preload issued for one slide.
///
/// Carries everything the completion needs, so a late result still applies
/// to the slide it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub index: usize,
    pub url: String,
    pub alt: String,
}

/// Side effects requested by the presenter.
///
/// Implementations must not call back into the presenter synchronously;
/// completions are delivered later by the owner of both.
pub trait SlideBackend {
    fn preload_image(&mut self, request: ImageRequest);
    fn request_summary(&mut self, title: &str);
}

/// Catalog load progress, for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

// ============================================================================
// Presenter
// ============================================================================

pub struct Presenter<V, B> {
    view: V,
    backend: B,
    catalog: Arc<Catalog>,
    load_state: LoadState,
    current_index: usize,
    /// Title of the most recently initiated summary fetch. Empty after a
    /// failure so the same title can be retried.
    current_wiki_title: String,
    /// Drop completions that no longer match the current slide.
    discard_stale: bool,
}

impl<V: SlideView, B: SlideBackend> Presenter<V, B> {
    pub fn new(view: V, backend: B) -> Self {
        Self {
            view,
            backend,
            catalog: Arc::new(Catalog::default()),
            load_state: LoadState::Pending,
            current_index: 0,
            current_wiki_title: String::new(),
            discard_stale: false,
        }
    }

    /// Enable or disable dropping of stale image/summary completions.
    ///
    /// Off by default: every completion is applied in arrival order, so a
    /// slow superseded fetch can overwrite a newer one.
    pub fn with_discard_stale(mut self, discard_stale: bool) -> Self {
        self.discard_stale = discard_stale;
        self
    }

    /// Apply the result of the one-shot catalog load.
    pub fn catalog_loaded(&mut self, result: Result<Catalog, CatalogError>) {
        match result {
            Ok(catalog) => {
                self.catalog = Arc::new(catalog);
                self.load_state = LoadState::Loaded;
                if !self.catalog.is_empty() {
                    self.render_slide(self.current_index);
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load image data");
                self.load_state = LoadState::Failed;
                self.view.set_description(CATALOG_ERROR_TEXT);
            }
        }
    }

    /// Show the slide at `index`. No-op when the catalog has no such entry.
    pub fn render_slide(&mut self, index: usize) {
        let catalog = Arc::clone(&self.catalog);
        let Some(slide) = catalog.get(index) else {
            tracing::debug!(index, len = catalog.len(), "No slide at index, ignoring");
            return;
        };

        self.view.set_loading(true);
        self.backend.preload_image(ImageRequest {
            index,
            url: slide.image_url.clone(),
            alt: slide.title.clone(),
        });

        self.view.set_title(&slide.title);
        self.view.set_description(&slide.description);
        for field in MetaField::ALL {
            self.view
                .set_metadata(field, slide.acquisition.display(field));
        }

        self.fetch_summary(&slide.wiki_page_title);

        self.current_index = index;
    }

    /// Step back one slide, wrapping from the first to the last.
    pub fn go_to_previous(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        self.render_slide((self.current_index + len - 1) % len);
    }

    /// Step forward one slide, wrapping from the last to the first.
    pub fn go_to_next(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        self.render_slide((self.current_index + 1) % len);
    }

    /// Start a summary fetch for `title`.
    ///
    /// Skipped entirely (no request, no view change) when `title` is empty
    /// or equals the last initiated title.
    pub fn fetch_summary(&mut self, title: &str) {
        if title.is_empty() || title == self.current_wiki_title {
            tracing::debug!(title, "Summary fetch skipped");
            return;
        }

        self.view.set_summary_loading();
        self.view.set_article_link(None);
        self.current_wiki_title = title.to_string();
        self.backend.request_summary(title);
    }

    /// Apply an image preload completion.
    pub fn image_preloaded(&mut self, request: ImageRequest, result: Result<(), ImageError>) {
        if self.discard_stale && request.index != self.current_index {
            tracing::debug!(
                index = request.index,
                current = self.current_index,
                "Discarding stale image preload"
            );
            return;
        }

        match result {
            Ok(()) => self.view.set_image(&request.url, &request.alt),
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "Image preload failed");
                self.view.set_image_alt(IMAGE_NOT_FOUND_ALT);
            }
        }
        self.view.set_loading(false);
    }

    /// Apply a summary fetch completion for `title`.
    pub fn summary_loaded(&mut self, title: &str, result: Result<Summary, SummaryError>) {
        if self.discard_stale && title != self.current_wiki_title {
            tracing::debug!(
                title,
                current = %self.current_wiki_title,
                "Discarding stale summary"
            );
            return;
        }

        match result {
            Ok(summary) => {
                self.view.set_summary_html(&summary.extract_html);
                self.view.set_article_link(Some(&summary.page_url));
            }
            Err(e) => {
                tracing::error!(title, error = %e, "Failed to load Wikipedia summary");
                self.view.set_summary_error(SUMMARY_ERROR_TEXT);
                self.current_wiki_title.clear();
            }
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_wiki_title(&self) -> &str {
        &self.current_wiki_title
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
