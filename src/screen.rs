//! Terminal-side view model for the slideshow.
//!
//! `Screen` implements [`SlideView`] by recording what each region should
//! show. The renderer in `ui` reads it every frame; nothing here touches the
//! terminal directly.

use crate::catalog::MetaField;
use crate::presenter::SlideView;
use crate::ui::render_html;
use crate::util::strip_control_chars;
use ratatui::text::Line;
use std::collections::HashMap;

/// Placeholder shown while a summary fetch is in flight.
pub const LOADING_TEXT: &str = "Loading...";

/// Contents of the summary region.
///
/// `Loaded` keeps both the raw extract and its rendered lines so the
/// renderer never re-parses markup per frame.
#[derive(Debug, Clone, Default)]
pub enum SummaryPanel {
    #[default]
    Empty,
    Loading,
    Loaded {
        html: String,
        rendered_lines: Vec<Line<'static>>,
    },
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Screen {
    /// Image loading marker on the slide container.
    pub loading: bool,
    /// Location of the last successfully preloaded image.
    pub image_url: Option<String>,
    pub image_alt: String,
    pub title: String,
    pub description: String,
    metadata: HashMap<MetaField, String>,
    pub summary: SummaryPanel,
    /// Target of the "full article" link; `None` while hidden.
    pub article_link: Option<String>,
    /// Scroll offset of the summary region, reset when its content changes.
    pub summary_scroll: usize,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown for one acquisition field.
    pub fn metadata(&self, field: MetaField) -> &str {
        self.metadata.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn summary_line_count(&self) -> usize {
        match &self.summary {
            SummaryPanel::Loaded { rendered_lines, .. } => rendered_lines.len(),
            SummaryPanel::Empty => 0,
            SummaryPanel::Loading | SummaryPanel::Failed(_) => 1,
        }
    }

    pub fn scroll_summary_up(&mut self, lines: usize) {
        self.summary_scroll = self.summary_scroll.saturating_sub(lines);
    }

    pub fn scroll_summary_down(&mut self, lines: usize) {
        let max = self.summary_line_count().saturating_sub(1);
        self.summary_scroll = self.summary_scroll.saturating_add(lines).min(max);
    }
}

impl SlideView for Screen {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_image(&mut self, url: &str, alt: &str) {
        self.image_url = Some(url.to_string());
        self.image_alt = strip_control_chars(alt).into_owned();
    }

    fn set_image_alt(&mut self, alt: &str) {
        self.image_alt = strip_control_chars(alt).into_owned();
    }

    fn set_title(&mut self, text: &str) {
        self.title = strip_control_chars(text).into_owned();
    }

    fn set_description(&mut self, text: &str) {
        self.description = strip_control_chars(text).into_owned();
    }

    fn set_metadata(&mut self, field: MetaField, text: &str) {
        self.metadata
            .insert(field, strip_control_chars(text).into_owned());
    }

    fn set_summary_loading(&mut self) {
        self.summary = SummaryPanel::Loading;
        self.summary_scroll = 0;
    }

    fn set_summary_html(&mut self, html: &str) {
        self.summary = SummaryPanel::Loaded {
            html: html.to_string(),
            rendered_lines: render_html(html),
        };
        self.summary_scroll = 0;
    }

    fn set_summary_error(&mut self, text: &str) {
        self.summary = SummaryPanel::Failed(text.to_string());
        self.summary_scroll = 0;
    }

    fn set_article_link(&mut self, url: Option<&str>) {
        self.article_link = url.map(String::from);
    }
}
