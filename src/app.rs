use crate::catalog::{Catalog, CatalogError, CatalogSource};
use crate::config::Config;
use crate::content::{ImageError, Summary, SummaryClient, SummaryError};
use crate::keybindings::KeybindingRegistry;
use crate::presenter::{ImageRequest, LoadState, Presenter};
use crate::screen::{Screen, SummaryPanel};
use crate::tasks::{spawn_catalog_load, TaskBackend};
use crate::theme::{StyleMap, ThemeVariant};
use anyhow::{Context, Result};
use ratatui::style::Style;
use reqwest::redirect::Policy;
use std::borrow::Cow;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Redirect policy: at most 5 hops, loops rejected, chain logged.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 5 {
            return attempt.error("Too many redirects (max 5)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev == url) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Shared HTTP client for catalog, image and summary requests.
pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

// ============================================================================
// Events
// ============================================================================

/// Completions from background tasks.
pub enum AppEvent {
    /// The one-shot catalog load finished.
    CatalogLoaded(Result<Catalog, CatalogError>),
    /// An image preload finished.
    ImagePreloaded {
        request: ImageRequest,
        result: Result<(), ImageError>,
    },
    /// A summary fetch for `title` finished.
    SummaryLoaded {
        title: String,
        result: Result<Summary, SummaryError>,
    },
    /// A background task panicked. Its request has already been resolved
    /// with an `Interrupted` error; this only drives the status line.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub presenter: Presenter<Screen, TaskBackend>,
    pub http_client: reqwest::Client,
    pub catalog_source: CatalogSource,
    event_tx: mpsc::Sender<AppEvent>,

    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Dirty flag: skip frames when nothing changed.
    pub needs_redraw: bool,
    /// Loading spinner frame, advanced by the tick handler.
    pub spinner_frame: usize,

    pub show_help: bool,
    pub help_scroll_offset: usize,
}

impl App {
    /// Build the application from resolved configuration.
    ///
    /// Fails on an unusable catalog location, an insecure or malformed
    /// summary base URL, or an HTTP client that cannot be built.
    pub fn new(config: &Config, event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let http_client = build_http_client(config.request_timeout())
            .context("Failed to build HTTP client")?;

        let catalog_source = CatalogSource::parse(&config.catalog)
            .with_context(|| format!("Invalid catalog location '{}'", config.catalog))?;

        let summaries = SummaryClient::new(
            http_client.clone(),
            &config.summary_base_url,
            config.client_id.clone(),
        )
        .with_context(|| format!("Invalid summary base URL '{}'", config.summary_base_url))?;

        let backend = TaskBackend::new(
            http_client.clone(),
            summaries,
            catalog_source.clone(),
            event_tx.clone(),
        );
        let presenter = Presenter::new(Screen::new(), backend)
            .with_discard_stale(config.discard_stale_results);

        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        let warnings = keybindings.apply_overrides(&config.keybindings);
        for warning in &warnings {
            tracing::warn!(warning = %warning, "Keybinding override skipped");
        }

        let mut app = Self {
            presenter,
            http_client,
            catalog_source,
            event_tx,
            theme_variant,
            theme: StyleMap::from(theme_variant),
            keybindings,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            show_help: false,
            help_scroll_offset: 0,
        };
        if let Some(first) = warnings.into_iter().next() {
            app.set_status(first);
        }
        Ok(app)
    }

    /// Kick off the one-shot catalog load.
    pub fn load_catalog(&self) -> JoinHandle<()> {
        tracing::info!(source = %self.catalog_source, "Loading slide catalog");
        spawn_catalog_load(
            self.http_client.clone(),
            self.catalog_source.clone(),
            self.event_tx.clone(),
        )
    }

    pub fn screen(&self) -> &Screen {
        self.presenter.view()
    }

    /// Whether anything is in flight that the spinner should reflect.
    pub fn is_busy(&self) -> bool {
        let screen = self.screen();
        self.presenter.load_state() == LoadState::Pending
            || screen.loading
            || matches!(screen.summary, SummaryPanel::Loading)
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from(variant);
        self.needs_redraw = true;
    }

    /// Dark → Light → Dark. Returns the new theme's name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set a status message; it expires after a few seconds.
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Drop the status message once expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status_message {
            Some((_, at)) if at.elapsed() >= STATUS_TTL => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }
}
