//! Background tasks behind the presenter's [`SlideBackend`] seam.
//!
//! Every request runs on its own tokio task and reports back through the
//! `AppEvent` channel. A task that panics still produces exactly one
//! completion (an `Interrupted` error) plus an `AppEvent::TaskPanicked`.

use crate::app::AppEvent;
use crate::catalog::{load_catalog, CatalogError, CatalogSource};
use crate::content::{preload_image, ImageError, SummaryClient, SummaryError};
use crate::presenter::{ImageRequest, SlideBackend};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Run a future, converting a panic into `Err(panic message)`.
pub async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future).catch_unwind().await.map_err(|panic| {
        if let Some(s) = panic.downcast_ref::<&'static str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        }
    })
}

async fn send_event(tx: &mpsc::Sender<AppEvent>, event: AppEvent, name: &'static str) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(error = %e, event = name, "Channel send failed (receiver dropped)");
    }
}

async fn report_panic(tx: &mpsc::Sender<AppEvent>, task: &'static str, error: &str) {
    tracing::error!(task, error, "Background task panicked");
    send_event(
        tx,
        AppEvent::TaskPanicked {
            task,
            error: error.to_string(),
        },
        "TaskPanicked",
    )
    .await;
}

/// Load the catalog once in the background.
pub fn spawn_catalog_load(
    http: reqwest::Client,
    source: CatalogSource,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = match catch_task_panic(load_catalog(&http, &source)).await {
            Ok(result) => result,
            Err(panic_msg) => {
                report_panic(&tx, "catalog_load", &panic_msg).await;
                Err(CatalogError::Interrupted(panic_msg))
            }
        };
        send_event(&tx, AppEvent::CatalogLoaded(result), "CatalogLoaded").await;
    })
}

/// [`SlideBackend`] that spawns a tokio task per request.
///
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct TaskBackend {
    http: reqwest::Client,
    summaries: SummaryClient,
    /// Relative image locations resolve against this.
    catalog_source: CatalogSource,
    tx: mpsc::Sender<AppEvent>,
}

impl TaskBackend {
    pub fn new(
        http: reqwest::Client,
        summaries: SummaryClient,
        catalog_source: CatalogSource,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            http,
            summaries,
            catalog_source,
            tx,
        }
    }
}

impl SlideBackend for TaskBackend {
    fn preload_image(&mut self, request: ImageRequest) {
        let http = self.http.clone();
        let tx = self.tx.clone();
        let source = self.catalog_source.resolve(&request.url);

        tracing::debug!(index = request.index, url = %request.url, "Spawning image preload");

        tokio::spawn(async move {
            let preload = async {
                let source = source.map_err(|e| ImageError::InvalidSource(e.to_string()))?;
                preload_image(&http, &source).await?;
                Ok::<(), ImageError>(())
            };
            let result = match catch_task_panic(preload).await {
                Ok(result) => result,
                Err(panic_msg) => {
                    report_panic(&tx, "image_preload", &panic_msg).await;
                    Err(ImageError::Interrupted(panic_msg))
                }
            };
            send_event(
                &tx,
                AppEvent::ImagePreloaded { request, result },
                "ImagePreloaded",
            )
            .await;
        });
    }

    fn request_summary(&mut self, title: &str) {
        let client = self.summaries.clone();
        let tx = self.tx.clone();
        let title = title.to_string();

        tracing::debug!(title = %title, "Spawning summary fetch");

        tokio::spawn(async move {
            let result = match catch_task_panic(client.fetch(&title)).await {
                Ok(result) => result,
                Err(panic_msg) => {
                    report_panic(&tx, "summary_fetch", &panic_msg).await;
                    Err(SummaryError::Interrupted(panic_msg))
                }
            };
            send_event(
                &tx,
                AppEvent::SummaryLoaded { title, result },
                "SummaryLoaded",
            )
            .await;
        });
    }
}
