//! Background task completions, applied to the presenter.

use crate::app::{App, AppEvent};

pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::CatalogLoaded(result) => {
            if let Err(e) = &result {
                app.set_status(format!("Catalog load failed: {e}"));
            }
            app.presenter.catalog_loaded(result);
        }
        AppEvent::ImagePreloaded { request, result } => {
            app.presenter.image_preloaded(request, result);
        }
        AppEvent::SummaryLoaded { title, result } => {
            app.presenter.summary_loaded(&title, result);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            app.set_status(format!("Internal error in {task} task"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogError, Slide};
    use crate::config::Config;
    use crate::content::{Summary, SummaryError};
    use crate::presenter::{ImageRequest, LoadState, SUMMARY_ERROR_TEXT};
    use crate::screen::SummaryPanel;
    use tokio::sync::mpsc;

    fn app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (App::new(&Config::default(), tx).unwrap(), rx)
    }

    fn slide(title: &str, wiki: &str) -> Slide {
        Slide {
            image_url: format!("images/{title}.jpg"),
            title: title.to_string(),
            wiki_page_title: wiki.to_string(),
            ..Slide::default()
        }
    }

    #[tokio::test]
    async fn test_catalog_failure_sets_status() {
        let (mut app, _rx) = app();
        let err = CatalogError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        handle_app_event(&mut app, AppEvent::CatalogLoaded(Err(err)));

        assert_eq!(app.presenter.load_state(), LoadState::Failed);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.starts_with("Catalog load failed"));
    }

    #[tokio::test]
    async fn test_image_and_summary_completions_reach_screen() {
        let (mut app, _rx) = app();
        handle_app_event(
            &mut app,
            AppEvent::CatalogLoaded(Ok(Catalog::new(vec![slide("M31", "Andromeda Galaxy")]))),
        );
        assert!(app.screen().loading);

        let request = ImageRequest {
            index: 0,
            url: "images/M31.jpg".to_string(),
            alt: "M31".to_string(),
        };
        handle_app_event(
            &mut app,
            AppEvent::ImagePreloaded {
                request,
                result: Ok(()),
            },
        );
        assert!(!app.screen().loading);
        assert_eq!(app.screen().image_url.as_deref(), Some("images/M31.jpg"));

        handle_app_event(
            &mut app,
            AppEvent::SummaryLoaded {
                title: "Andromeda Galaxy".to_string(),
                result: Ok(Summary {
                    extract_html: "<p>A spiral galaxy.</p>".to_string(),
                    page_url: "https://en.wikipedia.org/wiki/Andromeda_Galaxy".to_string(),
                }),
            },
        );
        assert!(matches!(app.screen().summary, SummaryPanel::Loaded { .. }));
        assert!(app.screen().article_link.is_some());
    }

    #[tokio::test]
    async fn test_summary_failure_shows_error_text() {
        let (mut app, _rx) = app();
        handle_app_event(
            &mut app,
            AppEvent::CatalogLoaded(Ok(Catalog::new(vec![slide("M42", "Orion Nebula")]))),
        );
        handle_app_event(
            &mut app,
            AppEvent::SummaryLoaded {
                title: "Orion Nebula".to_string(),
                result: Err(SummaryError::Interrupted("boom".to_string())),
            },
        );
        assert!(
            matches!(&app.screen().summary, SummaryPanel::Failed(text) if text == SUMMARY_ERROR_TEXT)
        );
        assert_eq!(app.presenter.current_wiki_title(), "");
    }

    #[tokio::test]
    async fn test_panic_event_sets_status() {
        let (mut app, _rx) = app();
        handle_app_event(
            &mut app,
            AppEvent::TaskPanicked {
                task: "summary_fetch",
                error: "boom".to_string(),
            },
        );
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Internal error in summary_fetch task");
    }
}
