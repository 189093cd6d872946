//! Frame layout: slide panel beside the summary panel, with the article
//! link and status bar underneath.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use super::{help, slide, status, summary};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[0]);

    slide::render(f, app, panels[0]);
    summary::render(f, app, panels[1]);
    summary::render_link(f, app, rows[1]);
    status::render(f, app, rows[2]);

    if app.show_help {
        help::render(f, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::catalog::{Catalog, Slide};
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn slide(title: &str) -> Slide {
        Slide {
            image_url: "images/m31.jpg".to_string(),
            title: title.to_string(),
            description: "A spiral galaxy.".to_string(),
            wiki_page_title: String::new(),
            acquisition: Default::default(),
        }
    }

    fn app() -> App {
        let (tx, _rx) = mpsc::channel::<AppEvent>(16);
        App::new(&Config::default(), tx).unwrap()
    }

    #[tokio::test]
    async fn test_too_small_message() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Terminal too small"));
    }

    #[tokio::test]
    async fn test_renders_slide_and_position() {
        let mut app = app();
        app.presenter
            .catalog_loaded(Ok(Catalog::new(vec![slide("Andromeda"), slide("Orion")])));

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Andromeda"));
        assert!(text.contains("1/2"));
        assert!(text.contains("Integration:"));
        assert!(text.contains("N/A"));
    }

    #[tokio::test]
    async fn test_pending_catalog_status() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Loading catalog"));
    }

    #[tokio::test]
    async fn test_help_overlay_lists_actions() {
        let mut app = app();
        app.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Help"));
        assert!(text.contains("Next slide"));
    }
}
