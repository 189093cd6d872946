//! Slide panel: image line, title, description and acquisition metadata.

use crate::app::App;
use crate::catalog::MetaField;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::SPINNER;

/// Width of the metadata label column: the longest label plus a colon.
const LABEL_WIDTH: u16 = 14;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let screen = app.screen();

    let title = if screen.title.is_empty() {
        " Slide ".to_string()
    } else {
        let room = (area.width as usize).saturating_sub(4);
        format!(" {} ", truncate_to_width(&screen.title, room))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(Span::styled(title, app.style("panel_title")));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 4 || inner.height < 3 {
        return;
    }

    let meta_height = MetaField::ALL.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(meta_height),
        ])
        .split(inner);

    render_image_line(f, app, chunks[0]);

    let mut text = Vec::new();
    if !screen.title.is_empty() {
        text.push(Line::styled(screen.title.clone(), app.style("slide_title")));
        text.push(Line::default());
    }
    text.push(Line::styled(
        screen.description.clone(),
        app.style("slide_description"),
    ));
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), chunks[1]);

    let rows = MetaField::ALL.iter().map(|&field| {
        Row::new(vec![
            Line::styled(format!("{}:", field.label()), app.style("meta_label")),
            Line::styled(
                screen.metadata(field).to_string(),
                app.style("meta_value"),
            ),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(LABEL_WIDTH), Constraint::Min(1)]);
    f.render_widget(table, chunks[2]);
}

/// Image location with its alt text, or a spinner while preloading.
fn render_image_line(f: &mut Frame, app: &App, area: Rect) {
    let screen = app.screen();
    let room = (area.width as usize).saturating_sub(8);

    let line = if screen.loading {
        Line::from(vec![
            Span::styled(
                format!("{} ", SPINNER[app.spinner_frame % SPINNER.len()]),
                app.style("slide_loading"),
            ),
            Span::styled("Loading image...", app.style("slide_loading")),
        ])
    } else {
        let location = screen.image_url.as_deref().unwrap_or("-");
        let mut spans = vec![
            Span::styled("Image: ", app.style("meta_label")),
            Span::styled(
                truncate_to_width(location, room).into_owned(),
                app.style("slide_image"),
            ),
        ];
        if !screen.image_alt.is_empty() {
            spans.push(Span::styled(
                format!(" [{}]", screen.image_alt),
                app.style("meta_value"),
            ));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line), area);
}
