//! Help overlay: scrollable keybinding table.
//!
//! Shows the live bindings, so user overrides from config appear here.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

const CONTEXT_ORDER: [(Context, &str); 2] = [
    (Context::Global, "Slideshow"),
    (Context::Help, "Help overlay"),
];

/// Render the help overlay on top of the slideshow.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let bindings = app.keybindings.all_bindings();
    let mut rows: Vec<Row> = Vec::new();

    for (ctx, label) in &CONTEXT_ORDER {
        let ctx_bindings: Vec<_> = bindings.iter().filter(|(c, _, _, _)| c == ctx).collect();
        if ctx_bindings.is_empty() {
            continue;
        }

        rows.push(
            Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {label} --"),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.style("panel_title")),
        );

        for (_, key, _, description) in ctx_bindings {
            rows.push(Row::new(vec![
                Line::styled(format!("  {key}"), app.style("help_key")),
                Line::styled(description.to_string(), app.style("help_text")),
            ]));
        }

        rows.push(Row::new(vec![String::new(), String::new()]));
    }
    rows.pop();

    let total_rows = rows.len();
    let visible_height = overlay.height.saturating_sub(3) as usize;
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    let table = Table::new(
        visible_rows,
        [Constraint::Length(14), Constraint::Min(16)],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border"))
            .title(Span::styled(title, app.style("panel_title"))),
    )
    .header(
        Row::new(vec!["Key", "Action"])
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::UNDERLINED),
            )
            .bottom_margin(1),
    );

    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint = Line::styled(" j/k to scroll, ? or Esc to close ", app.style("help_text"));
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}

/// Number of rows the help table has, for clamping the scroll offset.
pub fn row_count(app: &App) -> usize {
    let bindings = app.keybindings.all_bindings();
    let groups = CONTEXT_ORDER
        .iter()
        .filter(|(ctx, _)| bindings.iter().any(|(c, _, _, _)| c == ctx))
        .count();
    // One header per group, blank separators between groups.
    bindings.len() + groups + groups.saturating_sub(1)
}

/// A rectangle centered in `area`, sized as a percentage of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let r = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(r, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn test_centered_rect_offset_parent() {
        let r = centered_rect(80, 80, Rect::new(10, 5, 50, 10));
        assert_eq!(r, Rect::new(15, 6, 40, 8));
    }
}
