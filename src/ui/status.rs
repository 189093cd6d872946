use crate::app::App;
use crate::keybindings::{Action, Context};
use crate::presenter::LoadState;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Hints shown when no status message is active, in display order.
const HINTS: [(Action, &str); 6] = [
    (Action::Previous, "prev"),
    (Action::Next, "next"),
    (Action::OpenArticle, "open"),
    (Action::CycleTheme, "theme"),
    (Action::ShowHelp, "help"),
    (Action::Quit, "quit"),
];

/// Render the status bar: message or key hints on the left, slide position
/// on the right.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let position = position_text(app);
    let position_width = (position.len() as u16 + 1).min(area.width);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(position_width)])
        .split(area);

    let text: Cow<'_, str> = match &app.status_message {
        Some((msg, _)) => Cow::Borrowed(msg.as_ref()),
        None => Cow::Owned(key_hints(app)),
    };
    let text = truncate_to_width(&text, chunks[0].width as usize).into_owned();

    f.render_widget(
        Paragraph::new(Span::styled(text, app.style("status_bar"))).style(app.style("status_bar")),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(position, app.style("status_position")))
            .style(app.style("status_bar")),
        chunks[1],
    );
}

/// "[←] prev [→] next ..." from the first key bound to each action.
fn key_hints(app: &App) -> String {
    HINTS
        .iter()
        .filter_map(|&(action, label)| {
            app.keybindings
                .keys_for(Context::Global, action)
                .into_iter()
                .next()
                .map(|key| format!("[{key}] {label}"))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn position_text(app: &App) -> String {
    let catalog = app.presenter.catalog();
    match app.presenter.load_state() {
        LoadState::Pending => "Loading catalog ".to_string(),
        LoadState::Failed => "Catalog unavailable ".to_string(),
        LoadState::Loaded if catalog.is_empty() => "No slides ".to_string(),
        LoadState::Loaded => format!(
            "{}/{} ",
            app.presenter.current_index() + 1,
            catalog.len()
        ),
    }
}
