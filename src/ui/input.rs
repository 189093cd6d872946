//! Keyboard input, dispatched through the keybinding registry.

use crate::app::App;
use crate::keybindings::{Action as KbAction, Context};
use crate::util::validate_url_for_open;
use crossterm::event::{KeyCode, KeyModifiers};

use super::help;
use super::Action;

pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    // Raw mode swallows SIGINT, so Ctrl+C arrives as a key.
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if app.show_help {
        handle_help_input(app, code, modifiers);
        return Action::Continue;
    }

    match app
        .keybindings
        .action_for_key(code, modifiers, Context::Global)
    {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::Previous) => app.presenter.go_to_previous(),
        Some(KbAction::Next) => app.presenter.go_to_next(),
        Some(KbAction::ScrollDown) => app.presenter.view_mut().scroll_summary_down(1),
        Some(KbAction::ScrollUp) => app.presenter.view_mut().scroll_summary_up(1),
        Some(KbAction::OpenArticle) => open_article(app),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {name}"));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        Some(KbAction::CloseHelp) | None => {}
    }
    Action::Continue
}

/// While the overlay is up, every key goes here. Help-context bindings win,
/// then global scroll and quit keys act on the overlay.
fn handle_help_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.keybindings.action_for_key(code, modifiers, Context::Help) {
        Some(KbAction::CloseHelp | KbAction::ShowHelp | KbAction::Quit) => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        Some(KbAction::ScrollDown) => {
            let max = help::row_count(app).saturating_sub(1);
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1).min(max);
        }
        Some(KbAction::ScrollUp) => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
}

fn open_article(app: &mut App) {
    let Some(link) = app.screen().article_link.clone() else {
        app.set_status("No article link for this slide");
        return;
    };

    match validate_url_for_open(&link) {
        Err(e) => {
            tracing::warn!(url = %link, error = %e, "Refusing to open article link");
            app.set_status(e.to_string());
        }
        Ok(url) => {
            if let Err(e) = open::that(url.as_str()) {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
                app.set_status(format!("Failed to open browser: {e}"));
            } else {
                app.set_status("Opening article in browser...");
            }
        }
    }
}
