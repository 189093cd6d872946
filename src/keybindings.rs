//! Keybinding registry: maps key events to slideshow actions, with
//! overrides from config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Actions and Contexts
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Previous,
    Next,
    OpenArticle,
    ScrollDown,
    ScrollUp,
    CycleTheme,
    ShowHelp,
    CloseHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Previous => "Previous slide",
            Self::Next => "Next slide",
            Self::OpenArticle => "Open full article in browser",
            Self::ScrollDown => "Scroll summary down",
            Self::ScrollUp => "Scroll summary up",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
            Self::CloseHelp => "Close help",
        }
    }

    /// Parse an action name as written in the `[keybindings]` config table.
    fn from_config_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "quit" => Some(Self::Quit),
            "previous" | "prev" | "go_to_previous" => Some(Self::Previous),
            "next" | "go_to_next" => Some(Self::Next),
            "open_article" | "open" => Some(Self::OpenArticle),
            "scroll_down" => Some(Self::ScrollDown),
            "scroll_up" => Some(Self::ScrollUp),
            "cycle_theme" | "theme" => Some(Self::CycleTheme),
            "show_help" | "help" => Some(Self::ShowHelp),
            "close_help" => Some(Self::CloseHelp),
            _ => None,
        }
    }
}

/// Dispatch context. `Help` is active while the help overlay is shown and
/// falls back to `Global` for keys it does not bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Help,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Parse a key string from config.
    ///
    /// Accepts single characters (`"n"`), named keys (`"Left"`, `"Space"`,
    /// `"Esc"`), function keys (`"F1"`..`"F12"`) and `Ctrl+<char>`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(rest) = s.strip_prefix("Ctrl+").or_else(|| s.strip_prefix("ctrl+")) {
            let mut chars = rest.trim().chars();
            let c = chars.next()?;
            return chars
                .next()
                .is_none()
                .then(|| Self::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        }

        let named = match s.to_lowercase().as_str() {
            "enter" | "return" => Some(KeyCode::Enter),
            "esc" | "escape" => Some(KeyCode::Esc),
            "tab" => Some(KeyCode::Tab),
            "up" => Some(KeyCode::Up),
            "down" => Some(KeyCode::Down),
            "left" => Some(KeyCode::Left),
            "right" => Some(KeyCode::Right),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),
            "pageup" => Some(KeyCode::PageUp),
            "pagedown" => Some(KeyCode::PageDown),
            "backspace" => Some(KeyCode::Backspace),
            "space" => Some(KeyCode::Char(' ')),
            _ => None,
        };
        if let Some(code) = named {
            return Some(Self::plain(code));
        }

        if let Some(n) = s
            .strip_prefix(['F', 'f'])
            .and_then(|n| n.parse::<u8>().ok())
        {
            return (1..=12).contains(&n).then(|| Self::plain(KeyCode::F(n)));
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::char(c)),
            _ => None,
        }
    }

    /// Human-readable label for the help screen and status hints.
    pub fn label(&self) -> String {
        let prefix = if self.modifiers.contains(KeyModifiers::CONTROL) {
            "Ctrl+"
        } else {
            ""
        };
        let name = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };
        format!("{prefix}{name}")
    }
}

// ============================================================================
// Registry
// ============================================================================

const DEFAULT_BINDINGS: &[(Context, KeySpec, Action)] = &[
    (Context::Global, KeySpec::plain(KeyCode::Left), Action::Previous),
    (Context::Global, KeySpec::char('h'), Action::Previous),
    (Context::Global, KeySpec::char('p'), Action::Previous),
    (Context::Global, KeySpec::plain(KeyCode::Right), Action::Next),
    (Context::Global, KeySpec::char('l'), Action::Next),
    (Context::Global, KeySpec::char('n'), Action::Next),
    (Context::Global, KeySpec::char(' '), Action::Next),
    (Context::Global, KeySpec::char('o'), Action::OpenArticle),
    (Context::Global, KeySpec::char('j'), Action::ScrollDown),
    (Context::Global, KeySpec::plain(KeyCode::Down), Action::ScrollDown),
    (Context::Global, KeySpec::char('k'), Action::ScrollUp),
    (Context::Global, KeySpec::plain(KeyCode::Up), Action::ScrollUp),
    (Context::Global, KeySpec::char('T'), Action::CycleTheme),
    (Context::Global, KeySpec::char('?'), Action::ShowHelp),
    (Context::Global, KeySpec::char('q'), Action::Quit),
    (Context::Global, KeySpec::plain(KeyCode::Esc), Action::Quit),
    (Context::Help, KeySpec::plain(KeyCode::Esc), Action::CloseHelp),
    (Context::Help, KeySpec::char('?'), Action::CloseHelp),
];

/// Registry of keybindings with O(1) lookup per (context, key).
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// Bindings in registration order, for the help screen.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::with_capacity(DEFAULT_BINDINGS.len()),
        };
        for &(context, key, action) in DEFAULT_BINDINGS {
            registry.bind(context, key, action);
        }
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        if let Some(previous) = self.lookup.insert((context, key), action) {
            self.bindings
                .retain(|&(c, k, a)| !(c == context && k == key && a == previous));
        }
        self.bindings.push((context, key, action));
    }

    /// Apply overrides from the config `[keybindings]` table.
    ///
    /// Each entry replaces every existing key for that action with the single
    /// given key, in the contexts where the action was bound. Returns a
    /// warning per unknown action name or unparseable key.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = Action::from_config_name(action_name) else {
                warnings.push(format!("Unknown action '{action_name}', ignoring"));
                continue;
            };
            let Some(key) = KeySpec::parse(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{key_str}' for action '{action_name}', ignoring"
                ));
                continue;
            };

            let mut contexts: Vec<Context> = Vec::new();
            for &(c, _, a) in &self.bindings {
                if a == action && !contexts.contains(&c) {
                    contexts.push(c);
                }
            }

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);
            for context in contexts {
                self.bind(context, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key, trying `context` first, then `Global`.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        // Shift is already folded into the character ('T', '?').
        let modifiers = match code {
            KeyCode::Char(_) => modifiers - KeyModifiers::SHIFT,
            _ => modifiers,
        };
        let key = KeySpec::new(code, modifiers);
        self.lookup
            .get(&(context, key))
            .or_else(|| self.lookup.get(&(Context::Global, key)))
            .copied()
    }

    /// Keys bound to `action` in `context`, as display labels.
    pub fn keys_for(&self, context: Context, action: Action) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|(c, _, a)| *c == context && *a == action)
            .map(|(_, k, _)| k.label())
            .collect()
    }

    /// All bindings as (context, key label, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(c, k, a)| (*c, k.label(), *a, a.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn global(reg: &KeybindingRegistry, code: KeyCode) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, Context::Global)
    }

    #[test]
    fn test_default_navigation_keys() {
        let reg = KeybindingRegistry::new();
        for code in [KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('p')] {
            assert_eq!(global(&reg, code), Some(Action::Previous));
        }
        for code in [
            KeyCode::Right,
            KeyCode::Char('l'),
            KeyCode::Char('n'),
            KeyCode::Char(' '),
        ] {
            assert_eq!(global(&reg, code), Some(Action::Next));
        }
    }

    #[test]
    fn test_default_misc_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(global(&reg, KeyCode::Char('o')), Some(Action::OpenArticle));
        assert_eq!(global(&reg, KeyCode::Char('T')), Some(Action::CycleTheme));
        assert_eq!(global(&reg, KeyCode::Char('?')), Some(Action::ShowHelp));
        assert_eq!(global(&reg, KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(global(&reg, KeyCode::Esc), Some(Action::Quit));
        assert_eq!(global(&reg, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_shifted_characters_match() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('T'), KeyModifiers::SHIFT, Context::Global),
            Some(Action::CycleTheme)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('?'), KeyModifiers::SHIFT, Context::Help),
            Some(Action::CloseHelp)
        );
        // Shift on a named key is significant.
        assert_eq!(
            reg.action_for_key(KeyCode::Left, KeyModifiers::SHIFT, Context::Global),
            None
        );
    }

    #[test]
    fn test_help_context_overrides_and_falls_back() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Esc, KeyModifiers::NONE, Context::Help),
            Some(Action::CloseHelp)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Help),
            Some(Action::Quit)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('j'), KeyModifiers::NONE, Context::Help),
            Some(Action::ScrollDown)
        );
    }

    #[test]
    fn test_parse_key_strings() {
        assert_eq!(KeySpec::parse("n"), Some(KeySpec::char('n')));
        assert_eq!(KeySpec::parse("Space"), Some(KeySpec::char(' ')));
        assert_eq!(KeySpec::parse("left"), Some(KeySpec::plain(KeyCode::Left)));
        assert_eq!(KeySpec::parse("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(
            KeySpec::parse("Ctrl+n"),
            Some(KeySpec::new(KeyCode::Char('n'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeySpec::parse("F13"), None);
        assert_eq!(KeySpec::parse("Ctrl+ab"), None);
        assert_eq!(KeySpec::parse("nope"), None);
        assert_eq!(KeySpec::parse(""), None);
    }

    #[test]
    fn test_override_replaces_all_keys_for_action() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("next".to_string(), "Tab".to_string())]);

        let warnings = reg.apply_overrides(&overrides);

        assert!(warnings.is_empty());
        assert_eq!(global(&reg, KeyCode::Tab), Some(Action::Next));
        assert_eq!(global(&reg, KeyCode::Right), None);
        assert_eq!(global(&reg, KeyCode::Char('n')), None);
        assert_eq!(reg.keys_for(Context::Global, Action::Next), vec!["Tab"]);
        // other actions untouched
        assert_eq!(global(&reg, KeyCode::Left), Some(Action::Previous));
    }

    #[test]
    fn test_override_steals_key_from_other_action() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("previous".to_string(), "n".to_string())]);
        reg.apply_overrides(&overrides);

        assert_eq!(global(&reg, KeyCode::Char('n')), Some(Action::Previous));
        assert!(!reg
            .all_bindings()
            .iter()
            .any(|(_, key, action, _)| key == "n" && *action == Action::Next));
    }

    #[test]
    fn test_override_warnings() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([
            ("warp_drive".to_string(), "w".to_string()),
            ("quit".to_string(), "Ctrl+".to_string()),
        ]);

        let mut warnings = reg.apply_overrides(&overrides);
        warnings.sort();

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Cannot parse key"));
        assert!(warnings[1].contains("Unknown action 'warp_drive'"));
        assert_eq!(global(&reg, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_every_action_has_description_and_binding() {
        let reg = KeybindingRegistry::new();
        let bound: Vec<Action> = reg.all_bindings().iter().map(|b| b.2).collect();
        for action in [
            Action::Quit,
            Action::Previous,
            Action::Next,
            Action::OpenArticle,
            Action::ScrollDown,
            Action::ScrollUp,
            Action::CycleTheme,
            Action::ShowHelp,
            Action::CloseHelp,
        ] {
            assert!(bound.contains(&action), "{action:?} unbound");
            assert!(!action.describe().is_empty());
        }
    }
}
