use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Terminal columns occupied by `s`.
///
/// ```
/// use astroslide::util::display_width;
///
/// assert_eq!(display_width("M31"), 3);
/// assert_eq!(display_width("星雲"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncate `s` to at most `max_width` columns, ending with `...` when cut.
///
/// Widths too narrow for the ellipsis get a plain cut instead.
///
/// ```
/// use astroslide::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Andromeda Galaxy", 12), "Andromeda...");
/// assert_eq!(truncate_to_width("M42", 10), "M42");
/// assert_eq!(truncate_to_width("Orion", 2), "Or");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if s.width() <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS.len() {
        return Cow::Borrowed(take_columns(s, max_width));
    }
    let head = take_columns(s, max_width - ELLIPSIS.len());
    Cow::Owned(format!("{head}{ELLIPSIS}"))
}

/// Longest prefix of `s` that fits in `columns`.
fn take_columns(s: &str, columns: usize) -> &str {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        used += c.width().unwrap_or(0);
        // emoji presentation sequences can widen the prefix as a whole
        if used > columns || s[..i + c.len_utf8()].width() > columns {
            return &s[..i];
        }
    }
    s
}

fn is_stripped(c: char) -> bool {
    c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r')
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Catalog and summary text is remote input rendered straight into the
/// terminal. CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL|ESC \`)
/// sequences are dropped whole, other C0 controls and DEL individually.
/// Tab, newline and carriage return survive.
///
/// Borrows when there is nothing to strip.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
        } else if !is_stripped(c) {
            out.push(c);
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("Short", 5), "Short");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // 2 columns each; 7 - 3 leaves room for two
        assert_eq!(truncate_to_width("天文写真集", 7), "天文...");
        // never splits a wide char
        assert_eq!(truncate_to_width("天文写真集", 8), "天文...");
    }

    #[test]
    fn test_truncate_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test!", 1), "T");
        assert_eq!(truncate_to_width("Test!", 3), "Tes");
    }

    #[test]
    fn test_strip_clean_text_borrows() {
        assert!(matches!(
            strip_control_chars("Orion Nebula\tM42\n"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_strip_csi_and_osc() {
        assert_eq!(strip_control_chars("M\x1b[1;31m42\x1b[0m"), "M42");
        assert_eq!(
            strip_control_chars("a\x1b]0;title\x07b\x1b]8;;http://x\x1b\\c"),
            "abc"
        );
    }

    #[test]
    fn test_strip_bare_controls() {
        assert_eq!(strip_control_chars("a\x00b\x7fc\x1bd"), "abcd");
    }

    proptest! {
        #[test]
        fn prop_truncate_fits(s in "\\PC{0,40}", width in 0usize..30) {
            prop_assert!(display_width(&truncate_to_width(&s, width)) <= width);
        }

        #[test]
        fn prop_strip_leaves_no_controls(s in "\\PC{0,20}[\\x00-\\x1f\\x7f]{0,5}\\PC{0,20}") {
            let out = strip_control_chars(&s);
            prop_assert!(!out.chars().any(is_stripped));
        }
    }
}
