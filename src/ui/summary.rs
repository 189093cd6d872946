//! Summary panel: the Wikipedia extract, plus the "full article" link line.

use crate::app::App;
use crate::screen::{SummaryPanel, LOADING_TEXT};
use crate::util::{strip_control_chars, truncate_to_width};
use quick_xml::escape::unescape_with;
use quick_xml::events::Event;
use quick_xml::Reader;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::SPINNER;

/// Render the summary panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let screen = app.screen();
    let text = match &screen.summary {
        SummaryPanel::Empty => Text::default(),
        SummaryPanel::Loading => Text::from(Line::from(vec![
            Span::styled(
                format!("{} ", SPINNER[app.spinner_frame % SPINNER.len()]),
                app.style("summary_loading"),
            ),
            Span::styled(LOADING_TEXT, app.style("summary_loading")),
        ])),
        SummaryPanel::Loaded { rendered_lines, .. } => {
            Text::from(rendered_lines.clone()).style(app.style("summary_body"))
        }
        SummaryPanel::Failed(message) => {
            Text::from(Line::styled(message.clone(), app.style("summary_error")))
        }
    };

    let scroll = screen.summary_scroll.min(u16::MAX as usize) as u16;
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title(Span::styled(" Wikipedia ", app.style("panel_title"))),
        )
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));

    f.render_widget(paragraph, area);
}

/// Render the "full article" link line. Empty while the link is hidden.
pub fn render_link(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    let Some(url) = app.screen().article_link.as_deref() else {
        return;
    };

    const PREFIX: &str = " Full article: ";
    let url = strip_control_chars(url);
    let room = (area.width as usize).saturating_sub(PREFIX.len());
    let line = Line::from(vec![
        Span::styled(PREFIX, app.style("meta_label")),
        Span::styled(
            truncate_to_width(&url, room).into_owned(),
            app.style("article_link"),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

// ============================================================================
// HTML extract rendering
// ============================================================================

/// Resolve the named character references that show up in encyclopedia
/// extracts. Numeric references are handled by `unescape_with`.
fn resolve_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "thinsp" => "\u{2009}",
        "ndash" => "–",
        "mdash" => "—",
        "minus" => "−",
        "hellip" => "…",
        "middot" => "·",
        "deg" => "°",
        "prime" => "′",
        "Prime" => "″",
        "plusmn" => "±",
        "times" => "×",
        "micro" => "µ",
        "asymp" => "≈",
        "sim" => "∼",
        "le" => "≤",
        "ge" => "≥",
        "odot" => "⊙",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        "laquo" => "«",
        "raquo" => "»",
        _ => return None,
    })
}

/// Replace character references one at a time. A reference that cannot be
/// resolved is kept as written, and so is a bare `&`.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let reference = tail.find(';').map(|semi| &tail[..=semi]).filter(|r| {
            r.len() > 2
                && r[1..r.len() - 1]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '#')
        });
        match reference {
            Some(reference) => {
                match unescape_with(reference, resolve_entity) {
                    Ok(text) => out.push_str(&text),
                    Err(_) => out.push_str(reference),
                }
                rest = &tail[reference.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Accumulates styled spans into wrapped-later lines, collapsing
/// whitespace the way a browser does.
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    pending_space: bool,
}

impl LineBuilder {
    fn push_text(&mut self, text: &str, style: Style) {
        let text = strip_control_chars(text);
        let mut buf = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_whitespace() && c != '\u{a0}' {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !(self.spans.is_empty() && buf.is_empty()) {
                // A space leading a styled run stays unstyled.
                if buf.is_empty() {
                    self.spans.push(Span::raw(" "));
                } else {
                    buf.push(' ');
                }
            }
            self.pending_space = false;
            buf.push(c);
        }
        if !buf.is_empty() {
            self.spans.push(Span::styled(buf, style));
        }
    }

    fn push_marker(&mut self, marker: &'static str) {
        self.spans.push(Span::raw(marker));
        self.pending_space = false;
    }

    fn break_line(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
        self.pending_space = false;
    }

    /// End a block element: finish the line and leave one blank line.
    fn end_block(&mut self) {
        self.break_line();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Convert an HTML extract to styled ratatui lines.
///
/// Handles paragraphs, line breaks, list items, bold and italic runs, and
/// character references. Unknown tags are transparent; `script` and
/// `style` contents are dropped. Markup errors end rendering early and keep
/// whatever was produced so far.
pub fn render_html(html: &str) -> Vec<Line<'static>> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;

    let mut out = LineBuilder::default();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut skip = 0usize;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    position = reader.buffer_position(),
                    "Stopping extract rendering at malformed markup"
                );
                break;
            }
        };

        match event {
            Event::Start(e) => match e.name().as_ref().to_ascii_lowercase().as_slice() {
                b"script" | b"style" => skip += 1,
                b"b" | b"strong" => bold += 1,
                b"i" | b"em" | b"cite" | b"var" => italic += 1,
                b"li" => {
                    out.break_line();
                    out.push_marker("• ");
                }
                b"br" => out.break_line(),
                b"p" | b"div" | b"ul" | b"ol" | b"blockquote" | b"h1" | b"h2" | b"h3"
                | b"h4" | b"h5" | b"h6" | b"table" | b"tr" | b"dl" | b"dt" | b"dd" => {
                    out.break_line();
                }
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref().eq_ignore_ascii_case(b"br") {
                    out.break_line();
                }
            }
            Event::End(e) => match e.name().as_ref().to_ascii_lowercase().as_slice() {
                b"script" | b"style" => skip = skip.saturating_sub(1),
                b"b" | b"strong" => bold = bold.saturating_sub(1),
                b"i" | b"em" | b"cite" | b"var" => italic = italic.saturating_sub(1),
                b"li" | b"tr" | b"dt" | b"dd" => out.break_line(),
                b"p" | b"div" | b"ul" | b"ol" | b"blockquote" | b"h1" | b"h2" | b"h3"
                | b"h4" | b"h5" | b"h6" | b"table" | b"dl" => out.end_block(),
                _ => {}
            },
            Event::Text(t) if skip == 0 => {
                let mut style = Style::default();
                if bold > 0 {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if italic > 0 {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                out.push_text(&decode_entities(&String::from_utf8_lossy(&t)), style);
            }
            Event::CData(c) if skip == 0 => {
                out.push_text(&String::from_utf8_lossy(&c), Style::default());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_render_plain_paragraph() {
        let lines = render_html("<p>The Andromeda Galaxy is a barred spiral galaxy.</p>");
        assert_eq!(
            texts(&lines),
            vec!["The Andromeda Galaxy is a barred spiral galaxy."]
        );
    }

    #[test]
    fn test_render_bold_and_italic_spans() {
        let lines = render_html("<p>The <b>Orion Nebula</b> is in <i>Orion</i>.</p>");
        assert_eq!(texts(&lines), vec!["The Orion Nebula is in Orion."]);

        let bold = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "Orion Nebula")
            .unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));

        let italic = lines[0].spans.iter().find(|s| s.content == "Orion").unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
        assert!(!italic.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let lines = render_html("<p>First.</p><p>Second.</p>");
        assert_eq!(texts(&lines), vec!["First.", "", "Second."]);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let lines = render_html("<p>  Messier\n   42\t is   bright </p>");
        assert_eq!(texts(&lines), vec!["Messier 42 is bright"]);
    }

    #[test]
    fn test_line_breaks() {
        let lines = render_html("one<br/>two<br>three");
        assert_eq!(texts(&lines), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_entities_decoded() {
        let lines = render_html("<p>M31 &amp; M33 &ndash; 2.5&nbsp;Mly &#8776; 0.77&#160;Mpc</p>");
        assert_eq!(
            texts(&lines),
            vec!["M31 & M33 – 2.5\u{a0}Mly ≈ 0.77\u{a0}Mpc"]
        );
    }

    #[test]
    fn test_unknown_entity_kept_raw() {
        let lines = render_html("<p>&bogus; text</p>");
        assert_eq!(texts(&lines), vec!["&bogus; text"]);
    }

    #[test]
    fn test_unknown_entity_does_not_block_known_ones() {
        let lines = render_html("<p>&bogus; &amp; &ndash; &#8211; AT&T</p>");
        assert_eq!(texts(&lines), vec!["&bogus; & – – AT&T"]);
    }

    #[test]
    fn test_list_items() {
        let lines = render_html("<ul><li>Nebula</li><li>Cluster</li></ul>");
        assert_eq!(texts(&lines), vec!["• Nebula", "• Cluster"]);
    }

    #[test]
    fn test_script_and_style_dropped() {
        let lines = render_html("<style>.x{}</style><p>Visible</p><script>alert(1)</script>");
        assert_eq!(texts(&lines), vec!["Visible"]);
    }

    #[test]
    fn test_unclosed_tags_still_render() {
        let lines = render_html("<p>unclosed <b>bold");
        assert_eq!(texts(&lines), vec!["unclosed bold"]);
    }

    #[test]
    fn test_control_chars_stripped() {
        let lines = render_html("<p>M\x1b[31m45</p>");
        assert_eq!(texts(&lines), vec!["M45"]);
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert!(render_html("").is_empty());
        assert!(render_html("<p> </p>").is_empty());
    }

    #[test]
    fn test_nested_spans_wikipedia_style() {
        let html = r#"<p>The <b>Pleiades</b><span><span> (<span>/<span><span title="/ˈ/: primary stress">ˈ</span>p</span>/</span>)</span></span> are a cluster.</p>"#;
        let lines = render_html(html);
        assert_eq!(lines.len(), 1);
        assert!(texts(&lines)[0].starts_with("The Pleiades ("));
        assert!(texts(&lines)[0].ends_with("are a cluster."));
    }
}
