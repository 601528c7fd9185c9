//! Markdown-subset renderer: model output → HTML fragment.
//!
//! Only a handful of line-level constructs are recognised:
//!
//! | Line                   | Block              | Tag            |
//! |------------------------|--------------------|----------------|
//! | `# ` / `## ` / `### `  | heading            | `<h1>`–`<h3>`  |
//! | `1. item`              | ordered item       | `<ol><li>`     |
//! | `- item` / `* item`    | unordered item     | `<ul><li>`     |
//! | `---` / `* * *`        | rule               | nothing        |
//! | anything else          | paragraph          | `<p>`          |
//!
//! Markers need whitespace after them: `#hashtag` and `#### Deep` lines are
//! paragraphs. Blank lines are skipped. Consecutive items of one kind share
//! a list; an item of the other kind closes the open list and opens a new
//! one, so tags always nest correctly. Any open list is closed at end of
//! input.
//!
//! Line content is cleaned before wrapping: runs of two or more `*` are
//! removed, every `-` that is not the list marker is removed (so
//! "well-known" becomes "wellknown"), and `&`, `<`, `>` are escaped. The input is untrusted model
//! output; the only tags in the result are the ones emitted here.

use once_cell::sync::Lazy;
use regex::Regex;

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBlock {
    /// Level 1–3 and the raw heading text.
    Heading(u8, String),
    OrderedListItem(String),
    UnorderedListItem(String),
    Paragraph(String),
    /// A line of only `*`, `-` and spaces. Renders to nothing.
    Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn open(self) -> &'static str {
        match self {
            ListKind::Ordered => "<ol>",
            ListKind::Unordered => "<ul>",
        }
    }

    fn close(self) -> &'static str {
        match self {
            ListKind::Ordered => "</ol>",
            ListKind::Unordered => "</ul>",
        }
    }
}

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,3})(?:\s+(.*))?$").unwrap());
static RE_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*\-][*\-\s]*$").unwrap());
static RE_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{2,}").unwrap());
static RE_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());
static RE_UNORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s+(.*)$").unwrap());

/// Classify a single trimmed, non-blank line.
pub fn classify(line: &str) -> RenderedBlock {
    if RE_RULE.is_match(line) {
        return RenderedBlock::Rule;
    }
    if let Some(caps) = RE_HEADING.captures(line) {
        let level = caps[1].len() as u8;
        let text = caps.get(2).map_or("", |m| m.as_str());
        return RenderedBlock::Heading(level, text.to_string());
    }
    if let Some(caps) = RE_ORDERED.captures(line) {
        return RenderedBlock::OrderedListItem(caps[1].to_string());
    }
    if let Some(caps) = RE_UNORDERED.captures(line) {
        return RenderedBlock::UnorderedListItem(caps[1].to_string());
    }
    RenderedBlock::Paragraph(line.to_string())
}

/// Render pseudo-markdown into an HTML fragment.
///
/// Never fails: unrecognised input degrades to paragraphs and an empty
/// document yields an empty string.
pub fn render_html(input: &str) -> String {
    let mut html = String::with_capacity(input.len() + input.len() / 4);
    let mut open_list: Option<ListKind> = None;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let block = classify(line);
        let item_kind = match &block {
            RenderedBlock::OrderedListItem(_) => Some(ListKind::Ordered),
            RenderedBlock::UnorderedListItem(_) => Some(ListKind::Unordered),
            _ => None,
        };

        // Close the open list unless this line continues it.
        if let Some(kind) = open_list {
            if item_kind != Some(kind) {
                html.push_str(kind.close());
                open_list = None;
            }
        }

        let (text, level) = match &block {
            RenderedBlock::Rule => continue,
            RenderedBlock::Heading(level, t) => (clean_text(t), Some(*level)),
            RenderedBlock::OrderedListItem(t)
            | RenderedBlock::UnorderedListItem(t)
            | RenderedBlock::Paragraph(t) => (clean_text(t), None),
        };
        if text.is_empty() {
            continue;
        }

        match (item_kind, level) {
            (Some(kind), _) => {
                if open_list.is_none() {
                    html.push_str(kind.open());
                    open_list = Some(kind);
                }
                html.push_str("<li>");
                html.push_str(&text);
                html.push_str("</li>");
            }
            (None, Some(level)) => {
                html.push_str(&format!("<h{level}>{text}</h{level}>"));
            }
            (None, None) => {
                html.push_str("<p>");
                html.push_str(&text);
                html.push_str("</p>");
            }
        }
    }

    if let Some(kind) = open_list {
        html.push_str(kind.close());
    }
    html
}

/// Strip emphasis markers and stray hyphens, then escape HTML.
fn clean_text(text: &str) -> String {
    let stripped = RE_EMPHASIS.replace_all(text, "").replace('-', "");
    escape_html(stripped.trim())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_paragraph() {
        assert_eq!(render_html("Hello world"), "<p>Hello world</p>");
    }

    #[test]
    fn ordered_list_closed_before_paragraph() {
        assert_eq!(
            render_html("1. first\n2. second\nplain"),
            "<ol><li>first</li><li>second</li></ol><p>plain</p>"
        );
    }

    #[test]
    fn emphasis_is_stripped() {
        assert_eq!(render_html("**Bold** text"), "<p>Bold text</p>");
    }

    #[test]
    fn headings_by_level() {
        assert_eq!(
            render_html("# One\n## Two\n### Three"),
            "<h1>One</h1><h2>Two</h2><h3>Three</h3>"
        );
    }

    #[test]
    fn deep_headings_are_paragraphs() {
        assert_eq!(render_html("#### Deep"), "<p>#### Deep</p>");
    }

    #[test]
    fn hashtags_are_not_headings() {
        assert_eq!(render_html("#hashtag trend"), "<p>#hashtag trend</p>");
        assert_eq!(
            classify("#crypto #bitcoin"),
            RenderedBlock::Paragraph("#crypto #bitcoin".into())
        );
    }

    #[test]
    fn bare_heading_marker_renders_nothing() {
        assert_eq!(classify("##"), RenderedBlock::Heading(2, String::new()));
        assert_eq!(render_html("##\ntext"), "<p>text</p>");
    }

    #[test]
    fn triple_star_emphasis_is_stripped() {
        assert_eq!(render_html("***Bold*** move"), "<p>Bold move</p>");
    }

    #[test]
    fn star_rule_closes_list_and_renders_nothing() {
        assert_eq!(classify("* * *"), RenderedBlock::Rule);
        assert_eq!(classify("***"), RenderedBlock::Rule);
        assert_eq!(
            render_html("- a\n* * *\n- b"),
            "<ul><li>a</li></ul><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn heading_closes_open_list() {
        assert_eq!(
            render_html("- a\n- b\n## Next"),
            "<ul><li>a</li><li>b</li></ul><h2>Next</h2>"
        );
    }

    #[test]
    fn star_and_dash_items_share_a_list() {
        assert_eq!(
            render_html("- a\n* b"),
            "<ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn list_kind_switch_reopens_list() {
        assert_eq!(
            render_html("1. one\n- bullet\n2. two"),
            "<ol><li>one</li></ol><ul><li>bullet</li></ul><ol><li>two</li></ol>"
        );
    }

    #[test]
    fn blank_lines_do_not_break_lists() {
        assert_eq!(
            render_html("1. a\n\n2. b"),
            "<ol><li>a</li><li>b</li></ol>"
        );
    }

    #[test]
    fn open_list_closed_at_end() {
        assert_eq!(render_html("* last"), "<ul><li>last</li></ul>");
    }

    #[test]
    fn inner_hyphens_are_removed() {
        assert_eq!(render_html("well-known fact"), "<p>wellknown fact</p>");
        assert_eq!(render_html("- self-made"), "<ul><li>selfmade</li></ul>");
    }

    #[test]
    fn horizontal_rule_line_is_dropped() {
        assert_eq!(render_html("a\n---\nb"), "<p>a</p><p>b</p>");
    }

    #[test]
    fn bold_line_is_not_a_list_item() {
        assert_eq!(
            classify("**Note** this"),
            RenderedBlock::Paragraph("**Note** this".into())
        );
    }

    #[test]
    fn number_without_space_is_paragraph() {
        assert_eq!(render_html("3.5 million"), "<p>3.5 million</p>");
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(
            render_html("<script>alert(1)</script> & co"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; co</p>"
        );
    }

    #[test]
    fn empty_input_gives_empty_fragment() {
        assert_eq!(render_html(""), "");
        assert_eq!(render_html("\n\n   \n"), "");
    }

    #[test]
    fn indented_lines_are_trimmed() {
        assert_eq!(render_html("   # Title  "), "<h1>Title</h1>");
    }
}
