//! Post-processing: deterministic cleanup of the model's completion text.
//!
//! Even when told to return plain text, models wrap answers in code fences,
//! emit Windows line endings, leave trailing spaces, pad with runs of blank
//! lines, or smuggle zero-width characters in from their training data.
//! None of that belongs in an exported `.txt` file or in the renderer input.
//!
//! ## Rule Order
//!
//! Fences are stripped first so the fence lines do not survive as blank
//! lines; line endings are normalised before any per-line rule; the final
//! trim runs last so earlier rules cannot reintroduce edge whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup rules to the raw completion.
///
/// Rules (applied in order):
/// 1. Strip an outer code fence (```` ``` ````, ```` ```text ````, ```` ```markdown ````)
/// 2. Normalise line endings (CRLF / CR → LF)
/// 3. Trim trailing whitespace per line
/// 4. Collapse runs of blank lines to a single blank line
/// 5. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens)
/// 6. Trim leading and trailing whitespace of the whole text
///
/// An all-whitespace completion cleans to the empty string; callers treat
/// that as "no usable content".
pub fn clean_completion(input: &str) -> String {
    let s = strip_outer_fence(input);
    let s = normalise_line_endings(&s);
    let s = trim_trailing_whitespace(&s);
    let s = collapse_blank_lines(&s);
    let s = remove_invisible_chars(&s);
    s.trim().to_string()
}

// ── Rule 1: Strip outer code fence ───────────────────────────────────────────

static RE_OUTER_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```(?:markdown|md|text|plaintext)?[ \t]*\r?\n(.*?)\r?\n```\s*$").unwrap()
});

fn strip_outer_fence(input: &str) -> String {
    match RE_OUTER_FENCE.captures(input.trim()) {
        Some(caps) => caps[1].to_string(),
        None => input.to_string(),
    }
}

// ── Rule 2: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 4: Collapse blank-line runs ─────────────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

// ── Rule 5: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_plain_fence() {
        assert_eq!(strip_outer_fence("```\nHello\nWorld\n```"), "Hello\nWorld");
    }

    #[test]
    fn strips_tagged_fence() {
        assert_eq!(strip_outer_fence("```markdown\n# Hi\n```"), "# Hi");
        assert_eq!(strip_outer_fence("```text\nHi\n```\n"), "Hi");
    }

    #[test]
    fn inner_fences_untouched() {
        let input = "Intro\n```\ncode\n```\nOutro";
        assert_eq!(strip_outer_fence(input), input);
    }

    #[test]
    fn normalises_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn trims_trailing_whitespace() {
        assert_eq!(trim_trailing_whitespace("  a   \nb\t"), "  a\nb");
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn removes_invisible() {
        assert_eq!(remove_invisible_chars("ก\u{200B}ข\u{FEFF}"), "กข");
    }

    #[test]
    fn full_cleanup() {
        let raw = "```\r\n  \r\nTitle   \r\n\r\n\r\n\r\nBody\u{200B} text\r\n```";
        assert_eq!(clean_completion(raw), "Title\n\nBody text");
    }

    #[test]
    fn whitespace_only_cleans_to_empty() {
        assert_eq!(clean_completion(" \n\u{200B}\n\t"), "");
    }

    #[test]
    fn thai_text_preserved() {
        let raw = "วิธีซื้อเหรียญคริปโต\n\nสำหรับมือใหม่";
        assert_eq!(clean_completion(raw), raw);
    }
}
