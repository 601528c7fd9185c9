//! Prompt builder: turn [`TransformOptions`] into one instruction string.
//!
//! The prompt is a numbered list of sections in a fixed order:
//!
//! ```text
//! header (target language)
//! 1. Content Format       always
//! 2. Tone                 always
//! n. Writing Enhancements only when at least one is enabled
//! n. Length               always
//! n. Call to Action       only when cta != None
//! n. SEO Keywords         only when keywords are present
//! closing reminder
//! Original Content:       the source text, verbatim
//! ```
//!
//! Section numbers are assigned as sections are emitted, so an omitted
//! optional section never leaves a gap. The function is pure: no I/O, no
//! clock, no randomness.

use crate::error::RewriteError;
use crate::options::{
    KeywordPolicy, TransformOptions, PRIMARY_KEYWORD_REPEAT, SECONDARY_KEYWORD_REPEAT,
};
use crate::prompts::{self, Directives};

/// Build the instruction string for `options`.
///
/// # Errors
/// - [`RewriteError::EmptyInput`] when the source content is blank
/// - [`RewriteError::Configuration`] when `directives` lacks an entry
pub fn build_prompt(
    options: &TransformOptions,
    directives: &Directives,
) -> Result<String, RewriteError> {
    if !options.has_content() {
        return Err(RewriteError::EmptyInput);
    }

    let mut sections = Sections::default();

    sections.push(format!(
        "Content Format: {}\n{}",
        directives.format(options.format_style)?,
        prompts::markup_instructions(options.markup)
    ));

    sections.push(format!("Tone: {}", directives.tone(options.tone_style)?));

    if !options.enhancements.is_empty() {
        let lines: Vec<String> = options
            .enhancements
            .iter()
            .map(|e| format!("- {}", prompts::enhancement(*e)))
            .collect();
        sections.push(format!("Writing Enhancements:\n{}", lines.join("\n")));
    }

    sections.push(format!("Length: {}", prompts::length(options.length_mode)));

    if let Some(cta) = prompts::cta(options.cta) {
        sections.push(format!("Call to Action: {cta}"));
    }

    if let Some(block) = keyword_block(&options.keywords, options.keyword_policy) {
        sections.push(format!("SEO Keywords:\n{block}"));
    }

    Ok(format!(
        "{}\n\n{}\n\n{}\n\nOriginal Content:\n{}",
        prompts::header(options.output_language.name()),
        sections.render(),
        prompts::closing_reminder(options.markup),
        options.source_content
    ))
}

/// Keyword lines, or `None` when there are no keywords.
fn keyword_block(keywords: &[String], policy: KeywordPolicy) -> Option<String> {
    let (primary, secondary) = keywords.split_first()?;

    let block = match policy {
        KeywordPolicy::PrimarySecondary => {
            let mut lines = vec![format!(
                "- {}",
                prompts::primary_keyword(primary, PRIMARY_KEYWORD_REPEAT)
            )];
            if !secondary.is_empty() {
                lines.push(format!(
                    "- {}",
                    prompts::secondary_keywords(secondary, SECONDARY_KEYWORD_REPEAT)
                ));
            }
            lines.join("\n")
        }
        KeywordPolicy::Uniform(times) => format!("- {}", prompts::uniform_keywords(keywords, times)),
    };
    Some(block)
}

/// Numbered prompt sections.
#[derive(Default)]
struct Sections(Vec<String>);

impl Sections {
    fn push(&mut self, body: String) {
        self.0.push(body);
    }

    fn render(&self) -> String {
        self.0
            .iter()
            .enumerate()
            .map(|(i, body)| format!("{}. {}", i + 1, body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{
        CtaType, FormatStyle, LengthMode, OutputLanguage, OutputMarkup, ToneStyle,
        WritingEnhancement,
    };

    fn opts(content: &str) -> crate::options::TransformOptionsBuilder {
        TransformOptions::builder(content)
    }

    #[test]
    fn empty_content_is_rejected() {
        let o = opts("  \n\t ").build().unwrap();
        assert!(matches!(
            build_prompt(&o, &Directives::default()),
            Err(RewriteError::EmptyInput)
        ));
    }

    #[test]
    fn prompt_is_deterministic() {
        let o = opts("Some content")
            .keywords(["a", "b"])
            .cta(CtaType::Soft)
            .build()
            .unwrap();
        let d = Directives::default();
        let first = build_prompt(&o, &d).unwrap();
        let second = build_prompt(&o, &d).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_format_and_tone_produces_its_directive() {
        let d = Directives::default();
        for style in FormatStyle::ALL {
            let o = opts("x").format_style(style).build().unwrap();
            let p = build_prompt(&o, &d).unwrap();
            assert!(p.contains(d.format(style).unwrap()), "{style:?}");
        }
        for tone in ToneStyle::ALL {
            let o = opts("x").tone_style(tone).build().unwrap();
            let p = build_prompt(&o, &d).unwrap();
            assert!(p.contains(d.tone(tone).unwrap()), "{tone:?}");
        }
    }

    #[test]
    fn primary_and_secondary_keywords() {
        let o = opts("x").keywords(["A", "B", "C"]).build().unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        assert!(p.contains("- Main keyword (use 2 times): A\n"));
        assert!(p.contains("- Secondary keywords (use 1 time each): B, C"));
    }

    #[test]
    fn single_keyword_has_no_secondary_line() {
        let o = opts("x").keywords(["only"]).build().unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        assert!(p.contains("Main keyword (use 2 times): only"));
        assert!(!p.contains("Secondary keywords"));
    }

    #[test]
    fn uniform_keyword_frequency() {
        let o = opts("x")
            .keywords(["A", "B"])
            .keyword_policy(KeywordPolicy::Uniform(3))
            .build()
            .unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        assert!(p.contains("Use each of these keywords 3 times naturally in the content: A, B"));
        assert!(!p.contains("Main keyword"));
    }

    #[test]
    fn no_keywords_no_keyword_section() {
        let o = opts("x").build().unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        assert!(!p.contains("SEO Keywords"));
    }

    #[test]
    fn enhancements_follow_fixed_order() {
        let o = opts("x")
            .enhancements([
                WritingEnhancement::WordVariation,
                WritingEnhancement::SentenceRestructuring,
            ])
            .build()
            .unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        let restructure = p
            .find(prompts::enhancement(WritingEnhancement::SentenceRestructuring))
            .unwrap();
        let variation = p
            .find(prompts::enhancement(WritingEnhancement::WordVariation))
            .unwrap();
        assert!(restructure < variation);
        assert!(!p.contains(prompts::enhancement(WritingEnhancement::ImproveCoherence)));
    }

    #[test]
    fn sections_are_numbered_without_gaps() {
        let o = opts("x")
            .enhancements(Vec::<WritingEnhancement>::new())
            .cta(CtaType::None)
            .build()
            .unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        assert!(p.contains("1. Content Format:"));
        assert!(p.contains("2. Tone:"));
        assert!(p.contains("3. Length:"));
        assert!(!p.contains("4. "));
    }

    #[test]
    fn cta_section_only_when_requested() {
        let with = opts("x").cta(CtaType::Strong).build().unwrap();
        let without = opts("x").build().unwrap();
        let d = Directives::default();
        assert!(build_prompt(&with, &d).unwrap().contains("Call to Action:"));
        assert!(!build_prompt(&without, &d).unwrap().contains("Call to Action:"));
    }

    #[test]
    fn section_order_is_fixed() {
        let o = opts("x")
            .cta(CtaType::Medium)
            .length_mode(LengthMode::Longer(150))
            .keywords(["k"])
            .build()
            .unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        let order = [
            "Content Format:",
            "Tone:",
            "Writing Enhancements:",
            "Length:",
            "Call to Action:",
            "SEO Keywords:",
            "Original Content:",
        ];
        let positions: Vec<usize> = order.iter().map(|s| p.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn source_content_is_verbatim_at_the_end() {
        let content = "  Line one\n\n- well-known **item**\n";
        let o = opts(content).build().unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        assert!(p.ends_with(&format!("Original Content:\n{content}")));
    }

    #[test]
    fn language_and_markup_change_wording() {
        let o = opts("x")
            .output_language(OutputLanguage::English)
            .markup(OutputMarkup::Markdown)
            .build()
            .unwrap();
        let p = build_prompt(&o, &Directives::default()).unwrap();
        assert!(p.starts_with("Transform this content into English"));
        assert!(p.contains("## for sections"));
        assert!(!p.contains("without any markdown symbols"));
    }

    #[test]
    fn incomplete_directives_fail() {
        let mut d = Directives::default();
        d.format.remove(&FormatStyle::ProsAndCons);
        let o = opts("x").format_style(FormatStyle::ProsAndCons).build().unwrap();
        assert!(matches!(
            build_prompt(&o, &d),
            Err(RewriteError::Configuration { .. })
        ));
    }
}
