//! Transformation options: what the user picked in the form.
//!
//! A [`TransformOptions`] value is the complete, immutable input of one
//! rewrite request. It is built once per user action via
//! [`TransformOptions::builder`] and never mutated afterwards; the prompt is
//! derived from it fresh every time.
//!
//! Four historical variants of the tool exposed different subsets of these
//! options. Instead of four code paths, a [`Profile`] maps to a set of
//! [`Capabilities`] and [`TransformOptions::validate_for`] rejects anything
//! the profile does not offer.

use crate::error::RewriteError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ── Option enums ─────────────────────────────────────────────────────────

/// How the rewritten content is structured.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    StandardArticle,
    /// Numbered steps. (default)
    #[default]
    StepByStepGuide,
    ProsAndCons,
    ComparisonFormat,
    ComparisonTable,
    QandA,
}

impl FormatStyle {
    pub const ALL: [FormatStyle; 6] = [
        FormatStyle::StandardArticle,
        FormatStyle::StepByStepGuide,
        FormatStyle::ProsAndCons,
        FormatStyle::ComparisonFormat,
        FormatStyle::ComparisonTable,
        FormatStyle::QandA,
    ];

    /// Styles added after the first release of the tool.
    pub fn is_extended(self) -> bool {
        matches!(self, FormatStyle::ComparisonTable | FormatStyle::QandA)
    }
}

/// Tone of voice for the rewritten content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ToneStyle {
    Formal,
    /// Clear and professional. (default)
    #[default]
    SemiFormal,
    BusinessCasual,
    Casual,
    Authoritative,
}

impl ToneStyle {
    pub const ALL: [ToneStyle; 5] = [
        ToneStyle::Formal,
        ToneStyle::SemiFormal,
        ToneStyle::BusinessCasual,
        ToneStyle::Casual,
        ToneStyle::Authoritative,
    ];

    pub fn is_extended(self) -> bool {
        matches!(self, ToneStyle::BusinessCasual | ToneStyle::Authoritative)
    }
}

/// Optional writing improvements.
///
/// The derived `Ord` follows declaration order, which is also the order the
/// directives appear in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritingEnhancement {
    SentenceRestructuring,
    WordVariation,
    ImproveCoherence,
}

/// Call-to-action strength. Only meaningful for commercial or review content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaType {
    #[default]
    None,
    Soft,
    Medium,
    Strong,
}

/// Language of the rewritten content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLanguage {
    #[default]
    Thai,
    English,
}

impl OutputLanguage {
    /// Name used inside the prompt.
    pub fn name(self) -> &'static str {
        match self {
            OutputLanguage::Thai => "Thai",
            OutputLanguage::English => "English",
        }
    }
}

/// Markup the model is asked to produce.
///
/// `Markdown` asks for the heading/list subset understood by
/// [`crate::pipeline::render::render_html`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMarkup {
    #[default]
    PlainText,
    Markdown,
}

/// Target length of the rewritten content.
///
/// Percentages are relative to the original: `Shorter(70)` means "about 70 %
/// of the original", i.e. a 30 % reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMode {
    #[default]
    KeepOriginal,
    /// Target percentage, 1–99.
    Shorter(u32),
    /// Target percentage, 101–400.
    Longer(u32),
    /// Approximate number of sentences in each section.
    SentencesPerSection(u32),
}

impl LengthMode {
    fn validate(self) -> Result<(), RewriteError> {
        match self {
            LengthMode::Shorter(p) if !(1..=99).contains(&p) => Err(RewriteError::InvalidConfig(
                format!("shorter length target must be 1–99 %, got {p} %"),
            )),
            LengthMode::Longer(p) if !(101..=400).contains(&p) => Err(RewriteError::InvalidConfig(
                format!("longer length target must be 101–400 %, got {p} %"),
            )),
            LengthMode::SentencesPerSection(0) => Err(RewriteError::InvalidConfig(
                "sentences per section must be ≥ 1".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Parses `keep`, `<N>%` (below 100 shortens, above 100 lengthens) or
/// `<N>-sentences`.
impl FromStr for LengthMode {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let invalid = || {
            RewriteError::InvalidConfig(format!(
                "invalid length '{s}': expected keep, <N>% or <N>-sentences"
            ))
        };

        if s == "keep" || s == "100%" {
            return Ok(LengthMode::KeepOriginal);
        }
        if let Some(pct) = s.strip_suffix('%') {
            let pct: u32 = pct.trim().parse().map_err(|_| invalid())?;
            let mode = if pct < 100 {
                LengthMode::Shorter(pct)
            } else {
                LengthMode::Longer(pct)
            };
            mode.validate()?;
            return Ok(mode);
        }
        if let Some(n) = s.strip_suffix("-sentences") {
            let n: u32 = n.trim().parse().map_err(|_| invalid())?;
            let mode = LengthMode::SentencesPerSection(n);
            mode.validate()?;
            return Ok(mode);
        }
        Err(invalid())
    }
}

/// How often each SEO keyword should appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordPolicy {
    /// First keyword twice, every other keyword once. (default)
    #[default]
    PrimarySecondary,
    /// Every keyword the same number of times.
    Uniform(u32),
}

/// Repeat count of the primary keyword under [`KeywordPolicy::PrimarySecondary`].
pub const PRIMARY_KEYWORD_REPEAT: u32 = 2;
/// Repeat count of each secondary keyword under [`KeywordPolicy::PrimarySecondary`].
pub const SECONDARY_KEYWORD_REPEAT: u32 = 1;

// ── Profiles ─────────────────────────────────────────────────────────────

/// Which options a variant of the tool exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Comparison-table and Q&A formats; business-casual and authoritative tones.
    pub extended_styles: bool,
    pub cta: bool,
    /// Output languages other than Thai.
    pub output_language: bool,
    pub sentences_per_section: bool,
    pub uniform_keywords: bool,
    pub markdown_output: bool,
}

/// Named capability presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// The original single-page tool: Thai plain text, four formats, three tones.
    Classic,
    /// Extended styles, per-section sentence counts and uniform keyword frequency.
    Seo,
    /// Extended styles, calls to action and a choice of output language.
    Commercial,
    /// Everything. (default)
    #[default]
    Full,
}

impl Profile {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Profile::Classic => Capabilities {
                extended_styles: false,
                cta: false,
                output_language: false,
                sentences_per_section: false,
                uniform_keywords: false,
                markdown_output: false,
            },
            Profile::Seo => Capabilities {
                extended_styles: true,
                cta: false,
                output_language: false,
                sentences_per_section: true,
                uniform_keywords: true,
                markdown_output: false,
            },
            Profile::Commercial => Capabilities {
                extended_styles: true,
                cta: true,
                output_language: true,
                sentences_per_section: false,
                uniform_keywords: false,
                markdown_output: false,
            },
            Profile::Full => Capabilities {
                extended_styles: true,
                cta: true,
                output_language: true,
                sentences_per_section: true,
                uniform_keywords: true,
                markdown_output: true,
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Profile::Classic => "classic",
            Profile::Seo => "seo",
            Profile::Commercial => "commercial",
            Profile::Full => "full",
        };
        f.write_str(name)
    }
}

// ── TransformOptions ─────────────────────────────────────────────────────

/// Everything the prompt builder needs for one request.
///
/// # Example
/// ```rust
/// use edgequake_rewrite::{FormatStyle, LengthMode, TransformOptions};
///
/// let options = TransformOptions::builder("Some article text")
///     .format_style(FormatStyle::ProsAndCons)
///     .length_mode(LengthMode::Shorter(70))
///     .keywords(["main keyword", "other keyword"])
///     .build()
///     .unwrap();
/// assert_eq!(options.keywords.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOptions {
    pub format_style: FormatStyle,
    pub tone_style: ToneStyle,
    pub length_mode: LengthMode,
    /// Enabled enhancements; iteration order is the prompt order.
    pub enhancements: BTreeSet<WritingEnhancement>,
    pub cta: CtaType,
    pub output_language: OutputLanguage,
    pub markup: OutputMarkup,
    /// SEO keywords in input order. Trimmed, never empty, duplicates kept.
    pub keywords: Vec<String>,
    pub keyword_policy: KeywordPolicy,
    /// The text to rewrite, passed to the model verbatim.
    pub source_content: String,
}

impl TransformOptions {
    /// Create a builder with the form defaults: step-by-step guide,
    /// semi-formal tone, improved coherence, original length, Thai output.
    pub fn builder(source_content: impl Into<String>) -> TransformOptionsBuilder {
        TransformOptionsBuilder {
            options: TransformOptions {
                format_style: FormatStyle::default(),
                tone_style: ToneStyle::default(),
                length_mode: LengthMode::default(),
                enhancements: BTreeSet::from([WritingEnhancement::ImproveCoherence]),
                cta: CtaType::default(),
                output_language: OutputLanguage::default(),
                markup: OutputMarkup::default(),
                keywords: Vec::new(),
                keyword_policy: KeywordPolicy::default(),
                source_content: source_content.into(),
            },
        }
    }

    /// Whether there is anything to rewrite.
    pub fn has_content(&self) -> bool {
        !self.source_content.trim().is_empty()
    }

    /// Reject options that `profile` does not expose.
    pub fn validate_for(&self, profile: Profile) -> Result<(), RewriteError> {
        let caps = profile.capabilities();
        let unsupported = |option: &str| {
            Err(RewriteError::UnsupportedOption {
                option: option.to_string(),
                profile: profile.to_string(),
            })
        };

        if !caps.extended_styles && self.format_style.is_extended() {
            return unsupported("format style");
        }
        if !caps.extended_styles && self.tone_style.is_extended() {
            return unsupported("tone");
        }
        if !caps.cta && self.cta != CtaType::None {
            return unsupported("cta");
        }
        if !caps.output_language && self.output_language != OutputLanguage::Thai {
            return unsupported("output language");
        }
        if !caps.sentences_per_section
            && matches!(self.length_mode, LengthMode::SentencesPerSection(_))
        {
            return unsupported("sentences per section");
        }
        if !caps.uniform_keywords && matches!(self.keyword_policy, KeywordPolicy::Uniform(_)) {
            return unsupported("keyword frequency");
        }
        if !caps.markdown_output && self.markup == OutputMarkup::Markdown {
            return unsupported("markdown output");
        }
        Ok(())
    }
}

/// Builder for [`TransformOptions`].
#[derive(Debug)]
pub struct TransformOptionsBuilder {
    options: TransformOptions,
}

impl TransformOptionsBuilder {
    pub fn format_style(mut self, style: FormatStyle) -> Self {
        self.options.format_style = style;
        self
    }

    pub fn tone_style(mut self, tone: ToneStyle) -> Self {
        self.options.tone_style = tone;
        self
    }

    pub fn length_mode(mut self, mode: LengthMode) -> Self {
        self.options.length_mode = mode;
        self
    }

    /// Replace the enabled enhancements. Selection order does not matter.
    pub fn enhancements(mut self, set: impl IntoIterator<Item = WritingEnhancement>) -> Self {
        self.options.enhancements = set.into_iter().collect();
        self
    }

    pub fn cta(mut self, cta: CtaType) -> Self {
        self.options.cta = cta;
        self
    }

    pub fn output_language(mut self, lang: OutputLanguage) -> Self {
        self.options.output_language = lang;
        self
    }

    pub fn markup(mut self, markup: OutputMarkup) -> Self {
        self.options.markup = markup;
        self
    }

    /// Set the keywords; entries are trimmed and empty ones dropped.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    pub fn keyword_policy(mut self, policy: KeywordPolicy) -> Self {
        self.options.keyword_policy = policy;
        self
    }

    /// Build the options, validating numeric ranges.
    ///
    /// Empty content is not rejected here; the prompt builder reports it as
    /// [`RewriteError::EmptyInput`] so the caller can show a warning.
    pub fn build(self) -> Result<TransformOptions, RewriteError> {
        let o = &self.options;
        o.length_mode.validate()?;
        if o.keyword_policy == KeywordPolicy::Uniform(0) {
            return Err(RewriteError::InvalidConfig(
                "keyword frequency must be ≥ 1".into(),
            ));
        }
        Ok(self.options)
    }
}

/// Split a text area with one keyword per line.
///
/// Lines are trimmed and blank lines dropped; order and duplicates are kept.
pub fn parse_keywords(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_form() {
        let o = TransformOptions::builder("text").build().unwrap();
        assert_eq!(o.format_style, FormatStyle::StepByStepGuide);
        assert_eq!(o.tone_style, ToneStyle::SemiFormal);
        assert_eq!(o.length_mode, LengthMode::KeepOriginal);
        assert_eq!(o.cta, CtaType::None);
        assert_eq!(o.output_language, OutputLanguage::Thai);
        assert!(o.enhancements.contains(&WritingEnhancement::ImproveCoherence));
        assert_eq!(o.enhancements.len(), 1);
    }

    #[test]
    fn parse_keywords_trims_and_keeps_duplicates() {
        let kws = parse_keywords("  alpha \n\n beta\nalpha\n   \n");
        assert_eq!(kws, vec!["alpha", "beta", "alpha"]);
    }

    #[test]
    fn builder_keywords_drop_blank_entries() {
        let o = TransformOptions::builder("text")
            .keywords([" a ", "", "  ", "b"])
            .build()
            .unwrap();
        assert_eq!(o.keywords, vec!["a", "b"]);
    }

    #[test]
    fn enhancements_iterate_in_declaration_order() {
        let o = TransformOptions::builder("text")
            .enhancements([
                WritingEnhancement::ImproveCoherence,
                WritingEnhancement::WordVariation,
                WritingEnhancement::SentenceRestructuring,
            ])
            .build()
            .unwrap();
        let order: Vec<_> = o.enhancements.iter().copied().collect();
        assert_eq!(
            order,
            vec![
                WritingEnhancement::SentenceRestructuring,
                WritingEnhancement::WordVariation,
                WritingEnhancement::ImproveCoherence,
            ]
        );
    }

    #[test]
    fn length_mode_parsing() {
        assert_eq!("keep".parse::<LengthMode>().unwrap(), LengthMode::KeepOriginal);
        assert_eq!("100%".parse::<LengthMode>().unwrap(), LengthMode::KeepOriginal);
        assert_eq!("70%".parse::<LengthMode>().unwrap(), LengthMode::Shorter(70));
        assert_eq!("150%".parse::<LengthMode>().unwrap(), LengthMode::Longer(150));
        assert_eq!(
            "4-sentences".parse::<LengthMode>().unwrap(),
            LengthMode::SentencesPerSection(4)
        );
        assert!("0%".parse::<LengthMode>().is_err());
        assert!("900%".parse::<LengthMode>().is_err());
        assert!("0-sentences".parse::<LengthMode>().is_err());
        assert!("longer".parse::<LengthMode>().is_err());
    }

    #[test]
    fn builder_rejects_out_of_range_values() {
        assert!(TransformOptions::builder("t")
            .length_mode(LengthMode::Shorter(100))
            .build()
            .is_err());
        assert!(TransformOptions::builder("t")
            .length_mode(LengthMode::Longer(100))
            .build()
            .is_err());
        assert!(TransformOptions::builder("t")
            .keyword_policy(KeywordPolicy::Uniform(0))
            .build()
            .is_err());
    }

    #[test]
    fn builder_accepts_empty_content() {
        let o = TransformOptions::builder("   ").build().unwrap();
        assert!(!o.has_content());
    }

    #[test]
    fn cta_and_length_are_independent() {
        for length in [
            LengthMode::KeepOriginal,
            LengthMode::Shorter(50),
            LengthMode::Longer(200),
            LengthMode::SentencesPerSection(3),
        ] {
            for cta in [CtaType::None, CtaType::Soft, CtaType::Medium, CtaType::Strong] {
                let o = TransformOptions::builder("t")
                    .length_mode(length)
                    .cta(cta)
                    .build();
                assert!(o.is_ok(), "{length:?} + {cta:?} should be allowed");
            }
        }
    }

    #[test]
    fn classic_profile_rejects_newer_options() {
        let cta = TransformOptions::builder("t")
            .cta(CtaType::Strong)
            .build()
            .unwrap();
        assert!(matches!(
            cta.validate_for(Profile::Classic),
            Err(RewriteError::UnsupportedOption { .. })
        ));
        assert!(cta.validate_for(Profile::Commercial).is_ok());

        let qa = TransformOptions::builder("t")
            .format_style(FormatStyle::QandA)
            .build()
            .unwrap();
        assert!(qa.validate_for(Profile::Classic).is_err());
        assert!(qa.validate_for(Profile::Seo).is_ok());

        let uniform = TransformOptions::builder("t")
            .keyword_policy(KeywordPolicy::Uniform(3))
            .build()
            .unwrap();
        assert!(uniform.validate_for(Profile::Commercial).is_err());
        assert!(uniform.validate_for(Profile::Seo).is_ok());
    }

    #[test]
    fn full_profile_accepts_everything() {
        let o = TransformOptions::builder("t")
            .format_style(FormatStyle::ComparisonTable)
            .tone_style(ToneStyle::Authoritative)
            .length_mode(LengthMode::SentencesPerSection(2))
            .cta(CtaType::Medium)
            .output_language(OutputLanguage::English)
            .markup(OutputMarkup::Markdown)
            .keyword_policy(KeywordPolicy::Uniform(2))
            .build()
            .unwrap();
        assert!(o.validate_for(Profile::Full).is_ok());
    }

    #[test]
    fn default_options_fit_classic_profile() {
        let o = TransformOptions::builder("t").build().unwrap();
        assert!(o.validate_for(Profile::Classic).is_ok());
    }
}
