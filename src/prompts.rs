//! Prompt text for content rewriting.
//!
//! Every sentence the model ever sees lives here. The prompt builder in
//! [`crate::pipeline::prompt`] only decides *which* of these directives to
//! emit and in what order; changing the wording never touches that logic.
//!
//! The format and tone tables are data rather than `match` arms because they
//! can be replaced at runtime with a JSON file (see [`Directives::from_json`]).
//! A replacement table that misses a value is reported as
//! [`RewriteError::Configuration`] the first time that value is looked up.

use crate::error::RewriteError;
use crate::options::{
    CtaType, FormatStyle, LengthMode, OutputMarkup, ToneStyle, WritingEnhancement,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default system message sent with every completion request.
///
/// Used when `RewriteConfig::system_prompt` is `None`.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional content editor and translator \
specializing in creating well-structured, engaging content.";

// ── Format / tone tables ─────────────────────────────────────────────────

const FORMAT_DIRECTIVES: [(FormatStyle, &str); 6] = [
    (
        FormatStyle::StandardArticle,
        "Structure as a regular article with clear paragraphs and sections.",
    ),
    (
        FormatStyle::StepByStepGuide,
        "Present the information as numbered steps with clear instructions.",
    ),
    (
        FormatStyle::ProsAndCons,
        "Organize the content into clear Advantages and Disadvantages sections.",
    ),
    (
        FormatStyle::ComparisonFormat,
        "Structure the content to highlight key comparison points between options.",
    ),
    (
        FormatStyle::ComparisonTable,
        "Summarize the key comparison points between options side by side, one row per criterion, followed by a short explanation of each option.",
    ),
    (
        FormatStyle::QandA,
        "Organize the content as a series of questions a reader would ask, each followed by a clear, direct answer.",
    ),
];

const TONE_DIRECTIVES: [(ToneStyle, &str); 5] = [
    (
        ToneStyle::Formal,
        "Use formal language suitable for professional and academic contexts.",
    ),
    (
        ToneStyle::SemiFormal,
        "Use clear, professional language that's accessible while maintaining authority.",
    ),
    (
        ToneStyle::BusinessCasual,
        "Use friendly yet professional language suitable for everyday business communication.",
    ),
    (
        ToneStyle::Casual,
        "Use simple, conversational language that's easy to understand.",
    ),
    (
        ToneStyle::Authoritative,
        "Use confident, expert language that establishes credibility and earns the reader's trust.",
    ),
];

/// Lookup tables for the format and tone directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directives {
    pub format: BTreeMap<FormatStyle, String>,
    pub tone: BTreeMap<ToneStyle, String>,
}

impl Default for Directives {
    fn default() -> Self {
        Self {
            format: FORMAT_DIRECTIVES
                .iter()
                .map(|(k, v)| (*k, (*v).to_string()))
                .collect(),
            tone: TONE_DIRECTIVES
                .iter()
                .map(|(k, v)| (*k, (*v).to_string()))
                .collect(),
        }
    }
}

impl Directives {
    /// Parse replacement tables from JSON.
    ///
    /// ```json
    /// { "format": { "standard_article": "…", … }, "tone": { "formal": "…", … } }
    /// ```
    ///
    /// The tables replace the built-in ones wholesale; use [`Self::check_complete`]
    /// to catch missing entries before the first request.
    pub fn from_json(json: &str) -> Result<Self, RewriteError> {
        serde_json::from_str(json).map_err(|e| RewriteError::Configuration {
            detail: format!("cannot parse directive file: {e}"),
        })
    }

    /// Read and parse a JSON directive file.
    pub fn from_file(path: &Path) -> Result<Self, RewriteError> {
        let json = std::fs::read_to_string(path).map_err(|e| RewriteError::Configuration {
            detail: format!("cannot read directive file {}: {e}", path.display()),
        })?;
        Self::from_json(&json)
    }

    /// Directive for a format style.
    pub fn format(&self, style: FormatStyle) -> Result<&str, RewriteError> {
        lookup(&self.format, style, "format style")
    }

    /// Directive for a tone.
    pub fn tone(&self, tone: ToneStyle) -> Result<&str, RewriteError> {
        lookup(&self.tone, tone, "tone")
    }

    /// Verify every option value has a non-empty directive.
    pub fn check_complete(&self) -> Result<(), RewriteError> {
        for style in FormatStyle::ALL {
            self.format(style)?;
        }
        for tone in ToneStyle::ALL {
            self.tone(tone)?;
        }
        Ok(())
    }
}

fn lookup<'a, K>(table: &'a BTreeMap<K, String>, key: K, what: &str) -> Result<&'a str, RewriteError>
where
    K: Ord + std::fmt::Debug,
{
    match table.get(&key) {
        Some(text) if !text.trim().is_empty() => Ok(text.as_str()),
        _ => Err(RewriteError::Configuration {
            detail: format!("no directive for {what} {key:?}"),
        }),
    }
}

// ── Fixed directives ─────────────────────────────────────────────────────

/// Opening line of the prompt.
pub fn header(language: &str) -> String {
    format!("Transform this content into {language} with the following requirements:")
}

/// Extra lines under the format directive describing the expected markup.
pub fn markup_instructions(markup: OutputMarkup) -> &'static str {
    match markup {
        OutputMarkup::PlainText => {
            "Provide the output in plain text format without any markdown symbols (no #, *, -, etc.).\n\
Use clear paragraph breaks with double line spacing between sections.\n\
For headings, simply put them on their own line without any special formatting."
        }
        OutputMarkup::Markdown => {
            "Provide the output in simple Markdown.\n\
Use # for the title, ## for sections and ### for subsections.\n\
Use 1. 2. 3. for numbered lists and - for bullet lists, one item per line.\n\
Do not use tables, code blocks, links or nested lists."
        }
    }
}

/// Closing reminder placed just before the original content.
pub fn closing_reminder(markup: OutputMarkup) -> &'static str {
    match markup {
        OutputMarkup::PlainText => {
            "Important: Format the output as plain text without any markdown symbols or special formatting. \
Use double line breaks between sections for clarity."
        }
        OutputMarkup::Markdown => {
            "Important: Use only the Markdown elements listed above. \
Put every heading, list item and paragraph on its own line."
        }
    }
}

pub fn enhancement(enhancement: WritingEnhancement) -> &'static str {
    match enhancement {
        WritingEnhancement::SentenceRestructuring => {
            "Vary sentence structure and convert between active/passive voice where appropriate"
        }
        WritingEnhancement::WordVariation => {
            "Use appropriate synonyms and varied vocabulary while maintaining meaning"
        }
        WritingEnhancement::ImproveCoherence => {
            "Ensure smooth transitions and logical flow between sentences and paragraphs"
        }
    }
}

/// Length directive with the literal percentage for the mode.
pub fn length(mode: LengthMode) -> String {
    match mode {
        LengthMode::KeepOriginal => {
            "Keep the content at about its original length while maintaining key information."
                .to_string()
        }
        LengthMode::Shorter(target) => format!(
            "Reduce the content length by about {}% while maintaining key information.",
            100 - target
        ),
        LengthMode::Longer(200) => {
            "Double the content length with relevant details, examples, and elaboration."
                .to_string()
        }
        LengthMode::Longer(target) => format!(
            "Expand the content by about {}% with relevant details and examples.",
            target - 100
        ),
        LengthMode::SentencesPerSection(n) => format!(
            "Write about {n} {} in each section while maintaining key information.",
            if n == 1 { "sentence" } else { "sentences" }
        ),
    }
}

/// Call-to-action directive; `None` for [`CtaType::None`].
pub fn cta(cta: CtaType) -> Option<&'static str> {
    match cta {
        CtaType::None => None,
        CtaType::Soft => Some(
            "End with a gentle call-to-action that invites the reader to learn more, without pressure.",
        ),
        CtaType::Medium => Some(
            "Include a clear call-to-action that encourages the reader to take the next step.",
        ),
        CtaType::Strong => Some(
            "Include a strong, persuasive call-to-action that urges the reader to act now.",
        ),
    }
}

pub fn primary_keyword(keyword: &str, times: u32) -> String {
    format!("Main keyword (use {}): {keyword}", times_word(times))
}

pub fn secondary_keywords(keywords: &[String], times: u32) -> String {
    format!(
        "Secondary keywords (use {} each): {}",
        times_word(times),
        keywords.join(", ")
    )
}

pub fn uniform_keywords(keywords: &[String], times: u32) -> String {
    format!(
        "Use each of these keywords {} naturally in the content: {}",
        times_word(times),
        keywords.join(", ")
    )
}

fn times_word(n: u32) -> String {
    if n == 1 {
        "1 time".to_string()
    } else {
        format!("{n} times")
    }
}
