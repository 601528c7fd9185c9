//! # edgequake-rewrite
//!
//! Rewrite and re-style text content with Large Language Models.
//!
//! Paste an article, pick a format (step-by-step guide, pros and cons, Q&A…),
//! a tone, a target length, a call-to-action and a list of SEO keywords; the
//! crate turns those choices into a precise instruction, sends it to an LLM,
//! and returns clean text ready to export, or an HTML fragment.
//!
//! ## Pipeline Overview
//!
//! ```text
//! TransformOptions
//!  │
//!  ├─ 1. Prompt   numbered directives + verbatim source content (pure)
//!  ├─ 2. LLM      one completion call via edgequake-llm (OpenRouter by default)
//!  ├─ 3. Clean    strip fences, CRLF, blank runs, invisible Unicode
//!  ├─ 4. Render   optional Markdown-subset → <h1..h3>/<p>/<ul>/<ol>/<li>
//!  └─ 5. Output   TransformOutput { text, html, prompt, stats }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_rewrite::{transform, FormatStyle, RewriteConfig, TransformOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENROUTER_API_KEY / OPENAI_API_KEY / …
//!     let options = TransformOptions::builder("Paste your article here")
//!         .format_style(FormatStyle::QandA)
//!         .keywords(["main keyword", "second keyword"])
//!         .build()?;
//!     let output = transform(&options, &RewriteConfig::default()).await?;
//!     println!("{}", output.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `rewrite` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod transform;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RewriteConfig, RewriteConfigBuilder, DEFAULT_MODEL};
pub use error::RewriteError;
pub use options::{
    parse_keywords, Capabilities, CtaType, FormatStyle, KeywordPolicy, LengthMode,
    OutputLanguage, OutputMarkup, Profile, ToneStyle, TransformOptions, TransformOptionsBuilder,
    WritingEnhancement,
};
pub use output::{TransformOutput, TransformStats, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
pub use pipeline::llm::{Completion, CompletionRequest, CompletionService, LlmCompletionService};
pub use pipeline::prompt::build_prompt;
pub use pipeline::render::{render_html, RenderedBlock};
pub use prompts::Directives;
pub use transform::{
    export_to_file, prepare_prompt, transform, transform_sync, transform_to_file, transform_with,
};
