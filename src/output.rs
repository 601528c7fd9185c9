//! Result types returned by a rewrite request.
//!
//! The rewritten text is an ordinary value handed back to the caller; the
//! renderer and the exporter consume it from here rather than from any
//! shared state.

use serde::{Deserialize, Serialize};

/// Default file name for the exported text.
pub const EXPORT_FILE_NAME: &str = "transformed_content.txt";

/// MIME type of the exported text.
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Everything produced by one rewrite request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOutput {
    /// Cleaned completion text.
    pub text: String,
    /// HTML fragment of `text`, when rendering was requested.
    pub html: Option<String>,
    /// The exact prompt that was sent.
    pub prompt: String,
    pub stats: TransformStats,
}

impl TransformOutput {
    /// What gets exported: the HTML fragment if rendered, else the text.
    pub fn export_body(&self) -> &str {
        self.html.as_deref().unwrap_or(&self.text)
    }
}

/// Accounting for one rewrite request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    /// Model id the request was sent to.
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Retries used before the call succeeded.
    pub retries: u32,
    /// Wall-clock time of the completion call, including retries.
    pub llm_duration_ms: u64,
    /// Wall-clock time of the whole request.
    pub total_duration_ms: u64,
}
