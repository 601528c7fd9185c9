//! Error types for the edgequake-rewrite library.
//!
//! Every failure in a rewrite request is one [`RewriteError`]. The variants
//! fall into three groups that callers treat differently:
//!
//! * **Recoverable, user-facing**: [`RewriteError::EmptyInput`] (nothing to
//!   rewrite, no API call is made) and [`RewriteError::Service`] (the
//!   completion call failed or produced nothing usable). Show the message and
//!   let the user try again.
//!
//! * **Fatal defects**: [`RewriteError::Configuration`] means a directive
//!   table has no entry for an option. That is a bug or a broken override
//!   file, never something the user can fix by retrying.
//!
//! * **Setup problems**: provider, option and I/O errors surfaced before or
//!   after the request itself.
//!
//! The Markdown renderer never fails and therefore has no variant here.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-rewrite library.
#[derive(Debug, Error)]
pub enum RewriteError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The source content is empty or whitespace only.
    #[error("No content to transform.\nPaste or pipe the content you want to rewrite.")]
    EmptyInput,

    /// An option is not available in the selected profile.
    #[error("Option '{option}' is not available in the '{profile}' profile.\nUse --profile full to enable every option.")]
    UnsupportedOption { option: String, profile: String },

    // ── Directive errors ──────────────────────────────────────────────────
    /// A directive lookup table has no entry for an option value.
    #[error("Directive table is incomplete: {detail}")]
    Configuration { detail: String },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The completion call failed, timed out, or returned no usable text.
    #[error("Completion service error: {message}")]
    Service { message: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the exported text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or option validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RewriteError {
    /// Whether the user can reasonably retry the same action.
    ///
    /// Empty input and service failures are recoverable; everything else
    /// needs a change in configuration or code first.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RewriteError::EmptyInput | RewriteError::Service { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_display() {
        let msg = RewriteError::EmptyInput.to_string();
        assert!(msg.contains("No content"), "got: {msg}");
    }

    #[test]
    fn service_error_display() {
        let e = RewriteError::Service {
            message: "HTTP 502".into(),
        };
        assert!(e.to_string().contains("HTTP 502"));
    }

    #[test]
    fn unsupported_option_display() {
        let e = RewriteError::UnsupportedOption {
            option: "cta".into(),
            profile: "classic".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("'cta'"));
        assert!(msg.contains("'classic'"));
    }

    #[test]
    fn recoverability() {
        assert!(RewriteError::EmptyInput.is_recoverable());
        assert!(RewriteError::Service {
            message: "x".into()
        }
        .is_recoverable());
        assert!(!RewriteError::Configuration {
            detail: "x".into()
        }
        .is_recoverable());
        assert!(!RewriteError::InvalidConfig("x".into()).is_recoverable());
    }
}
