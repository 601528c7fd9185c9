//! Configuration for a rewrite request.
//!
//! [`TransformOptions`](crate::options::TransformOptions) says *what* the
//! user wants; [`RewriteConfig`] says *how* to get it: which model, which
//! sampling parameters, which capability profile, whether to render HTML.
//! Keeping the two apart lets the same options be replayed against another
//! model without touching the form values.

use crate::error::RewriteError;
use crate::options::Profile;
use crate::prompts::Directives;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Model used when neither the config nor the environment names one.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.5-sonnet";

/// Configuration for a rewrite request.
///
/// # Example
/// ```rust
/// use edgequake_rewrite::RewriteConfig;
///
/// let config = RewriteConfig::builder()
///     .model("openai/gpt-4.1-mini")
///     .temperature(0.5)
///     .render_html(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_tokens, 3000);
/// ```
#[derive(Clone)]
pub struct RewriteConfig {
    /// LLM model identifier. If None, uses [`DEFAULT_MODEL`] or `EDGEQUAKE_MODEL`.
    pub model: Option<String>,

    /// LLM provider name (e.g. "openrouter", "openai", "anthropic").
    /// If None along with `provider`, the provider is auto-detected.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature. Default: 0.7.
    ///
    /// Rewriting benefits from some variety in phrasing; transcription-level
    /// determinism is not the goal here.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 3000.
    pub max_tokens: usize,

    /// Retry attempts after a failed completion call. Default: 0 (no retry).
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled per attempt. Default: 500.
    pub retry_backoff_ms: u64,

    /// Per-call timeout in seconds. Default: 120.
    pub api_timeout_secs: u64,

    /// Custom system prompt. If None, uses the built-in editor prompt.
    pub system_prompt: Option<String>,

    /// Render the completion to an HTML fragment. Default: false.
    ///
    /// Implies Markdown output from the model; see
    /// [`crate::options::OutputMarkup`].
    pub render_html: bool,

    /// Capability profile the options are validated against. Default: Full.
    pub profile: Profile,

    /// Format and tone directive tables. Default: built-in tables.
    pub directives: Directives,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.7,
            max_tokens: 3000,
            max_retries: 0,
            retry_backoff_ms: 500,
            api_timeout_secs: 120,
            system_prompt: None,
            render_html: false,
            profile: Profile::default(),
            directives: Directives::default(),
        }
    }
}

impl fmt::Debug for RewriteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_retries", &self.max_retries)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("render_html", &self.render_html)
            .field("profile", &self.profile)
            .finish()
    }
}

impl RewriteConfig {
    /// Create a new builder for `RewriteConfig`.
    pub fn builder() -> RewriteConfigBuilder {
        RewriteConfigBuilder {
            config: Self::default(),
        }
    }

    /// Model id to request, falling back to [`DEFAULT_MODEL`].
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

/// Builder for [`RewriteConfig`].
#[derive(Debug)]
pub struct RewriteConfigBuilder {
    config: RewriteConfig,
}

impl RewriteConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn render_html(mut self, v: bool) -> Self {
        self.config.render_html = v;
        self
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn directives(mut self, directives: Directives) -> Self {
        self.config.directives = directives;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RewriteConfig, RewriteError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(RewriteError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if c.api_timeout_secs == 0 {
            return Err(RewriteError::InvalidConfig(
                "api_timeout_secs must be ≥ 1".into(),
            ));
        }
        if c.max_retries > 10 {
            return Err(RewriteError::InvalidConfig(format!(
                "max_retries must be ≤ 10, got {}",
                c.max_retries
            )));
        }
        if c.render_html && !c.profile.capabilities().markdown_output {
            return Err(RewriteError::UnsupportedOption {
                option: "html rendering".into(),
                profile: c.profile.to_string(),
            });
        }
        c.directives.check_complete()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ToneStyle;

    #[test]
    fn defaults() {
        let c = RewriteConfig::default();
        assert_eq!(c.temperature, 0.7);
        assert_eq!(c.max_tokens, 3000);
        assert_eq!(c.max_retries, 0);
        assert!(!c.render_html);
        assert_eq!(c.profile, Profile::Full);
        assert_eq!(c.model_or_default(), DEFAULT_MODEL);
    }

    #[test]
    fn temperature_is_clamped() {
        let c = RewriteConfig::builder().temperature(5.0).build().unwrap();
        assert_eq!(c.temperature, 2.0);
        let c = RewriteConfig::builder().temperature(-1.0).build().unwrap();
        assert_eq!(c.temperature, 0.0);
    }

    #[test]
    fn zero_max_tokens_rejected() {
        assert!(RewriteConfig::builder().max_tokens(0).build().is_err());
    }

    #[test]
    fn too_many_retries_rejected() {
        assert!(RewriteConfig::builder().max_retries(11).build().is_err());
        assert!(RewriteConfig::builder().max_retries(3).build().is_ok());
    }

    #[test]
    fn html_needs_markdown_capable_profile() {
        let err = RewriteConfig::builder()
            .profile(Profile::Classic)
            .render_html(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, RewriteError::UnsupportedOption { .. }));
    }

    #[test]
    fn incomplete_directives_rejected_at_build() {
        let mut d = Directives::default();
        d.tone.remove(&ToneStyle::Authoritative);
        let err = RewriteConfig::builder().directives(d).build().unwrap_err();
        assert!(matches!(err, RewriteError::Configuration { .. }));
    }

    #[test]
    fn debug_hides_provider() {
        let s = format!("{:?}", RewriteConfig::default());
        assert!(s.contains("RewriteConfig"));
        assert!(s.contains("provider: None"));
    }
}
