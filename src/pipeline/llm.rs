//! Completion service: send the prompt, get the rewritten text back.
//!
//! The core only needs "prompt in, text out", so the seam is the small
//! [`CompletionService`] trait rather than the full `LLMProvider` API. The
//! production implementation, [`LlmCompletionService`], wraps any
//! edgequake-llm provider; tests plug in a fake.
//!
//! ## Retry Strategy
//!
//! A rewrite is one user-triggered call, so by default there is no retry:
//! a failure is reported and the user decides whether to press the button
//! again. Setting `max_retries` enables a bounded exponential backoff
//! (`retry_backoff_ms * 2^attempt`), the same shape as a 500 ms → 1 s → 2 s
//! sequence for three retries.

use crate::config::RewriteConfig;
use crate::error::RewriteError;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, warn};

/// One completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub prompt: &'a str,
    pub temperature: f32,
    pub max_tokens: usize,
}

/// Raw text returned by the service, with token accounting when available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub input_tokens: usize,
    pub output_tokens: usize,
    /// Model that produced the text; empty when the service does not say.
    pub model: String,
}

/// Anything that can turn a prompt into text.
pub trait CompletionService: Send + Sync {
    fn complete(
        &self,
        request: &CompletionRequest<'_>,
    ) -> impl Future<Output = Result<Completion, RewriteError>> + Send;
}

/// [`CompletionService`] backed by an edgequake-llm provider.
#[derive(Clone)]
pub struct LlmCompletionService {
    provider: Arc<dyn LLMProvider>,
}

impl LlmCompletionService {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }
}

impl CompletionService for LlmCompletionService {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Completion, RewriteError> {
        let (messages, options) = chat_request(request);

        let response = self
            .provider
            .chat(&messages, Some(&options))
            .await
            .map_err(|e| RewriteError::Service {
                message: format!("{e}"),
            })?;

        Ok(Completion {
            content: response.content,
            input_tokens: response.prompt_tokens,
            output_tokens: response.completion_tokens,
            model: response.model,
        })
    }
}

/// System + user messages and sampling options for one request.
fn chat_request(request: &CompletionRequest<'_>) -> (Vec<ChatMessage>, CompletionOptions) {
    let messages = vec![
        ChatMessage::system(request.system_prompt),
        ChatMessage::user(request.prompt),
    ];
    let options = CompletionOptions {
        temperature: Some(request.temperature),
        max_tokens: Some(request.max_tokens),
        ..Default::default()
    };
    (messages, options)
}

/// Delay before retry `attempt` (1-based); saturates instead of overflowing.
fn backoff_ms(base_ms: u64, attempt: u32) -> u64 {
    base_ms.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)))
}

/// Result of [`request_completion`]: the completion plus call bookkeeping.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub completion: Completion,
    pub retries: u32,
    pub duration_ms: u64,
}

/// Drive one completion call with the configured timeout and retry policy.
///
/// Each attempt is bounded by `api_timeout_secs`. After the last attempt
/// the most recent error is returned as [`RewriteError::Service`].
pub async fn request_completion<S: CompletionService>(
    service: &S,
    request: &CompletionRequest<'_>,
    config: &RewriteConfig,
) -> Result<CompletionOutcome, RewriteError> {
    let start = Instant::now();
    let mut last_err: Option<String> = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let backoff = backoff_ms(config.retry_backoff_ms, attempt);
            warn!(
                "Completion: retry {}/{} after {}ms",
                attempt, config.max_retries, backoff
            );
            sleep(Duration::from_millis(backoff)).await;
        }

        let call = service.complete(request);
        match timeout(Duration::from_secs(config.api_timeout_secs), call).await {
            Ok(Ok(completion)) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                debug!(
                    "Completion: {} input tokens, {} output tokens, {}ms",
                    completion.input_tokens, completion.output_tokens, duration_ms
                );
                return Ok(CompletionOutcome {
                    completion,
                    retries: attempt,
                    duration_ms,
                });
            }
            Ok(Err(e)) => {
                warn!("Completion: attempt {} failed: {}", attempt + 1, e);
                last_err = Some(match e {
                    RewriteError::Service { message } => message,
                    other => other.to_string(),
                });
            }
            Err(_) => {
                let msg = format!("call timed out after {}s", config.api_timeout_secs);
                warn!("Completion: attempt {} {}", attempt + 1, msg);
                last_err = Some(msg);
            }
        }
    }

    Err(RewriteError::Service {
        message: last_err.unwrap_or_else(|| "Unknown error".to_string()),
    })
}
