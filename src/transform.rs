//! Rewrite entry points.
//!
//! One call is one user action: validate the options, build the prompt,
//! make a single completion call, clean the text, optionally render HTML,
//! and hand everything back as a [`TransformOutput`]. Nothing is cached and
//! nothing outlives the call.
//!
//! [`transform`] resolves an edgequake-llm provider from the config or the
//! environment. [`transform_with`] takes any [`CompletionService`], which is
//! what tests and embedders with their own client use.

use crate::config::RewriteConfig;
use crate::error::RewriteError;
use crate::options::{OutputMarkup, TransformOptions};
use crate::output::{TransformOutput, TransformStats};
use crate::pipeline::llm::{
    self, Completion, CompletionRequest, CompletionService, LlmCompletionService,
};
use crate::pipeline::{postprocess, prompt, render};
use crate::prompts::DEFAULT_SYSTEM_PROMPT;
use edgequake_llm::{LLMProvider, ProviderFactory};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Rewrite content with the configured (or auto-detected) LLM provider.
///
/// # Errors
/// - [`RewriteError::EmptyInput`] before any provider lookup or API call
/// - [`RewriteError::UnsupportedOption`] when the profile lacks an option
/// - [`RewriteError::ProviderNotConfigured`] when no provider can be built
/// - [`RewriteError::Service`] when the call fails or returns nothing usable
pub async fn transform(
    options: &TransformOptions,
    config: &RewriteConfig,
) -> Result<TransformOutput, RewriteError> {
    // Fail on bad input before touching the environment for API keys.
    prepare_prompt(options, config)?;

    let provider = resolve_provider(config)?;
    let service = LlmCompletionService::new(provider);
    transform_with(&service, options, config).await
}

/// Rewrite content through an explicit completion service.
pub async fn transform_with<S: CompletionService>(
    service: &S,
    options: &TransformOptions,
    config: &RewriteConfig,
) -> Result<TransformOutput, RewriteError> {
    let total_start = Instant::now();

    // ── Step 1: Build prompt ─────────────────────────────────────────────
    let prompt = prepare_prompt(options, config)?;
    info!(
        "Transforming {} chars of content ({} prompt chars)",
        options.source_content.chars().count(),
        prompt.chars().count()
    );

    // ── Step 2: Completion call ──────────────────────────────────────────
    let request = CompletionRequest {
        system_prompt: config
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT),
        prompt: &prompt,
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };
    let outcome = llm::request_completion(service, &request, config).await?;

    // ── Step 3: Clean completion ─────────────────────────────────────────
    let text = postprocess::clean_completion(&outcome.completion.content);
    if text.is_empty() {
        return Err(RewriteError::Service {
            message: "the model returned no usable content".into(),
        });
    }

    // ── Step 4: Optional HTML rendering ──────────────────────────────────
    let html = config.render_html.then(|| render::render_html(&text));
    if let Some(ref h) = html {
        debug!("Rendered {} bytes of HTML", h.len());
    }

    let stats = TransformStats {
        model: responding_model(&outcome.completion, config),
        input_tokens: outcome.completion.input_tokens as u64,
        output_tokens: outcome.completion.output_tokens as u64,
        retries: outcome.retries,
        llm_duration_ms: outcome.duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Transformation complete: {} chars out, {}ms total",
        text.chars().count(),
        stats.total_duration_ms
    );

    Ok(TransformOutput {
        text,
        html,
        prompt,
        stats,
    })
}

/// Model reported by the service, else the configured one.
fn responding_model(completion: &Completion, config: &RewriteConfig) -> String {
    if completion.model.trim().is_empty() {
        config.model_or_default().to_string()
    } else {
        completion.model.clone()
    }
}

/// Validate `options` against the config and build the prompt.
///
/// No network access; this is what `--print-prompt` shows.
pub fn prepare_prompt(
    options: &TransformOptions,
    config: &RewriteConfig,
) -> Result<String, RewriteError> {
    if !options.has_content() {
        return Err(RewriteError::EmptyInput);
    }
    let options = effective_options(options, config);
    options.validate_for(config.profile)?;
    prompt::build_prompt(&options, &config.directives)
}

/// HTML rendering needs Markdown from the model.
fn effective_options<'a>(
    options: &'a TransformOptions,
    config: &RewriteConfig,
) -> Cow<'a, TransformOptions> {
    if config.render_html && options.markup != OutputMarkup::Markdown {
        let mut owned = options.clone();
        owned.markup = OutputMarkup::Markdown;
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(options)
    }
}

/// Rewrite content and export the result to a file.
///
/// Writes the HTML fragment when rendering is enabled, the text otherwise.
pub async fn transform_to_file(
    options: &TransformOptions,
    output_path: impl AsRef<Path>,
    config: &RewriteConfig,
) -> Result<TransformStats, RewriteError> {
    let output = transform(options, config).await?;
    export_to_file(&output, output_path).await?;
    Ok(output.stats)
}

/// Write the export body of `output` to `path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn export_to_file(
    output: &TransformOutput,
    path: impl AsRef<Path>,
) -> Result<(), RewriteError> {
    let path = path.as_ref();
    let write_err = |e| RewriteError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("txt.tmp");
    tokio::fs::write(&tmp_path, output.export_body())
        .await
        .map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;

    debug!("Exported {} bytes to {}", output.export_body().len(), path.display());
    Ok(())
}

/// Synchronous wrapper around [`transform`].
///
/// Creates a temporary tokio runtime internally.
pub fn transform_sync(
    options: &TransformOptions,
    config: &RewriteConfig,
) -> Result<TransformOutput, RewriteError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| RewriteError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(transform(options, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, RewriteError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        RewriteError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`), used as-is.
/// 2. **Named provider** (`config.provider_name`) with the configured model.
/// 3. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`).
/// 4. **OpenRouter** when `OPENROUTER_API_KEY` is set; the default model id
///    is an OpenRouter route.
/// 5. **Full auto-detection** via `ProviderFactory::from_env`.
fn resolve_provider(config: &RewriteConfig) -> Result<Arc<dyn LLMProvider>, RewriteError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        return create_provider(name, config.model_or_default());
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
        if !key.is_empty() {
            return create_provider("openrouter", config.model_or_default());
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| RewriteError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENROUTER_API_KEY (or OPENAI_API_KEY, ANTHROPIC_API_KEY) in your environment.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
