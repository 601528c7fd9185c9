//! CLI binary for edgequake-rewrite.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `TransformOptions` + `RewriteConfig` and prints or exports the result.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_rewrite::{
    export_to_file, parse_keywords, prepare_prompt, transform, CtaType, Directives, FormatStyle,
    KeywordPolicy, LengthMode, OutputLanguage, OutputMarkup, Profile, RewriteConfig,
    RewriteError, ToneStyle, TransformOptions, WritingEnhancement, EXPORT_FILE_NAME,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Rewrite an article as a step-by-step guide in Thai (stdout)
  rewrite article.txt

  # Pipe content in, shorten to 70 %, casual tone
  cat article.txt | rewrite --length 70% --tone casual

  # SEO keywords: first line is the main keyword (used 2x), others 1x
  rewrite article.txt --keywords-file keywords.txt

  # Same keyword frequency for every keyword
  rewrite article.txt -k "buy crypto" -k "crypto wallet" --keyword-frequency 3

  # English output with a strong call-to-action, saved as transformed_content.txt
  rewrite review.txt --language english --cta strong -o

  # Ask for Markdown and render it to an HTML fragment
  rewrite article.txt --html -o article.html

  # Show the prompt without calling the API (no API key needed)
  rewrite article.txt --format q-and-a --print-prompt

LENGTH VALUES:
  keep            keep the original length (default)
  50% / 70%       shorten to about that share of the original
  130% ... 400%   expand; 200% doubles the content
  4-sentences     about four sentences per section

PROFILES:
  classic      Thai plain text, 4 formats, 3 tones, main/secondary keywords
  seo          + comparison table, Q&A, extra tones, N-sentences, keyword frequency
  commercial   + comparison table, Q&A, extra tones, call-to-action, output language
  full         everything, including --html (default)

ENVIRONMENT VARIABLES:
  OPENROUTER_API_KEY      OpenRouter API key (default provider)
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (openrouter, openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID
"#;

/// Rewrite text content with LLMs: format, tone, length, CTA and SEO keywords.
#[derive(Parser, Debug)]
#[command(
    name = "rewrite",
    version,
    about = "Rewrite text content with LLMs: format, tone, length, CTA and SEO keywords",
    long_about = "Rewrite pasted or piped text content with a Large Language Model. \
Choose the structure, tone, length, writing enhancements, call-to-action and SEO keywords; \
the tool assembles a precise instruction, sends it to the model and prints or exports the result.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Text file to rewrite. Reads stdin when omitted or "-".
    input: Option<PathBuf>,

    /// Export the result to a file (default name: transformed_content.txt).
    #[arg(
        short,
        long,
        env = "REWRITE_OUTPUT",
        num_args = 0..=1,
        default_missing_value = EXPORT_FILE_NAME
    )]
    output: Option<PathBuf>,

    /// Content structure.
    #[arg(long, env = "REWRITE_FORMAT", value_enum, default_value = "step-by-step-guide")]
    format: FormatArg,

    /// Tone of voice.
    #[arg(long, env = "REWRITE_TONE", value_enum, default_value = "semi-formal")]
    tone: ToneArg,

    /// Target length: keep, <N>% or <N>-sentences.
    #[arg(long, env = "REWRITE_LENGTH", default_value = "keep")]
    length: String,

    /// Writing enhancements (comma-separated).
    #[arg(
        long,
        env = "REWRITE_ENHANCE",
        value_enum,
        value_delimiter = ',',
        default_value = "improve-coherence"
    )]
    enhance: Vec<EnhanceArg>,

    /// Disable all writing enhancements.
    #[arg(long, conflicts_with = "enhance")]
    no_enhance: bool,

    /// Call-to-action strength (commercial or review content).
    #[arg(long, env = "REWRITE_CTA", value_enum, default_value = "none")]
    cta: CtaArg,

    /// Output language.
    #[arg(long, env = "REWRITE_LANGUAGE", value_enum, default_value = "thai")]
    language: LanguageArg,

    /// SEO keyword; repeat for more. The first one is the main keyword.
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// File with one SEO keyword per line (read before --keyword values).
    #[arg(long, env = "REWRITE_KEYWORDS_FILE")]
    keywords_file: Option<PathBuf>,

    /// Use every keyword this many times instead of main ×2 / others ×1.
    #[arg(long, env = "REWRITE_KEYWORD_FREQUENCY")]
    keyword_frequency: Option<u32>,

    /// Ask for Markdown output instead of plain text.
    #[arg(long, env = "REWRITE_MARKDOWN")]
    markdown: bool,

    /// Render the result to an HTML fragment (implies --markdown).
    #[arg(long, env = "REWRITE_HTML")]
    html: bool,

    /// Capability profile: classic, seo, commercial, full.
    #[arg(long, env = "REWRITE_PROFILE", value_enum, default_value = "full")]
    profile: ProfileArg,

    /// JSON file replacing the format and tone directive tables.
    #[arg(long, env = "REWRITE_DIRECTIVES")]
    directives: Option<PathBuf>,

    /// Print the prompt and exit without calling the API.
    #[arg(long)]
    print_prompt: bool,

    /// LLM model ID (e.g. anthropic/claude-3.5-sonnet, gpt-4.1-mini).
    #[arg(long, env = "EDGEQUAKE_MODEL")]
    model: Option<String>,

    /// LLM provider: openrouter, openai, anthropic, gemini, ollama.
    #[arg(long, env = "EDGEQUAKE_PROVIDER")]
    provider: Option<String>,

    /// Path to a text file containing a custom system prompt.
    #[arg(long, env = "REWRITE_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// Max LLM output tokens.
    #[arg(long, env = "REWRITE_MAX_TOKENS", default_value_t = 3000)]
    max_tokens: usize,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "REWRITE_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Retries on LLM failure (0 = fail fast).
    #[arg(long, env = "REWRITE_MAX_RETRIES", default_value_t = 0)]
    max_retries: u32,

    /// LLM call timeout in seconds.
    #[arg(long, env = "REWRITE_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Output structured JSON (text, html, prompt, stats).
    #[arg(long, env = "REWRITE_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "REWRITE_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "REWRITE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "REWRITE_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    StandardArticle,
    StepByStepGuide,
    ProsAndCons,
    Comparison,
    ComparisonTable,
    QAndA,
}

impl From<FormatArg> for FormatStyle {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::StandardArticle => FormatStyle::StandardArticle,
            FormatArg::StepByStepGuide => FormatStyle::StepByStepGuide,
            FormatArg::ProsAndCons => FormatStyle::ProsAndCons,
            FormatArg::Comparison => FormatStyle::ComparisonFormat,
            FormatArg::ComparisonTable => FormatStyle::ComparisonTable,
            FormatArg::QAndA => FormatStyle::QandA,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum ToneArg {
    Formal,
    SemiFormal,
    BusinessCasual,
    Casual,
    Authoritative,
}

impl From<ToneArg> for ToneStyle {
    fn from(v: ToneArg) -> Self {
        match v {
            ToneArg::Formal => ToneStyle::Formal,
            ToneArg::SemiFormal => ToneStyle::SemiFormal,
            ToneArg::BusinessCasual => ToneStyle::BusinessCasual,
            ToneArg::Casual => ToneStyle::Casual,
            ToneArg::Authoritative => ToneStyle::Authoritative,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum EnhanceArg {
    SentenceRestructuring,
    WordVariation,
    ImproveCoherence,
}

impl From<EnhanceArg> for WritingEnhancement {
    fn from(v: EnhanceArg) -> Self {
        match v {
            EnhanceArg::SentenceRestructuring => WritingEnhancement::SentenceRestructuring,
            EnhanceArg::WordVariation => WritingEnhancement::WordVariation,
            EnhanceArg::ImproveCoherence => WritingEnhancement::ImproveCoherence,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum CtaArg {
    None,
    Soft,
    Medium,
    Strong,
}

impl From<CtaArg> for CtaType {
    fn from(v: CtaArg) -> Self {
        match v {
            CtaArg::None => CtaType::None,
            CtaArg::Soft => CtaType::Soft,
            CtaArg::Medium => CtaType::Medium,
            CtaArg::Strong => CtaType::Strong,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum LanguageArg {
    Thai,
    English,
}

impl From<LanguageArg> for OutputLanguage {
    fn from(v: LanguageArg) -> Self {
        match v {
            LanguageArg::Thai => OutputLanguage::Thai,
            LanguageArg::English => OutputLanguage::English,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum ProfileArg {
    Classic,
    Seo,
    Commercial,
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(v: ProfileArg) -> Self {
        match v {
            ProfileArg::Classic => Profile::Classic,
            ProfileArg::Seo => Profile::Seo,
            ProfileArg::Commercial => Profile::Commercial,
            ProfileArg::Full => Profile::Full,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the spinner is running.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.print_prompt;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli, show_progress).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err.downcast_ref::<RewriteError>(), Some(RewriteError::EmptyInput)) {
                eprintln!(
                    "{} Please paste the content you want to transform.",
                    yellow("⚠")
                );
                ExitCode::from(2)
            } else {
                eprintln!("{} {:#}", red("✘ Error:"), err);
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: &Cli, show_progress: bool) -> Result<()> {
    let content = read_content(cli.input.as_ref())?;
    let options = build_options(cli, content)?;
    let config = build_config(cli).await?;

    // ── Dry run ──────────────────────────────────────────────────────────
    if cli.print_prompt {
        let prompt = prepare_prompt(&options, &config).context("Cannot build prompt")?;
        println!("{prompt}");
        return Ok(());
    }

    // ── Run transformation ───────────────────────────────────────────────
    let spinner = show_progress.then(new_spinner);
    let result = transform(&options, &config).await;
    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }
    let output = result.context("Transformation failed")?;

    if let Some(ref path) = cli.output {
        export_to_file(&output, path)
            .await
            .context("Export failed")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} chars  {}ms  →  {}",
                green("✔"),
                output.text.chars().count(),
                output.stats.total_duration_ms,
                bold(&path.display().to_string()),
            );
        }
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if cli.output.is_none() {
        let body = output.export_body();
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(body.as_bytes())
            .context("Failed to write to stdout")?;
        if !body.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "   {} tokens in  /  {} tokens out  ({})",
            dim(&output.stats.input_tokens.to_string()),
            dim(&output.stats.output_tokens.to_string()),
            dim(&output.stats.model),
        );
    }

    Ok(())
}

/// Read the source content from a file, or stdin for `None` / `-`.
fn read_content(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content from {:?}", path)),
        _ => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("{}", dim("Paste your content, then press Ctrl-D:"));
            }
            let mut buf = String::new();
            stdin
                .lock()
                .read_to_string(&mut buf)
                .context("Failed to read content from stdin")?;
            Ok(buf)
        }
    }
}

/// Map CLI args to `TransformOptions`.
fn build_options(cli: &Cli, content: String) -> Result<TransformOptions> {
    let length: LengthMode = cli.length.parse().context("Invalid --length")?;

    let mut keywords = match cli.keywords_file {
        Some(ref path) => parse_keywords(
            &std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read keywords from {:?}", path))?,
        ),
        None => Vec::new(),
    };
    keywords.extend(cli.keywords.iter().cloned());

    let enhancements: Vec<WritingEnhancement> = if cli.no_enhance {
        Vec::new()
    } else {
        cli.enhance.iter().cloned().map(Into::into).collect()
    };

    let policy = match cli.keyword_frequency {
        Some(n) => KeywordPolicy::Uniform(n),
        None => KeywordPolicy::PrimarySecondary,
    };

    let markup = if cli.markdown || cli.html {
        OutputMarkup::Markdown
    } else {
        OutputMarkup::PlainText
    };

    TransformOptions::builder(content)
        .format_style(cli.format.clone().into())
        .tone_style(cli.tone.clone().into())
        .length_mode(length)
        .enhancements(enhancements)
        .cta(cli.cta.clone().into())
        .output_language(cli.language.clone().into())
        .markup(markup)
        .keywords(keywords)
        .keyword_policy(policy)
        .build()
        .context("Invalid options")
}

/// Map CLI args to `RewriteConfig`.
async fn build_config(cli: &Cli) -> Result<RewriteConfig> {
    let mut builder = RewriteConfig::builder()
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .max_retries(cli.max_retries)
        .api_timeout_secs(cli.api_timeout)
        .render_html(cli.html)
        .profile(cli.profile.clone().into());

    if let Some(ref path) = cli.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(prompt);
    }
    if let Some(ref path) = cli.directives {
        builder = builder.directives(Directives::from_file(path)?);
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider.clone());
    }

    builder.build().context("Invalid configuration")
}

fn new_spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Rewriting");
    bar.set_message("Transforming your content…");
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
