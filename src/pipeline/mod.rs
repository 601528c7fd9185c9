//! Pipeline stages for a rewrite request.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own and only one of them touches the network.
//!
//! ## Data Flow
//!
//! ```text
//! options ──▶ prompt ──▶ llm ──▶ postprocess ──▶ render
//! (form)      (pure)     (API)   (cleanup)       (HTML, optional)
//! ```
//!
//! 1. [`prompt`]      — assemble the instruction string from the options
//! 2. [`llm`]         — one completion call, with timeout and opt-in retry
//! 3. [`postprocess`] — deterministic cleanup of the returned text
//! 4. [`render`]      — Markdown-subset to HTML fragment

pub mod llm;
pub mod postprocess;
pub mod prompt;
pub mod render;
