//! Interactive session state for the client surface.
//!
//! The whole client contract lives here as plain state transitions; the
//! terminal loop in `main.rs` only does I/O. The backend and clipboard are
//! traits so tests drive the session with scripted fakes, and the copied
//! indicator takes an injected `Instant` so its expiry is testable without
//! sleeping.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;

use promptlens_api::analysis::models::Analysis;

use crate::clipboard::Clipboard;

/// How long the "copied" indicator stays visible.
pub const COPIED_RESET: Duration = Duration::from_millis(1500);

const EMPTY_PROMPT_ERROR: &str = "Enter a prompt to analyze.";

/// Failure surfaced by an analyze round trip.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Message taken from the `error` field of a non-2xx response.
    #[error("{0}")]
    Server(String),

    /// Transport failure or a response body that could not be read.
    #[error("Analysis failed. Please try again.")]
    Unavailable,
}

/// The analyze endpoint, as seen by the session.
#[async_trait]
pub trait AnalyzeBackend: Send + Sync {
    async fn analyze(&self, prompt: &str) -> Result<Analysis, BackendError>;
}

/// Mutable local state of one interactive session. Single-threaded and
/// event-driven; a second analyze while one is in flight is a no-op.
#[derive(Default)]
pub struct Session {
    pub prompt_text: String,
    pub last_analysis: Option<Analysis>,
    pub busy: bool,
    pub last_error: Option<String>,
    copied_at: Option<Instant>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one analysis round trip. Blank prompts are rejected locally,
    /// without a network call. On failure the previous analysis is kept.
    pub async fn analyze(&mut self, backend: &dyn AnalyzeBackend) {
        if self.busy {
            return;
        }
        if self.prompt_text.trim().is_empty() {
            self.last_error = Some(EMPTY_PROMPT_ERROR.to_string());
            return;
        }

        self.busy = true;
        self.last_error = None;
        let prompt = self.prompt_text.clone();
        match backend.analyze(&prompt).await {
            Ok(analysis) => {
                self.last_analysis = Some(analysis);
                self.copied_at = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
        self.busy = false;
    }

    /// Replaces the editable prompt text with the improved prompt, when the
    /// last analysis produced a non-blank one. No-op otherwise.
    pub fn use_improved_prompt(&mut self) {
        if let Some(improved) = self.improved_prompt().map(String::from) {
            self.prompt_text = improved;
        }
    }

    /// Copies the improved prompt, when present. Clipboard failures are
    /// ignored and leave the indicator unset.
    pub fn copy_improved_prompt(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        let Some(improved) = self.improved_prompt() else {
            return;
        };
        if clipboard.set_text(improved).is_ok() {
            self.copied_at = Some(now);
        }
    }

    /// Whether the transient "copied" indicator is still visible at `now`.
    pub fn copied_indicator(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.duration_since(at) < COPIED_RESET)
    }

    fn improved_prompt(&self) -> Option<&str> {
        self.last_analysis
            .as_ref()
            .map(|a| a.improved_prompt.as_str())
            .filter(|improved| !improved.trim().is_empty())
    }
}
