//! Narrator port and the built-in engines.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::NarrationError;

/// Which engine produced (or declined to produce) the audio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationEngine {
    /// An external text-to-speech service.
    Remote,
    /// No server-side audio; the browser's speech synthesis should speak
    /// the text locally.
    BrowserFallback,
    /// Test double.
    Mock,
}

/// Result of one narration request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    /// Rendered audio, when the engine produced any.
    pub audio: Option<Vec<u8>>,
    /// The caller should fall back to local (browser) speech synthesis.
    pub use_local_fallback: bool,
    pub engine: NarrationEngine,
}

/// Port for text-to-speech rendering.
///
/// Implementations must contain their own failures: a broken engine
/// degrades to `use_local_fallback` rather than erroring the conversation.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(&self, text: &str) -> Result<Narration, NarrationError>;
}

/// Narrator that never produces server-side audio and always signals the
/// browser fallback. This is the default engine: the web client speaks the
/// reply with its own speech synthesis.
pub struct BrowserFallbackNarrator;

#[async_trait]
impl Narrator for BrowserFallbackNarrator {
    async fn narrate(&self, text: &str) -> Result<Narration, NarrationError> {
        if text.trim().is_empty() {
            return Err(NarrationError::EmptyText);
        }
        Ok(Narration {
            audio: None,
            use_local_fallback: true,
            engine: NarrationEngine::BrowserFallback,
        })
    }
}

/// Test narrator with scriptable behavior.
///
/// With `fail` set, the engine error is contained and degraded to the
/// fallback signal, which is what a production adapter wrapping a flaky
/// remote engine does.
pub struct MockNarrator {
    pub fail: bool,
}

impl MockNarrator {
    pub fn new() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl Default for MockNarrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Narrator for MockNarrator {
    async fn narrate(&self, text: &str) -> Result<Narration, NarrationError> {
        if text.trim().is_empty() {
            return Err(NarrationError::EmptyText);
        }
        if self.fail {
            warn!("mock narration engine failed; degrading to local fallback");
            return Ok(Narration {
                audio: None,
                use_local_fallback: true,
                engine: NarrationEngine::Mock,
            });
        }
        Ok(Narration {
            audio: Some(text.as_bytes().to_vec()),
            use_local_fallback: false,
            engine: NarrationEngine::Mock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_browser_fallback_signals_local_speech() {
        let narrator = BrowserFallbackNarrator;
        let narration = narrator.narrate("Bienvenido").await.unwrap();
        assert!(narration.audio.is_none());
        assert!(narration.use_local_fallback);
        assert_eq!(narration.engine, NarrationEngine::BrowserFallback);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let narrator = BrowserFallbackNarrator;
        let result = narrator.narrate("   ").await;
        assert!(matches!(result.unwrap_err(), NarrationError::EmptyText));
    }

    #[tokio::test]
    async fn test_mock_produces_audio() {
        let narrator = MockNarrator::new();
        let narration = narrator.narrate("hola").await.unwrap();
        assert_eq!(narration.audio.as_deref(), Some("hola".as_bytes()));
        assert!(!narration.use_local_fallback);
    }

    #[tokio::test]
    async fn test_failing_mock_degrades_to_fallback() {
        let narrator = MockNarrator::failing();
        let narration = narrator.narrate("hola").await.unwrap();
        assert!(narration.audio.is_none());
        assert!(narration.use_local_fallback);
    }

    #[tokio::test]
    async fn test_narrator_is_object_safe() {
        let narrator: Box<dyn Narrator> = Box::new(BrowserFallbackNarrator);
        let narration = narrator.narrate("texto").await.unwrap();
        assert!(narration.use_local_fallback);
    }
}
