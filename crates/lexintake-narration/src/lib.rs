//! Narration (text-to-speech) adapter for the intake assistant.
//!
//! The dialogue core never depends on narration; the transport layer calls
//! the adapter on demand to render a reply as speech. Engine trouble is
//! contained here and degraded to a browser-fallback signal, never surfaced
//! as a hard failure to the caller.

pub mod error;
pub mod service;

pub use error::NarrationError;
pub use service::{BrowserFallbackNarrator, MockNarrator, Narration, NarrationEngine, Narrator};
