//! # Narravox Core
//!
//! Generation and playback orchestration for the Narravox narration studio.
//!
//! ## Features
//!
//! - Heuristic script analysis (complexity, duration, sentiment, tone)
//! - Voice catalog with emotion, speed and pitch configuration
//! - One-at-a-time generation jobs over a pluggable synthesis backend
//! - Tick-driven playback with strict timer ownership
//! - In-memory project store with selection
//!
//! ## Example
//!
//! ```rust,no_run
//! use narravox_core::Studio;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let studio = Studio::new();
//!     let project = studio.create_draft("Intro", "Welcome to our platform.");
//!
//!     let analysis = studio.analyze(&project.script).await?;
//!     println!("~{} narration", analysis.estimated_duration);
//!
//!     studio.narrate(&project.id).await?;
//!     studio.player().play().await?;
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod generation;
pub mod playback;
pub mod project;
pub mod script_analyzer;
pub mod studio;
pub mod tone;
pub mod voice_manager;

// Re-export main types for convenience
pub use error::{NarravoxError, NarravoxResult};
pub use generation::{
    AudioClip, GenerationConfig, GenerationEngine, GenerationJob, JobStatus, SimulatedSynthesizer,
    SynthesisBackend,
};
pub use playback::{PlaybackConfig, PlaybackEngine, PlaybackState, PlaybackStatus};
pub use project::{Project, ProjectDraft, ProjectStatus, ProjectStore, ProjectUpdate};
pub use script_analyzer::{
    AnalyzerConfig, Complexity, ScriptAnalysis, ScriptAnalyzer, Sentiment,
};
pub use studio::{Studio, StudioConfig};
pub use tone::{recommend, Tone, ToneInfo, TONE_CATALOG};
pub use voice_manager::{Accent, Emotion, Gender, VoiceConfig, VoiceManager, VoiceProfile};

/// Version information for the narravox-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Narration rate used for duration estimates (words per minute)
pub const WORDS_PER_MINUTE: usize = 150;

/// Maximum script length accepted for generation (characters)
pub const MAX_SCRIPT_LENGTH: usize = 5_000;

/// Sample rate of generated clips (44.1 kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Initial playback volume
pub const DEFAULT_VOLUME: f32 = 0.8;
