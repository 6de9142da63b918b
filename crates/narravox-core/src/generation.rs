//! Voice generation job management.
//!
//! Generation runs against a [`SynthesisBackend`] port. The shipped
//! [`SimulatedSynthesizer`] stands in for a real synthesis service with a
//! fixed processing delay; a production backend substitutes behind the same
//! trait without touching the job state machine.

use crate::error::{NarravoxError, NarravoxResult};
use crate::script_analyzer::estimated_duration_secs;
use crate::voice_manager::{Emotion, VoiceConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Generation job status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// No job has been submitted
    #[default]
    Idle,
    /// The backend is processing the request
    Running,
    /// The backend produced an audio clip
    Succeeded,
    /// The backend rejected the request
    Failed,
}

impl JobStatus {
    /// Check if this status is terminal
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Handle to a generated audio clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Unique clip identifier
    pub id: String,
    /// Location of the rendered audio
    pub uri: String,
    /// Clip length in whole seconds
    pub duration_secs: u64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Voice used for synthesis
    pub voice_id: String,
    /// Emotion used for synthesis
    pub emotion: Emotion,
    /// Speed multiplier used for synthesis
    pub speed: f32,
}

/// Snapshot of a generation job for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationJob {
    /// Input script
    pub script: String,
    /// Input voice configuration
    pub config: VoiceConfig,
    /// Current status
    pub status: JobStatus,
    /// Result clip, present once Succeeded
    pub result: Option<AudioClip>,
    /// Backend failure message, present once Failed
    pub error: Option<String>,
}

/// Generation engine configuration
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Simulated backend processing delay
    pub latency: Duration,
    /// Maximum accepted script length in characters
    pub max_script_length: usize,
    /// Sample rate of produced clips
    pub sample_rate: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(4),
            max_script_length: crate::MAX_SCRIPT_LENGTH,
            sample_rate: crate::DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Asynchronous synthesis backend boundary.
///
/// Takes a script and a voice configuration and resolves to an audio clip or
/// a failure. Implementations must be safe to share across tasks.
#[async_trait]
pub trait SynthesisBackend: Send + Sync + std::fmt::Debug {
    /// Synthesize a script into an audio clip
    async fn synthesize(&self, script: &str, config: &VoiceConfig) -> NarravoxResult<AudioClip>;
}

/// Placeholder backend with a fixed processing delay.
///
/// Clip duration is derived from the script's word count at the studio
/// narration rate; no audio is actually rendered.
#[derive(Debug, Clone)]
pub struct SimulatedSynthesizer {
    latency: Duration,
    sample_rate: u32,
}

impl SimulatedSynthesizer {
    /// Create a simulated backend from the engine configuration
    #[must_use]
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            latency: config.latency,
            sample_rate: config.sample_rate,
        }
    }
}

#[async_trait]
impl SynthesisBackend for SimulatedSynthesizer {
    async fn synthesize(&self, script: &str, config: &VoiceConfig) -> NarravoxResult<AudioClip> {
        debug!("Simulated synthesis of {} characters", script.len());
        tokio::time::sleep(self.latency).await;

        let id = uuid::Uuid::new_v4().to_string();
        let word_count = script.split_whitespace().count();

        Ok(AudioClip {
            uri: format!("/audio/generated_{id}.mp3"),
            id,
            duration_secs: estimated_duration_secs(word_count),
            sample_rate: self.sample_rate,
            voice_id: config.voice_id().to_string(),
            emotion: config.emotion(),
            speed: config.speed(),
        })
    }
}

/// Generation engine enforcing the one-job-at-a-time contract.
///
/// A request while a job is Running is rejected without disturbing the
/// running job; the caller awaits the current completion and issues a fresh
/// request. A new request replaces a terminal job.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    backend: Arc<dyn SynthesisBackend>,
    config: GenerationConfig,
    job: Arc<RwLock<Option<GenerationJob>>>,
}

impl GenerationEngine {
    /// Create an engine with the simulated backend and default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GenerationConfig::default())
    }

    /// Create an engine with the simulated backend and custom configuration
    #[must_use]
    pub fn with_config(config: GenerationConfig) -> Self {
        let backend = Arc::new(SimulatedSynthesizer::new(&config));
        Self::with_backend(backend, config)
    }

    /// Create an engine against a custom backend
    #[must_use]
    pub fn with_backend(backend: Arc<dyn SynthesisBackend>, config: GenerationConfig) -> Self {
        Self {
            backend,
            config,
            job: Arc::new(RwLock::new(None)),
        }
    }

    /// Generate an audio clip for a script.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty, whitespace-only or oversized
    /// script and for an invalid voice configuration (rejected before any
    /// state change); `JobInProgress` while a job is Running; and
    /// `SynthesisError` when the backend rejects the request, in which case
    /// the job is left in the terminal Failed status.
    pub async fn generate(
        &self,
        script: &str,
        config: &VoiceConfig,
    ) -> NarravoxResult<AudioClip> {
        self.validate_input(script, config)?;

        {
            let mut job = self.job.write().await;
            if matches!(job.as_ref().map(|j| j.status), Some(JobStatus::Running)) {
                warn!("Rejecting generation request: a job is already running");
                return Err(NarravoxError::job_in_progress(
                    "A generation job is already running; wait for it to finish",
                ));
            }

            *job = Some(GenerationJob {
                script: script.to_string(),
                config: config.clone(),
                status: JobStatus::Running,
                result: None,
                error: None,
            });
        }

        info!(
            "Generation started: {} characters, voice '{}'",
            script.len(),
            config.voice_id()
        );

        match self.backend.synthesize(script, config).await {
            Ok(clip) => {
                let mut job = self.job.write().await;
                if let Some(job) = job.as_mut() {
                    job.status = JobStatus::Succeeded;
                    job.result = Some(clip.clone());
                }
                info!("Generation succeeded: clip {} ({}s)", clip.id, clip.duration_secs);
                Ok(clip)
            }
            Err(err) => {
                let mut job = self.job.write().await;
                if let Some(job) = job.as_mut() {
                    job.status = JobStatus::Failed;
                    job.error = Some(err.to_string());
                }
                warn!("Generation failed: {err}");
                Err(err)
            }
        }
    }

    /// Get the current job snapshot
    #[must_use]
    pub async fn current_job(&self) -> Option<GenerationJob> {
        self.job.read().await.clone()
    }

    /// Get the current job status
    #[must_use]
    pub async fn status(&self) -> JobStatus {
        self.job
            .read()
            .await
            .as_ref()
            .map_or(JobStatus::Idle, |job| job.status)
    }

    /// Get the engine configuration
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn validate_input(&self, script: &str, config: &VoiceConfig) -> NarravoxResult<()> {
        if script.trim().is_empty() {
            return Err(NarravoxError::invalid_input("Script cannot be empty"));
        }

        if script.len() > self.config.max_script_length {
            return Err(NarravoxError::invalid_input(format!(
                "Script length {} exceeds maximum of {}",
                script.len(),
                self.config.max_script_length
            )));
        }

        config.validate()?;

        Ok(())
    }
}

impl Default for GenerationEngine {
    fn default() -> Self {
        Self::new()
    }
}
