//! Studio session facade.
//!
//! Wires the analyzer, tone recommender, voice catalog, generation engine,
//! playback engine and project store into one session-scoped object and owns
//! the project generation cycle. Constructed once per application session;
//! dropping it tears everything down.

use crate::error::{NarravoxError, NarravoxResult};
use crate::generation::{AudioClip, GenerationConfig, GenerationEngine, JobStatus, SynthesisBackend};
use crate::playback::{PlaybackConfig, PlaybackEngine};
use crate::project::{Project, ProjectDraft, ProjectStatus, ProjectStore, ProjectUpdate};
use crate::script_analyzer::{
    AnalyzerConfig, Complexity, ScriptAnalysis, ScriptAnalyzer, Sentiment,
};
use crate::tone::{self, Tone};
use crate::voice_manager::{Emotion, VoiceConfig, VoiceManager, VoiceProfile};
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for a studio session
#[derive(Debug, Clone, Default)]
pub struct StudioConfig {
    /// Script analyzer configuration
    pub analyzer: AnalyzerConfig,
    /// Generation engine configuration
    pub generation: GenerationConfig,
    /// Playback engine configuration
    pub playback: PlaybackConfig,
}

/// A studio session: the orchestration surface the presentation layer talks to
#[derive(Debug)]
pub struct Studio {
    voices: VoiceManager,
    analyzer: ScriptAnalyzer,
    generator: GenerationEngine,
    player: PlaybackEngine,
    projects: ProjectStore,
}

impl Studio {
    /// Create a studio session with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StudioConfig::default())
    }

    /// Create a studio session with custom configuration
    #[must_use]
    pub fn with_config(config: StudioConfig) -> Self {
        Self {
            voices: VoiceManager::new(),
            analyzer: ScriptAnalyzer::with_config(config.analyzer),
            generator: GenerationEngine::with_config(config.generation),
            player: PlaybackEngine::with_config(config.playback),
            projects: ProjectStore::new(),
        }
    }

    /// Create a studio session against a custom synthesis backend
    #[must_use]
    pub fn with_backend(backend: Arc<dyn SynthesisBackend>, config: StudioConfig) -> Self {
        Self {
            voices: VoiceManager::new(),
            analyzer: ScriptAnalyzer::with_config(config.analyzer),
            generator: GenerationEngine::with_backend(backend, config.generation),
            player: PlaybackEngine::with_config(config.playback),
            projects: ProjectStore::new(),
        }
    }

    /// Create a draft project for a script and select it.
    ///
    /// The draft gets the recommended tone for its script and the default
    /// voice.
    pub fn create_draft<S: Into<String>>(&self, name: S, script: S) -> Project {
        let script = script.into();
        let draft = ProjectDraft::new(name.into(), script.clone())
            .with_tone(tone::recommend(&script))
            .with_voice(VoiceConfig::new(self.voices.default_voice().id));

        let project = self.projects.create(draft);
        // Selecting a freshly created id cannot fail
        let _ = self.projects.set_current(Some(&project.id));
        project
    }

    /// Run the generation cycle for a project.
    ///
    /// Moves the project to Processing, generates audio with its script and
    /// voice, attaches the clip and marks the project Completed, then hands
    /// the clip to the playback engine. On backend failure the project is
    /// marked Error and the failure propagated; retrying is a fresh explicit
    /// call.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` for an unknown project, `VoiceNotFound` for
    /// a voice missing from the catalog, `InvalidInput` for an empty script,
    /// `JobInProgress` while another generation runs (all rejected before any
    /// status change), and `SynthesisError` on backend failure.
    pub async fn narrate(&self, project_id: &str) -> NarravoxResult<AudioClip> {
        let project = self.projects.get(project_id)?;
        self.voices.get_voice(project.voice.voice_id())?;

        if project.script.trim().is_empty() {
            return Err(NarravoxError::invalid_input("Script cannot be empty"));
        }
        if self.generator.status().await == JobStatus::Running {
            return Err(NarravoxError::job_in_progress(
                "A generation job is already running; wait for it to finish",
            ));
        }

        self.projects.update(
            project_id,
            ProjectUpdate::default().with_status(ProjectStatus::Processing),
        )?;
        info!("Narrating project {project_id}");

        match self.generator.generate(&project.script, &project.voice).await {
            Ok(clip) => {
                self.projects.update(
                    project_id,
                    ProjectUpdate::default()
                        .with_audio(clip.clone())
                        .with_status(ProjectStatus::Completed),
                )?;
                self.player.load(&clip).await;
                info!("Project {project_id} completed with clip {}", clip.id);
                Ok(clip)
            }
            Err(err) => {
                warn!("Project {project_id} generation failed: {err}");
                self.projects.update(
                    project_id,
                    ProjectUpdate::default().with_status(ProjectStatus::Error),
                )?;
                Err(err)
            }
        }
    }

    /// Analyze a script through the session analyzer
    ///
    /// # Errors
    ///
    /// See [`ScriptAnalyzer::analyze`].
    pub async fn analyze(&self, script: &str) -> NarravoxResult<ScriptAnalysis> {
        self.analyzer.analyze(script).await
    }

    /// Recommend a tone for a script
    #[must_use]
    pub fn recommend_tone(&self, script: &str) -> Tone {
        tone::recommend(script)
    }

    /// Derive a tuned voice configuration for a script.
    ///
    /// Keeps the base voice identity; emotion follows the script sentiment,
    /// speed follows its complexity, pitch returns to neutral.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the script is empty or whitespace-only.
    pub fn optimized_config(
        &self,
        script: &str,
        base: &VoiceConfig,
    ) -> NarravoxResult<VoiceConfig> {
        let analysis = ScriptAnalysis::of(script)?;

        let emotion = match analysis.sentiment {
            Sentiment::Positive => Emotion::Happy,
            Sentiment::Negative => Emotion::Sad,
            Sentiment::Neutral => Emotion::Neutral,
        };
        let speed = match analysis.complexity {
            Complexity::High => 0.9,
            Complexity::Low => 1.1,
            Complexity::Medium => 1.0,
        };

        Ok(base.clone().with_emotion(emotion).with_speed(speed).with_pitch(0))
    }

    /// Get the voice catalog
    #[must_use]
    pub fn voices(&self) -> &VoiceManager {
        &self.voices
    }

    /// Get all voice profiles in the catalog
    #[must_use]
    pub fn voice_profiles(&self) -> Vec<VoiceProfile> {
        self.voices.voices()
    }

    /// Get the project store
    #[must_use]
    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    /// Get the playback engine
    #[must_use]
    pub fn player(&self) -> &PlaybackEngine {
        &self.player
    }

    /// Get the generation engine
    #[must_use]
    pub fn generator(&self) -> &GenerationEngine {
        &self.generator
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}
