//! Project records and the in-memory project store.
//!
//! The store is the unit of persistence for a script, its voice
//! configuration and its last generation result. Persistence is
//! process-lifetime only; a durable collaborator can be added behind the
//! same operation set.

use crate::error::{NarravoxError, NarravoxResult};
use crate::generation::AudioClip;
use crate::tone::Tone;
use crate::voice_manager::VoiceConfig;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Project lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Script captured, nothing generated yet
    #[default]
    Draft,
    /// A generation cycle is underway
    Processing,
    /// The last generation produced a clip
    Completed,
    /// The last generation failed
    Error,
}

impl ProjectStatus {
    /// Get the status identifier as used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A narration project: a script, its configuration and its last result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique, stable identifier
    pub id: String,
    /// Human-readable project name
    pub name: String,
    /// Script text
    pub script: String,
    /// Selected narration tone
    pub tone: Tone,
    /// Voice configuration
    pub voice: VoiceConfig,
    /// Last generation result, if any
    pub audio: Option<AudioClip>,
    /// Lifecycle status
    pub status: ProjectStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp, never before `created_at`
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a new project
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    /// Project name
    pub name: String,
    /// Script text
    pub script: String,
    /// Narration tone
    pub tone: Tone,
    /// Voice configuration
    pub voice: VoiceConfig,
}

impl ProjectDraft {
    /// Create a draft with a name and script
    #[must_use]
    pub fn new<S: Into<String>>(name: S, script: S) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
            ..Self::default()
        }
    }

    /// Set the narration tone
    #[must_use]
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Set the voice configuration
    #[must_use]
    pub fn with_voice(mut self, voice: VoiceConfig) -> Self {
        self.voice = voice;
        self
    }
}

/// Partial update merged into an existing project.
///
/// Absent fields leave the record untouched; id and `created_at` can never
/// change.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    /// Replacement name
    pub name: Option<String>,
    /// Replacement script
    pub script: Option<String>,
    /// Replacement tone
    pub tone: Option<Tone>,
    /// Replacement voice configuration
    pub voice: Option<VoiceConfig>,
    /// Generation result to attach
    pub audio: Option<AudioClip>,
    /// Replacement status
    pub status: Option<ProjectStatus>,
}

impl ProjectUpdate {
    /// Set the replacement name
    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the replacement script
    #[must_use]
    pub fn with_script<S: Into<String>>(mut self, script: S) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Set the replacement tone
    #[must_use]
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    /// Set the replacement voice configuration
    #[must_use]
    pub fn with_voice(mut self, voice: VoiceConfig) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Attach a generation result
    #[must_use]
    pub fn with_audio(mut self, audio: AudioClip) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Set the replacement status
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    projects: Vec<Project>,
    current: Option<String>,
}

/// In-memory project collection with selection.
///
/// Constructed once per studio session. All mutation goes through the
/// store's own operations; callers hold only snapshots.
#[derive(Debug, Default)]
pub struct ProjectStore {
    inner: RwLock<StoreInner>,
}

impl ProjectStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a project from a draft.
    ///
    /// Assigns a fresh id and matching creation/update timestamps, appends
    /// the record and returns a snapshot of it.
    pub fn create(&self, draft: ProjectDraft) -> Project {
        let now = Utc::now();
        let project = Project {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            script: draft.script,
            tone: draft.tone,
            voice: draft.voice,
            audio: None,
            status: ProjectStatus::Draft,
            created_at: now,
            updated_at: now,
        };

        info!("Created project '{}' ({})", project.name, project.id);
        self.inner.write().projects.push(project.clone());
        project
    }

    /// Merge a partial update into a project and refresh its `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` without mutating the collection if the id
    /// is absent.
    pub fn update(&self, id: &str, update: ProjectUpdate) -> NarravoxResult<Project> {
        let mut inner = self.inner.write();
        let project = inner
            .projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or_else(|| NarravoxError::project_not_found(id))?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(script) = update.script {
            project.script = script;
        }
        if let Some(tone) = update.tone {
            project.tone = tone;
        }
        if let Some(voice) = update.voice {
            project.voice = voice;
        }
        if let Some(audio) = update.audio {
            project.audio = Some(audio);
        }
        if let Some(status) = update.status {
            project.status = status;
        }
        project.updated_at = Utc::now();

        debug!("Updated project {}", project.id);
        Ok(project.clone())
    }

    /// Remove a project; clears the selection if it was selected.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` without mutating the collection if the id
    /// is absent.
    pub fn delete(&self, id: &str) -> NarravoxResult<()> {
        let mut inner = self.inner.write();
        let index = inner
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or_else(|| NarravoxError::project_not_found(id))?;

        inner.projects.remove(index);
        if inner.current.as_deref() == Some(id) {
            inner.current = None;
        }

        info!("Deleted project {id}");
        Ok(())
    }

    /// Change the selection; `None` clears it.
    ///
    /// Pure selection change, no collection mutation.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the id is absent.
    pub fn set_current(&self, id: Option<&str>) -> NarravoxResult<()> {
        let mut inner = self.inner.write();
        match id {
            Some(id) => {
                if !inner.projects.iter().any(|project| project.id == id) {
                    return Err(NarravoxError::project_not_found(id));
                }
                inner.current = Some(id.to_string());
            }
            None => inner.current = None,
        }
        Ok(())
    }

    /// Get a snapshot of the selected project
    #[must_use]
    pub fn current(&self) -> Option<Project> {
        let inner = self.inner.read();
        let id = inner.current.as_deref()?;
        inner.projects.iter().find(|project| project.id == id).cloned()
    }

    /// Get a snapshot of a project by id
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the id is absent.
    pub fn get(&self, id: &str) -> NarravoxResult<Project> {
        self.inner
            .read()
            .projects
            .iter()
            .find(|project| project.id == id)
            .cloned()
            .ok_or_else(|| NarravoxError::project_not_found(id))
    }

    /// Get a snapshot of the whole collection
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.inner.read().projects.clone()
    }

    /// Get the number of projects
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().projects.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().projects.is_empty()
    }
}
