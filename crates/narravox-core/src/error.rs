//! Error types for the Narravox studio core.


/// Result type alias for Narravox operations
pub type NarravoxResult<T> = Result<T, NarravoxError>;

/// Main error type for Narravox studio operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NarravoxError {
    /// Voice synthesis failed in the backend
    #[error("Synthesis failed: {message}")]
    SynthesisError {
        /// Error message describing the failure
        message: String,
    },

    /// A generation job is already running
    #[error("Generation already in progress: {message}")]
    JobInProgress {
        /// Error message describing the running job
        message: String,
    },

    /// A pending request was superseded by a newer one
    #[error("Request superseded: {message}")]
    Superseded {
        /// Error message describing the superseded request
        message: String,
    },

    /// Playback transport error
    #[error("Playback error: {message}")]
    PlaybackError {
        /// Error message describing the transport issue
        message: String,
    },

    /// Project not found error
    #[error("Project '{project_id}' not found")]
    ProjectNotFound {
        /// The project ID that was not found
        project_id: String,
    },

    /// Voice not found error
    #[error("Voice '{voice_id}' not found")]
    VoiceNotFound {
        /// The voice ID that was not found
        voice_id: String,
    },

    /// Invalid input error
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message describing the invalid input
        message: String,
    },

    /// Timeout error
    #[error("Operation timed out: {message}")]
    TimeoutError {
        /// Error message describing the timeout
        message: String,
    },
}

impl NarravoxError {
    /// Create a new synthesis error
    #[must_use]
    pub fn synthesis<S: Into<String>>(message: S) -> Self {
        Self::SynthesisError {
            message: message.into(),
        }
    }

    /// Create a new job-in-progress error
    #[must_use]
    pub fn job_in_progress<S: Into<String>>(message: S) -> Self {
        Self::JobInProgress {
            message: message.into(),
        }
    }

    /// Create a new superseded-request error
    #[must_use]
    pub fn superseded<S: Into<String>>(message: S) -> Self {
        Self::Superseded {
            message: message.into(),
        }
    }

    /// Create a new playback error
    #[must_use]
    pub fn playback<S: Into<String>>(message: S) -> Self {
        Self::PlaybackError {
            message: message.into(),
        }
    }

    /// Create a new project not found error
    #[must_use]
    pub fn project_not_found<S: Into<String>>(project_id: S) -> Self {
        Self::ProjectNotFound {
            project_id: project_id.into(),
        }
    }

    /// Create a new voice not found error
    #[must_use]
    pub fn voice_not_found<S: Into<String>>(voice_id: S) -> Self {
        Self::VoiceNotFound {
            voice_id: voice_id.into(),
        }
    }

    /// Create a new invalid input error
    #[must_use]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    #[must_use]
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::TimeoutError {
            message: message.into(),
        }
    }

    /// Check if this error is retriable with a fresh request
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::SynthesisError { .. } | Self::TimeoutError { .. } | Self::JobInProgress { .. }
        )
    }

    /// Check if this error is due to invalid user input
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::VoiceNotFound { .. }
                | Self::ProjectNotFound { .. }
        )
    }

    /// Get the error category for logging/metrics
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::SynthesisError { .. } => "synthesis",
            Self::JobInProgress { .. } => "job",
            Self::Superseded { .. } => "superseded",
            Self::PlaybackError { .. } => "playback",
            Self::ProjectNotFound { .. } => "project",
            Self::VoiceNotFound { .. } => "voice",
            Self::InvalidInput { .. } => "input",
            Self::TimeoutError { .. } => "timeout",
        }
    }
}

// Convert from common error types
impl From<std::io::Error> for NarravoxError {
    fn from(err: std::io::Error) -> Self {
        Self::playback(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for NarravoxError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Self::timeout(format!("Operation timed out: {err}"))
    }
}

impl From<serde_json::Error> for NarravoxError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON serialization error: {err}"))
    }
}

impl From<anyhow::Error> for NarravoxError {
    fn from(err: anyhow::Error) -> Self {
        Self::synthesis(err.to_string())
    }
}
