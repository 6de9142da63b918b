//! Voice catalog and voice configuration for narration.

use crate::error::{NarravoxError, NarravoxResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Minimum playback speed multiplier
pub const MIN_SPEED: f32 = 0.5;
/// Maximum playback speed multiplier
pub const MAX_SPEED: f32 = 2.0;
/// Minimum pitch adjustment in semitone steps
pub const MIN_PITCH: i8 = -10;
/// Maximum pitch adjustment in semitone steps
pub const MAX_PITCH: i8 = 10;

/// Gender classification for voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male voice
    Male,
    /// Female voice
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// Regional accent of a voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accent {
    /// US English
    American,
    /// UK English
    British,
    /// Australian English
    Australian,
    /// Canadian English
    Canadian,
    /// Irish English
    Irish,
}

impl std::fmt::Display for Accent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::American => write!(f, "American"),
            Self::British => write!(f, "British"),
            Self::Australian => write!(f, "Australian"),
            Self::Canadian => write!(f, "Canadian"),
            Self::Irish => write!(f, "Irish"),
        }
    }
}

/// Emotional register applied during synthesis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// Even, unmarked delivery
    #[default]
    Neutral,
    /// Upbeat, positive delivery
    Happy,
    /// Subdued, downcast delivery
    Sad,
    /// Assured, assertive delivery
    Confident,
    /// Slow, soothing delivery
    Calm,
    /// High-energy, enthusiastic delivery
    Excited,
    /// Grave, measured delivery
    Serious,
    /// Friendly, inviting delivery
    Warm,
    /// Driving, emphatic delivery
    Energetic,
}

impl Emotion {
    /// Get the emotion identifier as used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Confident => "confident",
            Self::Calm => "calm",
            Self::Excited => "excited",
            Self::Serious => "serious",
            Self::Warm => "warm",
            Self::Energetic => "energetic",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named voice profile from the studio catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Unique identifier for the voice
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Voice gender
    pub gender: Gender,
    /// Regional accent
    pub accent: Accent,
}

impl VoiceProfile {
    /// Create a new voice profile
    #[must_use]
    pub fn new(id: &str, name: &str, gender: Gender, accent: Accent) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            gender,
            accent,
        }
    }
}

/// Voice manager holding the studio's voice catalog
#[derive(Debug, Clone)]
pub struct VoiceManager {
    voices: Arc<HashMap<String, VoiceProfile>>,
}

impl VoiceManager {
    /// Create a new voice manager with the default catalog
    #[must_use]
    pub fn new() -> Self {
        let default_voices = [
            VoiceProfile::new("alex", "Alex", Gender::Male, Accent::American),
            VoiceProfile::new("sarah", "Sarah", Gender::Female, Accent::British),
            VoiceProfile::new("michael", "Michael", Gender::Male, Accent::Australian),
            VoiceProfile::new("emma", "Emma", Gender::Female, Accent::Canadian),
            VoiceProfile::new("james", "James", Gender::Male, Accent::Irish),
            VoiceProfile::new("sophia", "Sophia", Gender::Female, Accent::American),
        ];

        let mut voices = HashMap::new();
        for voice in default_voices {
            voices.insert(voice.id.clone(), voice);
        }

        Self {
            voices: Arc::new(voices),
        }
    }

    /// Create a voice manager with custom profiles
    #[must_use]
    pub fn with_voices(voices: Vec<VoiceProfile>) -> Self {
        let voice_map = voices
            .into_iter()
            .map(|voice| (voice.id.clone(), voice))
            .collect();

        Self {
            voices: Arc::new(voice_map),
        }
    }

    /// Get a specific voice by ID
    pub fn get_voice(&self, voice_id: &str) -> NarravoxResult<VoiceProfile> {
        self.voices
            .get(voice_id)
            .cloned()
            .ok_or_else(|| NarravoxError::voice_not_found(voice_id))
    }

    /// Check if a voice exists in the catalog
    #[must_use]
    pub fn contains(&self, voice_id: &str) -> bool {
        self.voices.contains_key(voice_id)
    }

    /// Get all voices in the catalog
    #[must_use]
    pub fn voices(&self) -> Vec<VoiceProfile> {
        self.voices.values().cloned().collect()
    }

    /// Get voices filtered by gender
    #[must_use]
    pub fn voices_by_gender(&self, gender: Gender) -> Vec<VoiceProfile> {
        self.voices
            .values()
            .filter(|voice| voice.gender == gender)
            .cloned()
            .collect()
    }

    /// Get voices filtered by accent
    #[must_use]
    pub fn voices_by_accent(&self, accent: Accent) -> Vec<VoiceProfile> {
        self.voices
            .values()
            .filter(|voice| voice.accent == accent)
            .cloned()
            .collect()
    }

    /// Get the default voice
    #[must_use]
    pub fn default_voice(&self) -> VoiceProfile {
        self.get_voice("alex").unwrap_or_else(|_| {
            VoiceProfile::new("alex", "Alex", Gender::Male, Accent::American)
        })
    }

    /// Get voice count
    #[must_use]
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }
}

impl Default for VoiceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Voice configuration for a generation request.
///
/// Speed and pitch are always held within their domains; the builders clamp
/// out-of-range input instead of rejecting it. Mutation is by value: each
/// builder consumes the config and returns the replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    voice_id: String,
    emotion: Emotion,
    speed: f32,
    pitch: i8,
}

impl VoiceConfig {
    /// Create a configuration for a voice with neutral defaults
    #[must_use]
    pub fn new<S: Into<String>>(voice_id: S) -> Self {
        Self {
            voice_id: voice_id.into(),
            emotion: Emotion::Neutral,
            speed: 1.0,
            pitch: 0,
        }
    }

    /// Replace the voice identity
    #[must_use]
    pub fn with_voice<S: Into<String>>(mut self, voice_id: S) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    /// Replace the emotion
    #[must_use]
    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotion = emotion;
        self
    }

    /// Replace the speed multiplier, clamped to [0.5, 2.0]
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self
    }

    /// Replace the pitch adjustment, clamped to [-10, 10]
    #[must_use]
    pub fn with_pitch(mut self, pitch: i8) -> Self {
        self.pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        self
    }

    /// Get the voice identity
    #[must_use]
    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    /// Get the emotion
    #[must_use]
    pub const fn emotion(&self) -> Emotion {
        self.emotion
    }

    /// Get the speed multiplier
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Get the pitch adjustment
    #[must_use]
    pub const fn pitch(&self) -> i8 {
        self.pitch
    }

    /// Validate the configuration
    pub fn validate(&self) -> NarravoxResult<()> {
        if self.voice_id.is_empty() {
            return Err(NarravoxError::invalid_input("Voice ID cannot be empty"));
        }

        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(NarravoxError::invalid_input(format!(
                "Speed must be between {MIN_SPEED} and {MAX_SPEED}, got {}",
                self.speed
            )));
        }

        if !(MIN_PITCH..=MAX_PITCH).contains(&self.pitch) {
            return Err(NarravoxError::invalid_input(format!(
                "Pitch must be between {MIN_PITCH} and {MAX_PITCH}, got {}",
                self.pitch
            )));
        }

        Ok(())
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self::new("alex")
    }
}
