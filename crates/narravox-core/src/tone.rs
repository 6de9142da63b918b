//! Tone catalog and content-based tone recommendation.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Narration tone category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Clear, authoritative, and business-focused
    #[default]
    Professional,
    /// Warm, approachable, and conversational
    Friendly,
    /// Intense, engaging, and emotionally charged
    Dramatic,
    /// Relaxed, informal, and easy-going
    Casual,
    /// Confident, commanding, and expert
    Authoritative,
    /// Understanding, supportive, and caring
    Empathetic,
}

impl Tone {
    /// Get the tone identifier as used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Friendly => "friendly",
            Self::Dramatic => "dramatic",
            Self::Casual => "casual",
            Self::Authoritative => "authoritative",
            Self::Empathetic => "empathetic",
        }
    }

    /// Get the catalog metadata for this tone
    #[must_use]
    pub fn info(&self) -> &'static ToneInfo {
        TONE_CATALOG
            .iter()
            .find(|info| info.tone == *self)
            .expect("catalog covers every tone")
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive metadata for a tone category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneInfo {
    /// Tone category
    pub tone: Tone,
    /// Human-readable name
    pub name: &'static str,
    /// Short description of the delivery
    pub description: &'static str,
    /// Typical content this tone suits
    pub use_case: &'static str,
}

/// The studio's tone catalog
pub static TONE_CATALOG: Lazy<Vec<ToneInfo>> = Lazy::new(|| {
    vec![
        ToneInfo {
            tone: Tone::Professional,
            name: "Professional",
            description: "Clear, authoritative, and business-focused",
            use_case: "Corporate presentations, training materials",
        },
        ToneInfo {
            tone: Tone::Friendly,
            name: "Friendly",
            description: "Warm, approachable, and conversational",
            use_case: "Customer service, educational content",
        },
        ToneInfo {
            tone: Tone::Dramatic,
            name: "Dramatic",
            description: "Intense, engaging, and emotionally charged",
            use_case: "Storytelling, marketing campaigns",
        },
        ToneInfo {
            tone: Tone::Casual,
            name: "Casual",
            description: "Relaxed, informal, and easy-going",
            use_case: "Social media, podcasts, vlogs",
        },
        ToneInfo {
            tone: Tone::Authoritative,
            name: "Authoritative",
            description: "Confident, commanding, and expert",
            use_case: "News, documentaries, lectures",
        },
        ToneInfo {
            tone: Tone::Empathetic,
            name: "Empathetic",
            description: "Understanding, supportive, and caring",
            use_case: "Healthcare, counseling, support",
        },
    ]
});

/// Recommend a tone for a script.
///
/// Case-insensitive substring rules evaluated in fixed priority order; the
/// first match wins. Rule order is a behavioral contract: a script containing
/// both "business" and "welcome" is professional, not friendly. Always
/// returns a tone, defaulting to [`Tone::Professional`].
#[must_use]
pub fn recommend(script: &str) -> Tone {
    let script = script.to_lowercase();

    if script.contains("business") || script.contains("corporate") {
        return Tone::Professional;
    }
    if script.contains("story") || script.contains("once upon") {
        return Tone::Dramatic;
    }
    if script.contains("welcome") || script.contains("hello") {
        return Tone::Friendly;
    }

    Tone::Professional
}
