//! Script analysis with simulated remote latency.
//!
//! The derivations themselves are pure and synchronous
//! ([`ScriptAnalysis::of`]); the [`ScriptAnalyzer`] wraps them in the
//! asynchronous contract the studio sees: a fixed artificial latency standing
//! in for a remote analysis call, and a request-ticket guard so a result
//! computed from a superseded input is never surfaced.

use crate::error::{NarravoxError, NarravoxResult};
use crate::tone::{self, Tone};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Words above this count classify as Medium complexity
pub const COMPLEXITY_MEDIUM_THRESHOLD: usize = 100;
/// Words above this count classify as High complexity
pub const COMPLEXITY_HIGH_THRESHOLD: usize = 200;

/// Positive keywords for sentiment scoring
const POSITIVE_WORDS: [&str; 5] = ["great", "amazing", "wonderful", "excellent", "fantastic"];
/// Negative keywords for sentiment scoring
const NEGATIVE_WORDS: [&str; 5] = ["bad", "terrible", "awful", "horrible", "disappointing"];

/// Script complexity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    /// Up to 100 words
    Low,
    /// 101 to 200 words
    Medium,
    /// More than 200 words
    High,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Overall sentiment of a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// More positive than negative keywords
    Positive,
    /// More negative than positive keywords
    Negative,
    /// Balanced or no sentiment keywords
    Neutral,
}

impl Sentiment {
    /// Get the emotional score associated with this sentiment
    #[must_use]
    pub const fn score(&self) -> f32 {
        match self {
            Self::Positive => 0.7,
            Self::Negative => 0.3,
            Self::Neutral => 0.5,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Descriptive profile of a script.
///
/// Derived on demand and replaced by the next analysis; never persisted to a
/// project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptAnalysis {
    /// Whitespace-delimited token count
    pub word_count: usize,
    /// Number of `.`-delimited segments minus one
    pub sentence_count: usize,
    /// Complexity bucket
    pub complexity: Complexity,
    /// Average words per sentence, rounded; 0 without sentences
    pub readability: u32,
    /// Estimated narration duration, "m:ss"
    pub estimated_duration: String,
    /// Overall sentiment
    pub sentiment: Sentiment,
    /// Emotional score in [0, 1]
    pub emotional_score: f32,
    /// Key topics detected in the script
    pub key_topics: Vec<String>,
    /// Suggested narration tone
    pub suggested_tone: Tone,
    /// Human-readable improvement suggestions
    pub suggestions: Vec<String>,
}

impl ScriptAnalysis {
    /// Compute the analysis profile of a script.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the script is empty or whitespace-only; an
    /// empty script is never analyzed, so no "0:00" duration can be produced.
    pub fn of(script: &str) -> NarravoxResult<Self> {
        if script.trim().is_empty() {
            return Err(NarravoxError::invalid_input("Script cannot be empty"));
        }

        let word_count = script.split_whitespace().count();
        let sentence_count = script.matches('.').count();
        let sentiment = detect_sentiment(script);

        let complexity = if word_count > COMPLEXITY_HIGH_THRESHOLD {
            Complexity::High
        } else if word_count > COMPLEXITY_MEDIUM_THRESHOLD {
            Complexity::Medium
        } else {
            Complexity::Low
        };

        Ok(Self {
            word_count,
            sentence_count,
            complexity,
            readability: readability_of(word_count, sentence_count),
            estimated_duration: estimated_duration(word_count),
            sentiment,
            emotional_score: sentiment.score(),
            key_topics: vec![
                "Technology".to_string(),
                "Innovation".to_string(),
                "Business".to_string(),
            ],
            suggested_tone: tone::recommend(script),
            suggestions: vec![
                "Consider adding pauses for better flow".to_string(),
                "The tone is well-suited for professional content".to_string(),
                "Good balance of technical and accessible language".to_string(),
            ],
        })
    }
}

/// Estimate narration duration for a word count, formatted "m:ss".
///
/// Minutes are the word count divided by the 150 wpm narration rate, rounded
/// up; the seconds component is `floor((word_count mod 150) * 0.4)`,
/// zero-padded. Integer arithmetic keeps the seconds floor exact.
#[must_use]
pub fn estimated_duration(word_count: usize) -> String {
    let minutes = (word_count + crate::WORDS_PER_MINUTE - 1) / crate::WORDS_PER_MINUTE;
    let seconds = (word_count % crate::WORDS_PER_MINUTE) * 2 / 5;
    format!("{minutes}:{seconds:02}")
}

/// Estimate narration duration for a word count, in whole seconds
#[must_use]
pub fn estimated_duration_secs(word_count: usize) -> u64 {
    let minutes = (word_count + crate::WORDS_PER_MINUTE - 1) / crate::WORDS_PER_MINUTE;
    let seconds = (word_count % crate::WORDS_PER_MINUTE) * 2 / 5;
    (minutes * 60 + seconds) as u64
}

/// Average words per sentence, rounded half away from zero
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn readability_of(word_count: usize, sentence_count: usize) -> u32 {
    if sentence_count == 0 {
        return 0;
    }
    (word_count as f64 / sentence_count as f64).round() as u32
}

fn detect_sentiment(script: &str) -> Sentiment {
    let script = script.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|word| script.contains(*word)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|word| script.contains(*word)).count();

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Configuration for the script analyzer
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Simulated remote-analysis latency
    pub latency: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(2),
        }
    }
}

/// Script analyzer with the studio's asynchronous contract.
///
/// Each call claims a fresh request ticket; a completion whose ticket is no
/// longer current resolves to `Superseded` instead of data. Clones share the
/// ticket counter, so concurrent calls through clones supersede each other.
#[derive(Debug, Clone)]
pub struct ScriptAnalyzer {
    config: AnalyzerConfig,
    ticket: Arc<AtomicU64>,
}

impl ScriptAnalyzer {
    /// Create a new analyzer with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create a new analyzer with custom configuration
    #[must_use]
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            ticket: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Analyze a script.
    ///
    /// Suspends for the configured latency before resolving; callers render a
    /// pending indicator for the duration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or whitespace-only script (rejected
    /// before any suspension) and `Superseded` when a newer `analyze` call
    /// was issued while this one was pending.
    pub async fn analyze(&self, script: &str) -> NarravoxResult<ScriptAnalysis> {
        if script.trim().is_empty() {
            return Err(NarravoxError::invalid_input("Script cannot be empty"));
        }

        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Analysis request {} for {} characters", ticket, script.len());

        tokio::time::sleep(self.config.latency).await;

        if self.ticket.load(Ordering::SeqCst) != ticket {
            debug!("Analysis request {} superseded", ticket);
            return Err(NarravoxError::superseded(format!(
                "Analysis request {ticket} was superseded by a newer request"
            )));
        }

        let analysis = ScriptAnalysis::of(script)?;
        info!(
            "Analyzed script: {} words, {} complexity",
            analysis.word_count, analysis.complexity
        );
        Ok(analysis)
    }

    /// Get the analyzer configuration
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Default for ScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn script_of_words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    #[test]
    fn test_analysis_rejects_empty_script() {
        assert!(ScriptAnalysis::of("").is_err());
        assert!(ScriptAnalysis::of("   \n\t  ").is_err());
    }

    #[rstest]
    #[case(50, Complexity::Low)]
    #[case(100, Complexity::Low)]
    #[case(101, Complexity::Medium)]
    #[case(200, Complexity::Medium)]
    #[case(201, Complexity::High)]
    #[case(500, Complexity::High)]
    fn test_complexity_boundaries(#[case] words: usize, #[case] expected: Complexity) {
        let analysis = ScriptAnalysis::of(&script_of_words(words)).unwrap();
        assert_eq!(analysis.word_count, words);
        assert_eq!(analysis.complexity, expected);
    }

    #[rstest]
    #[case(1, "1:00")]
    #[case(100, "1:40")]
    #[case(150, "1:00")]
    #[case(151, "2:00")]
    #[case(225, "2:30")]
    #[case(300, "2:00")]
    #[case(301, "3:00")]
    fn test_estimated_duration_format(#[case] words: usize, #[case] expected: &str) {
        assert_eq!(estimated_duration(words), expected);
    }

    #[test]
    fn test_estimated_duration_secs() {
        assert_eq!(estimated_duration_secs(150), 60);
        assert_eq!(estimated_duration_secs(100), 100);
        assert_eq!(estimated_duration_secs(225), 150);
    }

    #[test]
    fn test_sentence_count_and_readability() {
        let analysis = ScriptAnalysis::of("One two three. Four five six. Seven.").unwrap();
        assert_eq!(analysis.sentence_count, 3);
        assert_eq!(analysis.word_count, 7);
        // 7 / 3 rounds to 2
        assert_eq!(analysis.readability, 2);

        let no_periods = ScriptAnalysis::of("no sentence terminator here").unwrap();
        assert_eq!(no_periods.sentence_count, 0);
        assert_eq!(no_periods.readability, 0);
    }

    #[test]
    fn test_sentiment_detection() {
        let positive = ScriptAnalysis::of("This is a great and amazing product.").unwrap();
        assert_eq!(positive.sentiment, Sentiment::Positive);
        assert_eq!(positive.emotional_score, 0.7);

        let negative = ScriptAnalysis::of("A terrible, awful experience.").unwrap();
        assert_eq!(negative.sentiment, Sentiment::Negative);
        assert_eq!(negative.emotional_score, 0.3);

        let neutral = ScriptAnalysis::of("The meeting starts at nine.").unwrap();
        assert_eq!(neutral.sentiment, Sentiment::Neutral);
        assert_eq!(neutral.emotional_score, 0.5);
    }

    #[test]
    fn test_suggested_tone_follows_recommender() {
        let analysis = ScriptAnalysis::of("Welcome to our business meeting.").unwrap();
        assert_eq!(analysis.suggested_tone, Tone::Professional);

        let analysis = ScriptAnalysis::of("Once upon a time.").unwrap();
        assert_eq!(analysis.suggested_tone, Tone::Dramatic);
    }

    #[test]
    fn test_analysis_fixed_fields() {
        let analysis = ScriptAnalysis::of("Some script.").unwrap();
        assert_eq!(analysis.key_topics, vec!["Technology", "Innovation", "Business"]);
        assert_eq!(analysis.suggestions.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyzer_resolves_after_latency() {
        let analyzer = ScriptAnalyzer::new();
        let analysis = analyzer.analyze("Hello world.").await.unwrap();
        assert_eq!(analysis.word_count, 2);
    }

    #[tokio::test]
    async fn test_analyzer_rejects_empty_before_suspension() {
        let analyzer = ScriptAnalyzer::with_config(AnalyzerConfig {
            latency: Duration::from_secs(3600),
        });
        // Resolves immediately despite the long latency
        let result = analyzer.analyze("   ").await;
        assert!(matches!(result, Err(NarravoxError::InvalidInput { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyzer_supersedes_stale_request() {
        let analyzer = ScriptAnalyzer::new();

        let first = analyzer.analyze("first script.");
        let second = analyzer.analyze("second script with more words.");
        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first, Err(NarravoxError::Superseded { .. })));
        let analysis = second.unwrap();
        assert_eq!(analysis.word_count, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyzer_clones_share_ticket() {
        let analyzer = ScriptAnalyzer::new();
        let clone = analyzer.clone();

        let stale = analyzer.analyze("stale input.");
        let fresh = clone.analyze("fresh input.");
        let (stale, fresh) = tokio::join!(stale, fresh);

        assert!(stale.is_err());
        assert!(fresh.is_ok());
    }

    #[test]
    fn test_analysis_serialization() {
        let analysis = ScriptAnalysis::of("Round trip.").unwrap();
        let json = serde_json::to_string(&analysis).expect("Should serialize");
        let deserialized: ScriptAnalysis = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(analysis, deserialized);
    }
}
