//! Integration tests for narravox-core crate

use narravox_core::{
    Complexity, Emotion, NarravoxError, PlaybackState, ProjectStatus, ScriptAnalysis, Studio,
    Tone, VoiceConfig, VoiceManager,
};
use proptest::prelude::*;
use std::time::Duration;

/// Step the paused clock one second at a time
async fn settle(secs: u64) {
    tokio::task::yield_now().await;
    for _ in 0..secs {
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_studio_pipeline() {
    let studio = Studio::new();

    // Draft a project; the tone recommendation runs on the script
    let script = vec!["word"; 150].join(" ") + " welcome.";
    let project = studio.create_draft("Launch narration".to_string(), script);
    assert_eq!(project.tone, Tone::Friendly);
    assert_eq!(project.status, ProjectStatus::Draft);

    // Analysis resolves after its simulated latency
    let analysis = studio.analyze(&project.script).await.expect("Should analyze");
    assert_eq!(analysis.complexity, Complexity::Medium);
    assert_eq!(analysis.word_count, 151);

    // Generation attaches a clip and completes the project
    let clip = studio.narrate(&project.id).await.expect("Should narrate");
    let stored = studio.projects().get(&project.id).expect("Should find project");
    assert_eq!(stored.status, ProjectStatus::Completed);
    assert_eq!(stored.audio.as_ref(), Some(&clip));

    // The clip is ready for playback
    studio.player().play().await.expect("Should play");
    settle(5).await;
    let playback = studio.player().status().await;
    assert_eq!(playback.state, PlaybackState::Playing);
    assert_eq!(playback.position, 5);
}

#[tokio::test(start_paused = true)]
async fn test_playback_runs_to_end_of_clip() {
    let studio = Studio::new();
    let project = studio.create_draft("Short", "Just a few words here.");

    let clip = studio.narrate(&project.id).await.expect("Should narrate");
    // 5 words: one minute plus floor(5 * 0.4) seconds
    assert_eq!(clip.duration_secs, 62);

    studio.player().play().await.expect("Should play");
    settle(clip.duration_secs + 10).await;

    // Auto-paused exactly at the end, never past it
    let playback = studio.player().status().await;
    assert_eq!(playback.state, PlaybackState::Paused);
    assert_eq!(playback.position, clip.duration_secs);
}

#[tokio::test(start_paused = true)]
async fn test_regenerating_replaces_loaded_clip() {
    let studio = Studio::new();
    let project = studio.create_draft("Revised", "First version of the script.");

    let first = studio.narrate(&project.id).await.expect("Should narrate");
    studio.player().play().await.expect("Should play");
    settle(3).await;

    studio
        .projects()
        .update(
            &project.id,
            narravox_core::ProjectUpdate::default().with_script("Second version, longer than the first."),
        )
        .expect("Should update");

    let second = studio.narrate(&project.id).await.expect("Should narrate again");
    assert_ne!(first.id, second.id);

    // Loading the new clip reset the transport
    let playback = studio.player().status().await;
    assert_eq!(playback.clip_id, Some(second.id));
    assert_eq!(playback.position, 0);
    assert_eq!(playback.state, PlaybackState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_analysis_supersession_across_session() {
    let studio = Studio::new();

    let stale = studio.analyze("the stale script.");
    let fresh = studio.analyze("the fresh script, issued later.");
    let (stale, fresh) = tokio::join!(stale, fresh);

    assert!(matches!(stale, Err(NarravoxError::Superseded { .. })));
    assert!(fresh.is_ok());
}

#[tokio::test]
async fn test_project_lifecycle_via_store() {
    let studio = Studio::new();
    let project = studio.create_draft("Keep", "Some script for the keeper.");
    assert_eq!(studio.projects().current().map(|p| p.id), Some(project.id.clone()));

    studio.projects().delete(&project.id).expect("Should delete");
    assert!(studio.projects().is_empty());
    assert!(studio.projects().current().is_none());

    let missing = studio
        .projects()
        .update(&project.id, narravox_core::ProjectUpdate::default().with_name("gone"));
    assert!(matches!(missing, Err(NarravoxError::ProjectNotFound { .. })));
}

#[test]
fn test_voice_catalog_integration() {
    let manager = VoiceManager::new();

    let voices = manager.voices();
    assert_eq!(voices.len(), 6);

    let sophia = manager.get_voice("sophia").expect("Should find sophia");
    assert_eq!(sophia.accent, narravox_core::Accent::American);

    let config = VoiceConfig::new(sophia.id)
        .with_emotion(Emotion::Excited)
        .with_speed(3.5)
        .with_pitch(42);
    assert_eq!(config.speed(), 2.0);
    assert_eq!(config.pitch(), 10);
    assert!(config.validate().is_ok());
}

#[test]
fn test_tone_rule_ordering_regression() {
    // The business rule outranks the greeting rule on the same text
    assert_eq!(
        narravox_core::recommend("Welcome to our business meeting"),
        Tone::Professional
    );
    assert_eq!(narravox_core::recommend("Once upon a time..."), Tone::Dramatic);
    assert_eq!(narravox_core::recommend("Hello everyone!"), Tone::Friendly);
    assert_eq!(narravox_core::recommend(""), Tone::Professional);
}

#[test]
fn test_duration_estimates() {
    let at_rate = ScriptAnalysis::of(&vec!["word"; 150].join(" ")).expect("Should analyze");
    assert_eq!(at_rate.estimated_duration, "1:00");

    let below_rate = ScriptAnalysis::of(&vec!["word"; 100].join(" ")).expect("Should analyze");
    assert_eq!(below_rate.estimated_duration, "1:40");

    // An empty script is refused outright rather than analyzed to "0:00"
    assert!(ScriptAnalysis::of("").is_err());
}

proptest! {
    #[test]
    fn prop_voice_config_speed_always_in_domain(speed in -100.0f32..100.0) {
        let config = VoiceConfig::default().with_speed(speed);
        prop_assert!((0.5..=2.0).contains(&config.speed()));
    }

    #[test]
    fn prop_voice_config_pitch_always_in_domain(pitch in i8::MIN..=i8::MAX) {
        let config = VoiceConfig::default().with_pitch(pitch);
        prop_assert!((-10..=10).contains(&config.pitch()));
    }

    #[test]
    fn prop_complexity_buckets_cover_all_counts(words in 1usize..400) {
        let analysis = ScriptAnalysis::of(&vec!["word"; words].join(" ")).unwrap();
        let expected = if words > 200 {
            Complexity::High
        } else if words > 100 {
            Complexity::Medium
        } else {
            Complexity::Low
        };
        prop_assert_eq!(analysis.complexity, expected);
    }
}
