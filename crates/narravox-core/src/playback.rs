//! Playback engine driving a time cursor over a generated clip.
//!
//! Progression is a repeating 1-second tick owned by the engine as an
//! abortable task handle. The handle is acquired on the transition into
//! Playing and released on every exit from Playing, on clip replacement and
//! on teardown; a retired engine can never mutate the cursor again.

use crate::error::{NarravoxError, NarravoxResult};
use crate::generation::AudioClip;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Playback state enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No playback; cursor at zero
    #[default]
    Stopped,
    /// Cursor advancing on the tick
    Playing,
    /// Cursor frozen at its position
    Paused,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "Stopped"),
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// Snapshot of the player for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackStatus {
    /// Current state
    pub state: PlaybackState,
    /// Cursor position in seconds, 0 ≤ position ≤ duration
    pub position: u64,
    /// Loaded clip length in seconds
    pub duration: u64,
    /// Volume in [0.0, 1.0]
    pub volume: f32,
    /// Loaded clip id, if any
    pub clip_id: Option<String>,
}

/// Playback engine configuration
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Tick granularity for cursor advancement
    pub tick: Duration,
    /// Initial volume
    pub volume: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            volume: crate::DEFAULT_VOLUME,
        }
    }
}

#[derive(Debug)]
struct PlayerShared {
    state: PlaybackState,
    position: u64,
    duration: u64,
    volume: f32,
    clip_id: Option<String>,
}

/// Playback engine for generated audio clips
#[derive(Debug)]
pub struct PlaybackEngine {
    config: PlaybackConfig,
    shared: Arc<RwLock<PlayerShared>>,
    tick: Mutex<Option<JoinHandle<()>>>,
}

impl PlaybackEngine {
    /// Create a new playback engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PlaybackConfig::default())
    }

    /// Create a new playback engine with custom configuration
    #[must_use]
    pub fn with_config(config: PlaybackConfig) -> Self {
        let shared = PlayerShared {
            state: PlaybackState::Stopped,
            position: 0,
            duration: 0,
            volume: config.volume.clamp(0.0, 1.0),
            clip_id: None,
        };

        Self {
            config,
            shared: Arc::new(RwLock::new(shared)),
            tick: Mutex::new(None),
        }
    }

    /// Load a clip, replacing any previous one.
    ///
    /// Cancels a running tick and resets the cursor to zero.
    pub async fn load(&self, clip: &AudioClip) {
        self.abort_tick();

        let mut shared = self.shared.write().await;
        shared.state = PlaybackState::Stopped;
        shared.position = 0;
        shared.duration = clip.duration_secs;
        shared.clip_id = Some(clip.id.clone());

        info!("Loaded clip {} ({}s)", clip.id, clip.duration_secs);
    }

    /// Start or resume playback.
    ///
    /// Spawns the tick task; each tick advances the cursor by exactly one
    /// second. Reaching the end of the clip pauses playback without the
    /// cursor overshooting the duration.
    ///
    /// # Errors
    ///
    /// Returns a playback error if no clip is loaded.
    pub async fn play(&self) -> NarravoxResult<()> {
        {
            let mut shared = self.shared.write().await;
            if shared.clip_id.is_none() {
                return Err(NarravoxError::playback("No audio loaded"));
            }
            if shared.state == PlaybackState::Playing {
                debug!("Already playing");
                return Ok(());
            }
            shared.state = PlaybackState::Playing;
        }

        self.abort_tick();

        let shared = Arc::clone(&self.shared);
        let tick = self.config.tick;
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(tick).await;

                let mut shared = shared.write().await;
                if shared.state != PlaybackState::Playing {
                    break;
                }

                shared.position = (shared.position + 1).min(shared.duration);
                if shared.position >= shared.duration {
                    shared.state = PlaybackState::Paused;
                    debug!("End of clip at {}s", shared.position);
                    break;
                }
            }
        });

        *self.tick.lock() = Some(handle);
        debug!("Playback started");
        Ok(())
    }

    /// Pause playback, retaining the cursor position.
    ///
    /// # Errors
    ///
    /// Returns a playback error if not currently playing.
    pub async fn pause(&self) -> NarravoxResult<()> {
        self.abort_tick();

        let mut shared = self.shared.write().await;
        if shared.state != PlaybackState::Playing {
            return Err(NarravoxError::playback("Cannot pause: not currently playing"));
        }

        shared.state = PlaybackState::Paused;
        debug!("Playback paused at {}s", shared.position);
        Ok(())
    }

    /// Stop playback and reset the cursor to zero
    pub async fn stop(&self) {
        self.abort_tick();

        let mut shared = self.shared.write().await;
        shared.state = PlaybackState::Stopped;
        shared.position = 0;
        debug!("Playback stopped");
    }

    /// Move the cursor, clamped into [0, duration].
    ///
    /// Does not alter the Playing/Paused state.
    ///
    /// # Errors
    ///
    /// Returns a playback error if no clip is loaded.
    pub async fn seek(&self, position: u64) -> NarravoxResult<()> {
        let mut shared = self.shared.write().await;
        if shared.clip_id.is_none() {
            return Err(NarravoxError::playback("No audio loaded"));
        }

        shared.position = position.min(shared.duration);
        debug!("Seeked to {}s", shared.position);
        Ok(())
    }

    /// Set the volume, clamped into [0.0, 1.0].
    ///
    /// Allowed in any state; has no effect on time progression.
    pub async fn set_volume(&self, volume: f32) {
        let mut shared = self.shared.write().await;
        shared.volume = volume.clamp(0.0, 1.0);
    }

    /// Get a snapshot of the player
    #[must_use]
    pub async fn status(&self) -> PlaybackStatus {
        let shared = self.shared.read().await;
        PlaybackStatus {
            state: shared.state,
            position: shared.position,
            duration: shared.duration,
            volume: shared.volume,
            clip_id: shared.clip_id.clone(),
        }
    }

    /// Check if audio is currently playing
    #[must_use]
    pub async fn is_playing(&self) -> bool {
        self.shared.read().await.state == PlaybackState::Playing
    }

    /// Check if audio is paused
    #[must_use]
    pub async fn is_paused(&self) -> bool {
        self.shared.read().await.state == PlaybackState::Paused
    }

    /// Check if audio is stopped
    #[must_use]
    pub async fn is_stopped(&self) -> bool {
        self.shared.read().await.state == PlaybackState::Stopped
    }

    /// Get the engine configuration
    #[must_use]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Release the tick and discard the loaded clip.
    ///
    /// After teardown no cursor mutation is observable; the engine can load
    /// a fresh clip afterwards.
    pub async fn teardown(&self) {
        self.abort_tick();

        let mut shared = self.shared.write().await;
        shared.state = PlaybackState::Stopped;
        shared.position = 0;
        shared.duration = 0;
        shared.clip_id = None;
        info!("Playback engine torn down");
    }

    fn abort_tick(&self) {
        if let Some(handle) = self.tick.lock().take() {
            handle.abort();
        }
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        // Release the tick task when dropping
        self.abort_tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice_manager::Emotion;

    fn clip(duration_secs: u64) -> AudioClip {
        AudioClip {
            id: "clip-1".to_string(),
            uri: "/audio/generated_clip-1.mp3".to_string(),
            duration_secs,
            sample_rate: crate::DEFAULT_SAMPLE_RATE,
            voice_id: "alex".to_string(),
            emotion: Emotion::Neutral,
            speed: 1.0,
        }
    }

    /// Step the paused clock one tick at a time so cursor updates land
    /// deterministically between assertions.
    async fn settle(secs: u64) {
        tokio::task::yield_now().await;
        for _ in 0..secs {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_playback_state_display() {
        assert_eq!(PlaybackState::Stopped.to_string(), "Stopped");
        assert_eq!(PlaybackState::Playing.to_string(), "Playing");
        assert_eq!(PlaybackState::Paused.to_string(), "Paused");
    }

    #[tokio::test]
    async fn test_initial_state() {
        let engine = PlaybackEngine::new();
        let status = engine.status().await;

        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(status.position, 0);
        assert_eq!(status.duration, 0);
        assert_eq!(status.volume, crate::DEFAULT_VOLUME);
        assert!(status.clip_id.is_none());
    }

    #[tokio::test]
    async fn test_play_without_clip() {
        let engine = PlaybackEngine::new();
        assert!(engine.play().await.is_err());
        assert!(engine.seek(10).await.is_err());
    }

    #[tokio::test]
    async fn test_load_resets_cursor() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(240)).await;

        let status = engine.status().await;
        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(status.position, 0);
        assert_eq!(status.duration, 240);
        assert_eq!(status.clip_id.as_deref(), Some("clip-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cursor_advances_one_second_per_tick() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(240)).await;
        engine.play().await.unwrap();
        assert!(engine.is_playing().await);

        settle(3).await;
        assert_eq!(engine.status().await.position, 3);

        settle(2).await;
        assert_eq!(engine.status().await.position, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_retains_position() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(240)).await;
        engine.play().await.unwrap();

        settle(4).await;
        engine.pause().await.unwrap();
        assert!(engine.is_paused().await);

        let frozen = engine.status().await.position;
        assert_eq!(frozen, 4);

        // No ticks while paused
        settle(10).await;
        assert_eq!(engine.status().await.position, frozen);

        // Resume continues from the retained position
        engine.play().await.unwrap();
        settle(2).await;
        assert_eq!(engine.status().await.position, frozen + 2);
    }

    #[tokio::test]
    async fn test_pause_not_playing() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(240)).await;

        assert!(engine.pause().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_while_playing_is_noop() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(240)).await;
        engine.play().await.unwrap();

        settle(2).await;
        engine.play().await.unwrap();

        // A single ticker: position advances one per second, not two
        settle(3).await;
        assert_eq!(engine.status().await.position, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_pause_at_end_without_overshoot() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(5)).await;
        engine.seek(4).await.unwrap();
        engine.play().await.unwrap();

        // Exactly one tick reaches the end
        settle(1).await;
        let status = engine.status().await;
        assert_eq!(status.position, 5);
        assert_eq!(status.state, PlaybackState::Paused);

        // Ticking has stopped; the cursor never exceeds the duration
        settle(10).await;
        assert_eq!(engine.status().await.position, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_clamps_and_preserves_state() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(100)).await;

        engine.seek(250).await.unwrap();
        assert_eq!(engine.status().await.position, 100);
        assert!(engine.is_stopped().await);

        engine.seek(10).await.unwrap();
        engine.play().await.unwrap();
        settle(1).await;
        engine.seek(50).await.unwrap();
        assert!(engine.is_playing().await);

        settle(1).await;
        assert_eq!(engine.status().await.position, 51);
    }

    #[tokio::test]
    async fn test_volume_clamped_any_state() {
        let engine = PlaybackEngine::new();

        engine.set_volume(1.7).await;
        assert_eq!(engine.status().await.volume, 1.0);

        engine.set_volume(-0.5).await;
        assert_eq!(engine.status().await.volume, 0.0);

        engine.set_volume(0.4).await;
        assert_eq!(engine.status().await.volume, 0.4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_resets_cursor() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(240)).await;
        engine.play().await.unwrap();

        settle(6).await;
        engine.stop().await;

        let status = engine.status().await;
        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(status.position, 0);

        settle(5).await;
        assert_eq!(engine.status().await.position, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_while_playing_releases_tick() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(240)).await;
        engine.play().await.unwrap();

        settle(2).await;
        engine.teardown().await;

        let status = engine.status().await;
        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(status.position, 0);
        assert!(status.clip_id.is_none());

        // No orphaned ticker mutates the cursor after teardown
        settle(30).await;
        assert_eq!(engine.status().await.position, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_replaces_running_clip() {
        let engine = PlaybackEngine::new();
        engine.load(&clip(240)).await;
        engine.play().await.unwrap();
        settle(3).await;

        let replacement = AudioClip {
            id: "clip-2".to_string(),
            ..clip(120)
        };
        engine.load(&replacement).await;

        let status = engine.status().await;
        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(status.position, 0);
        assert_eq!(status.duration, 120);
        assert_eq!(status.clip_id.as_deref(), Some("clip-2"));

        // The old ticker is gone
        settle(5).await;
        assert_eq!(engine.status().await.position, 0);
    }
}
