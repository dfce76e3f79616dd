//! Playback channels
//!
//! A channel plays one clip at a time with its own volume, pitch and loop
//! settings. The manager only talks to channels through these traits so the
//! output device can be swapped out (or absent entirely).

use thiserror::Error;

/// Errors raised by audio backends
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound file not found: {0}")]
    ClipNotFound(String),
    #[error("failed to load sound {path}: {reason}")]
    ClipLoad { path: String, reason: String },
    #[error("no clip assigned to channel")]
    NoClip,
    #[error("playback failed: {0}")]
    Playback(String),
}

/// A single playback handle
pub trait AudioChannel {
    /// Assign the clip this channel plays. Stops any current playback.
    fn set_clip(&mut self, clip: &str) -> Result<(), AudioError>;

    /// Start the assigned clip from the beginning
    fn play(&mut self) -> Result<(), AudioError>;

    /// Stop playback
    fn stop(&mut self);

    /// Whether the channel is currently producing sound
    fn is_playing(&self) -> bool;

    /// Set amplitude (0.0 - 1.0)
    fn set_volume(&mut self, volume: f64);

    /// Set playback rate multiplier
    fn set_pitch(&mut self, pitch: f64);

    fn set_looping(&mut self, looping: bool);
}

/// Factory for playback channels
pub trait AudioBackend {
    fn create_channel(&mut self) -> Box<dyn AudioChannel>;
}

/// Channel that accepts every command and produces no sound
#[derive(Debug, Default)]
pub struct SilentChannel {
    clip: Option<String>,
}

impl AudioChannel for SilentChannel {
    fn set_clip(&mut self, clip: &str) -> Result<(), AudioError> {
        self.clip = Some(clip.to_string());
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if self.clip.is_none() {
            return Err(AudioError::NoClip);
        }
        Ok(())
    }

    fn stop(&mut self) {}

    fn is_playing(&self) -> bool {
        false
    }

    fn set_volume(&mut self, _volume: f64) {}

    fn set_pitch(&mut self, _pitch: f64) {}

    fn set_looping(&mut self, _looping: bool) {}
}

/// Backend used when no output device is available
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn create_channel(&mut self) -> Box<dyn AudioChannel> {
        Box::new(SilentChannel::default())
    }
}
