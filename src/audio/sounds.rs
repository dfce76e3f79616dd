//! Sound and music definitions
//!
//! Loaded from `assets/data/audio.ron` and read-only afterwards.

use serde::{Deserialize, Serialize};

fn default_volume() -> f64 {
    1.0
}

fn default_pitch() -> f64 {
    1.0
}

/// A named sound effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    /// Lookup key, unique within the registry
    pub name: String,
    /// Path to the audio file
    pub clip: String,
    /// Base amplitude (0.0 - 1.0), scaled by the SFX volume
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Base pitch multiplier, scaled by the global pitch
    #[serde(default = "default_pitch")]
    pub pitch: f64,
    #[serde(default)]
    pub looping: bool,
    /// Jitter pitch by up to 5% on every play
    #[serde(default)]
    pub random_pitch: bool,
}

impl Sound {
    pub fn new(name: impl Into<String>, clip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clip: clip.into(),
            volume: default_volume(),
            pitch: default_pitch(),
            looping: false,
            random_pitch: false,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn with_random_pitch(mut self) -> Self {
        self.random_pitch = true;
        self
    }
}

/// A named, ordered playlist of music tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicList {
    pub name: String,
    /// Track file paths in play order
    pub tracks: Vec<String>,
}

impl MusicList {
    pub fn new<I, S>(name: impl Into<String>, tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            tracks: tracks.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything the audio manager is configured with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default)]
    pub sounds: Vec<Sound>,
    #[serde(default)]
    pub music_lists: Vec<MusicList>,
}

impl AudioConfig {
    /// Parse a RON document
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    /// Render as pretty RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Names registered more than once, in first-seen order
    pub fn duplicate_sound_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for sound in &self.sounds {
            if !seen.insert(sound.name.as_str()) && !duplicates.contains(&sound.name.as_str()) {
                duplicates.push(sound.name.as_str());
            }
        }
        duplicates
    }
}
