//! RON data loader
//!
//! Loads the audio configuration from an external RON file, with fallback to
//! the sounds and playlists shipped with the game.

use std::fs;
use std::path::Path;

use crate::audio::{AudioConfig, MusicList, Sound};

/// Default location of the audio configuration
pub const AUDIO_CONFIG_PATH: &str = "assets/data/audio.ron";

/// Load the audio configuration, falling back to the built-in defaults
pub fn load_audio_config(path: &Path) -> AudioConfig {
    if !path.exists() {
        log::warn!("Audio config {:?} not found, using defaults", path);
        return default_audio_config();
    }

    match fs::read_to_string(path) {
        Ok(content) => match AudioConfig::from_ron(&content) {
            Ok(config) => {
                log::info!(
                    "Loaded {} sounds and {} music lists from {:?}",
                    config.sounds.len(),
                    config.music_lists.len(),
                    path
                );
                config
            }
            Err(e) => {
                log::warn!("Failed to parse {:?}: {}. Using defaults.", path, e);
                default_audio_config()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {:?}: {}. Using defaults.", path, e);
            default_audio_config()
        }
    }
}

/// Sounds and playlists shipped with the game
pub fn default_audio_config() -> AudioConfig {
    AudioConfig {
        sounds: vec![
            Sound::new("Fold", "assets/sounds/fold.ogg").with_random_pitch(),
            Sound::new("Unfold", "assets/sounds/unfold.ogg").with_random_pitch(),
            Sound::new("Snap", "assets/sounds/snap.ogg").with_volume(0.8),
            Sound::new("Bark", "assets/sounds/bark.ogg").with_random_pitch(),
            Sound::new("Level Complete", "assets/sounds/level_complete.ogg"),
            Sound::new("Menu Select", "assets/sounds/menu_select.ogg").with_volume(0.6),
            Sound::new("Wind", "assets/sounds/wind.ogg").with_volume(0.4).looping(),
        ],
        music_lists: vec![
            MusicList::new("Menu", ["assets/music/menu.ogg"]),
            MusicList::new(
                "World 1",
                ["assets/music/world1_a.ogg", "assets/music/world1_b.ogg"],
            ),
            MusicList::new(
                "World 2",
                ["assets/music/world2_a.ogg", "assets/music/world2_b.ogg"],
            ),
        ],
    }
}

/// Write the shipped configuration out as RON
pub fn export_default_audio_config(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {:?}: {}", parent, e))?;
    }

    let ron = default_audio_config()
        .to_ron()
        .map_err(|e| format!("Failed to serialize audio config: {}", e))?;
    fs::write(path, ron).map_err(|e| format!("Failed to write {:?}: {}", path, e))?;

    Ok(())
}
