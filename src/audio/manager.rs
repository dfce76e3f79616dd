//! Audio manager
//!
//! Owns the sound registry and the music channel. Sound effects are looked up
//! by name; music plays from named playlists and advances when a track ends,
//! which the caller drives by calling [`AudioManager::update`] once per frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::channel::{AudioBackend, AudioChannel, SilentBackend};
use super::kira_backend::KiraBackend;
use super::sounds::{AudioConfig, MusicList, Sound};

/// Volume applied at startup for both SFX and music (0.0 - 1.0)
pub const DEFAULT_VOLUME: f64 = 0.5;
/// Pitch jitter range for sounds with `random_pitch`
const RANDOM_PITCH_RANGE: std::ops::Range<f64> = 0.95..1.05;
const MIN_PITCH: f64 = 0.3;
const MAX_PITCH: f64 = 3.0;

/// A registered sound and the channel it plays on
struct BoundSound {
    sound: Sound,
    /// `None` when the clip could not be bound
    source: Option<Box<dyn AudioChannel>>,
}

/// Audio manager that handles all sound and music playback
pub struct AudioManager {
    sounds: Vec<BoundSound>,
    music_lists: Vec<MusicList>,
    /// Dedicated channel for playlist music
    music: Box<dyn AudioChannel>,
    current_list: usize,
    current_track: usize,
    /// SFX volume multiplier (0.0 - 1.0)
    sfx_volume: f64,
    /// Music volume (0.0 - 1.0)
    music_volume: f64,
    /// Global pitch multiplier (0.3 - 3.0)
    pitch: f64,
    rng: StdRng,
}

impl AudioManager {
    /// Create a manager, binding every configured sound to a channel from `backend`
    pub fn new(config: AudioConfig, backend: &mut dyn AudioBackend) -> Self {
        for name in config.duplicate_sound_names() {
            log::warn!("Sound '{}' is registered more than once; the first entry wins", name);
        }

        let music = backend.create_channel();

        let sounds = config
            .sounds
            .into_iter()
            .map(|sound| {
                let mut channel = backend.create_channel();
                let source = match channel.set_clip(&sound.clip) {
                    Ok(()) => {
                        channel.set_volume(sound.volume);
                        channel.set_pitch(sound.pitch);
                        channel.set_looping(sound.looping);
                        Some(channel)
                    }
                    Err(e) => {
                        log::warn!("Could not bind sound '{}': {}", sound.name, e);
                        None
                    }
                };
                BoundSound { sound, source }
            })
            .collect();

        let mut manager = Self {
            sounds,
            music_lists: config.music_lists,
            music,
            current_list: 0,
            current_track: 0,
            sfx_volume: DEFAULT_VOLUME,
            music_volume: DEFAULT_VOLUME,
            pitch: 1.0,
            rng: StdRng::from_entropy(),
        };

        manager.set_sfx_volume(DEFAULT_VOLUME * 100.0);
        manager.set_music_volume(DEFAULT_VOLUME * 100.0);
        manager
    }

    /// Create a manager on the default output device, or a silent one if
    /// the device cannot be opened
    pub fn with_default_backend(config: AudioConfig) -> Self {
        match KiraBackend::new() {
            Ok(mut backend) => Self::new(config, &mut backend),
            Err(e) => {
                log::warn!("Failed to initialize audio backend: {}. Audio disabled.", e);
                Self::new(config, &mut SilentBackend)
            }
        }
    }

    /// Replace the random source used for pitch jitter
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    fn find_sound(&self, name: &str) -> Option<usize> {
        self.sounds.iter().position(|s| s.sound.name == name)
    }

    /// Check whether a sound with this name is registered
    pub fn has_sound(&self, name: &str) -> bool {
        self.find_sound(name).is_some()
    }

    /// Registered sound names in registration order
    pub fn sound_names(&self) -> impl Iterator<Item = &str> {
        self.sounds.iter().map(|s| s.sound.name.as_str())
    }

    /// Play a sound effect by name
    pub fn play(&mut self, name: &str) {
        let Some(index) = self.find_sound(name) else {
            log::error!("Sound: {} not found!", name);
            return;
        };

        let entry = &mut self.sounds[index];
        let Some(source) = entry.source.as_mut() else {
            return;
        };

        if entry.sound.random_pitch {
            let jitter = self.rng.gen_range(RANDOM_PITCH_RANGE);
            source.set_pitch(entry.sound.pitch * self.pitch * jitter);
        }

        if let Err(e) = source.play() {
            log::debug!("Failed to play sound {}: {}", name, e);
        }
    }

    /// Stop a sound effect by name
    pub fn stop(&mut self, name: &str) {
        let Some(index) = self.find_sound(name) else {
            log::error!("Sound: {} not found!", name);
            return;
        };

        if let Some(source) = self.sounds[index].source.as_mut() {
            source.stop();
        }
    }

    /// Set SFX volume as a percentage (0 - 100)
    pub fn set_sfx_volume(&mut self, value: f64) {
        let value = value.clamp(0.0, 100.0) / 100.0;
        self.sfx_volume = value;

        for entry in &mut self.sounds {
            if let Some(source) = entry.source.as_mut() {
                source.set_volume(entry.sound.volume * value);
            }
        }
    }

    /// Set music volume as a percentage (0 - 100)
    pub fn set_music_volume(&mut self, value: f64) {
        let value = value.clamp(0.0, 100.0) / 100.0;
        self.music_volume = value;
        self.music.set_volume(value);
    }

    /// Set the global pitch multiplier (0.3 - 3.0)
    pub fn set_pitch(&mut self, value: f64) {
        let value = value.clamp(MIN_PITCH, MAX_PITCH);
        self.pitch = value;

        for entry in &mut self.sounds {
            if let Some(source) = entry.source.as_mut() {
                source.set_pitch(entry.sound.pitch * value);
            }
        }
    }

    /// SFX volume (0.0 - 1.0)
    pub fn sfx_volume(&self) -> f64 {
        self.sfx_volume
    }

    /// Music volume (0.0 - 1.0)
    pub fn music_volume(&self) -> f64 {
        self.music_volume
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    // ========================================================================
    // Music
    // ========================================================================

    /// Begin playing the current playlist position
    pub fn start(&mut self) {
        self.play_music();
    }

    /// Play the track at `track` of the playlist at `list`
    pub fn play_music_at(&mut self, list: usize, track: usize) {
        self.music.stop();

        let Some(music_list) = self.music_lists.get(list) else {
            log::error!("Music list {} does not exist!", list);
            return;
        };
        let Some(clip) = music_list.tracks.get(track) else {
            log::error!("Music track {} of list '{}' does not exist!", track, music_list.name);
            return;
        };

        if let Err(e) = self.music.set_clip(clip) {
            log::warn!("Cannot load music track {}: {}", clip, e);
            return;
        }
        if let Err(e) = self.music.play() {
            log::warn!("Failed to play music track {}: {}", clip, e);
        }
    }

    /// Play the current playlist position
    pub fn play_music(&mut self) {
        self.play_music_at(self.current_list, self.current_track);
    }

    /// Switch to a playlist by name and play its first track
    pub fn play_list(&mut self, name: &str) {
        let Some(index) = self.music_lists.iter().position(|l| l.name == name) else {
            log::error!("Music list {} could not be found.", name);
            return;
        };

        self.current_list = index;
        self.current_track = 0;
        self.play_music_at(index, 0);
    }

    /// Per-frame poll: start the next track once the current one has ended
    pub fn update(&mut self) {
        if self.music.is_playing() {
            return;
        }

        let track_count = match self.music_lists.get(self.current_list) {
            Some(list) => list.tracks.len(),
            None => return,
        };
        if track_count == 0 {
            return;
        }

        self.current_track += 1;
        if self.current_track >= track_count {
            self.current_track = 0;
        }
        self.play_music_at(self.current_list, self.current_track);
    }

    /// Name of the playlist music is drawn from
    pub fn current_list_name(&self) -> Option<&str> {
        self.music_lists.get(self.current_list).map(|l| l.name.as_str())
    }

    /// Index of the current track within the current playlist
    pub fn current_track(&self) -> usize {
        self.current_track
    }
}
