//! Kira-backed playback channels
//!
//! All channels share one Kira manager and one cache of decoded clips.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use kira::{
    manager::{AudioManager as KiraManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    sound::{PlaybackRate, PlaybackState},
    tween::Tween,
    Volume,
};
use super::channel::{AudioBackend, AudioChannel, AudioError};

type ClipCache = HashMap<String, StaticSoundData>;

/// Backend that plays through the default output device
pub struct KiraBackend {
    manager: Rc<RefCell<KiraManager<DefaultBackend>>>,
    clips: Rc<RefCell<ClipCache>>,
}

impl KiraBackend {
    /// Open the default output device
    pub fn new() -> Result<Self, AudioError> {
        let manager = KiraManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        log::info!("Kira audio backend initialized");

        Ok(Self {
            manager: Rc::new(RefCell::new(manager)),
            clips: Rc::new(RefCell::new(HashMap::new())),
        })
    }
}

impl AudioBackend for KiraBackend {
    fn create_channel(&mut self) -> Box<dyn AudioChannel> {
        Box::new(KiraChannel {
            manager: Rc::clone(&self.manager),
            clips: Rc::clone(&self.clips),
            clip: None,
            handle: None,
            volume: 1.0,
            pitch: 1.0,
            looping: false,
        })
    }
}

/// One playback handle on the shared Kira manager
pub struct KiraChannel {
    manager: Rc<RefCell<KiraManager<DefaultBackend>>>,
    clips: Rc<RefCell<ClipCache>>,
    clip: Option<StaticSoundData>,
    handle: Option<StaticSoundHandle>,
    volume: f64,
    pitch: f64,
    looping: bool,
}

/// Decode a clip, reusing the cached copy when present
fn load_clip(clips: &RefCell<ClipCache>, path: &str) -> Result<StaticSoundData, AudioError> {
    let mut clips = clips.borrow_mut();
    if let Some(data) = clips.get(path) {
        return Ok(data.clone());
    }

    if !Path::new(path).exists() {
        return Err(AudioError::ClipNotFound(path.to_string()));
    }

    let data = StaticSoundData::from_file(path).map_err(|e| AudioError::ClipLoad {
        path: path.to_string(),
        reason: format!("{:?}", e),
    })?;
    clips.insert(path.to_string(), data.clone());
    Ok(data)
}

impl AudioChannel for KiraChannel {
    fn set_clip(&mut self, clip: &str) -> Result<(), AudioError> {
        self.stop();
        self.clip = None;
        let data = load_clip(&self.clips, clip)?;
        self.clip = Some(data);
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let data = self.clip.as_ref().ok_or(AudioError::NoClip)?.clone();

        // Restart rather than layer a second instance
        self.stop();

        let mut settings = StaticSoundSettings::new()
            .volume(Volume::Amplitude(self.volume))
            .playback_rate(PlaybackRate::Factor(self.pitch));
        if self.looping {
            settings = settings.loop_region(..);
        }

        let handle = self
            .manager
            .borrow_mut()
            .play(data.with_settings(settings))
            .map_err(|e| AudioError::Playback(format!("{:?}", e)))?;
        self.handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop(Tween::default());
        }
    }

    fn is_playing(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !matches!(h.state(), PlaybackState::Stopped))
            .unwrap_or(false)
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
        if let Some(handle) = &mut self.handle {
            handle.set_volume(Volume::Amplitude(volume), Tween::default());
        }
    }

    fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch;
        if let Some(handle) = &mut self.handle {
            handle.set_playback_rate(PlaybackRate::Factor(pitch), Tween::default());
        }
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_clip_is_not_cached() {
        let clips = RefCell::new(ClipCache::new());
        let result = load_clip(&clips, "assets/sounds/does_not_exist.ogg");

        match result {
            Err(AudioError::ClipNotFound(path)) => {
                assert_eq!(path, "assets/sounds/does_not_exist.ogg");
            }
            other => panic!("expected ClipNotFound, got {:?}", other.err()),
        }
        assert!(clips.borrow().is_empty());
    }

    #[test]
    fn test_unreadable_clip_reports_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ogg");
        std::fs::write(&path, b"not audio").unwrap();
        let path = path.to_string_lossy().into_owned();

        let clips = RefCell::new(ClipCache::new());
        assert!(matches!(load_clip(&clips, &path), Err(AudioError::ClipLoad { .. })));
        assert!(clips.borrow().is_empty());
    }
}
