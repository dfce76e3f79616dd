//! Audio system
//!
//! Sound effects and playlist music, played through Kira when an output
//! device is available.

pub mod channel;
pub mod kira_backend;
pub mod manager;
pub mod sounds;

pub use channel::{AudioBackend, AudioChannel, AudioError, SilentBackend};
pub use kira_backend::KiraBackend;
pub use manager::AudioManager;
pub use sounds::{AudioConfig, MusicList, Sound};
