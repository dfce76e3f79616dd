//! Data loading
//!
//! Game content that lives in external RON files.

pub mod loader;

pub use loader::{load_audio_config, default_audio_config, export_default_audio_config, AUDIO_CONFIG_PATH};
