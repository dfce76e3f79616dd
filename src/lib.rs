//! Barkane - audio and save profiles
//!
//! Sound effects, playlist music and persistent player profiles for
//! the folding puzzle game.

pub mod audio;
pub mod save;
pub mod data;

// Re-export commonly used types
pub use audio::{AudioConfig, AudioManager};
pub use save::{SaveProfile, SerializableSaveProfile};
