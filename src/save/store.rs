//! Profile storage
//!
//! Profiles live in numbered slots as JSON files in the platform data
//! directory, written in the flat [`SerializableSaveProfile`] layout.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::profile::SaveProfile;
use super::serializable::SerializableSaveProfile;

/// Number of profile slots shown to the player
pub const PROFILE_SLOTS: u8 = 3;

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "barkane", "Barkane") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("saves");
        path
    } else {
        PathBuf::from("./saves")
    }
}

/// Get the path for a specific profile slot
pub fn profile_path(slot: u8) -> PathBuf {
    slot_path(&save_directory(), slot)
}

fn slot_path(dir: &Path, slot: u8) -> PathBuf {
    dir.join(format!("profile_{}.json", slot))
}

/// Write a profile to an explicit path, creating parent directories
pub fn write_profile_to(profile: &SaveProfile, path: &Path) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let flat = SerializableSaveProfile::from_profile(profile);
    let json = serde_json::to_string_pretty(&flat)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a profile from an explicit path
pub fn read_profile_from(path: &Path) -> Result<SaveProfile, SaveError> {
    let data = fs::read_to_string(path)?;
    let flat: SerializableSaveProfile = serde_json::from_str(&data)?;
    Ok(flat.to_profile())
}

/// Save a profile to a slot, stamping its save time
pub fn save_profile(profile: &mut SaveProfile, slot: u8) -> Result<(), SaveError> {
    profile.mark_saved();
    write_profile_to(profile, &profile_path(slot))?;
    log::info!("Profile '{}' saved to slot {}", profile.profile_name, slot);
    Ok(())
}

/// Load the profile in a slot
pub fn load_profile(slot: u8) -> Result<SaveProfile, SaveError> {
    let profile = read_profile_from(&profile_path(slot))?;
    log::info!("Profile '{}' loaded from slot {}", profile.profile_name, slot);
    Ok(profile)
}

/// Read the profile at `path`, or start a fresh one if no file exists.
///
/// An existing file that cannot be read is an error, so it never gets
/// replaced by a blank profile on the next save.
fn load_or_create_profile_at(path: &Path, name: &str) -> Result<SaveProfile, SaveError> {
    if path.exists() {
        return read_profile_from(path);
    }

    log::info!("Creating new profile '{}' at {:?}", name, path);
    Ok(SaveProfile::new(name))
}

/// Load the profile in a slot, or start a fresh one if the slot is empty
pub fn load_or_create_profile(slot: u8, name: &str) -> Result<SaveProfile, SaveError> {
    load_or_create_profile_at(&profile_path(slot), name).map_err(|e| {
        log::error!("Failed to load profile in slot {}: {}", slot, e);
        e
    })
}

/// Check if a profile exists in the given slot
pub fn profile_exists(slot: u8) -> bool {
    profile_path(slot).exists()
}

/// Delete a profile slot
pub fn delete_profile(slot: u8) -> Result<(), SaveError> {
    let path = profile_path(slot);
    if path.exists() {
        fs::remove_file(&path)?;
        log::info!("Deleted profile slot {}", slot);
    }
    Ok(())
}

/// Brief summary of a profile for the slot picker
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub profile_name: String,
    pub completion_status: bool,
    pub play_time_in_seconds: f32,
    pub last_level: String,
}

impl From<&SaveProfile> for ProfileSummary {
    fn from(profile: &SaveProfile) -> Self {
        Self {
            profile_name: profile.profile_name.clone(),
            completion_status: profile.completion_status,
            play_time_in_seconds: profile.play_time_in_seconds,
            last_level: profile.last_level.clone(),
        }
    }
}

fn list_profiles_in(dir: &Path) -> Vec<(u8, Option<ProfileSummary>)> {
    (0..PROFILE_SLOTS)
        .map(|slot| {
            let path = slot_path(dir, slot);
            let summary = if path.exists() {
                read_profile_from(&path).ok().map(|p| ProfileSummary::from(&p))
            } else {
                None
            };
            (slot, summary)
        })
        .collect()
}

/// List all profile slots
pub fn list_profiles() -> Vec<(u8, Option<ProfileSummary>)> {
    list_profiles_in(&save_directory())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profile_0.json");

        let mut profile = SaveProfile::new("Ada");
        profile.record_level_folds("1-1", 4);
        profile.unlock_level("1-2");
        profile.set_cosmetic_unlocked("party_hat", true);

        write_profile_to(&profile, &path).unwrap();
        let loaded = read_profile_from(&path).unwrap();
        assert_eq!(loaded, profile);

        // Written in the flat layout
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"levelFolds_Keys\""));
        assert!(raw.contains("\"profileName\": \"Ada\""));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_profile_from(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(SaveError::Io(_))));
    }

    #[test]
    fn test_read_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile_0.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_profile_from(&path), Err(SaveError::Parse(_))));
    }

    #[test]
    fn test_list_profiles_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut profile = SaveProfile::new("Ada");
        profile.set_last_level("1-3", 1, 3);
        write_profile_to(&profile, &slot_path(dir.path(), 1)).unwrap();
        fs::write(slot_path(dir.path(), 2), "garbage").unwrap();

        let slots = list_profiles_in(dir.path());
        assert_eq!(slots.len(), PROFILE_SLOTS as usize);
        assert_eq!(slots[0], (0, None));
        let summary = slots[1].1.as_ref().unwrap();
        assert_eq!(summary.profile_name, "Ada");
        assert_eq!(summary.last_level, "1-3");
        assert_eq!(slots[2], (2, None));
    }

    #[test]
    fn test_empty_slot_creates_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = load_or_create_profile_at(&slot_path(dir.path(), 0), "Ada").unwrap();
        assert_eq!(profile.profile_name, "Ada");
        assert!(profile.level_folds.is_empty());
    }

    #[test]
    fn test_unreadable_slot_is_left_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = slot_path(dir.path(), 0);
        fs::write(&path, "{ \"profileName\": ").unwrap();

        let result = load_or_create_profile_at(&path, "Player");
        assert!(matches!(result, Err(SaveError::Parse(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"profileName\": ");
    }

    #[test]
    fn test_existing_slot_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = slot_path(dir.path(), 1);
        let mut profile = SaveProfile::new("Ada");
        profile.record_level_folds("1-1", 2);
        write_profile_to(&profile, &path).unwrap();

        let loaded = load_or_create_profile_at(&path, "Player").unwrap();
        assert_eq!(loaded, profile);
    }
}
