//! Flat save-profile format
//!
//! Profiles are persisted with each map stored as a pair of parallel
//! `*_Keys` / `*_Values` arrays. Existing save files use this layout, so the
//! field names and pairing order must not change.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::SaveProfile;

/// On-disk mirror of [`SaveProfile`]
///
/// Fields missing from an older file take their defaults; timestamps fall
/// back to the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializableSaveProfile {
    pub profile_name: String,
    pub completion_status: bool,
    pub play_time_in_seconds: f32,
    pub last_saved: DateTime<Utc>,
    pub last_improved: DateTime<Utc>,
    pub last_level: String,
    pub cosmetic: String,
    pub last_level_world_num: i32,
    pub last_level_num: i32,

    #[serde(rename = "cosmetics_Keys")]
    pub cosmetics_keys: Option<Vec<String>>,
    #[serde(rename = "cosmetics_Values")]
    pub cosmetics_values: Option<Vec<bool>>,

    #[serde(rename = "levelFolds_Keys")]
    pub level_folds_keys: Option<Vec<String>>,
    #[serde(rename = "levelFolds_Values")]
    pub level_folds_values: Option<Vec<i32>>,

    #[serde(rename = "unlocks_Keys")]
    pub unlocks_keys: Option<Vec<String>>,
    #[serde(rename = "unlocks_Values")]
    pub unlocks_values: Option<Vec<bool>>,
}

/// Split a map into parallel key and value arrays in iteration order
fn flatten<V: Copy>(map: &HashMap<String, V>) -> (Vec<String>, Vec<V>) {
    map.iter().map(|(k, v)| (k.clone(), *v)).unzip()
}

/// Zip parallel arrays back into a map.
///
/// Missing keys yield an empty map. Unpaired trailing entries are dropped.
fn unflatten<K, V>(label: &str, keys: Option<&[K]>, values: Option<&[V]>) -> HashMap<K, V>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
    V: Copy,
{
    let Some(keys) = keys else {
        log::warn!("[SerializableSaveProfile] The saved {} dictionary had no keys.", label);
        return HashMap::new();
    };
    let values = values.unwrap_or(&[]);

    if keys.len() != values.len() {
        log::error!(
            "[SerializableSaveProfile] The saved {} dictionary has {} keys but {} values; keeping {} pairs",
            label,
            keys.len(),
            values.len(),
            keys.len().min(values.len())
        );
    }

    let mut map = HashMap::with_capacity(keys.len());
    for (key, value) in keys.iter().zip(values) {
        if map.insert(key.clone(), *value).is_some() {
            log::warn!("[SerializableSaveProfile] Duplicate key {:?} in {}; keeping the last value", key, label);
        }
    }
    map
}

impl SerializableSaveProfile {
    /// Flatten a runtime profile
    pub fn from_profile(profile: &SaveProfile) -> Self {
        let (cosmetics_keys, cosmetics_values) = flatten(&profile.cosmetics);
        let (level_folds_keys, level_folds_values) = flatten(&profile.level_folds);
        let (unlocks_keys, unlocks_values) = flatten(&profile.level_unlocks);

        Self {
            profile_name: profile.profile_name.clone(),
            completion_status: profile.completion_status,
            play_time_in_seconds: profile.play_time_in_seconds,
            last_saved: profile.last_saved,
            last_improved: profile.last_improved,
            last_level: profile.last_level.clone(),
            cosmetic: profile.cosmetic.clone(),
            last_level_world_num: profile.last_level_world_num,
            last_level_num: profile.last_level_num,
            cosmetics_keys: Some(cosmetics_keys),
            cosmetics_values: Some(cosmetics_values),
            level_folds_keys: Some(level_folds_keys),
            level_folds_values: Some(level_folds_values),
            unlocks_keys: Some(unlocks_keys),
            unlocks_values: Some(unlocks_values),
        }
    }

    /// Rebuild the runtime profile
    pub fn to_profile(&self) -> SaveProfile {
        let mut profile = SaveProfile::new(self.profile_name.clone());

        profile.completion_status = self.completion_status;
        profile.play_time_in_seconds = self.play_time_in_seconds;
        profile.last_saved = self.last_saved;
        profile.last_improved = self.last_improved;
        profile.last_level = self.last_level.clone();
        profile.cosmetic = self.cosmetic.clone();
        profile.last_level_world_num = self.last_level_world_num;
        profile.last_level_num = self.last_level_num;

        profile.cosmetics = unflatten(
            "Cosmetics",
            self.cosmetics_keys.as_deref(),
            self.cosmetics_values.as_deref(),
        );
        profile.level_folds = unflatten(
            "Levels",
            self.level_folds_keys.as_deref(),
            self.level_folds_values.as_deref(),
        );
        profile.level_unlocks = unflatten(
            "Level Unlocks",
            self.unlocks_keys.as_deref(),
            self.unlocks_values.as_deref(),
        );

        profile
    }
}

impl From<&SaveProfile> for SerializableSaveProfile {
    fn from(profile: &SaveProfile) -> Self {
        Self::from_profile(profile)
    }
}

impl From<&SerializableSaveProfile> for SaveProfile {
    fn from(flat: &SerializableSaveProfile) -> Self {
        flat.to_profile()
    }
}
