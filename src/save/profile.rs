//! Player save profile
//!
//! Runtime view of a profile: progress through the levels, unlocked
//! cosmetics and the fold counts achieved on each level.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persistent player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveProfile {
    pub profile_name: String,
    /// Whether the game has been finished on this profile
    pub completion_status: bool,
    pub play_time_in_seconds: f32,
    pub last_saved: DateTime<Utc>,
    /// Last time any level's fold count improved
    pub last_improved: DateTime<Utc>,
    /// Identifier of the most recently played level
    pub last_level: String,
    /// Currently selected cosmetic
    pub cosmetic: String,
    pub last_level_world_num: i32,
    pub last_level_num: i32,
    /// Cosmetic id -> unlocked
    pub cosmetics: HashMap<String, bool>,
    /// Level id -> best (lowest) fold count
    pub level_folds: HashMap<String, i32>,
    /// Level id -> unlocked
    pub level_unlocks: HashMap<String, bool>,
}

impl SaveProfile {
    /// Create an empty profile
    pub fn new(profile_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            profile_name: profile_name.into(),
            completion_status: false,
            play_time_in_seconds: 0.0,
            last_saved: now,
            last_improved: now,
            last_level: String::new(),
            cosmetic: String::new(),
            last_level_world_num: 0,
            last_level_num: 0,
            cosmetics: HashMap::new(),
            level_folds: HashMap::new(),
            level_unlocks: HashMap::new(),
        }
    }

    pub fn add_play_time(&mut self, seconds: f32) {
        self.play_time_in_seconds += seconds;
    }

    pub fn unlock_level(&mut self, level: &str) {
        self.level_unlocks.insert(level.to_string(), true);
    }

    pub fn is_level_unlocked(&self, level: &str) -> bool {
        self.level_unlocks.get(level).copied().unwrap_or(false)
    }

    pub fn set_cosmetic_unlocked(&mut self, cosmetic: &str, unlocked: bool) {
        self.cosmetics.insert(cosmetic.to_string(), unlocked);
    }

    pub fn is_cosmetic_unlocked(&self, cosmetic: &str) -> bool {
        self.cosmetics.get(cosmetic).copied().unwrap_or(false)
    }

    /// Record the folds used to finish a level, keeping the best result.
    ///
    /// Returns `true` if this is the first result for the level or beats the
    /// previous best, in which case `last_improved` is updated.
    pub fn record_level_folds(&mut self, level: &str, folds: i32) -> bool {
        let improved = match self.level_folds.get(level) {
            Some(&best) => folds < best,
            None => true,
        };

        if improved {
            self.level_folds.insert(level.to_string(), folds);
            self.last_improved = Utc::now();
            log::info!("New best for {}: {} folds", level, folds);
        }
        improved
    }

    /// Best fold count for a level, if it has been completed
    pub fn folds_for(&self, level: &str) -> Option<i32> {
        self.level_folds.get(level).copied()
    }

    pub fn set_last_level(&mut self, level: &str, world_num: i32, level_num: i32) {
        self.last_level = level.to_string();
        self.last_level_world_num = world_num;
        self.last_level_num = level_num;
    }

    /// Stamp the profile as saved now
    pub fn mark_saved(&mut self) {
        self.last_saved = Utc::now();
    }
}

impl Default for SaveProfile {
    fn default() -> Self {
        Self::new("Player")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_empty() {
        let profile = SaveProfile::new("Ada");
        assert_eq!(profile.profile_name, "Ada");
        assert!(!profile.completion_status);
        assert!(profile.cosmetics.is_empty());
        assert!(profile.level_folds.is_empty());
        assert!(!profile.is_level_unlocked("1-1"));
    }

    #[test]
    fn test_record_level_folds_keeps_best() {
        let mut profile = SaveProfile::new("Ada");
        assert!(profile.record_level_folds("1-1", 7));
        assert!(!profile.record_level_folds("1-1", 9));
        assert!(!profile.record_level_folds("1-1", 7));
        assert_eq!(profile.folds_for("1-1"), Some(7));

        assert!(profile.record_level_folds("1-1", 5));
        assert_eq!(profile.folds_for("1-1"), Some(5));
        assert_eq!(profile.folds_for("1-2"), None);
    }

    #[test]
    fn test_unlocks() {
        let mut profile = SaveProfile::new("Ada");
        profile.unlock_level("1-2");
        profile.set_cosmetic_unlocked("party_hat", true);
        profile.set_cosmetic_unlocked("bow_tie", false);

        assert!(profile.is_level_unlocked("1-2"));
        assert!(profile.is_cosmetic_unlocked("party_hat"));
        assert!(!profile.is_cosmetic_unlocked("bow_tie"));
        assert!(!profile.is_cosmetic_unlocked("cape"));
    }
}
