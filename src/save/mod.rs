//! Save/load system
//!
//! Handles player profiles and their on-disk representation.

pub mod profile;
pub mod serializable;
pub mod store;

pub use profile::SaveProfile;
pub use serializable::SerializableSaveProfile;
pub use store::{
    SaveError, ProfileSummary, PROFILE_SLOTS,
    save_profile, load_profile, load_or_create_profile, delete_profile,
    profile_exists, list_profiles, profile_path,
    read_profile_from, write_profile_to,
};
