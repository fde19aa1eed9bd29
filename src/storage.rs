// Adapter Manager - Profile Storage
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Persistent storage for configuration profiles.
//!
//! Profiles live in one JSON document keyed by profile name:
//!
//! ```json
//! {
//!     "Office": {
//!         "ip": "192.168.10.20",
//!         "mask": "255.255.255.0",
//!         "gateway": "192.168.10.1",
//!         "pref_dns": "1.1.1.1",
//!         "alt_dns": ""
//!     }
//! }
//! ```

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::models::{ConfigurationProfile, Error, ProfileMap, Result, CONFIG_DIR_NAME};

/// File name of the profile document inside the config directory.
pub const PROFILES_FILE_NAME: &str = "profiles.json";

/// Source and sink of saved profiles.
pub trait ProfileStore {
    /// All saved profiles, empty when nothing was saved yet.
    fn get(&self) -> Result<ProfileMap>;

    /// Replace the saved profiles. Returns whether the write succeeded.
    fn save(&self, profiles: &ProfileMap) -> bool;
}

/// Profiles stored as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    /// Store at the default location in the user's config directory.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);
        Self::with_path(config_dir.join(PROFILES_FILE_NAME))
    }

    /// Store at a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, profiles: &ProfileMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::ConfigWriteFailed(format!("{}: {}", parent.display(), e)))?;
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        profiles
            .serialize(&mut serializer)
            .map_err(|e| Error::ConfigWriteFailed(format!("{}: {}", self.path.display(), e)))?;
        writer
            .flush()
            .map_err(|e| Error::ConfigWriteFailed(format!("{}: {}", self.path.display(), e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }
}

impl Default for JsonProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for JsonProfileStore {
    fn get(&self) -> Result<ProfileMap> {
        if !self.path.exists() {
            return Ok(ProfileMap::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| Error::ConfigReadFailed(format!("{}: {}", self.path.display(), e)))?;
        let profiles: ProfileMap = serde_json::from_reader(BufReader::new(file))?;
        Ok(profiles)
    }

    fn save(&self, profiles: &ProfileMap) -> bool {
        match self.write(profiles) {
            Ok(()) => {
                info!("Saved {} profiles to {:?}", profiles.len(), self.path);
                true
            }
            Err(e) => {
                error!("Failed to save profiles: {}", e);
                false
            }
        }
    }
}

/// Save `profile` under `name`.
///
/// An existing profile with the same name is overwritten. When the profile
/// was renamed, `replaces` names the entry it supersedes, which is removed.
pub fn upsert_profile(
    store: &dyn ProfileStore,
    name: &str,
    profile: ConfigurationProfile,
    replaces: Option<&str>,
) -> Result<bool> {
    let mut profiles = store.get()?;
    profiles.insert(name.to_string(), profile);

    if let Some(old) = replaces.filter(|old| *old != name) {
        profiles.remove(old);
    }

    Ok(store.save(&profiles))
}

/// Delete the profile named `name`. Returns false when there was none.
pub fn delete_profile(store: &dyn ProfileStore, name: &str) -> Result<bool> {
    let mut profiles = store.get()?;
    if profiles.remove(name).is_none() {
        return Ok(false);
    }
    Ok(store.save(&profiles))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(ip: &str) -> ConfigurationProfile {
        ConfigurationProfile {
            ip: ip.to_string(),
            mask: "255.255.255.0".to_string(),
            gateway: "0.0.0.0".to_string(),
            preferred_dns: String::new(),
            alternate_dns: String::new(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::with_path(dir.path().join("profiles.json"));
        assert!(store.get().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_sorted_with_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::with_path(dir.path().join("nested").join("profiles.json"));

        let mut profiles = ProfileMap::new();
        profiles.insert("Zeta".to_string(), profile("10.0.0.2"));
        profiles.insert("Alpha".to_string(), profile("10.0.0.1"));
        assert!(store.save(&profiles));

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.find("\"Alpha\"").unwrap() < text.find("\"Zeta\"").unwrap());
        assert!(text.contains("\n    \"Alpha\": {\n        \"ip\": \"10.0.0.1\""));
        assert!(text.contains("\"pref_dns\""));

        assert_eq!(store.get().unwrap(), profiles);
    }

    #[test]
    fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonProfileStore::with_path(path);
        assert!(matches!(store.get(), Err(Error::ConfigParseFailed(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_write_is_write_error() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }

        let store = JsonProfileStore::with_path(full);
        let mut profiles = ProfileMap::new();
        profiles.insert("Lab".to_string(), profile("10.0.0.1"));
        assert!(matches!(store.write(&profiles), Err(Error::ConfigWriteFailed(_))));
        assert!(!store.save(&profiles));
    }

    #[test]
    fn test_upsert_rename_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::with_path(dir.path().join("profiles.json"));

        assert!(upsert_profile(&store, "Lab", profile("10.0.0.1"), None).unwrap());
        assert!(upsert_profile(&store, "Lab", profile("10.0.0.9"), Some("Lab")).unwrap());
        assert_eq!(store.get().unwrap()["Lab"].ip, "10.0.0.9");

        assert!(upsert_profile(&store, "Bench", profile("10.0.0.9"), Some("Lab")).unwrap());
        let profiles = store.get().unwrap();
        assert_eq!(profiles.keys().collect::<Vec<_>>(), vec!["Bench"]);

        assert!(!delete_profile(&store, "Lab").unwrap());
        assert!(delete_profile(&store, "Bench").unwrap());
        assert!(store.get().unwrap().is_empty());
    }

    #[test]
    fn test_older_documents_without_dns_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        fs::write(
            &path,
            r#"{"Home": {"ip": "192.168.0.5", "mask": "255.255.255.0", "gateway": "192.168.0.1"}}"#,
        )
        .unwrap();

        let profiles = JsonProfileStore::with_path(path).get().unwrap();
        assert_eq!(profiles["Home"].preferred_dns, "");
    }
}
