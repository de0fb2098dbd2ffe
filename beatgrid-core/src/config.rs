use std::path::{Path, PathBuf};

use serde::Deserialize;

use beatgrid_types::{GlobalSettings, Sample};

use crate::persistence::STATE_KEY;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    storage: StorageConfig,
    kit: Option<Vec<KitEntry>>,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    beats_per_measure: Option<u32>,
    measures: Option<u32>,
    tempo: Option<f32>,
}

#[derive(Deserialize, Default)]
struct StorageConfig {
    key: Option<String>,
    dir: Option<PathBuf>,
}

#[derive(Deserialize)]
struct KitEntry {
    id: String,
    name: String,
    url: String,
    default_volume: Option<f32>,
}

pub struct Config {
    defaults: DefaultsConfig,
    storage: StorageConfig,
    kit: Vec<KitEntry>,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if there is one.
    pub fn load() -> Self {
        Self::load_from(user_config_path().as_deref())
    }

    /// Embedded defaults merged with the file at `user_path`. A missing,
    /// unreadable or malformed file is ignored.
    pub fn load_from(user_path: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_storage(&mut base.storage, user.storage);
                            if user.kit.is_some() {
                                base.kit = user.kit;
                            }
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            storage: base.storage,
            kit: base.kit.unwrap_or_default(),
        }
    }

    /// Global settings for a new state. Falls back to the built-in defaults
    /// if the configured combination is not playable.
    pub fn defaults(&self) -> GlobalSettings {
        let fallback = GlobalSettings::default();
        let settings = GlobalSettings {
            beats_per_measure: self
                .defaults
                .beats_per_measure
                .unwrap_or(fallback.beats_per_measure),
            measures: self.defaults.measures.unwrap_or(fallback.measures),
            tempo: self.defaults.tempo.unwrap_or(fallback.tempo),
        };
        match settings.validate() {
            Ok(()) => settings,
            Err(reason) => {
                log::warn!(target: "config", "ignoring configured defaults: {}", reason);
                fallback
            }
        }
    }

    /// Blob key the state is saved under.
    pub fn storage_key(&self) -> String {
        self.storage
            .key
            .clone()
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| STATE_KEY.to_string())
    }

    /// Directory for the file-backed blob store.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage.dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("beatgrid")
        })
    }

    /// Starter samples, in configured order. A missing or non-finite
    /// `default_volume` becomes 1.0.
    pub fn kit(&self) -> Vec<Sample> {
        self.kit
            .iter()
            .map(|entry| Sample {
                id: entry.id.clone(),
                name: entry.name.clone(),
                url: entry.url.clone(),
                default_volume: entry
                    .default_volume
                    .filter(|v| v.is_finite())
                    .unwrap_or(1.0)
                    .clamp(0.0, 1.0),
            })
            .collect()
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("beatgrid").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.beats_per_measure.is_some() {
        base.beats_per_measure = user.beats_per_measure;
    }
    if user.measures.is_some() {
        base.measures = user.measures;
    }
    if user.tempo.is_some() {
        base.tempo = user.tempo;
    }
}

fn merge_storage(base: &mut StorageConfig, user: StorageConfig) {
    if user.key.is_some() {
        base.key = user.key;
    }
    if user.dir.is_some() {
        base.dir = user.dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_user_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_embedded_config() {
        let config = Config::load_from(None);
        let defaults = config.defaults();
        assert_eq!(defaults.beats_per_measure, 4);
        assert_eq!(defaults.measures, 4);
        assert!((defaults.tempo - 120.0).abs() < f32::EPSILON);
        assert_eq!(config.storage_key(), "drumMachineState");

        let kit = config.kit();
        assert_eq!(kit.len(), 4);
        assert_eq!(kit[2].id, "kick");
        assert_eq!(kit[2].url, "samples/TR-505_Tape_Kick.wav");
        assert!(kit.iter().all(|s| s.default_volume == 1.0));
    }

    #[test]
    fn test_user_config_overrides_fields() {
        let (_dir, path) = write_user_config(
            "[defaults]\nmeasures = 2\ntempo = 90.0\n\n[storage]\nkey = \"mine\"\ndir = \"/tmp/beatgrid-test\"\n",
        );
        let config = Config::load_from(Some(&path));
        let defaults = config.defaults();
        assert_eq!(defaults.beats_per_measure, 4);
        assert_eq!(defaults.measures, 2);
        assert_eq!(defaults.tempo, 90.0);
        assert_eq!(config.storage_key(), "mine");
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/beatgrid-test"));
        assert_eq!(config.kit().len(), 4);
    }

    #[test]
    fn test_user_kit_replaces_embedded_kit() {
        let (_dir, path) = write_user_config(
            "[[kit]]\nid = \"rim\"\nname = \"Rim\"\nurl = \"rim.wav\"\ndefault_volume = 0.6\n",
        );
        let kit = Config::load_from(Some(&path)).kit();
        assert_eq!(kit.len(), 1);
        assert_eq!(kit[0].id, "rim");
        assert!((kit[0].default_volume - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_non_finite_kit_volume_defaults_to_full() {
        let (_dir, path) = write_user_config(
            "[[kit]]\nid = \"a\"\nname = \"A\"\nurl = \"a.wav\"\ndefault_volume = nan\n\n\
             [[kit]]\nid = \"b\"\nname = \"B\"\nurl = \"b.wav\"\ndefault_volume = inf\n",
        );
        let kit = Config::load_from(Some(&path)).kit();
        assert_eq!(kit.len(), 2);
        assert!(kit.iter().all(|s| s.default_volume == 1.0));
    }

    #[test]
    fn test_malformed_user_config_is_ignored() {
        let (_dir, path) = write_user_config("[defaults\nmeasures = ");
        let config = Config::load_from(Some(&path));
        assert_eq!(config.defaults(), GlobalSettings::default());
    }

    #[test]
    fn test_unplayable_defaults_fall_back() {
        let (_dir, path) = write_user_config("[defaults]\nbeats_per_measure = 0\n");
        let config = Config::load_from(Some(&path));
        assert_eq!(config.defaults(), GlobalSettings::default());
    }

    #[test]
    fn test_missing_user_file_is_fine() {
        let config = Config::load_from(Some(Path::new("/nonexistent/beatgrid/config.toml")));
        assert_eq!(config.defaults().total_beats(), 16);
    }
}
