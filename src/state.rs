//! Persistence of the last applied setting.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::color::Color;
use crate::setting::{Brightness, DeviceSetting};

const APP_DIR: &str = "kb-color";
const STATE_FILE: &str = "state";

/// Home directory used when `$HOME` is not set.
const FALLBACK_HOME: &str = "/root";

/// Storage for the last successfully applied setting.
pub(crate) trait SettingStore {
    /// Load the last setting, falling back to [`DeviceSetting::default`].
    fn load(&self) -> DeviceSetting;

    /// Persist a setting, replacing the previous one.
    fn save(&self, setting: &DeviceSetting) -> io::Result<()>;
}

/// Setting stored as a two byte record: color ID followed by brightness.
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location for the current environment.
    pub(crate) fn from_env() -> Self {
        Self::new(state_path(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME")))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingStore for FileStore {
    fn load(&self) -> DeviceSetting {
        let record = match fs::read(&self.path) {
            Ok(record) => record,
            Err(err) => {
                debug!("Using default setting, unable to read {}: {}", self.path.display(), err);
                return DeviceSetting::default();
            },
        };

        match decode(&record) {
            Some(setting) => setting,
            None => {
                debug!("Using default setting, invalid record {:02x?}", record);
                DeviceSetting::default()
            },
        }
    }

    fn save(&self, setting: &DeviceSetting) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        fs::write(&self.path, encode(setting))
    }
}

fn encode(setting: &DeviceSetting) -> [u8; 2] {
    [setting.color.id(), setting.brightness.percent()]
}

fn decode(record: &[u8]) -> Option<DeviceSetting> {
    match record {
        [color, brightness, ..] => Some(DeviceSetting {
            color: Color::from_id(*color)?,
            brightness: Brightness::new(*brightness)?,
        }),
        _ => None,
    }
}

/// Resolve the state file below `$XDG_CONFIG_HOME`, or `~/.config` without it.
fn state_path(config_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let config_home = config_home.map(PathBuf::from).unwrap_or_else(|| {
        let home = home.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(FALLBACK_HOME));
        home.join(".config")
    });

    config_home.join(APP_DIR).join(STATE_FILE)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join(APP_DIR).join(STATE_FILE))
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store(&dir).load(), DeviceSetting::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let setting = DeviceSetting { color: Color::Blue, brightness: Brightness::new(50).unwrap() };

        store.save(&setting).unwrap();

        assert_eq!(fs::read(store.path()).unwrap(), vec![0x04, 0x32]);
        assert_eq!(store.load(), setting);
    }

    #[test]
    fn save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let off = DeviceSetting { color: Color::Red, brightness: Brightness::new(0).unwrap() };
        store.save(&off).unwrap();
        let setting = DeviceSetting { color: Color::Green, brightness: Brightness::new(75).unwrap() };
        store.save(&setting).unwrap();

        assert_eq!(store.load(), setting);
    }

    #[test]
    fn short_record_loads_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        fs::write(store.path(), b"\x04").unwrap();
        assert_eq!(store.load(), DeviceSetting::default());

        fs::write(store.path(), b"").unwrap();
        assert_eq!(store.load(), DeviceSetting::default());
    }

    #[test]
    fn invalid_record_loads_default() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        fs::write(store.path(), b"\x00\x32").unwrap();
        assert_eq!(store.load(), DeviceSetting::default());

        fs::write(store.path(), b"\x04\xc8").unwrap();
        assert_eq!(store.load(), DeviceSetting::default());
    }

    #[test]
    fn save_fails_when_directory_is_a_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(APP_DIR), b"").unwrap();

        let setting = DeviceSetting::default();
        assert!(store(&dir).save(&setting).is_err());
    }

    #[test]
    fn path_prefers_config_home() {
        let path = state_path(Some("/tmp/config".into()), Some("/home/user".into()));
        assert_eq!(path, Path::new("/tmp/config/kb-color/state"));
    }

    #[test]
    fn path_falls_back_to_home() {
        let path = state_path(None, Some("/home/user".into()));
        assert_eq!(path, Path::new("/home/user/.config/kb-color/state"));
    }

    #[test]
    fn path_without_home() {
        assert_eq!(state_path(None, None), Path::new("/root/.config/kb-color/state"));
    }
}
