//! JSON persistence helpers for files under ~/.flappy/.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.flappy/ directory path, creating it if needed.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.flappy/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(filename))
}

/// Load a JSON file from ~/.flappy/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    match save_path(filename) {
        Ok(path) => load_json_or_default_at(&path),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.flappy/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    save_json_at(&save_path(filename)?, data)
}

pub fn load_json_or_default_at<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

pub fn save_json_at<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}
