use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::services::normalize;

pub type Cache = HashMap<String, Value>;

/// Cache key for one lookup: normalized title and validated year, joined so
/// the cache file stays human-diffable.
pub fn key(title: &str, year: &str) -> String {
    format!(
        "{}||{}",
        normalize::clean(title).to_lowercase(),
        normalize::normalize_year(year)
    )
}

/// A missing or unreadable cache degrades to an empty map; a run never
/// fails because of yesterday's cache file.
pub fn load(path: &Path) -> Cache {
    if path.as_os_str().is_empty() || !path.exists() {
        return Cache::new();
    }

    let data = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[cache] failed to read {}: {e}", path.display());
            return Cache::new();
        }
    };

    match serde_json::from_str(&data) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("[cache] failed to parse {}: {e}", path.display());
            Cache::new()
        }
    }
}

/// Persists the whole map. No-op when the path is empty (caching disabled).
pub fn save(path: &Path, cache: &Cache) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }

    let json = serde_json::to_string_pretty(cache).map_err(|e| e.to_string())?;
    write_atomic(path, json.as_bytes())
}

// Temp file + rename, so an interrupted save leaves the previous cache intact.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }

    fs::write(&tmp, bytes).map_err(|e| e.to_string())?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| e.to_string())?;
    }

    fs::rename(&tmp, path).map_err(|e| e.to_string())?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "cache".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
