use std::{env, fs, path::Path, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_CACHE_DIR: &str = ".marquee_cache";
pub const DEFAULT_POSTER_WORKERS: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub cache_dir: Option<String>,
    pub storage_path: Option<String>,
    pub prefetch_posters: bool,
    pub poster_workers: usize,
    pub featured_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            storage_path: None,
            prefetch_posters: true,
            poster_workers: DEFAULT_POSTER_WORKERS,
            featured_id: None,
        }
    }
}

impl AppConfig {
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| resolve_relative_path(DEFAULT_CACHE_DIR))
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.cache_dir().join(crate::app::storage::STORAGE_FILE))
    }

    /// Config flag, overridable with `MARQUEE_DISABLE_PREFETCH`.
    pub fn prefetch_enabled(&self) -> bool {
        self.prefetch_posters && env::var_os("MARQUEE_DISABLE_PREFETCH").is_none()
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    cache_dir: Option<String>,
    #[serde(alias = "storage_db")]
    storage_path: Option<String>,
    prefetch_posters: Option<bool>,
    #[serde(alias = "workers")]
    poster_workers: Option<usize>,
    featured_id: Option<String>,
}

pub fn load_config() -> AppConfig {
    load_config_from(Path::new(CONFIG_FILE))
}

pub fn load_config_from(cfg_path: &Path) -> AppConfig {
    match fs::read_to_string(cfg_path) {
        Ok(raw) => match parse_config(&raw) {
            Ok(cfg) => {
                info!("Loaded config from {}", cfg_path.display());
                cfg
            }
            Err(err) => {
                warn!("Failed to parse {} ({}). Using defaults.", cfg_path.display(), err);
                AppConfig::default()
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
            AppConfig::default()
        }
    }
}

pub fn parse_config(raw: &str) -> Result<AppConfig, serde_json::Error> {
    let parsed = serde_json::from_str::<RawConfig>(raw)?;
    let mut cfg = AppConfig::default();

    if parsed.cache_dir.is_some() {
        cfg.cache_dir = parsed.cache_dir;
    }
    if parsed.storage_path.is_some() {
        cfg.storage_path = parsed.storage_path;
        if raw.contains("\"storage_db\"") {
            warn!("`storage_db` is deprecated; rename it to `storage_path` in config.json.");
        }
    }
    if let Some(on) = parsed.prefetch_posters {
        cfg.prefetch_posters = on;
    }
    if let Some(n) = parsed.poster_workers {
        let clamped = n.clamp(1, 32);
        if clamped != n {
            warn!("poster_workers={n} out of range; using {clamped}");
        }
        cfg.poster_workers = clamped;
    }
    if let Some(id) = parsed.featured_id {
        let id = id.trim().to_string();
        if !id.is_empty() {
            cfg.featured_id = Some(id);
        }
    }
    Ok(cfg)
}

/// Relative paths resolve next to the executable when possible, else the CWD.
pub fn resolve_relative_path(rel: &str) -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(rel)))
        .unwrap_or_else(|| PathBuf::from(rel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(parse_config("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn fields_override_and_clamp() {
        let cfg = parse_config(
            r#"{"cache_dir":"/tmp/m","workers":64,"prefetch_posters":false,"featured_id":" orbit "}"#,
        )
        .unwrap();
        assert_eq!(cfg.cache_dir.as_deref(), Some("/tmp/m"));
        assert_eq!(cfg.poster_workers, 32);
        assert!(!cfg.prefetch_posters);
        assert!(!cfg.prefetch_enabled());
        assert_eq!(cfg.featured_id.as_deref(), Some("orbit"));
        assert_eq!(
            cfg.storage_path(),
            PathBuf::from("/tmp/m").join(crate::app::storage::STORAGE_FILE)
        );
    }

    #[test]
    fn explicit_storage_path_wins() {
        let cfg = parse_config(r#"{"storage_db":"/var/prefs.db"}"#).unwrap();
        assert_eq!(cfg.storage_path(), PathBuf::from("/var/prefs.db"));
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ nope").unwrap();
        assert_eq!(load_config_from(&path), AppConfig::default());
        assert_eq!(
            load_config_from(&dir.path().join("missing.json")),
            AppConfig::default()
        );
    }
}
