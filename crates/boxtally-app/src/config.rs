// Configuration loading and parsing (league.toml, credentials.toml).

use chrono::Datelike;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// ESPN only serves box scores from this season on.
pub const FIRST_BOX_SCORE_SEASON: u16 = 2019;

const DEFAULT_ESPN_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/flb";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub espn: EspnConfig,
    pub output: OutputConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: RawLeague,
    #[serde(default)]
    espn: EspnConfig,
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct RawLeague {
    league_id: u64,
    #[serde(default)]
    season: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    pub league_id: u64,
    /// Resolved season; defaults to the current calendar year.
    pub season: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EspnConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for EspnConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ESPN_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub snapshot_path: String,
    pub teams_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "team_stats.json".to_string(),
            teams_path: "teams.json".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

/// ESPN session cookies. Only needed for private leagues.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct CredentialsConfig {
    pub espn_s2: Option<String>,
    pub swid: Option<String>,
}

impl CredentialsConfig {
    /// Overlay `ESPN_S2` / `SWID` from `lookup` (normally the process
    /// environment). Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ESPN_S2").filter(|v| !v.trim().is_empty()) {
            self.espn_s2 = Some(v);
        }
        if let Some(v) = lookup("SWID").filter(|v| !v.trim().is_empty()) {
            self.swid = Some(v);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.espn_s2.as_deref().is_some_and(|s| !s.is_empty())
            && self.swid.as_deref().is_some_and(|s| !s.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// Does not consult the environment or copy defaults; see `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let season = league_file
        .league
        .season
        .unwrap_or_else(current_season);
    let league = LeagueConfig {
        league_id: league_file.league.league_id,
        season,
    };

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        league,
        espn: league_file.espn,
        output: league_file.output,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy every file in `defaults/` that is missing from `config/`, leaving
/// existing config untouched. `*.example` files are templates and are never
/// copied. Returns the paths written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(defaults_error(format!(
            "neither defaults/ nor config/ directory found in {}",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| defaults_error(format!("failed to create {}: {e}", config_dir.display())))?;

    let mut copied = Vec::new();
    for source in default_files(&defaults_dir)? {
        if let Some(target) = copy_if_missing(&source, &config_dir)? {
            info!("Copied default config to {}", target.display());
            copied.push(target);
        }
    }
    Ok(copied)
}

/// Directory that holds `config/` and `defaults/`: the working directory
/// when it has either one, otherwise `fallback`.
pub fn resolve_base_dir(cwd: &Path, fallback: &Path) -> PathBuf {
    if cwd.join("config").is_dir() || cwd.join("defaults").is_dir() {
        cwd.to_path_buf()
    } else {
        fallback.to_path_buf()
    }
}

/// Load config for the binaries. Outside a directory with `config/` or
/// `defaults/`, falls back to the app crate's own directory. Missing files
/// are copied from defaults and `ESPN_S2` / `SWID` are overlaid from the
/// environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let base_dir = resolve_base_dir(&cwd, Path::new(env!("CARGO_MANIFEST_DIR")));
    if base_dir != cwd {
        info!("No config in {}; using {}", cwd.display(), base_dir.display());
    }

    ensure_config_files(&base_dir)?;
    let mut config = load_config_from(&base_dir)?;
    config.credentials.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn defaults_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Regular, non-template files in `defaults_dir`, sorted by name.
fn default_files(defaults_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let entries = std::fs::read_dir(defaults_dir)
        .map_err(|e| defaults_error(format!("failed to read {}: {e}", defaults_dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| defaults_error(format!("failed to read defaults entry: {e}")))?
            .path();
        let is_template = path.extension().is_some_and(|ext| ext == "example");
        if path.is_file() && !is_template {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy `source` into `config_dir` unless a file of that name already exists.
/// `create_new` makes the existence check and the create a single step.
fn copy_if_missing(source: &Path, config_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let Some(name) = source.file_name() else {
        return Ok(None);
    };
    let target = config_dir.join(name);

    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(defaults_error(format!(
                "failed to create {}: {e}",
                target.display()
            )))
        }
    };

    let content = std::fs::read(source)
        .map_err(|e| defaults_error(format!("failed to read {}: {e}", source.display())))?;
    dest.write_all(&content)
        .map_err(|e| defaults_error(format!("failed to write {}: {e}", target.display())))?;

    Ok(Some(target))
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn current_season() -> u16 {
    u16::try_from(chrono::Local::now().year()).unwrap_or(FIRST_BOX_SCORE_SEASON)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.league_id == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.league_id".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.league.season < FIRST_BOX_SCORE_SEASON {
        return Err(ConfigError::ValidationError {
            field: "league.season".into(),
            message: format!(
                "box scores are unavailable before {FIRST_BOX_SCORE_SEASON}, got {}",
                config.league.season
            ),
        });
    }

    if config.espn.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "espn.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.espn.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "espn.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    let path_fields: &[(&str, &str)] = &[
        ("output.snapshot_path", config.output.snapshot_path.as_str()),
        ("output.teams_path", config.output.teams_path.as_str()),
    ];
    for (name, val) in path_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Locate the crate root holding `defaults/`, whether `cargo test` runs
    /// from the crate or the workspace root.
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("crates/boxtally-app/defaults").exists() {
            cwd.join("crates/boxtally-app")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    fn write_league(tmp: &Path, text: &str) {
        fs::write(tmp.join("config/league.toml"), text).unwrap();
    }

    #[test]
    fn load_valid_config_from_project_files() {
        let tmp = scratch("boxtally_config_defaults");
        let root = project_root();
        fs::copy(
            root.join("defaults/league.toml"),
            tmp.join("config/league.toml"),
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.league.league_id, 121531);
        assert_eq!(config.league.season, 2025);
        assert_eq!(config.espn.base_url, DEFAULT_ESPN_BASE_URL);
        assert_eq!(config.espn.timeout_secs, 30);
        assert_eq!(config.output.snapshot_path, "team_stats.json");
        assert_eq!(config.output.teams_path, "teams.json");
        assert_eq!(config.credentials, CredentialsConfig::default());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_use_defaults() {
        let tmp = scratch("boxtally_config_minimal");
        write_league(&tmp, "[league]\nleague_id = 42\nseason = 2024\n");

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.league.league_id, 42);
        assert_eq!(config.espn.base_url, DEFAULT_ESPN_BASE_URL);
        assert_eq!(config.output.snapshot_path, "team_stats.json");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn season_defaults_to_current_year() {
        let tmp = scratch("boxtally_config_no_season");
        write_league(&tmp, "[league]\nleague_id = 42\n");

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(i32::from(config.league.season), chrono::Local::now().year());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn credentials_toml_is_read() {
        let tmp = scratch("boxtally_config_creds");
        write_league(&tmp, "[league]\nleague_id = 42\nseason = 2025\n");
        fs::write(
            tmp.join("config/credentials.toml"),
            "espn_s2 = \"abc\"\nswid = \"{XYZ}\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.credentials.espn_s2.as_deref(), Some("abc"));
        assert_eq!(config.credentials.swid.as_deref(), Some("{XYZ}"));
        assert!(config.credentials.is_complete());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn env_overrides_credentials() {
        let mut creds = CredentialsConfig {
            espn_s2: Some("from-file".into()),
            swid: Some("{FILE}".into()),
        };
        creds.apply_env(|key| match key {
            "ESPN_S2" => Some("from-env".into()),
            "SWID" => Some("   ".into()),
            _ => None,
        });
        assert_eq!(creds.espn_s2.as_deref(), Some("from-env"));
        assert_eq!(creds.swid.as_deref(), Some("{FILE}"));
    }

    #[test]
    fn incomplete_credentials() {
        let creds = CredentialsConfig {
            espn_s2: Some("abc".into()),
            swid: None,
        };
        assert!(!creds.is_complete());
        assert!(!CredentialsConfig::default().is_complete());
    }

    #[test]
    fn rejects_league_id_zero() {
        let tmp = scratch("boxtally_config_league_zero");
        write_league(&tmp, "[league]\nleague_id = 0\nseason = 2025\n");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "league.league_id"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_season_before_box_scores() {
        let tmp = scratch("boxtally_config_old_season");
        write_league(&tmp, "[league]\nleague_id = 42\nseason = 2018\n");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "league.season"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let tmp = scratch("boxtally_config_zero_timeout");
        write_league(
            &tmp,
            "[league]\nleague_id = 42\nseason = 2025\n\n[espn]\ntimeout_secs = 0\n",
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "espn.timeout_secs"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_snapshot_path() {
        let tmp = scratch("boxtally_config_empty_path");
        write_league(
            &tmp,
            "[league]\nleague_id = 42\nseason = 2025\n\n[output]\nsnapshot_path = \"\"\n",
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "output.snapshot_path")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = scratch("boxtally_config_missing_league");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("league.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch("boxtally_config_invalid_toml");
        write_league(&tmp, "this is not valid [[[ toml");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("league.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("boxtally_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), defaults_dir.join("league.toml")).unwrap();
        fs::copy(
            root.join("defaults/credentials.toml.example"),
            defaults_dir.join("credentials.toml.example"),
        )
        .unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/league.toml").exists());
        assert!(!tmp.join("config/credentials.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("boxtally_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), tmp.join("defaults/league.toml")).unwrap();
        fs::write(tmp.join("config/league.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let content = fs::read_to_string(tmp.join("config/league.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn base_dir_prefers_cwd_with_config() {
        let tmp = scratch("boxtally_config_base_cwd");
        let fallback = project_root();
        assert_eq!(resolve_base_dir(&tmp, &fallback), tmp);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn base_dir_falls_back_when_cwd_is_bare() {
        let tmp = std::env::temp_dir().join("boxtally_config_base_bare");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let fallback = project_root();
        assert_eq!(resolve_base_dir(&tmp, &fallback), fallback);
        // The crate's own directory ships defaults/.
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        assert!(manifest_dir.join("defaults/league.toml").is_file());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("boxtally_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
