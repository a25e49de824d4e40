use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "dialbook";
const CONFIG_FILENAME: &str = "config.toml";

pub const API_KEY_ENV: &str = "DIALBOOK_API_KEY";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11235/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub device: DeviceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceConfig {
    pub vcf_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key: None,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            device: DeviceConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid api.base_url value: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid api.timeout_secs value: {0}")]
    InvalidTimeout(u64),
    #[error("invalid device.vcf_path value")]
    InvalidVcfPath,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api: Option<ApiFile>,
    device: Option<DeviceFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiFile {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceFile {
    vcf_path: Option<PathBuf>,
}

/// Loads the config file (if any) and applies the API key from the
/// environment on top.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = load_file(config_path)?;
    if let Some(key) = env::var_os(API_KEY_ENV) {
        apply_api_key_override(&mut config, &key.to_string_lossy());
    }
    Ok(config)
}

fn load_file(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn apply_api_key_override(config: &mut AppConfig, key: &str) {
    let trimmed = key.trim();
    if !trimmed.is_empty() {
        config.api.api_key = Some(trimmed.to_string());
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(api) = parsed.api {
        if let Some(base_url) = api.base_url {
            config.api.base_url = validate_base_url(&base_url)?;
        }
        if let Some(key) = api.api_key {
            let trimmed = key.trim();
            config.api.api_key = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        }
        if let Some(timeout) = api.timeout_secs {
            if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
            config.api.timeout_secs = timeout;
        }
    }

    if let Some(device) = parsed.device {
        if let Some(path) = device.vcf_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidVcfPath);
            }
            config.device.vcf_path = Some(path);
        }
    }

    Ok(config)
}

/// Requires http(s) and guarantees a trailing slash so relative endpoint
/// paths join under it.
fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url.to_string())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        apply_api_key_override, load_at_path, merge_config, validate_base_url, ApiFile,
        AppConfig, ConfigFile, DeviceFile, DEFAULT_TIMEOUT_SECS,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            api: Some(ApiFile {
                base_url: Some("https://contacts.example.com/v1".to_string()),
                api_key: Some(" secret ".to_string()),
                timeout_secs: Some(5),
            }),
            device: Some(DeviceFile {
                vcf_path: Some(PathBuf::from("/tmp/phone.vcf")),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.api.base_url, "https://contacts.example.com/v1/");
        assert_eq!(merged.api.api_key.as_deref(), Some("secret"));
        assert_eq!(merged.api.timeout_secs, 5);
        assert_eq!(
            merged.device.vcf_path.as_deref(),
            Some(Path::new("/tmp/phone.vcf"))
        );
    }

    #[test]
    fn merge_config_rejects_zero_timeout() {
        let parsed = ConfigFile {
            api: Some(ApiFile {
                base_url: None,
                api_key: None,
                timeout_secs: Some(0),
            }),
            device: None,
        };
        assert!(merge_config(parsed).is_err());
    }

    #[test]
    fn base_url_requires_http_scheme() {
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert_eq!(
            validate_base_url("http://10.0.0.1:11235").unwrap(),
            "http://10.0.0.1:11235/"
        );
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut config = AppConfig::default();
        config.api.api_key = Some("from-file".to_string());
        apply_api_key_override(&mut config, "from-env");
        assert_eq!(config.api.api_key.as_deref(), Some("from-env"));
        apply_api_key_override(&mut config, "  ");
        assert_eq!(config.api.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:8080/\"\napi_key = \"k\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.api.base_url, "http://localhost:8080/");
        assert_eq!(config.api.api_key.as_deref(), Some("k"));
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[api]\nretries = 3\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(err.to_string().contains("too permissive"));
    }
}
