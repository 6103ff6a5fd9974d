//! Configuration management for the manifest viewer
//!
//! Settings are loaded once at startup from:
//! 1. Environment variables (highest priority)
//! 2. Configuration file (TOML, or JSON when the file ends in `.json`)
//! 3. Default values (lowest priority)

use manifest_viewer_common::{AppInfo, PublicConfig, RedactionPolicy, ResourceKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Namespace defaults and field simplification
    pub viewer: ViewSettings,
    /// Cluster credentials
    pub kubernetes: KubernetesConfig,
    /// Logging configuration
    pub logging: LoggingSettings,
    /// CORS configuration
    pub cors: CorsSettings,
    /// Application identity shown in the UI
    pub app: AppSettings,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the built frontend
    pub static_dir: PathBuf,
}

/// Viewer behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Namespace used when a request names none
    pub default_namespace: String,
    /// Hide `kube-*`, `openshift-*` and `default` from the namespace list
    pub hide_system_namespaces: bool,
    /// Field deny-list used by simplified views
    pub hidden_fields: Vec<String>,
}

/// Kubernetes client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KubernetesConfig {
    /// Use the pod service account instead of a kubeconfig
    pub in_cluster: bool,
    /// Explicit kubeconfig path; the default lookup is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig_path: Option<PathBuf>,
    /// Kubeconfig context; the current context is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Enable file logging
    pub file_logging_enabled: bool,
    /// Emit console logs as JSON
    pub json_format: bool,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    /// Allowed origins, `*` for any
    pub allowed_origins: Vec<String>,
}

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub description: String,
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("manifest-viewer-ui/dist"),
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_namespace: "default".to_string(),
            hide_system_namespaces: false,
            hidden_fields: vec![
                "managedFields".to_string(),
                "kubectl.kubernetes.io/last-applied-configuration".to_string(),
                "status.conditions".to_string(),
            ],
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: PathBuf::from("/var/log/manifest-viewer"),
            file_logging_enabled: false,
            json_format: false,
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "OpenShift Manifest Viewer".to_string(),
            description: "Read-only viewer for namespaced cluster resources".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from the first config file found, then apply
    /// environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(Self::find_config_file())?;
        config.apply_env_overrides();

        Ok(config)
    }

    fn load_from(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::load_from_file(&path)?;
                tracing::info!(path = %path.display(), "Configuration file loaded");
                Ok(config)
            }
            None => {
                tracing::warn!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e.to_string()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            // Environment variable override
            std::env::var("MANIFEST_VIEWER_CONFIG").ok().map(PathBuf::from),
            // Standard locations
            Some(PathBuf::from("/app/config/config.toml")),
            Some(PathBuf::from("/app/config/config.json")),
            Some(PathBuf::from("./config.toml")),
            Some(PathBuf::from("./manifest-viewer.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(host) = lookup("MANIFEST_VIEWER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid PORT"),
            }
        }
        if let Some(dir) = lookup("MANIFEST_VIEWER_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }

        // Viewer
        if let Some(namespace) = lookup("MANIFEST_VIEWER_DEFAULT_NAMESPACE") {
            self.viewer.default_namespace = namespace;
        }
        if let Some(hide) = lookup("MANIFEST_VIEWER_HIDE_SYSTEM_NAMESPACES") {
            match hide.parse() {
                Ok(hide) => self.viewer.hide_system_namespaces = hide,
                Err(_) => tracing::warn!(
                    value = %hide,
                    "Ignoring invalid MANIFEST_VIEWER_HIDE_SYSTEM_NAMESPACES"
                ),
            }
        }

        // Logging
        if let Some(level) = lookup("MANIFEST_VIEWER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(dir) = lookup("MANIFEST_VIEWER_LOG_DIR") {
            self.logging.log_dir = PathBuf::from(dir);
            self.logging.file_logging_enabled = true;
        }
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if self.viewer.default_namespace.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Default namespace cannot be empty".to_string(),
            ));
        }

        if self.server.static_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "Static directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Deny-list used for simplified views
    pub fn redaction_policy(&self) -> RedactionPolicy {
        RedactionPolicy::new(self.viewer.hidden_fields.iter().cloned())
    }

    /// Subset of the configuration the frontend may see
    pub fn public_config(&self) -> PublicConfig {
        PublicConfig {
            app: AppInfo {
                name: self.app.name.clone(),
                description: self.app.description.clone(),
                version: self.app.version.clone(),
            },
            default_namespace: self.viewer.default_namespace.clone(),
            hide_system_namespaces: self.viewer.hide_system_namespaces,
            kinds: ResourceKind::ALL.to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Failed to read configuration file
    FileRead(PathBuf, String),
    /// Failed to parse configuration
    Parse(String),
    /// Configuration validation failed
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, err) => {
                write!(f, "Failed to read config file {:?}: {}", path, err)
            }
            ConfigError::Parse(err) => write!(f, "Failed to parse config: {}", err),
            ConfigError::Validation(err) => write!(f, "Config validation failed: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    /// In-memory log sink for asserting on emitted events
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.viewer.default_namespace, "default");
        assert!(!config.viewer.hide_system_namespaces);
        assert!(config.viewer.hidden_fields.contains(&"managedFields".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ViewerConfig = toml::from_str(
            r#"
            [viewer]
            default_namespace = "team-a"
            hide_system_namespaces = true
            hidden_fields = ["managedFields", "openshift.io/"]
            "#,
        )
        .unwrap();

        assert_eq!(config.viewer.default_namespace, "team-a");
        assert!(config.viewer.hide_system_namespaces);
        assert_eq!(config.viewer.hidden_fields.len(), 2);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_json_config() {
        let config: ViewerConfig = serde_json::from_str(
            r#"{"viewer": {"default_namespace": "apps", "hidden_fields": ["status.conditions"]}}"#,
        )
        .unwrap();

        assert_eq!(config.viewer.default_namespace, "apps");
        assert_eq!(
            config.redaction_policy().patterns(),
            ["status.conditions".to_string()]
        );
    }

    #[test]
    fn test_load_from_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"server": {{"port": 9090}}}}"#).unwrap();
        let config = ViewerConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[server]\nport = 9191\n").unwrap();
        let config = ViewerConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9191);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = ViewerConfig::load_from_file(Path::new("/nonexistent/viewer.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_, _)));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[server\nport = ").unwrap();
        let err = ViewerConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ViewerConfig::default();
        config.apply_overrides(env(&[
            ("PORT", "3000"),
            ("MANIFEST_VIEWER_DEFAULT_NAMESPACE", "team-c"),
            ("MANIFEST_VIEWER_HIDE_SYSTEM_NAMESPACES", "true"),
            ("MANIFEST_VIEWER_LOG_DIR", "/tmp/logs"),
        ]));

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.viewer.default_namespace, "team-c");
        assert!(config.viewer.hide_system_namespaces);
        assert_eq!(config.logging.log_dir, PathBuf::from("/tmp/logs"));
        assert!(config.logging.file_logging_enabled);
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = ViewerConfig::default();
        let logs = capture_logs(|| config.apply_overrides(env(&[("PORT", "not-a-port")])));

        assert_eq!(config.server.port, 8080);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Ignoring invalid PORT"));
        assert!(logs.contains("not-a-port"));
    }

    #[test]
    fn test_invalid_hide_system_namespaces_override_warns() {
        let mut config = ViewerConfig::default();
        config.viewer.hide_system_namespaces = true;
        let logs = capture_logs(|| {
            config.apply_overrides(env(&[("MANIFEST_VIEWER_HIDE_SYSTEM_NAMESPACES", "yes")]))
        });

        assert!(config.viewer.hide_system_namespaces);
        assert!(logs.contains("Ignoring invalid MANIFEST_VIEWER_HIDE_SYSTEM_NAMESPACES"));
        assert!(logs.contains("yes"));

        config.apply_overrides(env(&[("MANIFEST_VIEWER_HIDE_SYSTEM_NAMESPACES", "false")]));
        assert!(!config.viewer.hide_system_namespaces);
    }

    #[test]
    fn test_load_reports_config_source() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[server]\nport = 9292\n").unwrap();

        let path = file.path().to_path_buf();
        let mut loaded = None;
        let logs = capture_logs(|| loaded = Some(ViewerConfig::load_from(Some(path))));

        assert_eq!(loaded.unwrap().unwrap().server.port, 9292);
        assert!(logs.contains("Configuration file loaded"));

        let logs = capture_logs(|| {
            let config = ViewerConfig::load_from(None).unwrap();
            assert_eq!(config.server.port, 8080);
        });
        assert!(logs.contains("No configuration file found, using defaults"));
    }

    #[test]
    fn test_config_validation() {
        let mut invalid_port = ViewerConfig::default();
        invalid_port.server.port = 0;
        assert!(invalid_port.validate().is_err());

        let mut invalid_ns = ViewerConfig::default();
        invalid_ns.viewer.default_namespace = "  ".to_string();
        assert!(invalid_ns.validate().is_err());
    }

    #[test]
    fn test_generate_sample_config() {
        let sample = ViewerConfig::generate_sample();
        assert!(sample.contains("[server]"));
        assert!(sample.contains("[viewer]"));
        assert!(sample.contains("[kubernetes]"));
        assert!(sample.contains("[logging]"));
        assert!(sample.contains("[cors]"));
        assert!(sample.contains("[app]"));

        let reparsed: ViewerConfig = toml::from_str(&sample).unwrap();
        assert_eq!(reparsed.server.port, 8080);
    }

    #[test]
    fn test_public_config() {
        let public = ViewerConfig::default().public_config();
        assert_eq!(public.default_namespace, "default");
        assert_eq!(public.kinds.len(), 4);
        assert_eq!(public.app.name, "OpenShift Manifest Viewer");
    }
}
