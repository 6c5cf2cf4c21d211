use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Skills offered as checkboxes when `APP_SKILLS` is not set.
pub const DEFAULT_SKILLS: [&str; 3] = ["JavaScript", "CSS", "Python"];

/// Idle time after which a mounted view is discarded, when `APP_VIEW_TTL_SECS` is not set.
pub const DEFAULT_VIEW_TTL: Duration = Duration::from_secs(30 * 60);

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the form host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub form: FormConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut form = match env::var("APP_SKILLS") {
            Ok(raw) => FormConfig::from_list(&raw)?,
            Err(_) => FormConfig::default(),
        };
        if let Ok(raw) = env::var("APP_VIEW_TTL_SECS") {
            form.view_ttl = parse_view_ttl(&raw)?;
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            form,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Form content that varies per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Skill catalog rendered as checkboxes, in display order.
    pub skills: Vec<String>,
    /// Views untouched for this long are unmounted by the host.
    pub view_ttl: Duration,
}

impl FormConfig {
    /// Parse a comma-separated skill list, dropping blanks and duplicates.
    pub fn from_list(raw: &str) -> Result<Self, ConfigError> {
        let mut skills: Vec<String> = Vec::new();
        for skill in raw.split(',').map(str::trim).filter(|skill| !skill.is_empty()) {
            if !skills.iter().any(|existing| existing == skill) {
                skills.push(skill.to_string());
            }
        }

        if skills.is_empty() {
            return Err(ConfigError::EmptySkillCatalog);
        }

        Ok(Self {
            skills,
            view_ttl: DEFAULT_VIEW_TTL,
        })
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILLS.iter().map(|skill| skill.to_string()).collect(),
            view_ttl: DEFAULT_VIEW_TTL,
        }
    }
}

fn parse_view_ttl(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidViewTtl),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptySkillCatalog,
    InvalidViewTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptySkillCatalog => {
                write!(f, "APP_SKILLS must list at least one skill")
            }
            ConfigError::InvalidViewTtl => {
                write!(f, "APP_VIEW_TTL_SECS must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::EmptySkillCatalog
            | ConfigError::InvalidViewTtl => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_SKILLS");
        env::remove_var("APP_VIEW_TTL_SECS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.form.skills, vec!["JavaScript", "CSS", "Python"]);
        assert_eq!(config.form.view_ttl, DEFAULT_VIEW_TTL);
    }

    #[test]
    fn view_ttl_reads_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_VIEW_TTL_SECS", "90");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.form.view_ttl, Duration::from_secs(90));

        env::set_var("APP_VIEW_TTL_SECS", "0");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidViewTtl)));
        reset_env();
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "eighty");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }

    #[test]
    fn skill_catalog_reads_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SKILLS", "Rust, Go ,, Rust");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.form.skills, vec!["Rust", "Go"]);
        reset_env();
    }

    #[test]
    fn blank_skill_catalog_is_rejected() {
        assert!(matches!(
            FormConfig::from_list(" , ,"),
            Err(ConfigError::EmptySkillCatalog)
        ));
    }
}
