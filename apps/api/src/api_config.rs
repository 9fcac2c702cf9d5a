use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use clubdeck_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Absolute frontend destinations used when a page guard denies access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRedirects {
    pub frontend_url: Url,
    pub login_url: String,
    pub unauthorized_url: String,
}

impl PageRedirects {
    /// Resolves `path` against the frontend origin.
    pub fn frontend_path(&self, path: &str) -> Result<String, AppError> {
        self.frontend_url
            .join(path)
            .map(String::from)
            .map_err(|error| AppError::Internal(format!("invalid redirect path '{path}': {error}")))
    }
}

/// Process-wide configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub redirects: PageRedirects,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_source(env::args().nth(1).as_deref(), |name| env::var(name).ok())
    }

    fn from_source(
        command: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let migrate_only = command == Some("migrate");

        let database_url = required(&lookup, "DATABASE_URL")?;
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let bootstrap_token = required(&lookup, "AUTH_BOOTSTRAP_TOKEN")?;
        let session_secret = required(&lookup, "SESSION_SECRET")?;
        if session_secret.len() < 32 {
            return Err(AppError::Validation(
                "SESSION_SECRET must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let cookie_secure = lookup("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let parsed_frontend_url = Url::parse(&frontend_url)
            .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?;
        let login_path = redirect_path(&lookup, "LOGIN_PATH", "/login")?;
        let unauthorized_path = redirect_path(&lookup, "UNAUTHORIZED_PATH", "/unauthorized")?;

        let mut redirects = PageRedirects {
            frontend_url: parsed_frontend_url,
            login_url: String::new(),
            unauthorized_url: String::new(),
        };
        redirects.login_url = redirects.frontend_path(&login_path)?;
        redirects.unauthorized_url = redirects.frontend_path(&unauthorized_path)?;

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            redirects,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn redirect_path(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Result<String, AppError> {
    let value = lookup(name).unwrap_or_else(|| default.to_owned());
    if !value.starts_with('/') {
        return Err(AppError::Validation(format!(
            "{name} must be an absolute path, got '{value}'"
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::ApiConfig;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/clubdeck".to_owned()),
            ("AUTH_BOOTSTRAP_TOKEN", "bootstrap".to_owned()),
            ("SESSION_SECRET", "s".repeat(32)),
        ])
    }

    fn load(vars: &HashMap<&'static str, String>, command: Option<&str>) -> Option<ApiConfig> {
        ApiConfig::from_source(command, |name| vars.get(name).cloned()).ok()
    }

    #[test]
    fn defaults_are_applied() {
        let config = load(&base_env(), None);
        assert!(config.is_some());
        let Some(config) = config else { return };

        assert!(!config.migrate_only);
        assert_eq!(config.api_port, 3001);
        assert!(!config.cookie_secure);
        assert_eq!(config.redirects.login_url, "http://localhost:3000/login");
        assert_eq!(
            config.redirects.unauthorized_url,
            "http://localhost:3000/unauthorized"
        );
        assert_eq!(
            config.socket_address().map(|address| address.to_string()).ok(),
            Some("127.0.0.1:3001".to_owned())
        );
    }

    #[test]
    fn migrate_command_is_detected() {
        let config = load(&base_env(), Some("migrate"));
        assert!(config.is_some_and(|config| config.migrate_only));
    }

    #[test]
    fn short_session_secret_is_rejected() {
        let mut vars = base_env();
        vars.insert("SESSION_SECRET", "short".to_owned());
        assert!(load(&vars, None).is_none());
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let mut vars = base_env();
        vars.remove("DATABASE_URL");
        assert!(load(&vars, None).is_none());
    }

    #[test]
    fn relative_redirect_path_is_rejected() {
        let mut vars = base_env();
        vars.insert("LOGIN_PATH", "login".to_owned());
        assert!(load(&vars, None).is_none());
    }

    #[test]
    fn custom_redirects_resolve_against_frontend() {
        let mut vars = base_env();
        vars.insert("FRONTEND_URL", "https://clubs.example.com".to_owned());
        vars.insert("UNAUTHORIZED_PATH", "/no-access".to_owned());

        let config = load(&vars, None);
        assert_eq!(
            config.map(|config| config.redirects.unauthorized_url),
            Some("https://clubs.example.com/no-access".to_owned())
        );
    }
}
