use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ipnet::IpNet;
use tracing_subscriber::EnvFilter;
use url::Url;
use vitrin_core::AppError;
use vitrin_domain::{LocaleSet, PathMode};
use vitrin_infrastructure::DEFAULT_SWEEP_INTERVAL;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub site_base_url: String,
    pub site_origin: String,
    pub locales: LocaleSet,
    pub path_mode: PathMode,
    pub routes_file: Option<PathBuf>,
    pub admin_users_file: PathBuf,
    pub cookie_secure: bool,
    pub sweep_interval: Duration,
    pub trusted_proxies: Vec<IpNet>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = match optional_env("API_PORT") {
            Some(value) => parse_port(&value)?,
            None => 3001,
        };

        let site_base_url =
            env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let site_origin = origin_of(&site_base_url)?;

        let locales = LocaleSet::parse(
            &env::var("SITE_LOCALES").unwrap_or_else(|_| "tr,en".to_owned()),
            &env::var("SITE_DEFAULT_LOCALE").unwrap_or_else(|_| "tr".to_owned()),
        )?;
        let path_mode = env::var("SITE_PATH_MODE")
            .unwrap_or_else(|_| "dynamic".to_owned())
            .parse::<PathMode>()?;

        let routes_file = optional_env("ROUTES_FILE").map(PathBuf::from);
        let admin_users_file = PathBuf::from(
            optional_env("ADMIN_USERS_FILE").unwrap_or_else(|| "config/admin-users.json".to_owned()),
        );

        let cookie_secure = match optional_env("SESSION_COOKIE_SECURE") {
            Some(value) => parse_cookie_secure(&value)?,
            None => false,
        };

        let sweep_interval = match optional_env("RATE_LIMIT_SWEEP_INTERVAL_SECONDS") {
            Some(value) => parse_sweep_interval(&value)?,
            None => DEFAULT_SWEEP_INTERVAL,
        };

        let trusted_proxies = parse_trusted_proxies(&env::var("TRUSTED_PROXIES").unwrap_or_default())?;

        Ok(Self {
            api_host,
            api_port,
            site_base_url,
            site_origin,
            locales,
            path_mode,
            routes_file,
            admin_users_file,
            cookie_secure,
            sweep_interval,
            trusted_proxies,
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

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Returns the `scheme://host[:port]` origin browsers send for the site.
fn origin_of(base_url: &str) -> Result<String, AppError> {
    let url = Url::parse(base_url)
        .map_err(|error| AppError::Validation(format!("invalid SITE_BASE_URL: {error}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Validation(
            "SITE_BASE_URL must use http or https".to_owned(),
        ));
    }

    Ok(url.origin().ascii_serialization())
}

fn parse_port(value: &str) -> Result<u16, AppError> {
    value
        .parse::<u16>()
        .map_err(|error| AppError::Validation(format!("invalid API_PORT '{value}': {error}")))
}

fn parse_cookie_secure(value: &str) -> Result<bool, AppError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(AppError::Validation(format!(
            "SESSION_COOKIE_SECURE must be 'true' or 'false', got '{value}'"
        )))
    }
}

fn parse_sweep_interval(value: &str) -> Result<Duration, AppError> {
    let seconds = value.parse::<u64>().map_err(|error| {
        AppError::Validation(format!(
            "invalid RATE_LIMIT_SWEEP_INTERVAL_SECONDS: {error}"
        ))
    })?;
    if seconds == 0 {
        return Err(AppError::Validation(
            "RATE_LIMIT_SWEEP_INTERVAL_SECONDS must be greater than zero".to_owned(),
        ));
    }

    Ok(Duration::from_secs(seconds))
}

/// Parses a comma-separated list of proxy networks. Bare addresses are
/// accepted as single-host networks.
fn parse_trusted_proxies(value: &str) -> Result<Vec<IpNet>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<IpNet>()
                .or_else(|_| entry.parse::<IpAddr>().map(IpNet::from))
                .map_err(|error| {
                    AppError::Validation(format!("invalid TRUSTED_PROXIES entry '{entry}': {error}"))
                })
        })
        .collect()
}
