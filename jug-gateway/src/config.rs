//! Environment-driven gateway configuration.

use std::{
    fmt::Display,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

/// Port the HTTP listener binds to. Mandatory.
pub const HTTP_PORT: &str = "HTTP_PORT";
/// Directory holding the built web client.
pub const STATIC_DIR: &str = "STATIC_DIR";
/// Largest jug capacity the riddle endpoint accepts.
pub const MAX_CAPACITY: &str = "MAX_CAPACITY";
/// Seconds a request may run before the gateway answers with a timeout.
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

const DEFAULT_STATIC_DIR: &str = "client/build";
const DEFAULT_MAX_CAPACITY: u64 = 10_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A mandatory variable is unset.
    #[error("missing mandatory environment variable: {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A `.env` file exists but could not be read.
    #[error("error loading .env file: {0}")]
    DotEnv(String),
}

/// Settings for one gateway process.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// TCP port to listen on, on all interfaces.
    pub http_port: u16,
    /// Root of the built client; `index.html` and `static/` live here.
    pub static_dir: PathBuf,
    /// Upper bound on either jug capacity.
    pub max_capacity: u64,
    /// Per-request deadline.
    pub request_timeout: Duration,
}

impl GatewayConfig {
    /// Create a config listening on `http_port` with default settings.
    #[must_use]
    pub fn new(http_port: u16) -> Self {
        Self {
            http_port,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_capacity: DEFAULT_MAX_CAPACITY,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] if `HTTP_PORT` is unset, or
    /// [`ConfigError::Invalid`] if any variable fails to parse or
    /// `MAX_CAPACITY` / `REQUEST_TIMEOUT_SECS` is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup(HTTP_PORT).ok_or(ConfigError::Missing(HTTP_PORT))?;
        let mut config = Self::new(parse(HTTP_PORT, &port)?);

        if let Some(dir) = lookup(STATIC_DIR).filter(|d| !d.is_empty()) {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(MAX_CAPACITY) {
            config.max_capacity = parse_positive(MAX_CAPACITY, &raw)?;
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_SECS) {
            config.request_timeout = Duration::from_secs(parse_positive(REQUEST_TIMEOUT_SECS, &raw)?);
        }

        Ok(config)
    }

    /// Address the listener binds to.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.http_port))
    }
}

/// Read a `.env` file from the working directory into the environment.
///
/// Returns `Ok(false)` when no such file exists.
///
/// # Errors
/// Returns [`ConfigError::DotEnv`] if the file exists but cannot be parsed.
pub fn load_dotenv() -> Result<bool, ConfigError> {
    match dotenv::dotenv() {
        Ok(_) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ConfigError::DotEnv(e.to_string())),
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: raw.to_owned(),
        reason: e.to_string(),
    })
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match parse(name, raw)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: raw.to_owned(),
            reason: "must be greater than zero".to_owned(),
        }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_http_port_is_rejected() {
        let err = GatewayConfig::from_lookup(lookup_from(&[])).err();
        let msg = err.map(|e| e.to_string()).unwrap_or_default();
        assert_eq!(msg, "missing mandatory environment variable: HTTP_PORT");
    }

    #[test]
    fn http_port_alone_uses_defaults() {
        let config = match GatewayConfig::from_lookup(lookup_from(&[(HTTP_PORT, "8080")])) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config, GatewayConfig::new(8080));
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.static_dir, PathBuf::from("client/build"));
    }

    #[test]
    fn optional_variables_override_defaults() {
        let config = match GatewayConfig::from_lookup(lookup_from(&[
            (HTTP_PORT, "9000"),
            (STATIC_DIR, "/srv/client"),
            (MAX_CAPACITY, "500"),
            (REQUEST_TIMEOUT_SECS, "3"),
        ])) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.static_dir, PathBuf::from("/srv/client"));
        assert_eq!(config.max_capacity, 500);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn unparsable_port_names_the_variable() {
        let err = GatewayConfig::from_lookup(lookup_from(&[(HTTP_PORT, "eighty")])).err();
        assert!(
            matches!(err, Some(ConfigError::Invalid { name: HTTP_PORT, .. })),
            "got {err:?}"
        );
    }

    #[test]
    fn zero_capacity_limit_is_rejected() {
        let err =
            GatewayConfig::from_lookup(lookup_from(&[(HTTP_PORT, "80"), (MAX_CAPACITY, "0")])).err();
        let msg = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("must be greater than zero"), "got {msg}");
    }
}
