//! Gateway settings loaded via OrthoConfig and resolved against a profile.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::profile::Profile;
use crate::outbound::persistence::MongoConfig;
use crate::server::ServerConfig;

/// Connection string used by the development profile when none is set.
pub const DEVELOPMENT_MONGO_URI: &str = "mongodb://localhost:27017";

/// Default listening host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default JSON and urlencoded body limit: 10 MiB.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Default per-operation socket timeout in milliseconds.
pub const DEFAULT_SOCKET_TIMEOUT_MS: u64 = 10_000;

/// Default per-operation socket timeout.
pub const DEFAULT_SOCKET_TIMEOUT: Duration = Duration::from_millis(DEFAULT_SOCKET_TIMEOUT_MS);

/// Layered settings read from `GATEWAY_*` variables and CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// MongoDB connection string.
    pub mongo_uri: Option<String>,
    /// Database name override.
    pub database: Option<String>,
    /// Listening host.
    #[ortho_config(default = String::from(DEFAULT_HOST))]
    pub host: String,
    /// Listening port.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Maximum accepted request body in bytes.
    #[ortho_config(default = DEFAULT_BODY_LIMIT_BYTES)]
    pub json_limit_bytes: usize,
    /// Per-operation database timeout in milliseconds.
    #[ortho_config(default = DEFAULT_SOCKET_TIMEOUT_MS)]
    pub socket_timeout_ms: u64,
}

/// Errors raised while resolving settings for a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The profile needs an explicit connection string.
    #[error("GATEWAY_MONGO_URI must be set for the {profile} profile")]
    MissingMongoUri {
        /// Active profile.
        profile: Profile,
    },
    /// The listening host is not an IP address.
    #[error("invalid GATEWAY_HOST '{value}': expected an IP address")]
    InvalidHost {
        /// Rejected value.
        value: String,
    },
    /// A zero body limit was configured.
    #[error("GATEWAY_JSON_LIMIT_BYTES must be greater than zero")]
    ZeroBodyLimit,
}

/// Fully resolved configuration for one process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Active profile.
    pub profile: Profile,
    /// Database connection settings.
    pub mongo: MongoConfig,
    /// HTTP listener settings.
    pub server: ServerConfig,
}

impl GatewayConfig {
    /// Combine a profile with loaded settings.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a required value is missing or invalid.
    ///
    /// # Examples
    /// ```
    /// use vendor_gateway::config::{
    ///     ConfigError, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_HOST, DEFAULT_PORT,
    ///     DEFAULT_SOCKET_TIMEOUT_MS, GatewayConfig, GatewaySettings, Profile,
    /// };
    ///
    /// let settings = GatewaySettings {
    ///     mongo_uri: None,
    ///     database: None,
    ///     host: DEFAULT_HOST.to_owned(),
    ///     port: DEFAULT_PORT,
    ///     json_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
    ///     socket_timeout_ms: DEFAULT_SOCKET_TIMEOUT_MS,
    /// };
    /// let err = GatewayConfig::resolve(Profile::Production, &settings).unwrap_err();
    /// assert_eq!(err, ConfigError::MissingMongoUri { profile: Profile::Production });
    /// ```
    pub fn resolve(profile: Profile, settings: &GatewaySettings) -> Result<Self, ConfigError> {
        let uri = match (&settings.mongo_uri, profile.requires_explicit_uri()) {
            (Some(uri), _) => uri.clone(),
            (None, false) => DEVELOPMENT_MONGO_URI.to_owned(),
            (None, true) => return Err(ConfigError::MissingMongoUri { profile }),
        };
        let database = settings
            .database
            .clone()
            .unwrap_or_else(|| profile.database_name().to_owned());
        let socket_timeout = Duration::from_millis(settings.socket_timeout_ms);
        let mongo = MongoConfig::new(uri, database).with_socket_timeout(socket_timeout);

        let ip: IpAddr = settings
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost {
                value: settings.host.clone(),
            })?;
        if settings.json_limit_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        let server = ServerConfig::new(SocketAddr::new(ip, settings.port))
            .with_body_limit(settings.json_limit_bytes);

        Ok(Self {
            profile,
            mongo,
            server,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading and profile resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::{fixture, rstest};

    const VARS: [&str; 6] = [
        "GATEWAY_MONGO_URI",
        "GATEWAY_DATABASE",
        "GATEWAY_HOST",
        "GATEWAY_PORT",
        "GATEWAY_JSON_LIMIT_BYTES",
        "GATEWAY_SOCKET_TIMEOUT_MS",
    ];

    fn load_from_empty_args() -> GatewaySettings {
        GatewaySettings::load_from_iter([OsString::from("vendor-gateway")])
            .expect("settings should load")
    }

    #[fixture]
    fn empty_settings() -> GatewaySettings {
        GatewaySettings {
            mongo_uri: None,
            database: None,
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            json_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            socket_timeout_ms: DEFAULT_SOCKET_TIMEOUT_MS,
        }
    }

    #[rstest]
    fn missing_values_fall_back_to_defaults() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.mongo_uri.is_none());
        assert!(settings.database.is_none());
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.json_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
        assert_eq!(settings.socket_timeout_ms, DEFAULT_SOCKET_TIMEOUT_MS);
    }

    #[rstest]
    fn development_starts_without_any_settings() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        let config = GatewayConfig::resolve(Profile::Development, &settings).expect("resolves");

        assert_eq!(config.mongo.uri(), DEVELOPMENT_MONGO_URI);
        assert_eq!(config.server.bind_addr().to_string(), "0.0.0.0:8080");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("GATEWAY_MONGO_URI", Some("mongodb://db.internal:27017".to_owned())),
            ("GATEWAY_DATABASE", Some("vendors_it".to_owned())),
            ("GATEWAY_HOST", Some("127.0.0.1".to_owned())),
            ("GATEWAY_PORT", Some("9090".to_owned())),
            ("GATEWAY_JSON_LIMIT_BYTES", None),
            ("GATEWAY_SOCKET_TIMEOUT_MS", Some("2500".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.mongo_uri.as_deref(),
            Some("mongodb://db.internal:27017")
        );
        assert_eq!(settings.database.as_deref(), Some("vendors_it"));
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.json_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
        assert_eq!(settings.socket_timeout_ms, 2500);
    }

    #[rstest]
    fn development_uses_defaults(empty_settings: GatewaySettings) {
        let config =
            GatewayConfig::resolve(Profile::Development, &empty_settings).expect("resolves");

        assert_eq!(config.mongo.uri(), DEVELOPMENT_MONGO_URI);
        assert_eq!(config.mongo.database(), "vendor_gateway_development");
        assert_eq!(config.mongo.socket_timeout(), DEFAULT_SOCKET_TIMEOUT);
        assert_eq!(config.server.bind_addr().port(), DEFAULT_PORT);
        assert_eq!(config.server.body_limit(), DEFAULT_BODY_LIMIT_BYTES);
    }

    #[rstest]
    #[case(Profile::Qa)]
    #[case(Profile::Demo)]
    #[case(Profile::Stage)]
    #[case(Profile::Production)]
    fn non_development_profiles_require_uri(
        empty_settings: GatewaySettings,
        #[case] profile: Profile,
    ) {
        let err = GatewayConfig::resolve(profile, &empty_settings).expect_err("uri required");
        assert_eq!(err, ConfigError::MissingMongoUri { profile });
    }

    #[rstest]
    fn explicit_values_override_profile_defaults(mut empty_settings: GatewaySettings) {
        empty_settings.mongo_uri = Some("mongodb://prod:27017".to_owned());
        empty_settings.database = Some("vendors".to_owned());
        empty_settings.host = "127.0.0.1".to_owned();
        empty_settings.port = 3000;

        let config =
            GatewayConfig::resolve(Profile::Production, &empty_settings).expect("resolves");

        assert_eq!(config.mongo.uri(), "mongodb://prod:27017");
        assert_eq!(config.mongo.database(), "vendors");
        assert_eq!(config.server.bind_addr().to_string(), "127.0.0.1:3000");
    }

    #[rstest]
    fn rejects_hostnames(mut empty_settings: GatewaySettings) {
        empty_settings.host = "localhost".to_owned();

        let err = GatewayConfig::resolve(Profile::Development, &empty_settings)
            .expect_err("host must be an IP");
        assert_eq!(
            err,
            ConfigError::InvalidHost {
                value: "localhost".to_owned()
            }
        );
    }

    #[rstest]
    fn rejects_zero_body_limit(mut empty_settings: GatewaySettings) {
        empty_settings.json_limit_bytes = 0;

        let err = GatewayConfig::resolve(Profile::Development, &empty_settings)
            .expect_err("limit must be positive");
        assert_eq!(err, ConfigError::ZeroBodyLimit);
    }
}
