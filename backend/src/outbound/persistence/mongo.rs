//! MongoDB client lifecycle.
//!
//! The driver pools and re-establishes server connections on its own; this
//! module owns the client handle, applies the gateway's timeout settings and
//! exposes a ping probe for the startup retry loop.
//!
//! # Design
//!
//! - A zero connect timeout means the driver waits indefinitely.
//! - The socket timeout is enforced per repository operation with
//!   `tokio::time::timeout`, since the driver has no per-socket setting.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

const APP_NAME: &str = "vendor-gateway";

/// Errors raised while opening or probing the MongoDB connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MongoError {
    /// The connection string could not be parsed.
    #[error("invalid MongoDB connection string: {message}")]
    InvalidUri { message: String },

    /// The server could not be reached or rejected the ping.
    #[error("MongoDB connection failed: {message}")]
    Connection { message: String },
}

impl MongoError {
    /// Create an invalid-URI error with the given message.
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::InvalidUri {
            message: message.into(),
        }
    }

    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

/// Configuration for the MongoDB client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vendor_gateway::outbound::persistence::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017", "vendors")
///     .with_socket_timeout(Duration::from_secs(5));
/// assert_eq!(config.connect_timeout(), Duration::ZERO);
/// ```
#[derive(Clone)]
pub struct MongoConfig {
    uri: String,
    database: String,
    connect_timeout: Duration,
    socket_timeout: Duration,
}

impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The connection string may embed credentials.
        f.debug_struct("MongoConfig")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .field("connect_timeout", &self.connect_timeout)
            .field("socket_timeout", &self.socket_timeout)
            .finish()
    }
}

impl MongoConfig {
    /// Create a configuration with no connect timeout and a 10 s socket
    /// timeout.
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            connect_timeout: Duration::ZERO,
            socket_timeout: Duration::from_millis(10_000),
        }
    }

    /// Set the connect timeout. Zero disables it.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-operation timeout.
    pub fn with_socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = timeout;
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Connect timeout; zero means none.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Per-operation timeout.
    pub fn socket_timeout(&self) -> Duration {
        self.socket_timeout
    }
}

/// Something that can confirm the database is reachable.
#[async_trait]
pub trait ConnectionProbe: Send + Sync {
    /// Round-trip to the server.
    async fn ping(&self) -> Result<(), MongoError>;
}

/// Shared handle to the configured database.
#[derive(Clone, Debug)]
pub struct MongoConnection {
    client: Client,
    database: Database,
    socket_timeout: Duration,
}

impl MongoConnection {
    /// Build the client. No network round-trip happens here.
    ///
    /// # Errors
    ///
    /// Returns [`MongoError::InvalidUri`] when the connection string or the
    /// resulting options are rejected by the driver.
    pub async fn open(config: &MongoConfig) -> Result<Self, MongoError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| MongoError::invalid_uri(err.to_string()))?;
        options.connect_timeout = Some(config.connect_timeout());
        options.app_name = Some(APP_NAME.to_owned());

        let client =
            Client::with_options(options).map_err(|err| MongoError::invalid_uri(err.to_string()))?;
        let database = client.database(config.database());

        Ok(Self {
            client,
            database,
            socket_timeout: config.socket_timeout(),
        })
    }

    /// Configured database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Per-operation timeout.
    pub fn socket_timeout(&self) -> Duration {
        self.socket_timeout
    }

    /// Close pooled connections and end server sessions.
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl ConnectionProbe for MongoConnection {
    async fn ping(&self) -> Result<(), MongoError> {
        let ping = async { self.database.run_command(doc! { "ping": 1 }).await };
        match tokio::time::timeout(self.socket_timeout, ping).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(MongoError::connection(err.to_string())),
            Err(_) => Err(MongoError::connection(format!(
                "ping timed out after {} ms",
                self.socket_timeout.as_millis()
            ))),
        }
    }
}
