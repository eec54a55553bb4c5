//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::config::settings::DEFAULT_BODY_LIMIT_BYTES;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) body_limit: usize,
}

impl ServerConfig {
    /// Listen on `bind_addr` with the default 10 MiB body limit.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            body_limit: DEFAULT_BODY_LIMIT_BYTES,
        }
    }

    /// Override the JSON and urlencoded body limit.
    #[must_use]
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the maximum accepted request body in bytes.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        self.body_limit
    }
}
