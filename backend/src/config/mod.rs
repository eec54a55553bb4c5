//! Process configuration: deployment profile plus layered gateway settings.

pub mod profile;
pub mod settings;

pub use profile::{ConfigEnv, PROFILE_ENV, ProcessEnv, Profile, UnknownProfile};
pub use settings::{
    ConfigError, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SOCKET_TIMEOUT_MS,
    GatewayConfig, GatewaySettings,
};
