//! Deployment profile selected by the `environment` variable.

use std::str::FromStr;

use tracing::warn;

/// Variable naming the active profile.
pub const PROFILE_ENV: &str = "environment";

const PROFILE_EXPECTED: &str = "development|qa|demo|stage|production";

/// Read access to process environment variables.
///
/// Kept as a seam so profile detection can be exercised without mutating the
/// real environment.
pub trait ConfigEnv {
    /// Value of `name`, if set and valid Unicode.
    fn string(&self, name: &str) -> Option<String>;
}

/// [`ConfigEnv`] backed by the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ConfigEnv for ProcessEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// Local development; tolerates a default MongoDB address.
    #[default]
    Development,
    /// Quality assurance.
    Qa,
    /// Customer demonstrations.
    Demo,
    /// Pre-production staging.
    Stage,
    /// Production.
    Production,
}

/// Returned when a profile name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile '{0}'; expected {expected}", expected = PROFILE_EXPECTED)]
pub struct UnknownProfile(pub String);

impl Profile {
    /// Select the profile named by [`PROFILE_ENV`].
    ///
    /// Unset or unrecognised values fall back to [`Profile::Development`].
    pub fn from_env<E: ConfigEnv>(env: &E) -> Self {
        match env.string(PROFILE_ENV) {
            Some(value) => value.parse().unwrap_or_else(|err: UnknownProfile| {
                warn!(error = %err, "falling back to development profile");
                Self::Development
            }),
            None => Self::Development,
        }
    }

    /// Lowercase profile name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Qa => "qa",
            Self::Demo => "demo",
            Self::Stage => "stage",
            Self::Production => "production",
        }
    }

    /// Database used when no explicit name is configured.
    #[must_use]
    pub const fn database_name(self) -> &'static str {
        match self {
            Self::Development => "vendor_gateway_development",
            Self::Qa => "vendor_gateway_qa",
            Self::Demo => "vendor_gateway_demo",
            Self::Stage => "vendor_gateway_stage",
            Self::Production => "vendor_gateway",
        }
    }

    /// Whether the MongoDB connection string must be configured explicitly.
    #[must_use]
    pub const fn requires_explicit_uri(self) -> bool {
        !matches!(self, Self::Development)
    }
}

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "development" => Ok(Self::Development),
            "qa" => Ok(Self::Qa),
            "demo" => Ok(Self::Demo),
            "stage" => Ok(Self::Stage),
            "production" => Ok(Self::Production),
            other => Err(UnknownProfile(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::{Env as MockableEnv, MockEnv};
    use rstest::rstest;

    struct TestEnv {
        inner: MockEnv,
    }

    impl ConfigEnv for TestEnv {
        fn string(&self, name: &str) -> Option<String> {
            MockableEnv::string(&self.inner, name)
        }
    }

    fn env_with_profile(value: Option<&'static str>) -> TestEnv {
        let mut inner = MockEnv::new();
        inner.expect_string().returning(move |name| match name {
            PROFILE_ENV => value.map(str::to_owned),
            _ => None,
        });
        TestEnv { inner }
    }

    #[rstest]
    #[case(Some("development"), Profile::Development)]
    #[case(Some("qa"), Profile::Qa)]
    #[case(Some("demo"), Profile::Demo)]
    #[case(Some("stage"), Profile::Stage)]
    #[case(Some("production"), Profile::Production)]
    #[case(Some("Production"), Profile::Development)]
    #[case(Some("uat"), Profile::Development)]
    #[case(None, Profile::Development)]
    fn from_env_selects_profile(#[case] value: Option<&'static str>, #[case] expected: Profile) {
        assert_eq!(Profile::from_env(&env_with_profile(value)), expected);
    }

    #[rstest]
    fn only_development_tolerates_default_uri() {
        assert!(!Profile::Development.requires_explicit_uri());
        for profile in [Profile::Qa, Profile::Demo, Profile::Stage, Profile::Production] {
            assert!(profile.requires_explicit_uri(), "{profile} should require a URI");
        }
    }

    #[rstest]
    fn unknown_profile_error_lists_choices() {
        let err = "uat".parse::<Profile>().expect_err("unknown profile");
        assert_eq!(
            err.to_string(),
            "unknown profile 'uat'; expected development|qa|demo|stage|production"
        );
    }
}
