use crate::{env_required, ConfigError, FromEnv};

/// Cross-origin settings for the browser client.
///
/// Exactly one origin is allowed; it is supplied by the deployment
/// (the address the frontend is served from).
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl CorsConfig {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }
}

impl FromEnv for CorsConfig {
    /// Requires FRONTEND_URL to be set (no default)
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origin = env_required("FRONTEND_URL")?;
        let trimmed = allowed_origin.trim();

        if trimmed.is_empty() {
            return Err(ConfigError::ParseError {
                key: "FRONTEND_URL".to_string(),
                details: "origin cannot be empty".to_string(),
            });
        }

        Ok(Self::new(trimmed))
    }
}
