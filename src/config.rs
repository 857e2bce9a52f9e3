use std::path::PathBuf;

use crate::errors::AppError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_OWNER: &str = "Reykal";

/// Server settings, read from the environment (`.env` is loaded first).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gemini_api_key: String,
    pub model: String,
    /// Whose portfolio the assistant answers questions about.
    pub owner_name: String,
    /// Built frontend to serve at `/`, if any.
    pub frontend_dist: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = var("GEMINI_API_KEY")
            .ok_or_else(|| AppError::MissingConfig { key: "GEMINI_API_KEY".to_string() })?;

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::InvalidConfig { key: "PORT".to_string(), value: raw })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            gemini_api_key,
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            owner_name: var("ASSISTANT_OWNER").unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            frontend_dist: var("FRONTEND_DIST").map(PathBuf::from),
        })
    }
}
