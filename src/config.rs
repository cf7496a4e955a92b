//! Configuration for countryline
//!
//! Settings come from three places, highest precedence first: command line
//! flags, a named section of the INI profile file, and built-in defaults.
//!
//! ```ini
//! [default]
//! base_url = https://restcountries.com/v3.1
//! user_agent = countryline
//! ```

use crate::cmd_args::CommandLineArgs;
use crate::repl::services::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;

/// Default profile file path
pub const DEFAULT_PROFILE_PATH: &str = "~/.countryline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "COUNTRYLINE_PROFILE_PATH";

const BASE_URL_KEY: &str = "base_url";
const USER_AGENT_KEY: &str = "user_agent";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Resolved settings for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    /// `None` keeps the client's built-in agent string
    pub user_agent: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
        }
    }
}

impl AppConfig {
    /// Resolve settings for the profile named on the command line
    pub fn load(cmd_args: &CommandLineArgs) -> Result<Self> {
        let profile_path = get_profile_path();
        let config = Self::from_profile_file(&profile_path, cmd_args.profile())?;
        Ok(config.with_base_url_override(cmd_args.base_url()))
    }

    /// Read `profile` from the INI file at `path`.
    ///
    /// A missing file or section yields the defaults; an unreadable file is an error.
    pub fn from_profile_file(path: &str, profile: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());
        if !path.exists() {
            tracing::debug!("Profile file '{}' not found, using defaults", path.display());
            return Ok(Self::default());
        }

        tracing::debug!("Loading profile '{}' from '{}'", profile, path.display());
        let ini = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;

        let Some(section) = ini.section(Some(profile)) else {
            tracing::debug!("Profile '{}' not found, using defaults", profile);
            return Ok(Self::default());
        };

        let defaults = Self::default();
        Ok(Self {
            base_url: section
                .get(BASE_URL_KEY)
                .map(str::to_string)
                .unwrap_or(defaults.base_url),
            user_agent: section.get(USER_AGENT_KEY).map(str::to_string),
        })
    }

    /// Replace the base URL when one was given explicitly
    pub fn with_base_url_override(mut self, base_url: Option<&str>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url.to_string();
        }
        self
    }
}
