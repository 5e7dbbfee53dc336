use std::{env, path::PathBuf};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// Address the development/test backend (and the interception layer) listens on.
pub const DEV_ENDPOINT: &str = "http://localhost:5173";

/// Path appended to the public base URL in production.
pub const REGISTER_PATH: &str = "register-user";

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

/// Deployment mode. Decides the endpoint and whether request interception may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Production,
    Development,
    Test,
}

impl Mode {
    pub fn is_production(&self) -> bool {
        matches!(self, Mode::Production)
    }

    /// Debug builds default to development, release builds to production.
    pub fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Mode::Development
        } else {
            Mode::Production
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("public_url must be set in production mode")]
    MissingPublicUrl,
    #[error("invalid endpoint url {url:?}: {source}")]
    Invalid {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub mode: Mode,
    /// Public base path of the deployment, e.g. `https://example.org/app`.
    #[serde(default)]
    pub public_url: String,
    /// Request interception outside production (only effective with the `mock` feature).
    /// Unset means on.
    #[serde(default)]
    pub mock: Option<bool>,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Values supplied on the command line; they win over every other layer.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub mode: Option<Mode>,
    pub public_url: Option<String>,
    pub no_mock: bool,
    pub theme: Option<String>,
}

impl Config {
    /// Load defaults → config files → `REGISTRATION_*` env → CLI overrides.
    pub fn new(overrides: &Overrides) -> Result<Self, config::ConfigError> {
        Self::load_from(get_config_dir(), get_data_dir(), overrides)
    }

    pub fn load_from(
        config_dir: PathBuf,
        data_dir: PathBuf,
        overrides: &Overrides,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("mode", Mode::build_default().to_string())?
            .set_default("public_url", "")?
            .set_default("theme", "dark")?
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            debug!(dir = %config_dir.display(), "no configuration file found, using defaults");
        }

        builder = builder
            .add_source(
                config::Environment::with_prefix(PROJECT_NAME.as_str())
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .set_override_option("mode", overrides.mode.map(|m| m.to_string()))?
            .set_override_option("public_url", overrides.public_url.clone())?
            .set_override_option("theme", overrides.theme.clone())?;
        if overrides.no_mock {
            builder = builder.set_override("mock", false)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        if cfg.interception_ignored() {
            warn!("request interception is never active in production mode; ignoring mock = true");
        }
        Ok(cfg)
    }

    pub fn mock_enabled(&self) -> bool {
        self.mock.unwrap_or(true)
    }

    /// `mock = true` was set explicitly but the mode is production.
    pub fn interception_ignored(&self) -> bool {
        self.mode.is_production() && self.mock == Some(true)
    }

    /// Base endpoint for the current mode (without the trailing `/`).
    pub fn endpoint(&self) -> Result<String, EndpointError> {
        resolve_endpoint(self.mode, &self.public_url)
    }

    /// The URL the form is POSTed to: `<endpoint>/`.
    pub fn submit_url(&self) -> Result<Url, EndpointError> {
        submit_url_for(&self.endpoint()?)
    }
}

pub fn resolve_endpoint(mode: Mode, public_url: &str) -> Result<String, EndpointError> {
    match mode {
        Mode::Production => {
            let base = public_url.trim().trim_end_matches('/');
            if base.is_empty() {
                return Err(EndpointError::MissingPublicUrl);
            }
            Ok(format!("{base}/{REGISTER_PATH}"))
        }
        Mode::Development | Mode::Test => Ok(DEV_ENDPOINT.to_string()),
    }
}

pub fn submit_url_for(endpoint: &str) -> Result<Url, EndpointError> {
    let raw = format!("{endpoint}/");
    Url::parse(&raw).map_err(|source| EndpointError::Invalid { url: raw, source })
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "chicken105", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn load(overrides: Overrides) -> Config {
        let dir = PathBuf::from("/nonexistent/registration-config");
        Config::load_from(dir.clone(), dir, &overrides).unwrap()
    }

    #[test]
    fn production_endpoint_uses_public_url() {
        assert_eq!(
            resolve_endpoint(Mode::Production, "https://example.org/app/").unwrap(),
            "https://example.org/app/register-user"
        );
    }

    #[test]
    fn production_without_public_url_is_an_error() {
        assert!(matches!(
            resolve_endpoint(Mode::Production, "  "),
            Err(EndpointError::MissingPublicUrl)
        ));
    }

    #[test]
    fn non_production_endpoints_are_loopback() {
        for mode in [Mode::Development, Mode::Test] {
            assert_eq!(resolve_endpoint(mode, "https://ignored").unwrap(), DEV_ENDPOINT);
        }
    }

    #[test]
    fn submit_url_has_trailing_slash() {
        let url = submit_url_for(DEV_ENDPOINT).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/");
    }

    #[test]
    fn cli_overrides_win() {
        let cfg = load(Overrides {
            mode: Some(Mode::Production),
            public_url: Some("https://example.org".into()),
            no_mock: true,
            theme: None,
        });
        assert_eq!(cfg.mode, Mode::Production);
        assert_eq!(cfg.mock, Some(false));
        assert!(!cfg.interception_ignored());
        assert_eq!(
            cfg.submit_url().unwrap().as_str(),
            "https://example.org/register-user/"
        );
    }

    #[test]
    fn defaults_enable_mocking() {
        let cfg = load(Overrides {
            mode: Some(Mode::Test),
            ..Default::default()
        });
        assert_eq!(cfg.mock, None);
        assert!(cfg.mock_enabled());
        assert_eq!(cfg.theme, "dark");
    }

    #[test]
    fn production_warns_only_for_explicit_mock() {
        let cfg = |mode, mock| Config {
            mode,
            public_url: "https://example.org".into(),
            mock,
            theme: "dark".into(),
            data_dir: PathBuf::new(),
            config_dir: PathBuf::new(),
        };
        assert!(!cfg(Mode::Production, None).interception_ignored());
        assert!(!cfg(Mode::Production, Some(false)).interception_ignored());
        assert!(cfg(Mode::Production, Some(true)).interception_ignored());
        assert!(!cfg(Mode::Development, Some(true)).interception_ignored());
    }
}
