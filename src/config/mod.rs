use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chart::DuplicatePolicy;

/// Environment variables overriding configuration start with this prefix,
/// e.g. `COMMITPIE_CHART__DUPLICATE_POLICY=accumulate`.
pub const ENV_PREFIX: &str = "COMMITPIE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub chart: ChartConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorIdentity {
    /// Author name only.
    Name,
    /// `Name <email>`.
    NameEmail,
}

impl std::str::FromStr for AuthorIdentity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "name" => Ok(AuthorIdentity::Name),
            "name-email" => Ok(AuthorIdentity::NameEmail),
            other => Err(anyhow::anyhow!(
                "Unknown author identity '{}' (expected name or name-email)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub max_commits: Option<usize>,
    pub identity: AuthorIdentity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: String,
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chart: ChartConfig {
                duplicate_policy: DuplicatePolicy::Overwrite,
            },
            source: SourceConfig {
                max_commits: Some(20_000),
                identity: AuthorIdentity::Name,
            },
            output: OutputConfig {
                default_format: "html".to_string(),
                output_file: "commits_by_author".to_string(),
            },
        }
    }
}

impl Config {
    /// Defaults, then the optional config file, then `COMMITPIE_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Config::load`], reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = ::config::Config::builder().add_source(
            ::config::Config::try_from(&Self::default())
                .context("Failed to seed default configuration")?,
        );

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let built = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .with_context(|| match path {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })?;

        built
            .try_deserialize()
            .context("Invalid configuration values")
    }
}
