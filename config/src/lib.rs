#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod client_config;

pub use app_config::get_config_dir;
pub use args::Args;
pub use client_config::{
    MetricCatalog,
    TlsPolicy,
};
use eyre::{
    Context as _,
    Result,
};
use serde::{
    Deserialize,
    Deserializer,
};
use std::{
    fmt,
    path::Path,
    time::Duration,
};
use url::Url;

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

/// Everything a single collection run needs to know.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base URL of the platform API. `session` and `service/...` are resolved below it.
    pub url: Url,
    pub user: String,
    pub password: String,
    pub site_id: String,
    pub limit: u32,
    pub offset: u32,
    pub catalog: MetricCatalog,
    pub accept_invalid_certs: bool,
    #[serde(deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,
    /// Upper bound of hosts sent in one realtime metrics request.
    pub max_hosts_per_request: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url.as_str())
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("site_id", &self.site_id)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("catalog", &self.catalog)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("request_timeout", &self.request_timeout)
            .field("max_hosts_per_request", &self.max_hosts_per_request)
            .finish()
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

impl Config {
    /// Layers, lowest precedence first: built-in defaults, `config.yaml` in the config directory, the file passed
    /// with `--config`, `FC_METRICS_*` environment variables, command-line arguments.
    pub fn new(args: Args) -> Result<Self> {
        Self::load(args, &get_config_dir(), None)
    }

    /// `env` replaces the process environment when given. Values stay strings until deserialization so that
    /// credentials like `0123` survive untouched.
    #[instrument(level = "debug", skip(args, env))]
    fn load(args: Args, config_dir: &Path, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml))
            .add_source(
                config::File::from(config_dir.join("config.yaml"))
                    .format(config::FileFormat::Yaml)
                    .required(false),
            );

        if let Some(file) = &args.config_file {
            debug!(?file, "Adding configuration file from args");
            builder = builder.add_source(config::File::from(file.as_path()).format(config::FileFormat::Yaml));
        }

        builder = builder
            .add_source(config::Environment::with_prefix("FC_METRICS").source(env))
            .add_source(args);

        let cfg: Self = builder
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Incomplete configuration: url, user and password are required")?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overlaid with a single YAML document. Useful where no command line is involved.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml))
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Incomplete configuration: url, user and password are required")?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        eyre::ensure!(!self.user.is_empty(), "user must not be empty");
        eyre::ensure!(!self.password.is_empty(), "password must not be empty");
        eyre::ensure!(self.limit > 0, "limit must be greater than zero");
        eyre::ensure!(
            self.max_hosts_per_request > 0,
            "max_hosts_per_request must be greater than zero"
        );
        eyre::ensure!(
            matches!(self.url.scheme(), "http" | "https"),
            "unsupported URL scheme {:?}",
            self.url.scheme()
        );
        Ok(())
    }

    pub fn tls_policy(&self) -> TlsPolicy {
        TlsPolicy::from_accept_invalid_certs(self.accept_invalid_certs)
    }
}
