use crate::MetricCatalog;
use clap::Parser;
use std::path::PathBuf;

/// Print realtime metrics for the hosts of a FusionCompute site.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Base URL of the platform API, e.g. `https://fc.example.com:7443`.
    #[clap(long, alias = "fcURL", value_name = "URL")]
    pub url: Option<String>,

    /// Login user name.
    #[clap(long, alias = "fcUser", value_name = "USER")]
    pub user: Option<String>,

    /// Login password.
    #[clap(long, alias = "fcPassword", value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Site identifier the hosts are listed from.
    #[clap(long = "site", value_name = "ID")]
    pub site_id: Option<String>,

    /// Page size of the host listing.
    #[clap(long, value_name = "N")]
    pub limit: Option<u32>,

    /// Offset of the host listing page.
    #[clap(long, value_name = "N")]
    pub offset: Option<u32>,

    /// Metric catalog requested for every host (`host` or `vm`).
    #[clap(long, value_name = "CATALOG")]
    pub catalog: Option<MetricCatalog>,

    /// Skip TLS certificate verification.
    #[clap(long = "insecure", action)]
    pub accept_invalid_certs: bool,

    /// Deadline for every HTTP call, e.g. `30s` or `2m`.
    #[clap(long = "timeout", value_name = "DURATION")]
    pub request_timeout: Option<String>,

    /// Additional configuration file, applied after the user configuration.
    #[clap(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Enables debug logging.
    #[clap(long = "debug", action)]
    pub debug: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(url) = &self.url {
                cache.insert("url".to_string(), url.clone().into());
            }
            if let Some(user) = &self.user {
                cache.insert("user".to_string(), user.clone().into());
            }
            if let Some(password) = &self.password {
                cache.insert("password".to_string(), password.clone().into());
            }
            if let Some(site_id) = &self.site_id {
                cache.insert("site_id".to_string(), site_id.clone().into());
            }
            if let Some(limit) = self.limit {
                cache.insert("limit".to_string(), u64::from(limit).into());
            }
            if let Some(offset) = self.offset {
                cache.insert("offset".to_string(), u64::from(offset).into());
            }
            if let Some(catalog) = self.catalog {
                cache.insert("catalog".to_string(), catalog.to_string().into());
            }
            if self.accept_invalid_certs {
                cache.insert("accept_invalid_certs".to_string(), true.into());
            }
            if let Some(timeout) = &self.request_timeout {
                cache.insert("request_timeout".to_string(), timeout.clone().into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "{}
Authors: {author}

Config directory: {config_dir_path}",
        clap::crate_version!()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Source as _;

    #[test]
    fn accepts_the_legacy_flag_names() {
        let args = Args::try_parse_from([
            "fc-metrics",
            "--fcURL",
            "https://fc.example.com",
            "--fcUser",
            "admin",
            "--fcPassword",
            "secret",
        ])
        .unwrap();
        assert_eq!(args.url.as_deref(), Some("https://fc.example.com"));
        assert_eq!(args.user.as_deref(), Some("admin"));
        assert_eq!(args.password.as_deref(), Some("secret"));
    }

    #[test]
    fn single_dash_legacy_names_are_rejected() {
        assert!(Args::try_parse_from(["fc-metrics", "-fcURL", "https://fc.example.com"]).is_err());
    }

    #[test]
    fn only_given_args_become_config_values() {
        let args = Args::try_parse_from(["fc-metrics", "--site", "7", "--catalog", "vm", "--insecure"]).unwrap();
        let values = args.collect().unwrap();

        assert_eq!(values["site_id"].clone().into_string().unwrap(), "7");
        assert_eq!(values["catalog"].clone().into_string().unwrap(), "vm");
        assert!(values["accept_invalid_certs"].clone().into_bool().unwrap());
        assert!(!values.contains_key("url"));
        assert!(!values.contains_key("limit"));
    }
}
