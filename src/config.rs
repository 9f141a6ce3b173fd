use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_exclusion_file")]
    pub exclusion_file: PathBuf,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_sources")]
    pub sources: Vec<Source>,

    #[serde(default)]
    pub dns: DnsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Source {
    pub url: String,
    pub category: Category,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Adware,
    Malware,
    Privacy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Adware, Category::Malware, Category::Privacy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Adware => "adware",
            Category::Malware => "malware",
            Category::Privacy => "privacy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DnsConfig {
    // "ip:port" entries; empty means Google public DNS.
    #[serde(default)]
    pub nameservers: Vec<String>,
    #[serde(default = "default_dns_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_dns_attempts")]
    pub attempts: usize,
}

// Defaults
fn default_log_level() -> String {
    "info".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("configs")
}
fn default_exclusion_file() -> PathBuf {
    PathBuf::from("configs/exclusion")
}
fn default_user_agent() -> String {
    "blockharvest/1.0".to_string()
}
fn default_fetch_timeout_secs() -> u64 {
    30
}
fn default_dns_timeout_ms() -> u64 {
    3000
}
fn default_dns_attempts() -> usize {
    2
}
fn default_sources() -> Vec<Source> {
    let registry = [
        (
            "https://raw.githubusercontent.com/StevenBlack/hosts/master/hosts",
            Category::Adware,
        ),
        (
            "https://raw.githubusercontent.com/lightswitch05/hosts/master/docs/lists/ads-and-tracking-extended.txt",
            Category::Adware,
        ),
        (
            "https://raw.githubusercontent.com/notracking/hosts-blocklists/master/unbound/unbound.blacklist.conf",
            Category::Malware,
        ),
        (
            "https://raw.githubusercontent.com/lightswitch05/hosts/master/docs/lists/tracking-aggressive-extended.txt",
            Category::Privacy,
        ),
        (
            "https://raw.githubusercontent.com/lightswitch05/hosts/master/docs/lists/facebook-extended.txt",
            Category::Privacy,
        ),
        (
            "https://raw.githubusercontent.com/lightswitch05/hosts/master/docs/lists/hate-and-junk-extended.txt",
            Category::Privacy,
        ),
    ];
    registry
        .into_iter()
        .map(|(url, category)| Source {
            url: url.to_string(),
            category,
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_dir: default_output_dir(),
            exclusion_file: default_exclusion_file(),
            user_agent: default_user_agent(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            sources: default_sources(),
            dns: DnsConfig::default(),
        }
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            nameservers: vec![],
            timeout_ms: default_dns_timeout_ms(),
            attempts: default_dns_attempts(),
        }
    }
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config TOML")?;
        Ok(config)
    }

    pub fn category_path(&self, category: Category) -> PathBuf {
        self.output_dir.join(category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_covers_all_categories() {
        let config = Config::default();
        assert_eq!(config.sources.len(), 6);
        for category in Category::ALL {
            assert!(
                config.sources.iter().any(|s| s.category == category),
                "no default source for {}",
                category
            );
        }
    }

    #[test]
    fn test_category_paths() {
        let config = Config {
            output_dir: PathBuf::from("/tmp/lists"),
            ..Config::default()
        };
        assert_eq!(
            config.category_path(Category::Adware),
            PathBuf::from("/tmp/lists/adware")
        );
        assert_eq!(
            config.category_path(Category::Privacy),
            PathBuf::from("/tmp/lists/privacy")
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            output_dir = "out"

            [[sources]]
            url = "https://example.com/list.txt"
            category = "malware"
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].category, Category::Malware);
        assert_eq!(config.fetch_timeout_secs, default_fetch_timeout_secs());
        assert_eq!(config.dns.timeout_ms, default_dns_timeout_ms());
    }
}
