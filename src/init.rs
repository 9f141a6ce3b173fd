//! Initialization helpers for the application startup.

use crate::config::{Category, Config};
use anyhow::{Context, Result};
use tokio::fs;
use tracing::info;

/// Sets up the tracing subscriber with the configured filters.
pub fn setup_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = config.log_level.clone();

        // Suppress hickory internals unless explicitly enabled/overridden
        if !filter.contains("hickory_resolver") {
            filter.push_str(",hickory_resolver=off");
        }
        if !filter.contains("hickory_proto") {
            filter.push_str(",hickory_proto=off");
        }

        tracing_subscriber::EnvFilter::new(filter)
    });

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Each run produces fresh lists: make sure the output directory exists and
/// remove any category files left over from a previous run.
pub async fn prepare_output_dir(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output_dir.display()
            )
        })?;

    for category in Category::ALL {
        let path = config.category_path(category);
        match fs::remove_file(&path).await {
            Ok(()) => info!("Removed stale {} list", category),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to remove stale category file {}", path.display())
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config() -> Config {
        let dir = std::env::temp_dir().join(format!("blockharvest-init-{}", uuid::Uuid::now_v7()));
        Config {
            output_dir: dir,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_prepare_creates_dir_and_clears_stale_files() {
        let config = temp_config();
        std::fs::create_dir_all(&config.output_dir).unwrap();
        let stale: PathBuf = config.category_path(Category::Adware);
        std::fs::write(&stale, "old.example.com\n").unwrap();

        prepare_output_dir(&config).await.unwrap();

        assert!(config.output_dir.exists());
        assert!(!stale.exists());
        std::fs::remove_dir_all(&config.output_dir).unwrap();
    }

    #[tokio::test]
    async fn test_prepare_on_missing_dir() {
        let config = temp_config();
        prepare_output_dir(&config).await.unwrap();
        assert!(config.output_dir.exists());
        std::fs::remove_dir_all(&config.output_dir).unwrap();
    }
}
