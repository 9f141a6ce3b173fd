use rustc_hash::FxHashSet;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Domains that must never be added to a category file, read once at
/// startup and consulted before any DNS lookup is spent on a candidate.
#[derive(Debug, Default)]
pub struct ExclusionList {
    domains: FxHashSet<String>,
}

impl ExclusionList {
    pub fn empty() -> Self {
        Self::default()
    }

    /// One domain per line; blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut domains = FxHashSet::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            domains.insert(line.to_lowercase());
        }
        Self { domains }
    }

    /// A missing or unreadable file is a config problem for one input, not
    /// a reason to fail the run: log it and carry on with an empty list.
    pub async fn load(path: &Path) -> Self {
        match fs::read_to_string(path).await {
            Ok(contents) => {
                let list = Self::parse(&contents);
                info!(
                    "Loaded {} exclusions from {}",
                    list.len(),
                    path.display()
                );
                list
            }
            Err(e) => {
                warn!(
                    "Could not read exclusion file {}: {} (continuing without exclusions)",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
